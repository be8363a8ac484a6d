// MODEL: bodies and the two harmonic demos
pub mod body;
pub mod oscillator;
pub mod spinner;

pub use body::{PhysicsBody, MAX_STEP};
pub use oscillator::Oscillator;
pub use spinner::Spinner;
