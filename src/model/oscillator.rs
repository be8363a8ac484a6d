use glam::DVec2;

use super::body::{restoring_kick, PhysicsBody, MAX_STEP};

/// Mass block size in pixels
pub const MASS_WIDTH: f64 = 120.0;
pub const MASS_HEIGHT: f64 = 60.0;

/// Vertical spring-mass oscillator. The mass only ever moves along y.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    pub body: PhysicsBody,
    pub center: DVec2,
    pub amplitude: f64,
    pub omega_squared: f64,
    pub width: f64,
    pub height: f64,
}

impl Oscillator {
    /// Mass starts at the center moving at peak velocity, so that
    /// `y(t) = center.y + amplitude * sin(omega * t)`.
    pub fn new(center: DVec2, amplitude: f64, omega_squared: f64) -> Self {
        let body = PhysicsBody::new(center.x, center.y, 0.0, amplitude * omega_squared.sqrt());
        Self {
            body,
            center,
            amplitude,
            omega_squared,
            width: MASS_WIDTH,
            height: MASS_HEIGHT,
        }
    }

    /// Semi-implicit Euler: kick the velocity from the old position, then move.
    pub fn update(&mut self, dt: f64) {
        let dt = dt.min(MAX_STEP);
        restoring_kick(&mut self.body, self.center, self.omega_squared, dt, DVec2::Y);
        self.body.advance(dt);
    }

    pub fn angular_frequency(&self) -> f64 {
        self.omega_squared.sqrt()
    }

    /// Bottom edge of the fixed anchor block, where the spring starts
    pub fn anchor_bottom(&self) -> DVec2 {
        DVec2::new(self.center.x + self.width / 2.0, self.center.y - self.amplitude)
    }

    /// Distance from the anchor bottom down to the top of the mass
    pub fn spring_length(&self) -> f64 {
        self.body.y() - self.center.y + self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_velocity_matches_peak() {
        // omega field 50 -> omega_squared = 50^2 / 2500 = 1
        let osc = Oscillator::new(DVec2::new(300.0, 200.0), 100.0, 1.0);
        assert_eq!(osc.body.vel.y, 100.0);
        assert_eq!(osc.body.vel.x, 0.0);
        assert_eq!(osc.body.pos, osc.center);
    }

    #[test]
    fn test_amplitude_holds_over_full_period() {
        let amplitude = 100.0;
        let mut osc = Oscillator::new(DVec2::new(0.0, 0.0), amplitude, 4.0);
        let dt = 0.01;
        // period = 2*pi/2 ~ 3.14s, run a bit longer than one period
        let steps = (2.0 * std::f64::consts::PI / osc.angular_frequency() / dt).ceil() as usize + 10;

        let mut peak: f64 = 0.0;
        for _ in 0..steps {
            osc.update(dt);
            peak = peak.max((osc.body.y() - osc.center.y).abs());
        }
        assert!(
            (peak - amplitude).abs() <= amplitude * 0.05,
            "peak displacement {peak} drifted from amplitude {amplitude}"
        );
    }

    #[test]
    fn test_motion_stays_vertical() {
        let mut osc = Oscillator::new(DVec2::new(42.0, 10.0), 50.0, 9.0);
        for _ in 0..500 {
            osc.update(0.016);
            assert_eq!(osc.body.x(), osc.center.x);
        }
    }

    #[test]
    fn test_oversized_step_is_clamped() {
        let mut a = Oscillator::new(DVec2::ZERO, 100.0, 4.0);
        let mut b = a.clone();
        a.update(0.5);
        b.update(MAX_STEP);
        assert_eq!(a, b);
    }

    #[test]
    fn test_spring_geometry_at_rest() {
        let osc = Oscillator::new(DVec2::new(100.0, 300.0), 80.0, 4.0);
        assert_eq!(osc.anchor_bottom(), DVec2::new(160.0, 220.0));
        assert_eq!(osc.spring_length(), 80.0);
    }
}
