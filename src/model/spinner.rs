use glam::DVec2;

use super::body::{restoring_kick, PhysicsBody, MAX_STEP};

/// Radius of the moving bob in pixels
pub const BOB_RADIUS: f64 = 30.0;
/// Radius of the fixed hub drawn at the center
pub const HUB_RADIUS: f64 = 10.0;

/// A bob pulled toward a fixed center on both axes. Started in quadrature it
/// traces a near-circular orbit of radius `amplitude`.
#[derive(Debug, Clone, PartialEq)]
pub struct Spinner {
    pub body: PhysicsBody,
    pub center: DVec2,
    pub amplitude: f64,
    pub omega_squared: f64,
    pub radius: f64,
}

impl Spinner {
    pub fn new(center: DVec2, amplitude: f64, omega_squared: f64) -> Self {
        // x-mode at rest at its extreme, y-mode at peak velocity
        let body = PhysicsBody::new(
            center.x + amplitude,
            center.y,
            0.0,
            amplitude * omega_squared.sqrt(),
        );
        Self {
            body,
            center,
            amplitude,
            omega_squared,
            radius: BOB_RADIUS,
        }
    }

    pub fn update(&mut self, dt: f64) {
        let dt = dt.min(MAX_STEP);
        restoring_kick(&mut self.body, self.center, self.omega_squared, dt, DVec2::ONE);
        self.body.advance(dt);
    }

    pub fn angular_frequency(&self) -> f64 {
        self.omega_squared.sqrt()
    }

    /// Current distance of the bob from the center
    pub fn orbit_distance(&self) -> f64 {
        self.body.pos.distance(self.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_quadrature() {
        let sp = Spinner::new(DVec2::new(400.0, 250.0), 100.0, 4.0);
        assert_eq!(sp.body.pos, DVec2::new(500.0, 250.0));
        assert_eq!(sp.body.vel, DVec2::new(0.0, 200.0));
        assert_eq!(sp.radius, BOB_RADIUS);
    }

    #[test]
    fn test_orbit_stays_near_circular_over_revolution() {
        let amplitude = 100.0;
        let mut sp = Spinner::new(DVec2::new(400.0, 250.0), amplitude, 4.0);
        let dt = 0.01;
        let steps = (2.0 * std::f64::consts::PI / sp.angular_frequency() / dt).ceil() as usize + 10;

        for step in 0..steps {
            sp.update(dt);
            let r = sp.orbit_distance();
            assert!(
                (r - amplitude).abs() <= amplitude * 0.05,
                "step {step}: orbit radius {r} left the band around {amplitude}"
            );
        }
    }

    #[test]
    fn test_orbit_actually_revolves() {
        let mut sp = Spinner::new(DVec2::ZERO, 50.0, 1.0);
        let mut saw_left = false;
        for _ in 0..700 {
            sp.update(0.01);
            if sp.body.x() < -40.0 {
                saw_left = true;
            }
        }
        assert!(saw_left, "bob never reached the far side of its orbit");
    }
}
