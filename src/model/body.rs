use glam::DVec2;

/// Longest step (seconds) a single integration may take.
pub const MAX_STEP: f64 = 0.025;

/// A point mass with a position and an instantaneous velocity.
///
/// If the velocity is constant, the position moves by exactly `vel` over one
/// second of simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicsBody {
    pub pos: DVec2,
    pub vel: DVec2,
}

impl PhysicsBody {
    pub fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            vel: DVec2::new(dx, dy),
        }
    }

    /// Body at rest at `pos`
    pub fn at_rest(pos: DVec2) -> Self {
        Self { pos, vel: DVec2::ZERO }
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }

    /// Move by `vel * dt`. Steps longer than [`MAX_STEP`] are shortened to it.
    pub fn advance(&mut self, dt: f64) {
        let dt = dt.min(MAX_STEP);
        self.pos += self.vel * dt;
    }

    pub fn distance_squared(&self, other: &PhysicsBody) -> f64 {
        self.pos.distance_squared(other.pos)
    }
}

/// Velocity kick from a linear restoring force toward `center`, on the axes
/// selected by `mask` (1.0 = active, 0.0 = frozen).
pub(crate) fn restoring_kick(body: &mut PhysicsBody, center: DVec2, omega_squared: f64, dt: f64, mask: DVec2) {
    body.vel -= (body.pos - center) * omega_squared * dt * mask;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_linear_below_max_step() {
        for &dt in &[0.0, 0.001, 0.01, 0.016, MAX_STEP] {
            let mut body = PhysicsBody::new(10.0, -4.0, 3.0, -7.5);
            body.advance(dt);
            assert!((body.x() - (10.0 + 3.0 * dt)).abs() < 1e-12);
            assert!((body.y() - (-4.0 - 7.5 * dt)).abs() < 1e-12);
            assert_eq!(body.vel, DVec2::new(3.0, -7.5), "advance must not touch velocity");
        }
    }

    #[test]
    fn test_advance_never_exceeds_max_step() {
        let mut body = PhysicsBody::new(0.0, 0.0, 100.0, 40.0);
        body.advance(1.0);
        assert!((body.x() - 100.0 * MAX_STEP).abs() < 1e-12);
        assert!((body.y() - 40.0 * MAX_STEP).abs() < 1e-12);
    }

    #[test]
    fn test_distance_squared() {
        let a = PhysicsBody::new(1.0, 2.0, 9.0, 9.0);
        let b = PhysicsBody::new(4.0, 6.0, 0.0, 0.0);
        assert_eq!(a.distance_squared(&b), 25.0);
        assert_eq!(b.distance_squared(&a), 25.0);
        assert_eq!(a.distance_squared(&a), 0.0);
    }

    #[test]
    fn test_restoring_kick_respects_mask() {
        let mut body = PhysicsBody::at_rest(DVec2::new(12.0, 8.0));
        restoring_kick(&mut body, DVec2::new(10.0, 10.0), 4.0, 0.5, DVec2::new(0.0, 1.0));
        assert_eq!(body.vel.x, 0.0);
        assert_eq!(body.vel.y, 4.0);
    }
}
