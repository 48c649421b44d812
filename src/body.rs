use crate::error::{Error, Result};
use ultraviolet::Vec2;

/// How a body's mass is chosen at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mass {
    /// Half the radius.
    Derived,
    /// Caller-supplied, must be finite and positive.
    Explicit(f32),
}

/// A simulated disk: a non-rotating point mass with a collision radius.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Center of the disk.
    pub pos: Vec2,
    /// Velocity vector.
    pub vel: Vec2,
    /// Acceleration applied in the most recent step.
    pub acc: Vec2,
    /// Mass of the body.
    pub mass: f32,
    /// Collision and visual radius.
    pub radius: f32,
}

impl Body {
    /// Creates a body whose mass defaults to `radius / 2`.
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Result<Self> {
        Self::try_new(pos, vel, radius, Mass::Derived)
    }

    /// Creates a body with an explicit mass.
    pub fn with_mass(pos: Vec2, vel: Vec2, radius: f32, mass: f32) -> Result<Self> {
        Self::try_new(pos, vel, radius, Mass::Explicit(mass))
    }

    /// Validates radius and mass, then builds the body with zero acceleration.
    pub fn try_new(pos: Vec2, vel: Vec2, radius: f32, mass: Mass) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::invalid(format!("radius must be > 0, got {radius}")));
        }
        let mass = match mass {
            Mass::Derived => radius / 2.0,
            Mass::Explicit(m) if m.is_finite() && m > 0.0 => m,
            Mass::Explicit(m) => {
                return Err(Error::invalid(format!("mass must be > 0, got {m}")));
            }
        };

        Ok(Self {
            pos,
            vel,
            acc: Vec2::zero(),
            mass,
            radius,
        })
    }

    /// Momentum `m * v`.
    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }

    /// True when position and velocity hold no NaN or infinity.
    pub fn is_finite(&self) -> bool {
        self.pos.x.is_finite()
            && self.pos.y.is_finite()
            && self.vel.x.is_finite()
            && self.vel.y.is_finite()
    }

    /// Advances position and velocity by `dt` using the stored acceleration.
    /// Semi-implicit Euler: velocity first, then position with the new velocity.
    pub fn update(&mut self, dt: f32) {
        self.vel += self.acc * dt;
        self.pos += self.vel * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_defaults_to_half_radius() {
        for radius in [0.5_f32, 1.0, 5.0, 123.25] {
            let b = Body::new(Vec2::zero(), Vec2::zero(), radius).unwrap();
            assert_eq!(b.mass, radius / 2.0);
        }
    }

    #[test]
    fn explicit_mass_is_kept() {
        let b = Body::with_mass(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), 2.0, 7.5).unwrap();
        assert_eq!(b.mass, 7.5);
        assert_eq!(b.radius, 2.0);
        assert_eq!(b.pos, Vec2::new(1.0, 2.0));
        assert_eq!(b.vel, Vec2::new(3.0, 4.0));
        assert_eq!(b.acc, Vec2::zero());
    }

    #[test]
    fn rejects_non_positive_radius_and_mass() {
        assert!(matches!(
            Body::new(Vec2::zero(), Vec2::zero(), 0.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(Body::new(Vec2::zero(), Vec2::zero(), -3.0).is_err());
        assert!(Body::new(Vec2::zero(), Vec2::zero(), f32::NAN).is_err());
        assert!(Body::with_mass(Vec2::zero(), Vec2::zero(), 1.0, 0.0).is_err());
        assert!(Body::with_mass(Vec2::zero(), Vec2::zero(), 1.0, -2.0).is_err());
    }

    #[test]
    fn update_is_semi_implicit() {
        let mut b = Body::new(Vec2::zero(), Vec2::new(1.0, 0.0), 1.0).unwrap();
        b.acc = Vec2::new(0.0, 2.0);
        b.update(0.5);
        // velocity gets the kick before position moves
        assert_eq!(b.vel, Vec2::new(1.0, 1.0));
        assert_eq!(b.pos, Vec2::new(0.5, 0.5));
    }
}
