use crate::body::Body;
use crate::error::{Error, Result};
use crate::units::Screen;
use ultraviolet::Vec2;

/// Radius of every randomly placed body.
pub const RANDOM_RADIUS: f32 = 5.0;

/// Draws allowed per body before seeding gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Scatters `n` resting bodies of radius [`RANDOM_RADIUS`] over `screen`.
/// - Positions are whole pixels drawn uniformly from `[0, width) x [0, height)`.
/// - Each body is redrawn until it is clear of every body placed before it.
/// - The same `seed` always yields the same layout.
pub fn random_bodies(n: usize, screen: Screen, seed: u64) -> Result<Vec<Body>> {
    let screen = Screen::new(screen.width, screen.height)?;
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut bodies: Vec<Body> = Vec::with_capacity(n);

    while bodies.len() < n {
        let mut attempts = 0;
        let body = loop {
            if attempts == MAX_PLACEMENT_ATTEMPTS {
                tracing::warn!(
                    placed = bodies.len(),
                    requested = n,
                    "screen too crowded to place another body"
                );
                return Err(Error::Placement {
                    placed: bodies.len(),
                    requested: n,
                    attempts,
                });
            }
            attempts += 1;

            let pos = Vec2::new(
                rng.u32(0..screen.width) as f32,
                rng.u32(0..screen.height) as f32,
            );
            let candidate = Body::new(pos, Vec2::zero(), RANDOM_RADIUS)?;
            if is_clear(&candidate, &bodies) {
                break candidate;
            }
        };
        bodies.push(body);
    }

    Ok(bodies)
}

/// True when `candidate` is strictly apart from every body in `placed`.
pub fn is_clear(candidate: &Body, placed: &[Body]) -> bool {
    placed
        .iter()
        .all(|o| (candidate.pos - o.pos).mag() > candidate.radius + o.radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_do_not_overlap() {
        let bodies = random_bodies(100, Screen::default(), 7).unwrap();
        assert_eq!(bodies.len(), 100);
        for (i, a) in bodies.iter().enumerate() {
            assert!(is_clear(a, &bodies[i + 1..]));
            assert_eq!(a.radius, RANDOM_RADIUS);
            assert_eq!(a.mass, RANDOM_RADIUS / 2.0);
            assert_eq!(a.vel, Vec2::zero());
            assert!(a.pos.x >= 0.0 && a.pos.x < 1500.0);
            assert!(a.pos.y >= 0.0 && a.pos.y < 900.0);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = random_bodies(20, Screen::default(), 42).unwrap();
        let b = random_bodies(20, Screen::default(), 42).unwrap();
        let c = random_bodies(20, Screen::default(), 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn crowded_screen_fails() {
        // a 10x10 screen holds two radius-5 disks at most, in opposite corners
        let err = random_bodies(5, Screen { width: 10, height: 10 }, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::Placement {
                requested: 5,
                attempts: MAX_PLACEMENT_ATTEMPTS,
                ..
            }
        ));
    }

    #[test]
    fn empty_screen_is_rejected() {
        assert!(matches!(
            random_bodies(1, Screen { width: 0, height: 10 }, 1),
            Err(Error::InvalidParameter(_))
        ));
    }
}
