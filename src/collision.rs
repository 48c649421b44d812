//! Frictionless elastic collision between two disks.
//!
//! Velocities are split into a component along the contact normal and one
//! along the tangent. Only the normal components are exchanged, using the
//! 1D elastic-collision formula; tangential components pass through.

use crate::body::Body;
use crate::error::{Error, Result};
use ultraviolet::Vec2;

/// Orthonormal basis at a contact point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactFrame {
    /// Unit vector from the first body toward the second.
    pub normal: Vec2,
    /// `normal` rotated a quarter turn counter-clockwise.
    pub tangent: Vec2,
}

impl ContactFrame {
    /// Builds the frame from an already normalized contact normal.
    pub fn new(normal: Vec2) -> Self {
        Self {
            normal,
            tangent: Vec2::new(-normal.y, normal.x),
        }
    }

    /// Builds the frame from the separation `r = other.pos - this.pos`.
    /// Returns `None` when the centers coincide.
    pub fn from_separation(r: Vec2) -> Option<Self> {
        let d = r.mag();
        if d > 0.0 && d.is_finite() {
            Some(Self::new(r / d))
        } else {
            None
        }
    }

    /// Splits `v` into `(normal, tangential)` scalar components.
    pub fn decompose(&self, v: Vec2) -> (f32, f32) {
        (self.normal.dot(v), self.tangent.dot(v))
    }

    /// Inverse of [`ContactFrame::decompose`].
    pub fn compose(&self, vn: f32, vt: f32) -> Vec2 {
        self.normal * vn + self.tangent * vt
    }
}

/// 1D elastic exchange along the normal axis.
///
/// Returns the post-collision normal speeds `(v1n', v2n')`. Equal masses swap
/// the two speeds exactly.
pub fn exchange_normal(m1: f32, v1n: f32, m2: f32, v2n: f32) -> (f32, f32) {
    if m1 == m2 {
        return (v2n, v1n);
    }
    let total = m1 + m2;
    let v1 = (v1n * (m1 - m2) + 2.0 * m2 * v2n) / total;
    let v2 = (v2n * (m2 - m1) + 2.0 * m1 * v1n) / total;
    (v1, v2)
}

/// Applies the elastic impulse to `a` and `b` along `frame`.
pub fn resolve(a: &mut Body, b: &mut Body, frame: &ContactFrame) {
    let (v1n, v1t) = frame.decompose(a.vel);
    let (v2n, v2t) = frame.decompose(b.vel);

    let (v1n, v2n) = exchange_normal(a.mass, v1n, b.mass, v2n);

    a.vel = frame.compose(v1n, v1t);
    b.vel = frame.compose(v2n, v2t);
}

/// Borrows two distinct bodies of a slice mutably.
pub(crate) fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    assert_ne!(i, j, "a body cannot collide with itself");
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

/// Resolves a collision between bodies `i` and `j`, taking the normal from
/// their current centers. Velocities are left untouched when the centers
/// coincide.
pub fn resolve_pair(bodies: &mut [Body], i: usize, j: usize) -> Result<ContactFrame> {
    let frame = ContactFrame::from_separation(bodies[j].pos - bodies[i].pos)
        .ok_or(Error::DegenerateGeometry { a: i, b: j })?;
    let (a, b) = pair_mut(bodies, i, j);
    resolve(a, b, &frame);
    Ok(frame)
}

/// Moves `a` and `b` apart along the normal until they are exactly touching.
/// Each body takes a share of the overlap proportional to the other's mass.
pub fn separate(a: &mut Body, b: &mut Body, frame: &ContactFrame) {
    let contact = a.radius + b.radius;
    let overlap = contact - (b.pos - a.pos).dot(frame.normal);
    let total = a.mass + b.mass;
    let share_a = b.mass / total;

    a.pos -= frame.normal * (overlap * share_a);
    // pin `b` relative to `a` so the final distance is exact
    b.pos = a.pos + frame.normal * contact;
}
