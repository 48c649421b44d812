//! One frame of gravity, contact response and integration.
//!
//! Two orderings are available:
//!
//! - [`StepMode::PairResolved`] computes every acceleration from the
//!   frame-start state, then resolves each touching pair exactly once, then
//!   integrates. Accelerations do not depend on outer iteration order. A
//!   touching pair that is already separating gets no impulse, only
//!   depenetration. Contacts are separated in a single pass, so in a chain of
//!   overlapping disks only the most recently separated pair is guaranteed to
//!   end exactly touching; earlier pairs may be pushed back into overlap.
//! - [`StepMode::Sequential`] walks the bodies in order and mutates in place:
//!   a contact replaces the body's accumulated acceleration with the pair's
//!   clamped-distance pull, and a pair is resolved once from each member's
//!   pass. This reproduces the classic desktop behaviour for comparison runs.
//!
//! Coincident centers have no defined direction; such pairs contribute no
//! force and no contact and are counted in [`StepReport::degenerate_pairs`].

use crate::body::Body;
use crate::collision::{self, ContactFrame};
use rayon::prelude::*;
use serde::Deserialize;
use ultraviolet::Vec2;

/// Ordering of gravity, contact response and integration within a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMode {
    /// Read-only force pass, single resolution per contact pair.
    #[default]
    #[serde(alias = "pair")]
    PairResolved,
    /// In-place body-by-body update with acceleration override on contact.
    Sequential,
}

/// What happened during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Contact resolutions applied.
    pub contacts: usize,
    /// Ordered pairs skipped because their centers coincided.
    pub degenerate_pairs: usize,
}

/// Gravitational acceleration on body `i` from every other body.
///
/// A pair in contact is pulled as if its centers were exactly touching, which
/// keeps the force bounded. Returns the acceleration and the number of
/// skipped coincident pairs.
pub fn acceleration_on(bodies: &[Body], i: usize, g: f32) -> (Vec2, usize) {
    let b = &bodies[i];
    let mut acc = Vec2::zero();
    let mut degenerate = 0;

    for (j, o) in bodies.iter().enumerate() {
        if j == i {
            continue;
        }
        let r = o.pos - b.pos;
        let d2 = r.mag_sq();
        if d2 == 0.0 {
            degenerate += 1;
            continue;
        }
        let d = d2.sqrt();
        let contact = b.radius + o.radius;
        let d2 = if d <= contact { contact * contact } else { d2 };

        acc += r / d * (g * o.mass / d2);
    }

    (acc, degenerate)
}

/// Unordered pairs `(i, j)`, `i < j`, whose disks overlap or touch.
pub fn find_contacts(bodies: &[Body], out: &mut Vec<(usize, usize)>) {
    out.clear();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let r = bodies[j].pos - bodies[i].pos;
            let d2 = r.mag_sq();
            let contact = bodies[i].radius + bodies[j].radius;
            if d2 > 0.0 && d2 <= contact * contact {
                out.push((i, j));
            }
        }
    }
}

/// Advances `bodies` by `dt` with the pair-resolved ordering.
///
/// `contacts` is scratch space reused between frames.
pub fn step_pair_resolved(
    bodies: &mut [Body],
    dt: f32,
    g: f32,
    use_rayon: bool,
    contacts: &mut Vec<(usize, usize)>,
) -> StepReport {
    let mut report = StepReport::default();

    let accelerations: Vec<(Vec2, usize)> = {
        let frozen: &[Body] = bodies;
        if use_rayon {
            (0..frozen.len())
                .into_par_iter()
                .map(|i| acceleration_on(frozen, i, g))
                .collect()
        } else {
            (0..frozen.len())
                .map(|i| acceleration_on(frozen, i, g))
                .collect()
        }
    };
    for (body, (acc, degenerate)) in bodies.iter_mut().zip(accelerations) {
        body.acc = acc;
        report.degenerate_pairs += degenerate;
    }

    find_contacts(bodies, contacts);
    for &(i, j) in contacts.iter() {
        // earlier separations in this pass may have moved either body
        let Some(frame) = ContactFrame::from_separation(bodies[j].pos - bodies[i].pos) else {
            continue;
        };
        let (a, b) = collision::pair_mut(bodies, i, j);
        // a pair already moving apart only needs pushing out of overlap
        if (b.vel - a.vel).dot(frame.normal) <= 0.0 {
            collision::resolve(a, b, &frame);
        }
        collision::separate(a, b, &frame);
        report.contacts += 1;
    }
    if report.contacts > 0 {
        tracing::debug!(contacts = report.contacts, "resolved contact pairs");
    }

    for body in bodies.iter_mut() {
        body.update(dt);
    }

    report
}

/// Advances `bodies` by `dt` body by body, mutating in place.
pub fn step_sequential(bodies: &mut [Body], dt: f32, g: f32) -> StepReport {
    let mut report = StepReport::default();

    for i in 0..bodies.len() {
        let mut acc = Vec2::zero();

        for j in 0..bodies.len() {
            if j == i {
                continue;
            }
            let r = bodies[j].pos - bodies[i].pos;
            let d2 = r.mag_sq();
            if d2 == 0.0 {
                report.degenerate_pairs += 1;
                continue;
            }
            let d = d2.sqrt();
            let normal = r / d;
            acc += normal * (g * bodies[j].mass / d2);

            let contact = bodies[i].radius + bodies[j].radius;
            if d <= contact {
                let frame = ContactFrame::new(normal);
                let (b, o) = collision::pair_mut(bodies, i, j);
                collision::resolve(b, o, &frame);
                acc = normal * (g * o.mass / (contact * contact));
                b.pos = o.pos - normal * contact;
                report.contacts += 1;
            }
        }

        let b = &mut bodies[i];
        b.acc = acc;
        b.update(dt);
    }

    if report.contacts > 0 {
        tracing::debug!(contacts = report.contacts, "sequential contact resolutions");
    }
    report
}
