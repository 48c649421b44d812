//! C ABI for host renderers. A host owns the returned handle, steps it once
//! per frame and reads the `#[repr(C)]` [`Body`] array to draw disks.
//!
//! Fallible calls return `0` on success and `-1` on failure or a null handle.

use crate::{body::Body, simulation::Simulation, units::Screen};
use ultraviolet::Vec2;

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Create(
    width: u32,
    height: u32,
    n: usize,
    seed: u64,
) -> *mut Simulation {
    let screen = Screen { width, height };
    match Simulation::with_params(n, screen, seed, Simulation::DEFAULT_DT, Simulation::DEFAULT_G) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(e) => {
            tracing::error!("failed to create simulation: {e}");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Step(handle: *mut Simulation) -> i32 {
    match unsafe { handle.as_mut() } {
        Some(sim) => match sim.step() {
            Ok(_) => 0,
            Err(e) => {
                tracing::error!("step failed: {e}");
                -1
            }
        },
        None => -1,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SetTimestep(handle: *mut Simulation, dt: f32) -> i32 {
    match unsafe { handle.as_mut() } {
        Some(sim) if dt.is_finite() && dt >= 0.0 => {
            sim.dt = dt;
            0
        }
        _ => -1,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Reset(handle: *mut Simulation, n: usize) -> i32 {
    match unsafe { handle.as_mut() } {
        Some(sim) => match sim.reset(n) {
            Ok(()) => 0,
            Err(e) => {
                tracing::error!("reset failed: {e}");
                -1
            }
        },
        None => -1,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyCount(handle: *const Simulation) -> usize {
    let sim = unsafe { handle.as_ref() };
    sim.map_or(0, |sim| sim.bodies.len())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodies(handle: *const Simulation) -> *const Body {
    let sim = unsafe { handle.as_ref() };
    sim.map_or(std::ptr::null(), |sim| sim.bodies.as_ptr())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_AddBody(
    handle: *mut Simulation,
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    mass: f32,
    radius: f32,
) -> i32 {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return -1;
    };
    match Body::with_mass(Vec2::new(x, y), Vec2::new(vx, vy), radius, mass) {
        Ok(body) => {
            sim.bodies.push(body);
            0
        }
        Err(e) => {
            tracing::warn!("rejected body: {e}");
            -1
        }
    }
}

/// Adds the velocity kick `(dvx, dvy)` to every body whose center lies within
/// `radius` of `(x, y)`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_ApplyImpulse(
    handle: *mut Simulation,
    x: f32,
    y: f32,
    dvx: f32,
    dvy: f32,
    radius: f32,
) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        let pos = Vec2::new(x, y);
        let kick = Vec2::new(dvx, dvy);
        let r_sq = radius * radius;

        for body in &mut sim.bodies {
            let d = body.pos - pos;
            if d.mag_sq() < r_sq {
                body.vel += kick;
            }
        }
    }
}
