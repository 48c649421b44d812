use crate::{
    body::Body,
    error::{Error, Result},
    physics::{self, StepMode, StepReport},
    placement,
    units::{self, InitialCondition, Screen},
};

use ultraviolet::Vec2;

/// What the renderer needs to draw one body.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disk {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Owns the bodies and the constants that drive them.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Time step per frame, in seconds.
    pub dt: f32,
    /// Gravitational constant in simulation units.
    pub g: f32,
    /// Frames stepped so far.
    pub frame: usize,
    /// All bodies, in interaction order.
    pub bodies: Vec<Body>,
    /// Ordering of gravity and contact response.
    pub mode: StepMode,
    /// Whether the gravity pass runs on the Rayon pool.
    pub use_rayon: bool,
    /// Screen the bodies were seeded on.
    pub screen: Screen,
    /// Seed used for random placement.
    pub seed: u64,
    contacts: Vec<(usize, usize)>,
}

impl Simulation {
    /// Default constants.
    pub const DEFAULT_DT: f32 = 1.0 / 60.0;
    pub const DEFAULT_N: usize = 100;
    pub const DEFAULT_G: f32 = 10_000.0;
    pub const DEFAULT_SEED: u64 = 0;

    /// Randomly seeded world with default parameters.
    pub fn new() -> Result<Self> {
        Self::with_params(
            Self::DEFAULT_N,
            Screen::default(),
            Self::DEFAULT_SEED,
            Self::DEFAULT_DT,
            Self::DEFAULT_G,
        )
    }

    /// Scatters `n` non-overlapping bodies over `screen`.
    pub fn with_params(n: usize, screen: Screen, seed: u64, dt: f32, g: f32) -> Result<Self> {
        let bodies = placement::random_bodies(n, screen, seed)?;
        let mut sim = Self::with_bodies(bodies, dt, g)?;
        sim.screen = screen;
        sim.seed = seed;
        tracing::info!(n, seed, width = screen.width, height = screen.height, "seeded random world");
        Ok(sim)
    }

    /// Builds a world from physical initial conditions; `G` comes from the unit scaling.
    pub fn from_initial_conditions(
        rows: &[InitialCondition],
        screen: Screen,
        dt: f32,
    ) -> Result<Self> {
        let normalized = units::normalize(rows, screen)?;
        let mut sim = Self::with_bodies(normalized.bodies, dt, normalized.g)?;
        sim.screen = screen;
        Ok(sim)
    }

    /// Wraps existing bodies.
    pub fn with_bodies(bodies: Vec<Body>, dt: f32, g: f32) -> Result<Self> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(Error::invalid(format!("dt must be finite and >= 0, got {dt}")));
        }
        if !g.is_finite() {
            return Err(Error::invalid(format!("G must be finite, got {g}")));
        }
        if let Some(index) = bodies.iter().position(|b| !b.is_finite()) {
            return Err(Error::invalid(format!("body {index} has non-finite state")));
        }

        Ok(Self {
            dt,
            g,
            frame: 0,
            bodies,
            mode: StepMode::default(),
            use_rayon: false,
            screen: Screen::default(),
            seed: Self::DEFAULT_SEED,
            contacts: Vec::new(),
        })
    }

    /// Replaces the bodies with `n` fresh random ones on the same screen and seed.
    pub fn reset(&mut self, n: usize) -> Result<()> {
        self.bodies = placement::random_bodies(n, self.screen, self.seed)?;
        self.frame = 0;
        Ok(())
    }

    /// Sets whether to use Rayon for the gravity pass.
    pub fn set_use_rayon(&mut self, use_rayon: bool) {
        self.use_rayon = use_rayon;
    }

    pub fn set_mode(&mut self, mode: StepMode) {
        self.mode = mode;
    }

    /// Advances the simulation by one step.
    /// Fails with [`Error::NonFiniteState`] if any body ends up with NaN or infinity.
    pub fn step(&mut self) -> Result<StepReport> {
        let report = match self.mode {
            StepMode::PairResolved => physics::step_pair_resolved(
                &mut self.bodies,
                self.dt,
                self.g,
                self.use_rayon,
                &mut self.contacts,
            ),
            StepMode::Sequential => physics::step_sequential(&mut self.bodies, self.dt, self.g),
        };
        self.frame += 1;

        if report.degenerate_pairs > 0 {
            tracing::debug!(
                frame = self.frame,
                pairs = report.degenerate_pairs,
                "skipped pairs with coincident centers"
            );
        }
        self.check_finite()?;
        Ok(report)
    }

    /// Fails on the first body holding NaN or infinity.
    pub fn check_finite(&self) -> Result<()> {
        match self.bodies.iter().position(|b| !b.is_finite()) {
            Some(index) => {
                tracing::error!(index, frame = self.frame, "non-finite body state");
                Err(Error::NonFiniteState {
                    index,
                    frame: self.frame,
                })
            }
            None => Ok(()),
        }
    }

    /// Position and radius of every body, in order.
    pub fn disks(&self) -> impl ExactSizeIterator<Item = Disk> + '_ {
        self.bodies.iter().map(|b| Disk {
            x: b.pos.x,
            y: b.pos.y,
            radius: b.radius,
        })
    }

    /// Sum of all momenta.
    pub fn total_momentum(&self) -> Vec2 {
        self.bodies
            .iter()
            .fold(Vec2::zero(), |acc, b| acc + b.momentum())
    }

    /// Sum of `m v² / 2` over all bodies.
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.mass * b.vel.mag_sq())
            .sum()
    }
}
