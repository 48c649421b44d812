//! Frame loop glue between a [`Simulation`] and its outside world.
//!
//! Windowing and drawing live behind [`Renderer`] and [`EventSource`]; the
//! loop only steps physics, hands out [`Disk`]s and paces frames.

use crate::error::Result;
use crate::simulation::{Disk, Simulation};

use std::io::Write;
use std::time::{Duration, Instant};

/// Output sink for one frame's disks.
pub trait Renderer {
    fn draw(&mut self, frame: usize, disks: &[Disk]) -> Result<()>;

    /// Called once the frame is fully drawn.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Per-frame quit signal.
pub trait EventSource {
    fn quit_requested(&mut self) -> bool;
}

/// Discards every frame.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: usize, _disks: &[Disk]) -> Result<()> {
        Ok(())
    }
}

/// Writes `frame,index,x,y,radius` lines.
#[derive(Debug)]
pub struct CsvRenderer<W: Write> {
    out: W,
}

impl<W: Write> CsvRenderer<W> {
    pub fn new(mut out: W) -> Result<Self> {
        writeln!(out, "frame,index,x,y,radius")?;
        Ok(Self { out })
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for CsvRenderer<W> {
    fn draw(&mut self, frame: usize, disks: &[Disk]) -> Result<()> {
        for (index, d) in disks.iter().enumerate() {
            writeln!(self.out, "{frame},{index},{},{},{}", d.x, d.y, d.radius)?;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Requests quit after a fixed number of frames.
#[derive(Debug)]
pub struct FixedFrames {
    remaining: usize,
}

impl FixedFrames {
    pub fn new(frames: usize) -> Self {
        Self { remaining: frames }
    }
}

impl EventSource for FixedFrames {
    fn quit_requested(&mut self) -> bool {
        match self.remaining.checked_sub(1) {
            Some(left) => {
                self.remaining = left;
                false
            }
            None => true,
        }
    }
}

/// How the loop spaces frames and picks `dt`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pacing {
    /// Step as fast as possible with the simulation's fixed `dt`.
    Unthrottled,
    /// Sleep to the target rate, keep the fixed `dt`.
    Throttled { fps: u32 },
    /// Sleep to the target rate and use the measured frame time as `dt`.
    RealTime { fps: u32 },
}

/// Sleeps so that successive ticks are at least `1 / fps` apart.
#[derive(Debug)]
pub struct FrameLimiter {
    target: Duration,
    last: Instant,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            target: Duration::from_secs(1) / fps.max(1),
            last: Instant::now(),
        }
    }

    /// Waits out the rest of the frame and returns the seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        let spent = self.last.elapsed();
        if spent < self.target {
            std::thread::sleep(self.target - spent);
        }
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        elapsed.as_secs_f32()
    }
}

/// Outcome of [`run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    pub contacts: usize,
}

/// Steps `sim` and draws each frame until `events` asks to quit.
///
/// A step that leaves non-finite state ends the loop with that error.
pub fn run<R, E>(
    sim: &mut Simulation,
    renderer: &mut R,
    events: &mut E,
    pacing: Pacing,
) -> Result<RunSummary>
where
    R: Renderer + ?Sized,
    E: EventSource + ?Sized,
{
    let mut limiter = match pacing {
        Pacing::Unthrottled => None,
        Pacing::Throttled { fps } | Pacing::RealTime { fps } => Some(FrameLimiter::new(fps)),
    };
    let mut summary = RunSummary::default();
    let mut disks = Vec::with_capacity(sim.bodies.len());

    disks.extend(sim.disks());
    renderer.draw(sim.frame, &disks)?;
    renderer.present()?;

    while !events.quit_requested() {
        let report = sim.step()?;
        summary.frames += 1;
        summary.contacts += report.contacts;

        disks.clear();
        disks.extend(sim.disks());
        renderer.draw(sim.frame, &disks)?;
        renderer.present()?;

        if let Some(limiter) = limiter.as_mut() {
            let elapsed = limiter.tick();
            if let Pacing::RealTime { .. } = pacing {
                sim.dt = elapsed;
            }
        }
    }

    tracing::info!(
        frames = summary.frames,
        contacts = summary.contacts,
        "simulation loop finished"
    );
    Ok(summary)
}
