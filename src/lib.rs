//! Real-time 2D gravitational N-body simulation of disks with elastic contact.
//!
//! Every frame each body is pulled by every other body (inverse square),
//! touching disks exchange momentum along their contact normal and are pushed
//! apart, then motion is integrated with semi-implicit Euler.

pub mod body;
pub mod c_api;
pub mod collision;
pub mod driver;
pub mod error;
pub mod physics;
pub mod placement;
pub mod scenario;
pub mod simulation;
pub mod units;

pub use body::{Body, Mass};
pub use collision::ContactFrame;
pub use driver::{EventSource, Pacing, Renderer};
pub use error::{Error, Result};
pub use physics::{StepMode, StepReport};
pub use scenario::ScenarioConfig;
pub use simulation::{Disk, Simulation};
pub use units::{InitialCondition, Screen};
