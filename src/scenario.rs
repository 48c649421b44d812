//! Scenario files: everything needed to build a [`Simulation`] at start-up.
//!
//! ```yaml
//! screen:
//!   width: 1500
//!   height: 900
//! seed: 42            # random placement seed
//! bodies: 100         # body count in random mode
//! dt: 0.016           # fixed timestep, optional
//! mode: pair          # or "sequential"
//! g: 10000.0          # random mode only; derived from units otherwise
//!
//! # optional: physical rows [x, y, radius, vx, vy, mass] in km, km/s, kg
//! initial_conditions:
//!   - [0, 0, 6371.008, 0, 0, 5.97219e24]
//!   - [396649, 0, 1737.4, 0, 1.02, 7.3459e22]
//! ```
//!
//! Without `initial_conditions` the world is seeded randomly.

use crate::error::Result;
use crate::physics::StepMode;
use crate::simulation::Simulation;
use crate::units::{InitialCondition, Screen};

use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path};

fn default_bodies() -> usize {
    Simulation::DEFAULT_N
}

/// Top-level scenario description.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub screen: Screen,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_bodies")]
    pub bodies: usize,
    pub dt: Option<f32>,
    #[serde(default)]
    pub mode: StepMode,
    pub g: Option<f32>,
    pub initial_conditions: Option<Vec<InitialCondition>>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            screen: Screen::default(),
            seed: Simulation::DEFAULT_SEED,
            bodies: Simulation::DEFAULT_N,
            dt: None,
            mode: StepMode::default(),
            g: None,
            initial_conditions: None,
        }
    }
}

impl ScenarioConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// The Earth and the Moon, in km, km/s and kg.
    pub fn earth_moon() -> Self {
        Self {
            initial_conditions: Some(vec![
                [0.0, 0.0, 6371.008, 0.0, 0.0, 5.97219e24].into(),
                [396649.0, 0.0, 1737.4, 0.0, 1.02, 7.3459e22].into(),
            ]),
            ..Self::default()
        }
    }

    /// Builds the world this scenario describes.
    pub fn build(&self) -> Result<Simulation> {
        let dt = self.dt.unwrap_or(Simulation::DEFAULT_DT);
        let mut sim = match &self.initial_conditions {
            Some(rows) => Simulation::from_initial_conditions(rows, self.screen, dt)?,
            None => Simulation::with_params(
                self.bodies,
                self.screen,
                self.seed,
                dt,
                self.g.unwrap_or(Simulation::DEFAULT_G),
            )?,
        };
        sim.set_mode(self.mode);
        Ok(sim)
    }
}
