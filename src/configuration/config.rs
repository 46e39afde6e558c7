//! Configuration types for loading solar system scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – sequential or parallel ticks, worker pool size
//! - [`ParametersConfig`] – tick length, target frame rate, constants
//! - [`ScoringConfig`]    – force cache staleness constants
//! - [`BodyConfig`]       – one record per celestial body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Body records use the camelCase field names of the persisted body format:
//!
//! ```yaml
//! engine:
//!   parallel: true          # false -> one thread, true -> worker pool
//!   workers: 4              # optional, defaults to hardware concurrency
//!
//! parameters:
//!   dt: 3600.0              # seconds per tick
//!   target_fps: 30.0
//!   steps: 240
//!   gravitational_constant: 6.6743e-20   # optional, km^3 kg^-1 s^-2
//!   scoring:                # optional
//!     min_score: 1
//!     max_score: 100
//!     log_base: 10.0
//!     log_range: 15.0
//!
//! celestial_bodies:
//!   - type: Star
//!     name: Sun
//!     mass: 1.989e30
//!     radius: 696340.0
//!     position: { x: 0.0, y: 0.0, z: 0.0 }
//!     velocity: { x: 0.0, y: 0.0, z: 0.0 }
//!     angularVelocity: 2.865e-6
//!     luminosity: 3.828e26
//!     surfaceTemperature: 5778.0
//!   - type: Planet
//!     name: Earth
//!     mass: 5.972e24
//!     radius: 6371.0
//!     position: { x: 1.496e8, y: 0.0, z: 0.0 }
//!     velocity: { x: 0.0, y: 29.78, z: 0.0 }
//!     angularVelocity: 7.292e-5
//! ```
//!
//! The scenario builder then maps this configuration into the runtime
//! [`SolarSystem`](crate::simulation::solar_system::SolarSystem).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::simulation::body::{BodyKind, BodyRecord};
use crate::simulation::cache::ScoringPolicy;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::units::G_KM;
use crate::simulation::vector::NVec3;

/// Runtime engine options
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub parallel: bool, // `true` - evaluate the force cache on a worker pool
    #[serde(default)]
    pub workers: Option<usize>, // worker threads, `None` - one per hardware thread
}

/// Force cache staleness constants; any omitted field keeps its default
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ScoringConfig {
    pub min_score: u32,
    pub max_score: u32,
    pub log_base: f64,
    pub log_range: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let p = ScoringPolicy::default();
        Self {
            min_score: p.min_score,
            max_score: p.max_score,
            log_base: p.log_base,
            log_range: p.log_range,
        }
    }
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,         // seconds per tick
    pub target_fps: f64, // frame rate the score decay is paced against
    #[serde(default)]
    pub steps: usize, // ticks to run
    #[serde(default)]
    pub gravitational_constant: Option<f64>, // km^3 kg^-1 s^-2, defaults to G_KM
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Star,
    Planet,
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct Vec3Config {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Vec3Config> for NVec3 {
    fn from(v: Vec3Config) -> Self {
        NVec3::new(v.x, v.y, v.z)
    }
}

/// One body's persisted record
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BodyConfig {
    #[serde(rename = "type")]
    pub body_type: BodyType,
    pub name: String,
    pub mass: f64,   // kg
    pub radius: f64, // km
    pub position: Vec3Config, // km
    #[serde(default)]
    pub velocity: Vec3Config, // km/s
    #[serde(default)]
    pub angular_velocity: f64, // rad/s
    pub luminosity: Option<f64>, // W, stars only
    pub surface_temperature: Option<f64>, // K, stars only
}

impl BodyConfig {
    pub fn to_record(&self) -> Result<BodyRecord> {
        let kind = match self.body_type {
            BodyType::Planet => BodyKind::Planet,
            BodyType::Star => {
                let (Some(luminosity), Some(surface_temperature)) = (self.luminosity, self.surface_temperature) else {
                    return Err(SimError::Configuration(format!(
                        "star `{}` needs both luminosity and surfaceTemperature",
                        self.name
                    )));
                };
                BodyKind::Star { luminosity, surface_temperature }
            }
        };

        Ok(BodyRecord {
            kind,
            name: self.name.clone(),
            mass: self.mass,
            radius: self.radius,
            position: self.position.into(),
            velocity: self.velocity.into(),
            angular_velocity: self.angular_velocity,
        })
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub celestial_bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn engine(&self) -> Engine {
        Engine {
            parallel: self.engine.parallel,
            workers: self.engine.workers,
        }
    }

    pub fn parameters(&self) -> Parameters {
        let p = &self.parameters;
        Parameters {
            dt: p.dt,
            target_fps: p.target_fps,
            g: p.gravitational_constant.unwrap_or(G_KM),
            scoring: ScoringPolicy {
                min_score: p.scoring.min_score,
                max_score: p.scoring.max_score,
                log_base: p.scoring.log_base,
                log_range: p.scoring.log_range,
            },
        }
    }
}
