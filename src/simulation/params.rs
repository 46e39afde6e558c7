//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed tick length `dt` (seconds) and the frame rate it is paced against,
//! - the gravitational constant in km³ kg⁻¹ s⁻²,
//! - the scoring policy that drives force-cache staleness
//!
//! `FrameBudget` is the validated (`dt`, `target_fps`) pair a single tick runs with.

use crate::error::{Result, SimError};
use crate::simulation::cache::ScoringPolicy;
use crate::simulation::units::G_KM;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64,                // tick length, seconds
    pub target_fps: f64,        // frames per second the tick is paced against
    pub g: f64,                 // gravitational constant
    pub scoring: ScoringPolicy, // force cache staleness constants
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: 1.0,
            target_fps: 30.0,
            g: G_KM,
            scoring: ScoringPolicy::default(),
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<()> {
        FrameBudget::new(self.dt, self.target_fps)?;
        if !(self.g.is_finite() && self.g > 0.0) {
            return Err(SimError::Configuration(format!(
                "gravitational constant must be finite and > 0, got {}",
                self.g
            )));
        }
        self.scoring.validate()
    }

    pub fn frame_budget(&self) -> Result<FrameBudget> {
        FrameBudget::new(self.dt, self.target_fps)
    }
}

/// Timestep and target frame rate for one tick.
/// Only constructible through [`FrameBudget::new`], so `target_fps` is always > 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameBudget {
    dt: f64,
    target_fps: f64,
}

impl FrameBudget {
    pub fn new(dt: f64, target_fps: f64) -> Result<Self> {
        if !(target_fps.is_finite() && target_fps > 0.0) {
            return Err(SimError::Configuration(format!(
                "target fps must be finite and > 0, got {target_fps}"
            )));
        }
        if !dt.is_finite() {
            return Err(SimError::Configuration(format!("timestep must be finite, got {dt}")));
        }
        Ok(Self { dt, target_fps })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn target_fps(&self) -> f64 {
        self.target_fps
    }

    /// Seconds one ideal frame lasts at the target rate
    pub fn frame_time(&self) -> f64 {
        1.0 / self.target_fps
    }
}
