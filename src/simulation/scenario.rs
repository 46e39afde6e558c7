//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - a populated `SolarSystem` (bodies at t = 0, every pair pending)
//! - the number of ticks the scenario asks for
//!
//! This is the loader side of the core: it turns persisted body records into
//! registered bodies and hands the system to whoever drives the ticks.

use log::info;

use crate::configuration::config::ScenarioConfig;
use crate::error::Result;
use crate::simulation::engine::Engine;
use crate::simulation::solar_system::{SolarSystem, TickStats};

pub struct Scenario {
    pub engine: Engine,
    pub system: SolarSystem,
    pub steps: usize,
}

impl Scenario {
    pub fn build(cfg: ScenarioConfig) -> Result<Self> {
        let engine = cfg.engine();
        let parameters = cfg.parameters();
        let mut system = SolarSystem::new(parameters, engine.clone())?;

        // Bodies: map `BodyConfig` -> validated `BodyRecord` -> registry
        for bc in &cfg.celestial_bodies {
            system.add_body(bc.to_record()?)?;
        }

        info!(
            "scenario ready: {} bodies, {} pairs, {} steps, {}",
            system.len(),
            system.cache().len(),
            cfg.parameters.steps,
            if engine.parallel { "parallel" } else { "sequential" }
        );

        Ok(Self {
            engine,
            system,
            steps: cfg.parameters.steps,
        })
    }

    /// Run every configured step, handing the system to `observe` after each
    /// tick (1-based tick number). Stops at the first failed tick.
    pub fn run<F>(&mut self, mut observe: F) -> Result<TickStats>
    where
        F: FnMut(usize, &SolarSystem, &TickStats),
    {
        let mut total = TickStats::default();
        for step in 1..=self.steps {
            let stats = self.system.step()?;
            total.pairs += stats.pairs;
            total.recomputed += stats.recomputed;
            total.reused += stats.reused;
            observe(step, &self.system, &stats);
        }
        Ok(total)
    }
}
