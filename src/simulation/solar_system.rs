//! The simulation core as seen by the loader and the renderer.
//!
//! [`SolarSystem`] owns the body registry, the force cache and the force
//! law. A tick borrows it mutably, so registry changes can never overlap a
//! tick in flight.
//!
//! A tick runs in three phases:
//! 1. evaluate every cache entry into staged entries (read-only, maybe parallel)
//! 2. commit the staged entries, only if every pair evaluated cleanly
//! 3. aggregate net forces and integrate every body
//!
//! A failure in phase 1 leaves cache, bodies and time exactly as they were.

use log::{debug, info};

use crate::error::{Result, SimError};
use crate::simulation::aggregator::{aggregate, NetForces};
use crate::simulation::body::{Body, BodyId, BodyRecord};
use crate::simulation::cache::{ForceCache, Outcome, PairForce, StagedEntry};
use crate::simulation::engine::Engine;
use crate::simulation::gravity::{ForceLaw, NewtonianGravity};
use crate::simulation::integrator::integrate;
use crate::simulation::params::{FrameBudget, Parameters};
use crate::simulation::registry::BodyRegistry;
use crate::simulation::scheduler::{Scheduler, TickContext};
use crate::simulation::vector::NVec3;

/// Summary of one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub pairs: usize,
    pub recomputed: usize,
    pub reused: usize,
}

impl TickStats {
    fn from_staged(staged: &[StagedEntry]) -> Self {
        let recomputed = staged.iter().filter(|s| s.outcome == Outcome::Recomputed).count();
        Self {
            pairs: staged.len(),
            recomputed,
            reused: staged.len() - recomputed,
        }
    }
}

pub struct SolarSystem {
    registry: BodyRegistry,
    cache: ForceCache,
    law: Box<dyn ForceLaw>,
    scheduler: Scheduler,
    parameters: Parameters,
    engine: Engine,
    net_forces: NetForces, // from the last completed tick
    time: f64,
    ticks: u64,
}

impl std::fmt::Debug for SolarSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolarSystem")
            .field("bodies", &self.registry.len())
            .field("pairs", &self.cache.len())
            .field("time", &self.time)
            .field("ticks", &self.ticks)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl SolarSystem {
    /// Empty system using Newtonian gravity with `parameters.g`
    pub fn new(parameters: Parameters, engine: Engine) -> Result<Self> {
        let law = NewtonianGravity { g: parameters.g };
        Self::with_force_law(parameters, engine, law)
    }

    pub fn with_force_law(parameters: Parameters, engine: Engine, law: impl ForceLaw + 'static) -> Result<Self> {
        parameters.validate()?;
        engine.validate()?;

        Ok(Self {
            registry: BodyRegistry::new(),
            cache: ForceCache::new(parameters.scoring)?,
            law: Box::new(law),
            scheduler: Scheduler::new(engine.workers)?,
            parameters,
            engine,
            net_forces: NetForces::default(),
            time: 0.0,
            ticks: 0,
        })
    }

    // =========================================================================================
    // Registry mutation, only ever between ticks
    // =========================================================================================

    /// Register a body and create a pending cache entry for it and every
    /// existing body. An invalid record is rejected and nothing is inserted.
    pub fn add_body(&mut self, record: BodyRecord) -> Result<BodyId> {
        let id = self.registry.insert(record)?;
        let others: Vec<BodyId> = self.registry.ids().filter(|&other| other != id).collect();
        self.cache.register_body(id, others);

        if let Some(body) = self.registry.get(id) {
            info!("added {} `{}` as {id} ({} cached pairs)", body.kind().label(), body.name(), self.cache.len());
        }
        Ok(id)
    }

    /// Remove the body called `name` and every cache entry that references it
    pub fn remove_body(&mut self, name: &str) -> Result<Body> {
        let body = self.registry.remove_by_name(name)?;
        let dropped = self.cache.forget_body(body.id());
        self.net_forces.remove(body.id());

        info!("removed `{}` ({dropped} cached pairs dropped)", body.name());
        Ok(body)
    }

    // =========================================================================================
    // Ticks
    // =========================================================================================

    /// Run one tick with the configured `dt`, `target_fps` and engine mode
    pub fn step(&mut self) -> Result<TickStats> {
        self.tick(self.parameters.dt, self.parameters.target_fps, self.engine.parallel)
    }

    /// Evaluate the cache, aggregate net forces and integrate every body by `dt`
    pub fn tick(&mut self, dt: f64, target_fps: f64, parallel: bool) -> Result<TickStats> {
        let budget = FrameBudget::new(dt, target_fps)?;

        // Indexable snapshot, sorted so runs are reproducible
        let keys = self.cache.snapshot_keys();

        let ctx = TickContext {
            cache: &self.cache,
            registry: &self.registry,
            law: &*self.law,
            budget: &budget,
        };
        let staged = self.scheduler.evaluate(parallel, &keys, ctx)?;

        // Every pair evaluated: from here on the tick cannot fail
        let stats = TickStats::from_staged(&staged);
        self.cache.commit(staged);

        let net = aggregate(&self.registry, &self.cache, &keys);
        integrate(self.registry.bodies_mut(), &net, dt);

        self.net_forces = net;
        self.time += dt;
        self.ticks += 1;

        debug!(
            "tick {} t={:.3}: {} pairs, {} recomputed, {} reused",
            self.ticks, self.time, stats.pairs, stats.recomputed, stats.reused
        );
        Ok(stats)
    }

    /// Force the next tick to recompute every pair
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate_all();
    }

    // =========================================================================================
    // Read accessors
    // =========================================================================================

    pub fn current_position(&self, id: BodyId) -> Result<NVec3> {
        self.registry.require(id).map(Body::position)
    }

    pub fn current_velocity(&self, id: BodyId) -> Result<NVec3> {
        self.registry.require(id).map(Body::velocity)
    }

    /// Cached force exerted on `a` by `b`, or `NotEvaluated` if the pair has
    /// never been recomputed
    pub fn force_between(&self, a: BodyId, b: BodyId) -> Result<PairForce> {
        self.registry.require(a)?;
        self.registry.require(b)?;
        self.cache.read(a, b)
    }

    /// Net force on `id` from the last completed tick
    pub fn net_force(&self, id: BodyId) -> Result<NVec3> {
        self.registry.require(id)?;
        Ok(self.net_forces.get(id).unwrap_or_else(NVec3::zeros))
    }

    pub fn net_forces(&self) -> &NetForces {
        &self.net_forces
    }

    pub fn body(&self, id: BodyId) -> Result<&Body> {
        self.registry.require(id)
    }

    pub fn find(&self, name: &str) -> Result<&Body> {
        self.registry
            .get_by_name(name)
            .ok_or_else(|| SimError::NotFound(format!("no body named `{name}`")))
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.registry.iter()
    }

    /// Renderer snapshot: (handle, name, position) in registry order
    pub fn positions(&self) -> Vec<(BodyId, &str, NVec3)> {
        self.registry.iter().map(|b| (b.id(), b.name(), b.position())).collect()
    }

    pub fn cache(&self) -> &ForceCache {
        &self.cache
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
