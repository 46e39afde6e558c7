//! Per-tick cache evaluation, sequential or across a rayon worker pool.
//!
//! Both paths read the cache and registry through shared references and
//! return staged entries; nothing is written until every pair has been
//! evaluated. The parallel path splits a sorted key snapshot into
//! contiguous, disjoint index ranges, one per worker.

use log::warn;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Result, SimError};
use crate::simulation::cache::{ForceCache, PairKey, StagedEntry};
use crate::simulation::gravity::ForceLaw;
use crate::simulation::params::FrameBudget;
use crate::simulation::registry::BodyRegistry;

/// Read-only view of everything a pair evaluation needs
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    pub cache: &'a ForceCache,
    pub registry: &'a BodyRegistry,
    pub law: &'a dyn ForceLaw,
    pub budget: &'a FrameBudget,
}

#[derive(Default)]
pub struct Scheduler {
    pool: Option<ThreadPool>, // None = rayon's global pool
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("workers", &self.workers())
            .finish()
    }
}

impl Scheduler {
    /// Scheduler with a dedicated pool of `workers` threads, or the global
    /// pool (one thread per hardware thread) when `workers` is `None`
    pub fn new(workers: Option<usize>) -> Result<Self> {
        let pool = match workers {
            None => None,
            Some(0) => {
                return Err(SimError::Configuration("worker count must be at least 1".into()));
            }
            Some(n) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("solsim-worker-{i}"))
                    .build()
                    .map_err(|e| SimError::Configuration(format!("failed to build worker pool: {e}")))?,
            ),
        };
        Ok(Self { pool })
    }

    pub fn workers(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, ThreadPool::current_num_threads)
    }

    pub fn evaluate(&self, parallel: bool, keys: &[PairKey], ctx: TickContext<'_>) -> Result<Vec<StagedEntry>> {
        let partitions = if parallel {
            self.evaluate_parallel(keys, ctx)
        } else {
            vec![evaluate_partition(keys, ctx)]
        };
        join_partitions(partitions, keys.len())
    }

    /// Fan `keys` out in contiguous chunks; blocks until every chunk is done.
    /// Partitions come back in key order.
    fn evaluate_parallel(&self, keys: &[PairKey], ctx: TickContext<'_>) -> Vec<Partition> {
        let chunk_size = keys.len().div_ceil(self.workers()).max(1);

        let run = || {
            keys.par_chunks(chunk_size)
                .map(|chunk| evaluate_partition(chunk, ctx))
                .collect::<Vec<_>>()
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// Staged entries and failures of one contiguous run of keys
struct Partition {
    staged: Vec<StagedEntry>,
    errors: Vec<SimError>,
}

/// Evaluate every key of a contiguous run in order. A failing pair does not
/// stop the rest of the run.
fn evaluate_partition(keys: &[PairKey], ctx: TickContext<'_>) -> Partition {
    let mut partition = Partition {
        staged: Vec::with_capacity(keys.len()),
        errors: Vec::new(),
    };
    for &key in keys {
        match ctx.cache.stage(key, ctx.registry, ctx.law, ctx.budget) {
            Ok(entry) => partition.staged.push(entry),
            Err(e) => partition.errors.push(e),
        }
    }
    partition
}

/// Merge partitions after the join. Every failure is logged; the first one in
/// key order is returned.
fn join_partitions(partitions: Vec<Partition>, pairs: usize) -> Result<Vec<StagedEntry>> {
    let mut staged = Vec::with_capacity(pairs);
    let mut first_error = None;
    for partition in partitions {
        staged.extend(partition.staged);
        for e in partition.errors {
            warn!("pair evaluation failed: {e}");
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(staged),
    }
}
