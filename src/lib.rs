pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{Result, SimError};

pub use simulation::vector::{NVec3, VectorExt};
pub use simulation::body::{Body, BodyId, BodyKind, BodyRecord};
pub use simulation::registry::BodyRegistry;
pub use simulation::gravity::{ForceLaw, NewtonianGravity, gravitational_force};
pub use simulation::cache::{CacheEntry, ForceCache, Outcome, PairForce, PairKey, ScoringPolicy};
pub use simulation::aggregator::{NetForces, aggregate, pair_contribution};
pub use simulation::integrator::integrate;
pub use simulation::scheduler::Scheduler;
pub use simulation::params::{FrameBudget, Parameters};
pub use simulation::engine::Engine;
pub use simulation::solar_system::{SolarSystem, TickStats};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, BodyType, EngineConfig, ParametersConfig, ScenarioConfig, ScoringConfig};

pub use benchmark::benchmark::{bench_cache_reuse, bench_tick};
