pub mod vector;
pub mod units;
pub mod body;
pub mod registry;
pub mod gravity;
pub mod cache;
pub mod aggregator;
pub mod integrator;
pub mod scheduler;
pub mod params;
pub mod engine;
pub mod solar_system;
pub mod scenario;
