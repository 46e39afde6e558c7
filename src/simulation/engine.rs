//! High-level runtime engine settings
//!
//! Selects sequential or parallel cache evaluation and the size of the
//! worker pool used when running a `Scenario`

use crate::error::{Result, SimError};

#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub parallel: bool,         // false = sequential ticks, true = worker pool
    pub workers: Option<usize>, // None = one worker per hardware thread
}

impl Engine {
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(SimError::Configuration("worker count must be at least 1".into()));
        }
        Ok(())
    }
}
