//! Error types for the solar system core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid input caught at construction or call site (mass <= 0, fps <= 0, ...)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Two bodies sit at exactly the same position, so the force direction is undefined
    #[error("degenerate geometry: `{first}` and `{second}` occupy the same position")]
    DegenerateGeometry { first: String, second: String },

    /// The force between two distinct bodies overflowed the float range
    #[error("non-finite force between `{first}` and `{second}`")]
    NonFiniteForce { first: String, second: String },

    /// Unknown body handle or name
    #[error("not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
