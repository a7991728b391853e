use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::builder::BuildError;
use crate::core::potential::PotentialError;
use crate::core::potential::params::ParamLoadError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Structure construction failed: {0}")]
    Build(#[from] BuildError),

    #[error("Operation '{operation}' requires at least one atom")]
    EmptyStructure { operation: &'static str },

    #[error("Potential '{potential}' failed: {source}")]
    OracleFailure {
        potential: String,
        #[source]
        source: PotentialError,
    },

    #[error("Rotation axis must have non-zero length")]
    InvalidAxis,

    #[error("Reference atom {index} is out of range for a conformer of {len} atoms")]
    InvalidReference { index: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load potential parameters: {0}")]
    Params(#[from] ParamLoadError),
}
