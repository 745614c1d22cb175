use thiserror::Error;

use super::config::ConfigError;
use crate::core::energy::EnergyError;
use crate::core::models::sequence::SequenceError;
use crate::core::models::structure::StructureError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid sequence: {source}")]
    Sequence {
        #[from]
        source: SequenceError,
    },

    #[error("Structure assembly failed: {source}")]
    Structure {
        #[from]
        source: StructureError,
    },

    #[error("Energy evaluation failed: {source}")]
    Energy {
        #[from]
        source: EnergyError,
    },

    #[error("Search phase '{phase}' failed: {reason}")]
    PhaseFailed { phase: &'static str, reason: String },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
