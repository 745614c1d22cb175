//! Layered configuration for the `fold` command.
//!
//! Values resolve in the order CLI flag, `--set KEY=VALUE`, configuration
//! file, built-in defaults.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use defaults::DefaultsConfig;
pub use models::{AppConfig, EnergySettings, SequenceSource, TargetSource};
