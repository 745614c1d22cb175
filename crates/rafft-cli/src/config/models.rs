use rafft::engine::config as core_config;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum SequenceSource {
    Inline(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TargetSource {
    Inline(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input: SequenceSource,
    pub core_config: core_config::FoldConfig,
    /// `None` disables energy evaluation entirely.
    pub energy: Option<EnergySettings>,
    pub target: Option<TargetSource>,
    pub trajectory_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnergySettings {
    /// Parameter overrides for the stacking model; defaults are used otherwise.
    pub params_path: Option<PathBuf>,
}
