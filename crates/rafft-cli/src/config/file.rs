use crate::error::{CliError, Result};
use rafft::core::encoding::EncodingScheme;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSearchConfig {
    pub min_stem_length: Option<usize>,
    pub min_loop_size: Option<usize>,
    pub pseudoknots: Option<bool>,
    pub shortlist_size: Option<usize>,
    pub exhaustive: Option<bool>,
    pub padding: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileWeightsConfig {
    pub gc: Option<f64>,
    pub au: Option<f64>,
    pub gu: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileEncodingConfig {
    pub scheme: Option<EncodingScheme>,
    pub weights: Option<FileWeightsConfig>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileEnergyConfig {
    pub enabled: Option<bool>,
    pub params_path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub search: Option<FileSearchConfig>,
    pub encoding: Option<FileEncodingConfig>,
    pub energy: Option<FileEnergyConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_all_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rafft.toml");
        fs::write(
            &path,
            r#"
            [search]
            min-stem-length = 3
            pseudoknots = true
            shortlist-size = 50

            [encoding]
            scheme = "stacking"

            [encoding.weights]
            gu = 0.5

            [energy]
            enabled = false
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        let search = config.search.unwrap();
        assert_eq!(search.min_stem_length, Some(3));
        assert_eq!(search.pseudoknots, Some(true));
        assert_eq!(search.shortlist_size, Some(50));
        assert_eq!(search.padding, None);
        let encoding = config.encoding.unwrap();
        assert_eq!(encoding.scheme, Some(EncodingScheme::Stacking));
        assert_eq!(encoding.weights.unwrap().gu, Some(0.5));
        assert_eq!(config.energy.unwrap().enabled, Some(false));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rafft.toml");
        fs::write(&path, "[search]\nmin-stem = 3\n").unwrap();
        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            FileConfig::from_file(&dir.path().join("absent.toml")),
            Err(CliError::Io(_))
        ));
    }
}
