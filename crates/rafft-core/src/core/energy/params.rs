use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Watson-Crick stacking free energies at 37 °C (kcal/mol).
///
/// Keys read `5'WX3'/3'ZY5'`: W pairs with Z and X pairs with Y.
#[rustfmt::skip]
pub static DEFAULT_STACKS: Map<&'static str, f64> = phf_map! {
    "AA/UU" => -0.93, "UU/AA" => -0.93,
    "AU/UA" => -1.10,
    "UA/AU" => -1.33,
    "CU/GA" => -2.08, "AG/UC" => -2.08,
    "CA/GU" => -2.11, "UG/AC" => -2.11,
    "GU/CA" => -2.24, "AC/UG" => -2.24,
    "GA/CU" => -2.35, "UC/AG" => -2.35,
    "CG/GC" => -2.36,
    "GG/CC" => -3.26, "CC/GG" => -3.26,
    "GC/CG" => -3.42,
};

/// Hairpin initiation for loops of 3 to 9 unpaired positions.
pub const DEFAULT_HAIRPIN_INITIATION: [f64; 7] = [5.4, 5.6, 5.7, 5.4, 6.0, 6.1, 6.2];

const MIN_HAIRPIN_TABLE_LENGTH: usize = 3;
const DEFAULT_WOBBLE_STACK: f64 = -1.0;
const DEFAULT_TERMINAL_PENALTY: f64 = 0.45;
const DEFAULT_HAIRPIN_EXTRAPOLATION: f64 = 1.0786; // 1.75 RT at 37 °C

#[derive(Debug, Clone, PartialEq)]
pub struct StackingParams {
    pub stacks: HashMap<String, f64>,
    /// Applied to any stack that contains a G-U pair.
    pub wobble_stack: f64,
    /// Applied to every helix end closed by an A-U or G-U pair.
    pub terminal_penalty: f64,
    pub hairpin_initiation: Vec<f64>,
    pub hairpin_extrapolation: f64,
}

impl Default for StackingParams {
    fn default() -> Self {
        Self {
            stacks: DEFAULT_STACKS
                .entries()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            wobble_stack: DEFAULT_WOBBLE_STACK,
            terminal_penalty: DEFAULT_TERMINAL_PENALTY,
            hairpin_initiation: DEFAULT_HAIRPIN_INITIATION.to_vec(),
            hairpin_extrapolation: DEFAULT_HAIRPIN_EXTRAPOLATION,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct StackingParamsFile {
    stack: Option<HashMap<String, f64>>,
    wobble_stack: Option<f64>,
    terminal_penalty: Option<f64>,
    hairpin_initiation: Option<Vec<f64>>,
    hairpin_extrapolation: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid energy parameters in '{path}': {reason}")]
    Invalid { path: String, reason: String },
}

impl StackingParams {
    /// Loads a parameter file; entries it does not mention keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let path_str = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        let file: StackingParamsFile =
            toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
                path: path_str.clone(),
                source: e,
            })?;
        Self::default()
            .overlay(file)
            .map_err(|reason| ParamLoadError::Invalid {
                path: path_str,
                reason,
            })
    }

    fn overlay(mut self, file: StackingParamsFile) -> Result<Self, String> {
        if let Some(stacks) = file.stack {
            for (key, value) in stacks {
                if !is_stack_key(&key) {
                    return Err(format!(
                        "stack key '{}' is not of the form 'WX/ZY' over A, C, G, U",
                        key
                    ));
                }
                self.stacks.insert(key, value);
            }
        }
        if let Some(table) = file.hairpin_initiation {
            if table.is_empty() {
                return Err("hairpin-initiation must list at least one value".to_string());
            }
            self.hairpin_initiation = table;
        }
        self.wobble_stack = file.wobble_stack.unwrap_or(self.wobble_stack);
        self.terminal_penalty = file.terminal_penalty.unwrap_or(self.terminal_penalty);
        self.hairpin_extrapolation = file
            .hairpin_extrapolation
            .unwrap_or(self.hairpin_extrapolation);
        Ok(self)
    }

    pub fn stack_energy(&self, key: &str) -> Option<f64> {
        self.stacks.get(key).copied()
    }

    /// Initiation energy of a hairpin with `loop_length` unpaired positions.
    ///
    /// Loops shorter than the table start use its first entry; longer loops
    /// are extrapolated logarithmically from the last entry.
    pub fn hairpin_energy(&self, loop_length: usize) -> f64 {
        let table = &self.hairpin_initiation;
        let last_length = MIN_HAIRPIN_TABLE_LENGTH + table.len() - 1;
        if loop_length < MIN_HAIRPIN_TABLE_LENGTH {
            table[0]
        } else if loop_length <= last_length {
            table[loop_length - MIN_HAIRPIN_TABLE_LENGTH]
        } else {
            table[table.len() - 1]
                + self.hairpin_extrapolation * (loop_length as f64 / last_length as f64).ln()
        }
    }
}

fn is_stack_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    bytes.len() == 5
        && bytes[2] == b'/'
        && [0, 1, 3, 4]
            .iter()
            .all(|&i| matches!(bytes[i], b'A' | b'C' | b'G' | b'U'))
}
