use crate::core::encoding::{EncodingScheme, PairWeights};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// How candidate offsets are chosen at each recursion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStrategy {
    /// Refine every offset of the segment.
    Exhaustive,
    /// Refine only the `size` best offsets of the correlation profile.
    Shortlist { size: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub min_stem_length: usize,
    /// Minimum number of unpaired positions enclosed by a pair.
    pub min_loop_size: usize,
    pub pseudoknots: bool,
    pub strategy: CandidateStrategy,
    /// Added to the overlap length when normalizing correlation scores.
    pub padding: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodingConfig {
    pub scheme: EncodingScheme,
    pub weights: PairWeights,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoldConfig {
    pub search: SearchConfig,
    pub encoding: EncodingConfig,
    /// Keep the intermediate structure after every committed stem.
    pub record_trajectory: bool,
}

#[derive(Default)]
pub struct FoldConfigBuilder {
    min_stem_length: Option<usize>,
    min_loop_size: Option<usize>,
    pseudoknots: Option<bool>,
    strategy: Option<CandidateStrategy>,
    padding: Option<f64>,
    scheme: Option<EncodingScheme>,
    weights: Option<PairWeights>,
    record_trajectory: Option<bool>,
}

impl FoldConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_stem_length(mut self, length: usize) -> Self {
        self.min_stem_length = Some(length);
        self
    }
    pub fn min_loop_size(mut self, size: usize) -> Self {
        self.min_loop_size = Some(size);
        self
    }
    pub fn pseudoknots(mut self, enabled: bool) -> Self {
        self.pseudoknots = Some(enabled);
        self
    }
    pub fn strategy(mut self, strategy: CandidateStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }
    pub fn scheme(mut self, scheme: EncodingScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }
    pub fn weights(mut self, weights: PairWeights) -> Self {
        self.weights = Some(weights);
        self
    }
    pub fn record_trajectory(mut self, enabled: bool) -> Self {
        self.record_trajectory = Some(enabled);
        self
    }

    pub fn build(self) -> Result<FoldConfig, ConfigError> {
        let search = SearchConfig {
            min_stem_length: self
                .min_stem_length
                .ok_or(ConfigError::MissingParameter("min_stem_length"))?,
            min_loop_size: self
                .min_loop_size
                .ok_or(ConfigError::MissingParameter("min_loop_size"))?,
            pseudoknots: self.pseudoknots.unwrap_or(false),
            strategy: self
                .strategy
                .ok_or(ConfigError::MissingParameter("strategy"))?,
            padding: self
                .padding
                .ok_or(ConfigError::MissingParameter("padding"))?,
        };
        let encoding = EncodingConfig {
            scheme: self.scheme.unwrap_or_default(),
            weights: self.weights.unwrap_or_default(),
        };

        validate(&search, &encoding)?;

        Ok(FoldConfig {
            search,
            encoding,
            record_trajectory: self.record_trajectory.unwrap_or(false),
        })
    }
}

fn validate(search: &SearchConfig, encoding: &EncodingConfig) -> Result<(), ConfigError> {
    if search.min_stem_length == 0 {
        return Err(ConfigError::InvalidParameter {
            name: "min_stem_length",
            reason: "must be at least 1".to_string(),
        });
    }
    if !search.padding.is_finite() || search.padding <= 0.0 {
        return Err(ConfigError::InvalidParameter {
            name: "padding",
            reason: format!("must be a positive finite number, got {}", search.padding),
        });
    }
    if let CandidateStrategy::Shortlist { size: 0 } = search.strategy {
        return Err(ConfigError::InvalidParameter {
            name: "strategy",
            reason: "shortlist size must be at least 1".to_string(),
        });
    }
    let weights = &encoding.weights;
    for (name, value) in [("gc", weights.gc), ("au", weights.au), ("gu", weights.gu)] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "weights",
                reason: format!("{} weight must be finite and non-negative, got {}", name, value),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> FoldConfigBuilder {
        FoldConfigBuilder::new()
            .min_stem_length(2)
            .min_loop_size(3)
            .strategy(CandidateStrategy::Shortlist { size: 20 })
            .padding(1.0)
    }

    #[test]
    fn build_applies_optional_defaults() {
        let config = complete_builder().build().unwrap();
        assert_eq!(config.search.min_stem_length, 2);
        assert_eq!(config.search.min_loop_size, 3);
        assert!(!config.search.pseudoknots);
        assert_eq!(config.encoding.scheme, EncodingScheme::Nucleotide);
        assert_eq!(config.encoding.weights, PairWeights::default());
        assert!(!config.record_trajectory);
    }

    #[test]
    fn build_fails_when_required_parameter_is_missing() {
        let result = FoldConfigBuilder::new()
            .min_stem_length(2)
            .strategy(CandidateStrategy::Exhaustive)
            .padding(1.0)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("min_loop_size")));
    }

    #[test]
    fn zero_stem_length_is_rejected() {
        let result = complete_builder().min_stem_length(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "min_stem_length",
                ..
            })
        ));
    }

    #[test]
    fn non_positive_padding_is_rejected() {
        for padding in [0.0, -1.0, f64::NAN] {
            let result = complete_builder().padding(padding).build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter { name: "padding", .. })
            ));
        }
    }

    #[test]
    fn empty_shortlist_is_rejected() {
        let result = complete_builder()
            .strategy(CandidateStrategy::Shortlist { size: 0 })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "strategy", .. })
        ));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let result = complete_builder()
            .weights(PairWeights {
                gc: 1.0,
                au: -0.5,
                gu: 1.0,
            })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "weights", .. })
        ));
    }
}
