use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, EnergySettings, SequenceSource, TargetSource};
use crate::cli::FoldArgs;
use crate::error::{CliError, Result};
use rafft::core::encoding::PairWeights;
use rafft::engine::config as core_config;
use std::str::FromStr;

pub fn build_config(args: &FoldArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let input = match (&args.input.sequence, &args.input.seq_file) {
        (Some(sequence), _) => SequenceSource::Inline(sequence.clone()),
        (None, Some(path)) => SequenceSource::File(path.clone()),
        (None, None) => {
            return Err(CliError::Config(
                "No sequence given. Use --sequence or --seq-file.".to_string(),
            ));
        }
    };

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let search_file = file_config.search.take().unwrap_or_default();
    let min_stem_length = args
        .min_stem_length
        .or(search_file.min_stem_length)
        .unwrap_or(defaults.min_stem_length);
    let min_loop_size = args
        .min_loop_size
        .or(search_file.min_loop_size)
        .unwrap_or(defaults.min_loop_size);
    let padding = args
        .padding
        .or(search_file.padding)
        .unwrap_or(defaults.padding);

    let pseudoknots = match (args.pseudoknots.pseudoknots, args.pseudoknots.no_pseudoknots) {
        (true, false) => true,
        (false, true) => false,
        _ => search_file.pseudoknots.unwrap_or(defaults.pseudoknots),
    };

    let strategy = if args.exhaustive {
        core_config::CandidateStrategy::Exhaustive
    } else if let Some(size) = args.shortlist_size {
        core_config::CandidateStrategy::Shortlist { size }
    } else if search_file.exhaustive.unwrap_or(defaults.exhaustive) {
        core_config::CandidateStrategy::Exhaustive
    } else {
        core_config::CandidateStrategy::Shortlist {
            size: search_file.shortlist_size.unwrap_or(defaults.shortlist_size),
        }
    };

    let encoding_file = file_config.encoding.take().unwrap_or_default();
    let weights_file = encoding_file.weights.unwrap_or_default();
    let weights = PairWeights {
        gc: args
            .gc_weight
            .or(weights_file.gc)
            .unwrap_or(defaults.gc_weight),
        au: args
            .au_weight
            .or(weights_file.au)
            .unwrap_or(defaults.au_weight),
        gu: args
            .gu_weight
            .or(weights_file.gu)
            .unwrap_or(defaults.gu_weight),
    };
    let scheme = args
        .scheme
        .or(encoding_file.scheme)
        .unwrap_or(defaults.scheme);

    let energy_file = file_config.energy.take().unwrap_or_default();
    let evaluate_energy =
        !args.no_energy && energy_file.enabled.unwrap_or(defaults.evaluate_energy);
    let energy = evaluate_energy.then(|| EnergySettings {
        params_path: args.energy_params.clone().or(energy_file.params_path),
    });

    let target = match (&args.target.target, &args.target.target_file) {
        (Some(structure), _) => Some(TargetSource::Inline(structure.clone())),
        (None, Some(path)) => Some(TargetSource::File(path.clone())),
        (None, None) => None,
    };

    let core_config = core_config::FoldConfigBuilder::new()
        .min_stem_length(min_stem_length)
        .min_loop_size(min_loop_size)
        .pseudoknots(pseudoknots)
        .strategy(strategy)
        .padding(padding)
        .weights(weights)
        .scheme(scheme)
        .record_trajectory(args.trajectory.is_some())
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input,
        core_config,
        energy,
        target,
        trajectory_path: args.trajectory.clone(),
        report_path: args.report.clone(),
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "search.min-stem-length" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .min_stem_length = Some(parse_value(key, value_str, "integer")?);
            }
            "search.min-loop-size" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .min_loop_size = Some(parse_value(key, value_str, "integer")?);
            }
            "search.pseudoknots" => {
                config.search.get_or_insert_with(Default::default).pseudoknots =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "search.shortlist-size" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .shortlist_size = Some(parse_value(key, value_str, "integer")?);
            }
            "search.exhaustive" => {
                config.search.get_or_insert_with(Default::default).exhaustive =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "search.padding" => {
                config.search.get_or_insert_with(Default::default).padding =
                    Some(parse_value(key, value_str, "float")?);
            }
            "encoding.scheme" => {
                config.encoding.get_or_insert_with(Default::default).scheme = Some(
                    value_str
                        .parse()
                        .map_err(|e: String| CliError::Config(format!("{}: {}", key, e)))?,
                );
            }
            "encoding.weights.gc" | "encoding.weights.au" | "encoding.weights.gu" => {
                let weight: f64 = parse_value(key, value_str, "float")?;
                let weights = config
                    .encoding
                    .get_or_insert_with(Default::default)
                    .weights
                    .get_or_insert_with(Default::default);
                match key {
                    "encoding.weights.gc" => weights.gc = Some(weight),
                    "encoding.weights.au" => weights.au = Some(weight),
                    _ => weights.gu = Some(weight),
                }
            }
            "energy.enabled" => {
                config.energy.get_or_insert_with(Default::default).enabled =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "energy.params-path" => {
                config.energy.get_or_insert_with(Default::default).params_path =
                    Some(value_str.into());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{PseudoknotToggle, SequenceInput, TargetInput};
    use rafft::core::encoding::EncodingScheme;
    use rafft::engine::config::CandidateStrategy;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn base_fold_args() -> FoldArgs {
        FoldArgs {
            input: SequenceInput {
                sequence: Some("GGGGAAAACCCC".to_string()),
                seq_file: None,
            },
            config: None,
            min_stem_length: None,
            min_loop_size: None,
            pseudoknots: PseudoknotToggle::default(),
            shortlist_size: None,
            exhaustive: false,
            padding: None,
            gc_weight: None,
            au_weight: None,
            gu_weight: None,
            scheme: None,
            energy_params: None,
            no_energy: false,
            target: TargetInput::default(),
            trajectory: None,
            report: None,
            set_values: vec![],
        }
    }

    #[test]
    fn defaults_fill_every_unset_value() {
        let app = build_config(&base_fold_args()).expect("build ok");
        let defaults = DefaultsConfig::default();
        let search = &app.core_config.search;

        assert_eq!(app.input, SequenceSource::Inline("GGGGAAAACCCC".to_string()));
        assert_eq!(search.min_stem_length, defaults.min_stem_length);
        assert_eq!(search.min_loop_size, defaults.min_loop_size);
        assert_eq!(search.pseudoknots, defaults.pseudoknots);
        assert_eq!(
            search.strategy,
            CandidateStrategy::Shortlist {
                size: defaults.shortlist_size
            }
        );
        assert_eq!(search.padding, defaults.padding);
        assert_eq!(app.core_config.encoding.weights, PairWeights::default());
        assert_eq!(app.core_config.encoding.scheme, defaults.scheme);
        assert_eq!(app.energy, Some(EnergySettings::default()));
        assert!(!app.core_config.record_trajectory);
        assert!(app.target.is_none());
    }

    #[test]
    fn missing_sequence_is_a_configuration_error() {
        let mut args = base_fold_args();
        args.input = SequenceInput::default();
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn file_values_are_merged() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("rafft.toml");
        fs::write(
            &cfg_path,
            r#"
            [search]
            min-stem-length = 3
            min-loop-size = 4
            pseudoknots = true
            exhaustive = true
            padding = 2.0

            [encoding]
            scheme = "stacking"

            [encoding.weights]
            gc = 3.0
            au = 2.0
            gu = 0.0

            [energy]
            params-path = "turner.toml"
            "#,
        )
        .unwrap();

        let mut args = base_fold_args();
        args.config = Some(cfg_path);
        let app = build_config(&args).expect("build ok");
        let search = &app.core_config.search;

        assert_eq!(search.min_stem_length, 3);
        assert_eq!(search.min_loop_size, 4);
        assert!(search.pseudoknots);
        assert_eq!(search.strategy, CandidateStrategy::Exhaustive);
        assert_eq!(search.padding, 2.0);
        assert_eq!(app.core_config.encoding.scheme, EncodingScheme::Stacking);
        assert_eq!(
            app.core_config.encoding.weights,
            PairWeights {
                gc: 3.0,
                au: 2.0,
                gu: 0.0
            }
        );
        assert_eq!(
            app.energy.unwrap().params_path,
            Some(PathBuf::from("turner.toml"))
        );
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("rafft.toml");
        fs::write(
            &cfg_path,
            r#"
            [search]
            min-stem-length = 3
            pseudoknots = true
            shortlist-size = 5

            [encoding.weights]
            gu = 0.0
            "#,
        )
        .unwrap();

        let mut args = base_fold_args();
        args.config = Some(cfg_path);
        args.min_stem_length = Some(4);
        args.pseudoknots = PseudoknotToggle {
            pseudoknots: false,
            no_pseudoknots: true,
        };
        args.exhaustive = true;
        args.gu_weight = Some(0.25);
        args.no_energy = true;

        let app = build_config(&args).expect("build ok");
        let search = &app.core_config.search;
        assert_eq!(search.min_stem_length, 4);
        assert!(!search.pseudoknots);
        assert_eq!(search.strategy, CandidateStrategy::Exhaustive);
        assert_eq!(app.core_config.encoding.weights.gu, 0.25);
        assert!(app.energy.is_none());
    }

    #[test]
    fn set_values_override_file_and_defaults() {
        let mut args = base_fold_args();
        args.set_values = vec![
            "search.min-stem-length=5".to_string(),
            "search.shortlist-size=7".to_string(),
            "search.padding=0.5".to_string(),
            "encoding.scheme=stacking".to_string(),
            "encoding.weights.au=1.5".to_string(),
            "energy.enabled=false".to_string(),
        ];

        let app = build_config(&args).expect("build ok");
        let search = &app.core_config.search;
        assert_eq!(search.min_stem_length, 5);
        assert_eq!(search.strategy, CandidateStrategy::Shortlist { size: 7 });
        assert!((search.padding - 0.5).abs() < 1e-12);
        assert_eq!(app.core_config.encoding.scheme, EncodingScheme::Stacking);
        assert!((app.core_config.encoding.weights.au - 1.5).abs() < 1e-12);
        assert!(app.energy.is_none());
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in ["search.min-stem-length", "search.unknown=1", "search.padding=wide"] {
            let mut args = base_fold_args();
            args.set_values = vec![bad.to_string()];
            assert!(
                matches!(build_config(&args), Err(CliError::Config(_))),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn invalid_values_fail_core_validation() {
        let mut args = base_fold_args();
        args.min_stem_length = Some(0);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn trajectory_path_enables_recording() {
        let mut args = base_fold_args();
        args.trajectory = Some(PathBuf::from("out.traj"));
        args.target = TargetInput {
            target: Some("((((....))))".to_string()),
            target_file: None,
        };
        let app = build_config(&args).expect("build ok");
        assert!(app.core_config.record_trajectory);
        assert_eq!(
            app.target,
            Some(TargetSource::Inline("((((....))))".to_string()))
        );
    }
}
