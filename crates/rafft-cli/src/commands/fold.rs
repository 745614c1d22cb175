use crate::cli::FoldArgs;
use crate::config::{AppConfig, EnergySettings, SequenceSource, TargetSource, build_config};
use crate::error::{CliError, Result};
use crate::utils::progress::{FoldProgressHandler, batch_bar};
use rafft::core::energy::params::StackingParams;
use rafft::core::energy::stacking::StackingEnergyModel;
use rafft::core::energy::{EnergyModel, KnownStructure};
use rafft::core::io::fasta::FastaFile;
use rafft::core::io::report::{BenchmarkRecord, write_report};
use rafft::core::io::traits::TextFormat;
use rafft::core::models::sequence::Sequence;
use rafft::engine::error::EngineError;
use rafft::engine::progress::ProgressReporter;
use rafft::workflows::{self, fold::FoldResult};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
struct NamedSequence {
    name: String,
    sequence: Sequence,
}

pub fn run(args: FoldArgs) -> Result<()> {
    info!("Resolving configuration from CLI, --set values and file...");
    let config = build_config(&args)?;
    debug!("Resolved configuration: {:?}", config.core_config);

    let records = load_sequences(&config.input)?;
    info!("Loaded {} sequence(s).", records.len());

    let energy_model = config.energy.as_ref().map(load_energy_model).transpose()?;
    let model_ref = energy_model.as_ref().map(|m| m as &dyn EnergyModel);

    let results = fold_all(&records, &config, model_ref)?;

    for (record, result) in records.iter().zip(&results) {
        print_result(record, result);
    }

    if let Some(path) = &config.trajectory_path {
        write_trajectories(path, &results)?;
    }

    if let Some(target) = &config.target {
        let targets = load_targets(target, &records)?;
        let fallback = StackingEnergyModel::default();
        let model = model_ref.unwrap_or(&fallback as &dyn EnergyModel);
        let benchmarks = compare_all(&records, &results, &targets, model)?;
        for record in &benchmarks {
            println!(
                "{}: distance {} (base pairs {}), energy {:.2} vs reference {:.2}",
                record.name,
                record.distance,
                record.base_pair_distance,
                record.predicted_energy,
                record.reference_energy
            );
        }
        if let Some(report_path) = &config.report_path {
            write_report(report_path, &benchmarks).map_err(|e| CliError::Output {
                path: report_path.clone(),
                source: e.into(),
            })?;
            println!("✓ Report written to: {}", report_path.display());
        }
    }

    Ok(())
}

fn load_sequences(source: &SequenceSource) -> Result<Vec<NamedSequence>> {
    match source {
        SequenceSource::Inline(raw) => {
            let sequence = Sequence::new(raw).map_err(EngineError::from)?;
            Ok(vec![NamedSequence {
                name: "query".to_string(),
                sequence,
            }])
        }
        SequenceSource::File(path) => {
            info!("Reading sequences from {:?}", path);
            let file = read_fasta(path)?;
            file.records
                .into_iter()
                .enumerate()
                .map(|(index, record)| {
                    let sequence = Sequence::new(&record.content).map_err(EngineError::from)?;
                    let name = if record.name.is_empty() {
                        format!("record_{}", index + 1)
                    } else {
                        record.name
                    };
                    Ok(NamedSequence { name, sequence })
                })
                .collect()
        }
    }
}

/// One target structure per sequence.
///
/// For a single sequence the whole target file is one structure. Otherwise
/// records are matched by name when every sequence name occurs in the file,
/// and by position when one does not.
fn load_targets(source: &TargetSource, sequences: &[NamedSequence]) -> Result<Vec<String>> {
    let targets = match source {
        TargetSource::Inline(structure) => vec![structure.clone()],
        TargetSource::File(path) => {
            let file = read_fasta(path)?;
            let by_name: Option<Vec<String>> = sequences
                .iter()
                .map(|s| file.get(&s.name).map(|record| record.content.clone()))
                .collect();
            match (sequences, by_name) {
                ([_], _) => vec![file.concatenated()],
                (_, Some(targets)) => {
                    debug!("Matched target records to sequences by name.");
                    targets
                }
                _ => file.records.into_iter().map(|record| record.content).collect(),
            }
        }
    };
    if targets.len() != sequences.len() {
        return Err(CliError::Argument(format!(
            "Got {} target structure(s) for {} sequence(s).",
            targets.len(),
            sequences.len()
        )));
    }
    Ok(targets)
}

fn read_fasta(path: &Path) -> Result<FastaFile> {
    FastaFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn load_energy_model(settings: &EnergySettings) -> Result<StackingEnergyModel> {
    let params = match &settings.params_path {
        Some(path) => {
            info!("Loading energy parameters from {:?}", path);
            StackingParams::load(path).map_err(|e| CliError::FileParsing {
                path: path.clone(),
                source: e.into(),
            })?
        }
        None => StackingParams::default(),
    };
    Ok(StackingEnergyModel::new(params))
}

fn fold_all(
    records: &[NamedSequence],
    config: &AppConfig,
    model: Option<&dyn EnergyModel>,
) -> Result<Vec<FoldResult>> {
    if let [record] = records {
        let handler = FoldProgressHandler::new();
        let reporter = ProgressReporter::with_callback(handler.get_callback());
        let result =
            workflows::fold::run(&record.sequence, &config.core_config, model, &reporter)?;
        return Ok(vec![result]);
    }

    let bar = batch_bar(records.len() as u64);
    let reporter = ProgressReporter::new();
    let results = records
        .par_iter()
        .map(|record| {
            let result =
                workflows::fold::run(&record.sequence, &config.core_config, model, &reporter);
            bar.inc(1);
            result
        })
        .collect::<std::result::Result<Vec<_>, EngineError>>();
    bar.finish_and_clear();
    Ok(results?)
}

fn print_result(record: &NamedSequence, result: &FoldResult) {
    println!(">{}", record.name);
    println!("{}", record.sequence);
    match result.structure.energy {
        Some(energy) => println!("{} ({:.2})", result.structure.dot_bracket, energy),
        None => println!("{}", result.structure.dot_bracket),
    }
}

fn write_trajectories(path: &Path, results: &[FoldResult]) -> Result<()> {
    for (index, result) in results.iter().enumerate() {
        let Some(trajectory) = &result.trajectory else {
            warn!("No trajectory was recorded for record {}.", index + 1);
            continue;
        };
        let output_path = indexed_output_path(path, index + 1, results.len());
        trajectory
            .write_to_path(&output_path)
            .map_err(|e| CliError::Output {
                path: output_path.clone(),
                source: e.into(),
            })?;
        println!("✓ Trajectory written to: {}", output_path.display());
    }
    Ok(())
}

fn compare_all(
    records: &[NamedSequence],
    results: &[FoldResult],
    targets: &[String],
    model: &dyn EnergyModel,
) -> Result<Vec<BenchmarkRecord>> {
    records
        .iter()
        .zip(results)
        .zip(targets)
        .map(|((record, result), target)| {
            let reference = KnownStructure::new(target.trim(), model);
            workflows::benchmark::compare(
                &record.name,
                &record.sequence,
                &result.structure,
                &reference,
                model,
            )
            .map_err(CliError::from)
        })
        .collect()
}

/// `out.traj` stays as is for a single record and becomes `out_2.traj` for
/// the second of several.
fn indexed_output_path(base: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match base.extension() {
        Some(ext) => format!("{}_{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{}", stem, index),
    };
    base.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn indexed_paths_only_change_for_batches() {
        let base = Path::new("runs/out.traj");
        assert_eq!(indexed_output_path(base, 1, 1), PathBuf::from("runs/out.traj"));
        assert_eq!(indexed_output_path(base, 2, 3), PathBuf::from("runs/out_2.traj"));
        assert_eq!(
            indexed_output_path(Path::new("out"), 3, 3),
            PathBuf::from("out_3")
        );
    }

    #[test]
    fn inline_sequence_is_normalized() {
        let records = load_sequences(&SequenceSource::Inline("ggggaaaacccc".into())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "query");
        assert_eq!(records[0].sequence.as_str(), "GGGGAAAACCCC");
    }

    #[test]
    fn fasta_records_keep_their_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seqs.fa");
        fs::write(&path, ">hairpin\nGGGGAAAA\nCCCC\n>chain\nAAAAAAAA\n").unwrap();

        let records = load_sequences(&SequenceSource::File(path)).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["hairpin", "chain"]);
        assert_eq!(records[0].sequence.len(), 12);
    }

    #[test]
    fn headerless_file_gets_a_generated_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seq.txt");
        fs::write(&path, "GGGAAACCC\n").unwrap();

        let records = load_sequences(&SequenceSource::File(path)).unwrap();
        assert_eq!(records[0].name, "record_1");
    }

    fn named(names: &[&str]) -> Vec<NamedSequence> {
        names
            .iter()
            .map(|name| NamedSequence {
                name: name.to_string(),
                sequence: Sequence::new("GGGGAAAACCCC").unwrap(),
            })
            .collect()
    }

    #[test]
    fn target_count_must_match_sequences() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("targets.fa");
        fs::write(&path, ">a\n((((....))))\n>b\n............\n").unwrap();

        let two = named(&["record_1", "record_2"]);
        assert_eq!(load_targets(&TargetSource::File(path.clone()), &two).unwrap().len(), 2);
        assert!(matches!(
            load_targets(&TargetSource::File(path), &named(&["x", "y", "z"])),
            Err(CliError::Argument(_))
        ));
        assert!(matches!(
            load_targets(&TargetSource::Inline("....".into()), &two),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn targets_are_matched_by_name_before_position() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("targets.fa");
        fs::write(&path, ">second\n((((....))))\n>first\n............\n").unwrap();

        let targets =
            load_targets(&TargetSource::File(path), &named(&["first", "second"])).unwrap();
        assert_eq!(targets, ["............", "((((....))))"]);
    }

    #[test]
    fn single_sequence_reads_the_whole_target_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("target.txt");
        fs::write(&path, ">part one\n((((\n>part two\n....))))\n").unwrap();

        let targets = load_targets(&TargetSource::File(path), &named(&["query"])).unwrap();
        assert_eq!(targets, ["((((....))))"]);
    }

    #[test]
    fn missing_params_file_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let settings = EnergySettings {
            params_path: Some(missing.clone()),
        };
        match load_energy_model(&settings) {
            Err(CliError::FileParsing { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn fold_command_writes_trajectory_and_report() {
        let dir = tempdir().unwrap();
        let traj = dir.path().join("fold.traj");
        let report = dir.path().join("report.csv");

        let args = FoldArgs {
            input: crate::cli::SequenceInput {
                sequence: Some("GGGGAAAACCCC".into()),
                seq_file: None,
            },
            config: None,
            min_stem_length: None,
            min_loop_size: None,
            pseudoknots: Default::default(),
            shortlist_size: None,
            exhaustive: true,
            padding: None,
            gc_weight: None,
            au_weight: None,
            gu_weight: None,
            scheme: None,
            energy_params: None,
            no_energy: false,
            target: crate::cli::TargetInput {
                target: Some("((((....))))".into()),
                target_file: None,
            },
            trajectory: Some(traj.clone()),
            report: Some(report.clone()),
            set_values: vec![],
        };

        run(args).unwrap();

        let trajectory = rafft::core::io::trajectory::Trajectory::read_from_path(&traj).unwrap();
        assert_eq!(trajectory.sequence, "GGGGAAAACCCC");
        assert!(trajectory.len() >= 2);

        let records = rafft::core::io::report::read_report(&report).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].predicted, "((((....))))");
        assert_eq!(records[0].distance, 0);
    }
}
