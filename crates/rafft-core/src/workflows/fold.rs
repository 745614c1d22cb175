use crate::core::energy::EnergyModel;
use crate::core::io::trajectory::{Trajectory, TrajectoryEntry};
use crate::core::models::pairs::PairList;
use crate::core::models::sequence::Sequence;
use crate::core::models::structure::{Structure, dot_bracket};
use crate::engine::config::FoldConfig;
use crate::engine::error::EngineError;
use crate::engine::partition::{Partitioner, Stem};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::segment::Segment;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct FoldResult {
    pub structure: Structure,
    /// Stems in the order they were committed.
    pub stems: Vec<Stem>,
    /// Position lists of the segments where the search stopped.
    pub leaves: Vec<Vec<usize>>,
    /// Open chain followed by the structure after each committed stem.
    pub trajectory: Option<Trajectory>,
}

/// Folds one sequence.
///
/// The energy model, when given, only annotates the final structure and the
/// trajectory; it never influences which stems are chosen.
///
/// # Errors
///
/// Returns [`EngineError`] if the structure cannot be assembled or the energy
/// model rejects it.
#[instrument(skip_all, name = "fold_workflow", fields(len = sequence.len()))]
pub fn run(
    sequence: &Sequence,
    config: &FoldConfig,
    energy_model: Option<&dyn EnergyModel>,
    reporter: &ProgressReporter,
) -> Result<FoldResult, EngineError> {
    reporter.report(Progress::PhaseStart { name: "Search" });
    info!(
        strategy = ?config.search.strategy,
        pseudoknots = config.search.pseudoknots,
        scheme = %config.encoding.scheme,
        "Starting structure search."
    );

    let segment = Segment::full(sequence, &config.encoding);
    let outcome = Partitioner::new(&config.search, reporter).partition(segment);
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Assembly" });
    let n = sequence.len();
    let mut structure = Structure::from_pairs(outcome.pairs, n)?;
    if let Some(model) = energy_model {
        let energy = model.evaluate(sequence, &structure.dot_bracket)?;
        structure = structure.with_energy(energy);
    }

    let trajectory = if config.record_trajectory {
        Some(build_trajectory(sequence, &outcome.stems, energy_model)?)
    } else {
        None
    };
    reporter.report(Progress::PhaseFinish);

    info!(
        stems = outcome.stems.len(),
        pairs = structure.pairs.len(),
        energy = ?structure.energy,
        "Search finished."
    );

    Ok(FoldResult {
        structure,
        stems: outcome.stems,
        leaves: outcome.leaves,
        trajectory,
    })
}

fn build_trajectory(
    sequence: &Sequence,
    stems: &[Stem],
    energy_model: Option<&dyn EnergyModel>,
) -> Result<Trajectory, EngineError> {
    let n = sequence.len();
    let mut trajectory = Trajectory::new(sequence.as_str());
    let mut pairs = PairList::new();

    let entry = |pairs: &PairList| -> Result<TrajectoryEntry, EngineError> {
        let structure = dot_bracket(pairs, n)?;
        let energy = match energy_model {
            Some(model) => model.evaluate(sequence, &structure)?,
            None => 0.0,
        };
        Ok(TrajectoryEntry { structure, energy })
    };

    trajectory.push_step(vec![entry(&pairs)?]);
    for stem in stems {
        stem.pairs().for_each(|pair| pairs.push(pair));
        trajectory.push_step(vec![entry(&pairs)?]);
    }
    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::energy::EnergyError;
    use crate::core::energy::stacking::StackingEnergyModel;
    use crate::engine::config::{CandidateStrategy, FoldConfigBuilder};

    fn config(pseudoknots: bool, record_trajectory: bool) -> FoldConfig {
        FoldConfigBuilder::new()
            .min_stem_length(2)
            .min_loop_size(3)
            .strategy(CandidateStrategy::Shortlist { size: 20 })
            .padding(1.0)
            .pseudoknots(pseudoknots)
            .record_trajectory(record_trajectory)
            .build()
            .unwrap()
    }

    fn fold(seq: &str, config: &FoldConfig, model: Option<&dyn EnergyModel>) -> FoldResult {
        run(
            &Sequence::new(seq).unwrap(),
            config,
            model,
            &ProgressReporter::new(),
        )
        .unwrap()
    }

    struct RejectingModel;

    impl EnergyModel for RejectingModel {
        fn evaluate(&self, _: &Sequence, _: &str) -> Result<f64, EnergyError> {
            Err(EnergyError::Model("unavailable".to_string()))
        }
    }

    #[test]
    fn simple_hairpin_folds_into_one_helix() {
        let result = fold("GGGGAAAACCCC", &config(false, false), None);
        assert_eq!(result.structure.dot_bracket, "((((....))))");
        assert_eq!(result.structure.energy, None);
        assert_eq!(result.stems.len(), 1);
        assert!(result.trajectory.is_none());
    }

    #[test]
    fn energy_model_annotates_the_structure() {
        let model = StackingEnergyModel::default();
        let result = fold("GGGGAAAACCCC", &config(false, false), Some(&model));
        let energy = result.structure.energy.unwrap();
        assert!((energy - (3.0 * -3.26 + 5.6)).abs() < 1e-9);
    }

    #[test]
    fn energy_model_failure_is_surfaced() {
        let result = run(
            &Sequence::new("GGGGAAAACCCC").unwrap(),
            &config(false, false),
            Some(&RejectingModel),
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::Energy { .. })));
    }

    #[test]
    fn trajectory_starts_open_and_adds_one_stem_per_block() {
        let result = fold("GGGGAAAACCCC", &config(false, true), None);
        let trajectory = result.trajectory.unwrap();
        assert_eq!(trajectory.sequence, "GGGGAAAACCCC");
        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory.steps[0][0].structure, "............");
        assert_eq!(trajectory.steps[1][0].structure, "((((....))))");
        assert_eq!(trajectory.connections().unwrap().len(), 1);
    }

    #[test]
    fn progress_reports_phases_and_stems() {
        use std::sync::Mutex;

        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(format!("{:?}", event));
        }));
        run(
            &Sequence::new("GGGGAAAACCCC").unwrap(),
            &config(false, false),
            None,
            &reporter,
        )
        .unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        assert_eq!(
            events,
            [
                "PhaseStart { name: \"Search\" }",
                "StemCommitted { length: 4 }",
                "PhaseFinish",
                "PhaseStart { name: \"Assembly\" }",
                "PhaseFinish",
            ]
        );
    }
}
