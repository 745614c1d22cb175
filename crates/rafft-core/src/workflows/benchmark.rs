use crate::core::energy::{EnergyModel, ReferenceFolder};
use crate::core::io::report::BenchmarkRecord;
use crate::core::models::sequence::Sequence;
use crate::core::models::structure::{Structure, base_pair_distance, hamming_distance};
use crate::engine::error::EngineError;
use tracing::{debug, instrument};

/// Compares a predicted structure with the one a reference folder produces.
///
/// The predicted energy is taken from the structure when it carries one and
/// is otherwise evaluated with `model`.
///
/// # Errors
///
/// Returns [`EngineError`] if the reference folder or energy model fails, or
/// if the two structures differ in length.
#[instrument(skip_all, name = "benchmark_workflow", fields(name = name))]
pub fn compare(
    name: &str,
    sequence: &Sequence,
    predicted: &Structure,
    reference: &dyn ReferenceFolder,
    model: &dyn EnergyModel,
) -> Result<BenchmarkRecord, EngineError> {
    let (reference_structure, reference_energy) = reference.fold(sequence)?;
    let predicted_energy = match predicted.energy {
        Some(energy) => energy,
        None => model.evaluate(sequence, &predicted.dot_bracket)?,
    };

    let distance = hamming_distance(&predicted.dot_bracket, &reference_structure)?;
    let base_pair_distance = base_pair_distance(&predicted.dot_bracket, &reference_structure)?;
    debug!(distance, base_pair_distance, "Compared prediction with reference.");

    Ok(BenchmarkRecord {
        name: name.to_string(),
        length: sequence.len(),
        reference_energy,
        predicted_energy,
        distance,
        base_pair_distance,
        sequence: sequence.to_string(),
        predicted: predicted.dot_bracket.clone(),
        reference: reference_structure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::energy::KnownStructure;
    use crate::core::energy::stacking::StackingEnergyModel;
    use crate::core::models::pairs::{BasePair, PairList};

    fn predicted(pairs: &[(usize, usize)], len: usize) -> Structure {
        let pairs: PairList = pairs.iter().map(|&(i, j)| BasePair::new(i, j)).collect();
        Structure::from_pairs(pairs, len).unwrap()
    }

    #[test]
    fn identical_structures_have_zero_distance() {
        let sequence = Sequence::new("GGGGAAAACCCC").unwrap();
        let model = StackingEnergyModel::default();
        let reference = KnownStructure::new("((((....))))", &model);
        let prediction = predicted(&[(3, 8), (2, 9), (1, 10), (0, 11)], 12);

        let record = compare("hairpin", &sequence, &prediction, &reference, &model).unwrap();
        assert_eq!(record.distance, 0);
        assert_eq!(record.base_pair_distance, 0);
        assert_eq!(record.length, 12);
        assert!((record.predicted_energy - record.reference_energy).abs() < 1e-9);
    }

    #[test]
    fn partial_prediction_counts_missing_pairs() {
        let sequence = Sequence::new("GGGGAAAACCCC").unwrap();
        let model = StackingEnergyModel::default();
        let reference = KnownStructure::new("((((....))))", &model);
        let prediction = predicted(&[(3, 8), (2, 9), (1, 10)], 12).with_energy(-1.0);

        let record = compare("hairpin", &sequence, &prediction, &reference, &model).unwrap();
        assert_eq!(record.distance, 2);
        assert_eq!(record.base_pair_distance, 1);
        assert_eq!(record.predicted_energy, -1.0);
        assert_eq!(record.predicted, ".(((....))).");
    }

    #[test]
    fn reference_of_wrong_length_is_an_error() {
        let sequence = Sequence::new("GGGGAAAACCCC").unwrap();
        let model = StackingEnergyModel::default();
        let reference = KnownStructure::new("((((...))))", &model);
        let prediction = predicted(&[], 12);

        let result = compare("hairpin", &sequence, &prediction, &reference, &model);
        assert!(matches!(result, Err(EngineError::Energy { .. })));
    }
}
