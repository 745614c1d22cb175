//! # Energy Module
//!
//! Boundary contracts for thermodynamic evaluation. The search itself never
//! consults an energy; models plugged in here are used for reporting and
//! benchmarking only.
//!
//! - [`EnergyModel`] scores a dot-bracket structure of a given sequence.
//! - [`ReferenceFolder`] predicts an independent reference structure.
//! - [`stacking`] provides a built-in nearest-neighbor stacking model whose
//!   parameters live in [`params`].

pub mod params;
pub mod stacking;

use crate::core::models::sequence::Sequence;
use crate::core::models::structure::StructureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnergyError {
    #[error("Structure length {found} does not match sequence length {expected}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Invalid structure: {0}")]
    Structure(#[from] StructureError),

    #[error("Energy model failure: {0}")]
    Model(String),
}

/// Scores a structure under some nucleic-acid thermodynamic model (kcal/mol).
pub trait EnergyModel: Send + Sync {
    fn evaluate(&self, sequence: &Sequence, structure: &str) -> Result<f64, EnergyError>;
}

/// An independent structure predictor used to benchmark the search.
pub trait ReferenceFolder {
    /// Returns the reference structure and its energy.
    fn fold(&self, sequence: &Sequence) -> Result<(String, f64), EnergyError>;
}

/// A reference known ahead of time, such as an experimentally determined
/// structure, whose energy is computed with the given model.
pub struct KnownStructure<'a> {
    structure: String,
    model: &'a dyn EnergyModel,
}

impl<'a> KnownStructure<'a> {
    pub fn new(structure: impl Into<String>, model: &'a dyn EnergyModel) -> Self {
        Self {
            structure: structure.into(),
            model,
        }
    }
}

impl ReferenceFolder for KnownStructure<'_> {
    fn fold(&self, sequence: &Sequence) -> Result<(String, f64), EnergyError> {
        let energy = self.model.evaluate(sequence, &self.structure)?;
        Ok((self.structure.clone(), energy))
    }
}

pub(crate) fn check_length(sequence: &Sequence, structure: &str) -> Result<(), EnergyError> {
    let found = structure.chars().count();
    if found != sequence.len() {
        return Err(EnergyError::LengthMismatch {
            expected: sequence.len(),
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::energy::stacking::StackingEnergyModel;

    #[test]
    fn known_structure_reports_model_energy() {
        let model = StackingEnergyModel::default();
        let sequence = Sequence::new("GGGGAAAACCCC").unwrap();
        let reference = KnownStructure::new("((((....))))", &model);
        let (structure, energy) = reference.fold(&sequence).unwrap();
        assert_eq!(structure, "((((....))))");
        assert_eq!(energy, model.evaluate(&sequence, &structure).unwrap());
    }

    #[test]
    fn known_structure_with_wrong_length_fails() {
        let model = StackingEnergyModel::default();
        let sequence = Sequence::new("GGGAAACCC").unwrap();
        let reference = KnownStructure::new("((...))", &model);
        assert!(matches!(
            reference.fold(&sequence),
            Err(EnergyError::LengthMismatch {
                expected: 9,
                found: 7
            })
        ));
    }
}
