use super::params::StackingParams;
use super::{EnergyError, EnergyModel, check_length};
use crate::core::models::sequence::{Nucleotide, Sequence};
use crate::core::models::structure::parse_dot_bracket;
use tracing::trace;

/// A minimal nearest-neighbor model: helix stacking, terminal A-U/G-U
/// penalties and hairpin initiation. Interior and multi-branch loops
/// contribute nothing.
#[derive(Debug, Clone, Default)]
pub struct StackingEnergyModel {
    params: StackingParams,
}

impl StackingEnergyModel {
    pub fn new(params: StackingParams) -> Self {
        Self { params }
    }

    fn stack_energy(&self, outer: (Nucleotide, Nucleotide), inner: (Nucleotide, Nucleotide)) -> f64 {
        let key = format!("{}{}/{}{}", outer.0, inner.0, outer.1, inner.1);
        match self.params.stack_energy(&key) {
            Some(energy) => energy,
            None if is_wobble(outer) || is_wobble(inner) => self.params.wobble_stack,
            None => 0.0,
        }
    }

    fn terminal_penalty(&self, pair: (Nucleotide, Nucleotide)) -> f64 {
        use Nucleotide::*;
        match pair {
            (A, U) | (U, A) | (G, U) | (U, G) => self.params.terminal_penalty,
            _ => 0.0,
        }
    }
}

fn is_wobble(pair: (Nucleotide, Nucleotide)) -> bool {
    matches!(
        pair,
        (Nucleotide::G, Nucleotide::U) | (Nucleotide::U, Nucleotide::G)
    )
}

impl EnergyModel for StackingEnergyModel {
    fn evaluate(&self, sequence: &Sequence, structure: &str) -> Result<f64, EnergyError> {
        check_length(sequence, structure)?;
        let pairs = parse_dot_bracket(structure)?;
        let n = sequence.len();

        let mut partner = vec![None; n];
        for pair in &pairs {
            partner[pair.i] = Some(pair.j);
            partner[pair.j] = Some(pair.i);
        }
        let mut paired_prefix = vec![0usize; n + 1];
        for k in 0..n {
            paired_prefix[k + 1] = paired_prefix[k] + usize::from(partner[k].is_some());
        }

        let mut energy = 0.0;
        for pair in &pairs {
            let (i, j) = (pair.i, pair.j);
            let (Some(ni), Some(nj)) = (sequence.nucleotide(i), sequence.nucleotide(j)) else {
                continue;
            };

            let stacked_inside = j > i + 2 && partner[i + 1] == Some(j - 1);
            if stacked_inside {
                if let (Some(a), Some(b)) = (sequence.nucleotide(i + 1), sequence.nucleotide(j - 1)) {
                    energy += self.stack_energy((ni, nj), (a, b));
                }
            } else {
                energy += self.terminal_penalty((ni, nj));
            }

            let stacked_outside = i > 0 && j + 1 < n && partner[i - 1] == Some(j + 1);
            if !stacked_outside {
                energy += self.terminal_penalty((ni, nj));
            }

            if paired_prefix[j] - paired_prefix[i + 1] == 0 {
                energy += self.params.hairpin_energy(j - i - 1);
            }
        }

        trace!(structure, energy, "Evaluated structure with the stacking model.");
        Ok(energy)
    }
}
