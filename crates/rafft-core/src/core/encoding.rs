//! Numeric strand encodings used by the correlation search.
//!
//! A sequence of length `n` is encoded twice: a forward matrix with one
//! one-hot column per position, and a complementary matrix whose columns hold
//! the pairing weights of each position, stored in reverse order. The dot
//! product of forward column `p` and complementary column `n - 1 - q` is the
//! pairing weight of positions `p` and `q`.

use crate::core::models::sequence::{Nucleotide, Sequence};
use nalgebra::DMatrix;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingScheme {
    /// One channel per nucleotide.
    #[default]
    Nucleotide,
    /// One channel per ordered dinucleotide; only stacked pairs score.
    Stacking,
}

impl EncodingScheme {
    pub fn channels(self) -> usize {
        match self {
            EncodingScheme::Nucleotide => 4,
            EncodingScheme::Stacking => 16,
        }
    }
}

impl FromStr for EncodingScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nucleotide" => Ok(EncodingScheme::Nucleotide),
            "stacking" => Ok(EncodingScheme::Stacking),
            other => Err(format!(
                "unknown encoding scheme '{}', expected 'nucleotide' or 'stacking'",
                other
            )),
        }
    }
}

impl fmt::Display for EncodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingScheme::Nucleotide => f.write_str("nucleotide"),
            EncodingScheme::Stacking => f.write_str("stacking"),
        }
    }
}

/// Weights of the three canonical pair types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairWeights {
    pub gc: f64,
    pub au: f64,
    pub gu: f64,
}

impl Default for PairWeights {
    fn default() -> Self {
        Self {
            gc: 1.0,
            au: 1.0,
            gu: 1.0,
        }
    }
}

impl PairWeights {
    #[inline]
    pub fn weight(&self, a: Nucleotide, b: Nucleotide) -> f64 {
        use Nucleotide::*;
        match (a, b) {
            (G, C) | (C, G) => self.gc,
            (A, U) | (U, A) => self.au,
            (G, U) | (U, G) => self.gu,
            _ => 0.0,
        }
    }

    fn weight_of(&self, a: Nucleotide, b: Option<Nucleotide>) -> f64 {
        b.map_or(0.0, |b| self.weight(a, b))
    }
}

/// Forward and mirrored complementary encodings of one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct StrandEncoding {
    forward: DMatrix<f64>,
    complement: DMatrix<f64>,
}

impl StrandEncoding {
    pub fn encode(sequence: &Sequence, scheme: EncodingScheme, weights: &PairWeights) -> Self {
        let nucleotides: Vec<Option<Nucleotide>> = sequence.nucleotides().collect();
        match scheme {
            EncodingScheme::Nucleotide => Self::encode_nucleotides(&nucleotides, weights),
            EncodingScheme::Stacking => Self::encode_stacks(&nucleotides, weights),
        }
    }

    fn encode_nucleotides(seq: &[Option<Nucleotide>], weights: &PairWeights) -> Self {
        let n = seq.len();
        let forward = DMatrix::from_fn(4, n, |channel, p| match seq[p] {
            Some(nuc) if nuc.index() == channel => 1.0,
            _ => 0.0,
        });
        let complement = DMatrix::from_fn(4, n, |channel, k| {
            weights.weight_of(Nucleotide::ALL[channel], seq[n - 1 - k])
        });
        Self {
            forward,
            complement,
        }
    }

    // Channel 4x + y holds the dinucleotide (x, y). Forward column p encodes
    // (s[p], s[p+1]); complementary column q scores partners for (s[q], s[q-1]).
    fn encode_stacks(seq: &[Option<Nucleotide>], weights: &PairWeights) -> Self {
        let n = seq.len();
        let forward = DMatrix::from_fn(16, n, |channel, p| {
            let (x, y) = (channel / 4, channel % 4);
            match (seq[p], seq.get(p + 1).copied().flatten()) {
                (Some(a), Some(b)) if a.index() == x && b.index() == y => 1.0,
                _ => 0.0,
            }
        });
        let complement = DMatrix::from_fn(16, n, |channel, k| {
            let q = n - 1 - k;
            if q == 0 {
                return 0.0;
            }
            let (x, y) = (Nucleotide::ALL[channel / 4], Nucleotide::ALL[channel % 4]);
            weights.weight_of(x, seq[q]) * weights.weight_of(y, seq[q - 1])
        });
        Self {
            forward,
            complement,
        }
    }

    pub fn len(&self) -> usize {
        self.forward.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.ncols() == 0
    }

    pub fn channels(&self) -> usize {
        self.forward.nrows()
    }

    pub fn forward(&self) -> &DMatrix<f64> {
        &self.forward
    }

    pub fn complement(&self) -> &DMatrix<f64> {
        &self.complement
    }

    /// Pairing score of local columns `a` and `b`.
    #[inline]
    pub fn pair_score(&self, a: usize, b: usize) -> f64 {
        let n = self.len();
        self.forward.column(a).dot(&self.complement.column(n - 1 - b))
    }

    /// A new encoding restricted to the given strictly increasing local columns.
    pub fn select(&self, columns: &[usize]) -> Self {
        let n = self.len();
        let mirrored: Vec<usize> = columns.iter().rev().map(|&c| n - 1 - c).collect();
        Self {
            forward: self.forward.select_columns(columns.iter()),
            complement: self.complement.select_columns(mirrored.iter()),
        }
    }
}
