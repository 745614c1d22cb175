use super::config::EncodingConfig;
use super::window::StemCandidate;
use crate::core::encoding::StrandEncoding;
use crate::core::models::sequence::Sequence;

/// The positions still active in one recursive call, with their encoding.
///
/// `positions` is strictly increasing and holds original sequence indices;
/// column `c` of the encoding belongs to `positions[c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    encoding: StrandEncoding,
    positions: Vec<usize>,
}

impl Segment {
    pub fn full(sequence: &Sequence, config: &EncodingConfig) -> Self {
        Self {
            encoding: StrandEncoding::encode(sequence, config.scheme, &config.weights),
            positions: (0..sequence.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn encoding(&self) -> &StrandEncoding {
        &self.encoding
    }

    /// Positions flanking the stem on both sides, concatenated.
    pub fn outer(&self, stem: &StemCandidate) -> Segment {
        let (left, _, right) = self.split(stem);
        self.restrict(left.chain(right).collect())
    }

    /// Positions strictly between the two sides of the stem.
    pub fn inner(&self, stem: &StemCandidate) -> Segment {
        let (_, inner, _) = self.split(stem);
        self.restrict(inner.collect())
    }

    /// Outer-left, inner and outer-right positions as one segment.
    pub fn merged(&self, stem: &StemCandidate) -> Segment {
        let (left, inner, right) = self.split(stem);
        self.restrict(left.chain(inner).chain(right).collect())
    }

    fn split(
        &self,
        stem: &StemCandidate,
    ) -> (
        std::ops::Range<usize>,
        std::ops::Range<usize>,
        std::ops::Range<usize>,
    ) {
        let n = self.len();
        let left_end = (stem.five_prime + 1).saturating_sub(stem.length);
        let right_start = (stem.three_prime + stem.length).min(n);
        (
            0..left_end,
            stem.five_prime + 1..stem.three_prime,
            right_start..n,
        )
    }

    fn restrict(&self, columns: Vec<usize>) -> Segment {
        Segment {
            encoding: self.encoding.select(&columns),
            positions: columns.iter().map(|&c| self.positions[c]).collect(),
        }
    }
}
