use super::config::SearchConfig;
use super::correlation::candidate_offsets;
use super::progress::{Progress, ProgressReporter};
use super::segment::Segment;
use super::window::{StemCandidate, refine};
use crate::core::models::pairs::{BasePair, PairList};
use tracing::{debug, trace};

/// A committed helix in original sequence coordinates.
///
/// `five_prime` and `three_prime` form the innermost pair; the helix extends
/// `length - 1` positions outward on both sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stem {
    pub five_prime: usize,
    pub three_prime: usize,
    pub length: usize,
    pub score: f64,
}

impl Stem {
    /// Pairs from the innermost outward.
    pub fn pairs(&self) -> impl Iterator<Item = BasePair> + '_ {
        (0..self.length).map(|t| BasePair::new(self.five_prime - t, self.three_prime + t))
    }
}

/// Everything one (sub)tree of the recursion produced, in commit order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionOutcome {
    pub pairs: PairList,
    pub stems: Vec<Stem>,
    /// Position lists of the segments where the recursion stopped.
    pub leaves: Vec<Vec<usize>>,
}

impl PartitionOutcome {
    fn leaf(segment: &Segment) -> Self {
        Self {
            leaves: vec![segment.positions().to_vec()],
            ..Self::default()
        }
    }

    fn extend(&mut self, other: PartitionOutcome) {
        self.pairs.append(other.pairs);
        self.stems.extend(other.stems);
        self.leaves.extend(other.leaves);
    }
}

/// Recursively extracts stems from a segment and splits it around each one.
pub struct Partitioner<'a> {
    config: &'a SearchConfig,
    reporter: &'a ProgressReporter<'a>,
}

impl<'a> Partitioner<'a> {
    pub fn new(config: &'a SearchConfig, reporter: &'a ProgressReporter<'a>) -> Self {
        Self { config, reporter }
    }

    pub fn partition(&self, segment: Segment) -> PartitionOutcome {
        self.solve(segment, 0)
    }

    fn solve(&self, segment: Segment, depth: usize) -> PartitionOutcome {
        if segment.is_empty() {
            return PartitionOutcome::default();
        }
        if segment.len() <= self.config.min_loop_size + 1 {
            trace!(depth, len = segment.len(), "Segment too short to fold.");
            return PartitionOutcome::leaf(&segment);
        }

        let Some(candidate) = self.best_candidate(&segment) else {
            trace!(depth, len = segment.len(), "No pairing candidate in segment.");
            return PartitionOutcome::leaf(&segment);
        };
        if candidate.length == 0 || candidate.length < self.config.min_stem_length {
            trace!(
                depth,
                length = candidate.length,
                "Best stem is shorter than the minimum stem length."
            );
            return PartitionOutcome::leaf(&segment);
        }

        let positions = segment.positions();
        let stem = Stem {
            five_prime: positions[candidate.five_prime],
            three_prime: positions[candidate.three_prime],
            length: candidate.length,
            score: candidate.score,
        };
        debug!(
            depth,
            five_prime = stem.five_prime,
            three_prime = stem.three_prime,
            length = stem.length,
            score = stem.score,
            "Committed stem."
        );
        self.reporter.report(Progress::StemCommitted {
            length: stem.length,
        });

        let mut outcome = PartitionOutcome {
            pairs: stem.pairs().collect(),
            stems: vec![stem],
            leaves: Vec::new(),
        };

        if self.config.pseudoknots {
            outcome.extend(self.solve(segment.merged(&candidate), depth + 1));
        } else {
            let outer = segment.outer(&candidate);
            let inner = segment.inner(&candidate);
            let (outer, inner) = self.solve_both(outer, inner, depth + 1);
            outcome.extend(outer);
            outcome.extend(inner);
        }
        outcome
    }

    fn best_candidate(&self, segment: &Segment) -> Option<StemCandidate> {
        candidate_offsets(segment.encoding(), self.config.strategy, self.config.padding)
            .into_iter()
            .filter_map(|offset| {
                refine(
                    segment.encoding(),
                    segment.positions(),
                    offset,
                    self.config.min_loop_size,
                )
            })
            .reduce(|best, candidate| {
                if candidate.outranks(&best) {
                    candidate
                } else {
                    best
                }
            })
    }

    #[cfg(feature = "parallel")]
    fn solve_both(
        &self,
        outer: Segment,
        inner: Segment,
        depth: usize,
    ) -> (PartitionOutcome, PartitionOutcome) {
        rayon::join(|| self.solve(outer, depth), || self.solve(inner, depth))
    }

    #[cfg(not(feature = "parallel"))]
    fn solve_both(
        &self,
        outer: Segment,
        inner: Segment,
        depth: usize,
    ) -> (PartitionOutcome, PartitionOutcome) {
        (self.solve(outer, depth), self.solve(inner, depth))
    }
}
