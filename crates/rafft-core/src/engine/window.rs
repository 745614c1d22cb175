use crate::core::encoding::StrandEncoding;

/// The best contiguous run of pairs found on one offset's diagonal.
///
/// `five_prime` and `three_prime` are local indices of the innermost pair;
/// the run extends `length - 1` steps outward from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StemCandidate {
    pub offset: usize,
    pub score: f64,
    pub five_prime: usize,
    pub three_prime: usize,
    pub length: usize,
}

impl StemCandidate {
    /// Higher score wins; equal scores prefer the larger offset.
    pub fn outranks(&self, other: &StemCandidate) -> bool {
        self.score > other.score || (self.score == other.score && self.offset > other.offset)
    }
}

/// Scans the diagonal `a + b = offset` from its outermost pair inward over
/// the first half and returns the best-scoring step.
///
/// Consecutive steps whose positions are adjacent in the original sequence
/// on both sides compound as `(previous + product) * product`; any break
/// resets the score to the bare product. A step is eligible only if its two
/// original positions lie more than `min_loop_size` apart, and later steps
/// win ties.
pub fn refine(
    encoding: &StrandEncoding,
    positions: &[usize],
    offset: usize,
    min_loop_size: usize,
) -> Option<StemCandidate> {
    let n = positions.len();
    if n == 0 || offset > 2 * n - 2 {
        return None;
    }

    let lo = offset.saturating_sub(n - 1);
    let diagonal_length = offset.min(2 * n - 2 - offset) + 1;
    let half = diagonal_length.div_ceil(2);

    let mut best: Option<StemCandidate> = None;
    let mut score = 0.0;
    let mut run = 0;

    for step in 0..half {
        let a = lo + step;
        let b = offset - a;
        let product = encoding.pair_score(a, b);

        let contiguous =
            step > 0 && positions[a] - positions[a - 1] == 1 && positions[b + 1] - positions[b] == 1;
        if contiguous {
            score = (score + product) * product;
            run = if product > 0.0 { run + 1 } else { 0 };
        } else {
            score = product;
            run = usize::from(product > 0.0);
        }

        let best_score = best.map_or(0.0, |c| c.score);
        if score > 0.0 && score >= best_score && positions[b] - positions[a] > min_loop_size {
            best = Some(StemCandidate {
                offset,
                score,
                five_prime: a,
                three_prime: b,
                length: run,
            });
        }
    }

    best
}
