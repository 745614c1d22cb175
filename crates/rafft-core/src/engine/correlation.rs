use super::config::CandidateStrategy;
use crate::core::encoding::StrandEncoding;
use itertools::Itertools;
use rustfft::FftPlanner;
use rustfft::num_complex::Complex;

/// Segments longer than this are correlated in the frequency domain.
pub const FFT_THRESHOLD: usize = 64;

// Transform round-off below this magnitude is treated as an exact zero.
const FFT_NOISE_FLOOR: f64 = 1e-9;

/// Normalized pairing correlation of a segment with itself, one value per
/// offset `k` in `0..2n-1`.
///
/// The raw value at offset `k` sums the pairing scores of every local pair
/// `(a, b)` with `a + b = k`; it is divided by `min(k, 2n - 2 - k) + padding`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationProfile {
    scores: Vec<f64>,
}

impl CorrelationProfile {
    pub fn compute(encoding: &StrandEncoding, padding: f64) -> Self {
        let raw = if encoding.len() > FFT_THRESHOLD {
            fft_correlation(encoding)
        } else {
            direct_correlation(encoding)
        };
        let last = raw.len().saturating_sub(1);
        let scores = raw
            .into_iter()
            .enumerate()
            .map(|(k, value)| value / (k.min(last - k) as f64 + padding))
            .collect();
        Self { scores }
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Offsets ordered by decreasing score; equal scores list the larger
    /// offset first.
    pub fn ranked(&self) -> Vec<usize> {
        self.scores
            .iter()
            .enumerate()
            .sorted_by(|(ka, a), (kb, b)| b.total_cmp(a).then(kb.cmp(ka)))
            .map(|(k, _)| k)
            .collect()
    }
}

/// Offsets the window refiner should inspect for this segment.
///
/// Exhaustive mode lists every offset from the largest down and never computes
/// a correlation profile.
pub fn candidate_offsets(
    encoding: &StrandEncoding,
    strategy: CandidateStrategy,
    padding: f64,
) -> Vec<usize> {
    let n = encoding.len();
    if n == 0 {
        return Vec::new();
    }
    match strategy {
        CandidateStrategy::Exhaustive => (0..2 * n - 1).rev().collect(),
        CandidateStrategy::Shortlist { size } => {
            let mut ranked = CorrelationProfile::compute(encoding, padding).ranked();
            ranked.truncate(size);
            ranked
        }
    }
}

pub(crate) fn direct_correlation(encoding: &StrandEncoding) -> Vec<f64> {
    let n = encoding.len();
    if n == 0 {
        return Vec::new();
    }
    let forward = encoding.forward();
    let complement = encoding.complement();
    let mut raw = vec![0.0; 2 * n - 1];

    for channel in 0..encoding.channels() {
        for a in 0..n {
            let x = forward[(channel, a)];
            if x == 0.0 {
                continue;
            }
            for b in 0..n {
                raw[a + b] += x * complement[(channel, n - 1 - b)];
            }
        }
    }
    raw
}

pub(crate) fn fft_correlation(encoding: &StrandEncoding) -> Vec<f64> {
    let n = encoding.len();
    if n == 0 {
        return Vec::new();
    }
    let out_len = 2 * n - 1;
    let size = out_len.next_power_of_two();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(size);
    let ifft = planner.plan_fft_inverse(size);

    let forward = encoding.forward();
    let complement = encoding.complement();
    let mut spectrum = vec![Complex::new(0.0, 0.0); size];
    let mut lhs = vec![Complex::new(0.0, 0.0); size];
    let mut rhs = vec![Complex::new(0.0, 0.0); size];

    for channel in 0..encoding.channels() {
        lhs.iter_mut().for_each(|c| *c = Complex::new(0.0, 0.0));
        rhs.iter_mut().for_each(|c| *c = Complex::new(0.0, 0.0));
        for p in 0..n {
            lhs[p].re = forward[(channel, p)];
            // Undo the mirroring so the product is a plain convolution.
            rhs[p].re = complement[(channel, n - 1 - p)];
        }
        fft.process(&mut lhs);
        fft.process(&mut rhs);
        for ((acc, l), r) in spectrum.iter_mut().zip(&lhs).zip(&rhs) {
            *acc += l * r;
        }
    }

    ifft.process(&mut spectrum);
    let scale = size as f64;
    spectrum
        .iter()
        .take(out_len)
        .map(|c| {
            let value = c.re / scale;
            if value.abs() < FFT_NOISE_FLOOR {
                0.0
            } else {
                value.max(0.0)
            }
        })
        .collect()
}
