//! Temporal-cycle analysis: hidden periodicity in the outcome stream.
//!
//! Searches for a cycle length `L` such that outcomes recur preferentially at
//! fixed phase offsets `i mod L`. For each candidate length the window is
//! partitioned into phase buckets; a bucket whose peak outcome probability
//! sits far from the uniform baseline (`1/38`) is evidence of structure, and
//! the mean of those deviations is the length's *pattern strength*. The
//! strongest length then drives a vote over the next few upcoming phases,
//! with nearer phases weighted more.

use std::collections::BTreeMap;

use serde::Serialize;
use spinsight_stats::descriptive::mean_abs_deviation;
use spinsight_wheel::{SLOT_COUNT, Slot, WheelTopology};

use crate::{
    analyzer::{PriorStats, ScoringAnalyzer},
    score::NumberScore,
};

/// Probability of any single slot under a fair wheel.
#[expect(clippy::cast_precision_loss)]
const UNIFORM_PROBABILITY: f64 = 1.0 / SLOT_COUNT as f64;

/// Tuning constants for [`TemporalCycleAnalyzer`].
#[derive(Debug, Clone)]
pub struct TemporalCycleConfig {
    /// Minimum window length before cycle search runs at all.
    pub min_history: usize,
    /// Upper bound (exclusive) on tried cycle lengths.
    pub max_cycle_length: usize,
    /// Tried lengths are also capped at `window_len / cycle_length_divisor`.
    pub cycle_length_divisor: usize,
    /// How many upcoming draws to derive phase offsets for.
    pub horizon: usize,
    /// Per-step decay of the phase vote: step `k` weighs `recency_decay^k`.
    pub recency_decay: f64,
    /// Blend weight of the normalized phase votes.
    pub phase_weight: f64,
    /// Blend weight of the normalized per-number hit tally.
    pub tally_weight: f64,
    /// Size bound of the candidate set.
    pub target_size: usize,
}

impl Default for TemporalCycleConfig {
    fn default() -> Self {
        Self {
            min_history: 1_000,
            max_cycle_length: 50,
            cycle_length_divisor: 10,
            horizon: 9,
            recency_decay: 0.7,
            phase_weight: 0.6,
            tally_weight: 0.4,
            target_size: 10,
        }
    }
}

/// The strongest cycle found in a window, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleDetection {
    /// Detected cycle length in spins.
    pub length: usize,
    /// Pattern strength: mean peak deviation from uniform, scaled x100.
    pub strength: f64,
}

/// Detects hidden periodicity and scores the numbers favored by the upcoming
/// phases of the strongest cycle.
#[derive(Debug, Clone, Default)]
pub struct TemporalCycleAnalyzer {
    config: TemporalCycleConfig,
}

impl TemporalCycleAnalyzer {
    #[must_use]
    pub const fn new(config: TemporalCycleConfig) -> Self {
        Self { config }
    }

    /// Phase-bucket tallies for cycle length `length`.
    ///
    /// Bucket `p` counts outcomes at indices `i ≡ p (mod length)`; the last
    /// `length` outcomes are left out, mirroring the scan that stops one full
    /// cycle short of the end.
    fn phase_buckets(window: &[Slot], length: usize) -> Vec<BTreeMap<Slot, u32>> {
        let mut buckets = vec![BTreeMap::new(); length];
        for (i, &slot) in window[..window.len() - length].iter().enumerate() {
            *buckets[i % length].entry(slot).or_insert(0) += 1;
        }
        buckets
    }

    /// Pattern strength of one cycle length, `None` when every bucket is
    /// empty (degenerate data).
    fn pattern_strength(window: &[Slot], length: usize) -> Option<f64> {
        let peaks = Self::phase_buckets(window, length)
            .into_iter()
            .filter_map(|bucket| {
                let total: u32 = bucket.values().sum();
                let peak = bucket.values().max().copied()?;
                Some(f64::from(peak) / f64::from(total))
            })
            .collect::<Vec<_>>();
        mean_abs_deviation(peaks, UNIFORM_PROBABILITY).map(|dev| dev * 100.0)
    }

    /// Searches the bounded length range for the strongest cycle.
    ///
    /// Ties go to the smallest length. `None` when the window is too short or
    /// no length produced a non-empty bucket tally.
    #[must_use]
    pub fn detect(&self, window: &[Slot]) -> Option<CycleDetection> {
        if window.len() < self.config.min_history {
            return None;
        }
        let max_length = self
            .config
            .max_cycle_length
            .min(window.len() / self.config.cycle_length_divisor);

        let mut best: Option<CycleDetection> = None;
        for length in 2..max_length {
            let Some(strength) = Self::pattern_strength(window, length) else {
                continue;
            };
            if best.is_none_or(|b| strength > b.strength) {
                best = Some(CycleDetection { length, strength });
            }
        }
        best
    }
}

impl ScoringAnalyzer for TemporalCycleAnalyzer {
    fn name(&self) -> &'static str {
        "temporal-cycle"
    }

    fn min_history(&self) -> usize {
        self.config.min_history
    }

    fn target_size(&self) -> usize {
        self.config.target_size
    }

    fn score(
        &self,
        _wheel: &WheelTopology,
        window: &[Slot],
        _priors: Option<&PriorStats>,
    ) -> NumberScore {
        let Some(detection) = self.detect(window) else {
            return NumberScore::new();
        };
        let length = detection.length;
        let current_phase = window.len() % length;

        // Every past outcome at an upcoming phase votes for its number, with
        // nearer upcoming steps counting more.
        let mut votes = NumberScore::new();
        let mut weight = 1.0;
        for step in 0..self.config.horizon {
            let phase = (current_phase + step) % length;
            for &slot in window.iter().skip(phase).step_by(length) {
                votes.add(slot, weight);
            }
            weight *= self.config.recency_decay;
        }

        let tallies: NumberScore = window[..window.len() - length]
            .iter()
            .map(|&slot| (slot, 1.0))
            .collect();

        votes.normalized().blended(
            &tallies.normalized(),
            self.config.phase_weight,
            self.config.tally_weight,
        )
    }

    fn detected_cycle(&self, window: &[Slot]) -> Option<CycleDetection> {
        self.detect(window)
    }
}
