//! Repeat-cluster analysis: numbers that hit in bunches.
//!
//! Scans the trailing history with several sliding window sizes and credits
//! numbers that repeat inside a window, weighting recent windows more and
//! small responsive windows less than large ones would be. Repeat credit
//! spreads to each number's physical neighbors at half weight, and a hot-cold
//! trend signal rewards numbers whose recent hit rate roughly doubled against
//! their older baseline. A diversity rule keeps the final set from collapsing
//! onto already-known top performers.

use std::collections::BTreeSet;

use spinsight_stats::frequency;
use spinsight_wheel::{Slot, WheelTopology};

use crate::{
    analyzer::{PriorStats, ScoringAnalyzer},
    score::{CandidateSet, NumberScore},
};

/// Tuning constants for [`RepeatClusterAnalyzer`].
#[derive(Debug, Clone)]
pub struct RepeatClusterConfig {
    /// Sliding window sizes scanned for repeats.
    pub window_sizes: Vec<usize>,
    /// Only the trailing portion of the history this long is scanned.
    pub trailing_len: usize,
    /// Physical neighbor radius receiving spread repeat credit.
    pub neighbor_radius: usize,
    /// Fraction of a number's repeat score passed to each neighbor.
    pub neighbor_weight: f64,
    /// Length of the "recent" slice of the hot-cold split.
    pub recent_len: usize,
    /// Length of the adjoining "older" slice.
    pub older_len: usize,
    /// Trend target: recent rate ≈ `acceleration` x older rate scores best.
    pub acceleration: f64,
    /// Blend weight of the repeat/neighbor signal.
    pub cluster_weight: f64,
    /// Blend weight of the hot-cold trend signal.
    pub trend_weight: f64,
    /// How many of the prior ranking's head count as "known top performers".
    pub top_performer_pool: usize,
    /// Size bound of the candidate set.
    pub target_size: usize,
}

impl Default for RepeatClusterConfig {
    fn default() -> Self {
        Self {
            window_sizes: vec![3, 5, 8, 10],
            trailing_len: 3_000,
            neighbor_radius: 2,
            neighbor_weight: 0.5,
            recent_len: 100,
            older_len: 900,
            acceleration: 2.0,
            cluster_weight: 0.7,
            trend_weight: 0.3,
            top_performer_pool: 15,
            target_size: 8,
        }
    }
}

/// Scores short-range repetition clusters, physically spread on the rim.
#[derive(Debug, Clone, Default)]
pub struct RepeatClusterAnalyzer {
    config: RepeatClusterConfig,
}

impl RepeatClusterAnalyzer {
    #[must_use]
    pub const fn new(config: RepeatClusterConfig) -> Self {
        Self { config }
    }

    /// Repeat credit accumulated over every window size.
    #[expect(clippy::cast_precision_loss)]
    fn repeat_scores(&self, trail: &[Slot]) -> NumberScore {
        let mut repeats = NumberScore::new();
        let len = trail.len() as f64;
        for &size in &self.config.window_sizes {
            if trail.len() <= size {
                continue;
            }
            for (i, window) in trail.windows(size).enumerate() {
                let counts = frequency::tally(window.iter().copied());
                let recency_factor = 1.0 + i as f64 / len;
                for (slot, count) in counts {
                    if count > 1 {
                        repeats.add(slot, f64::from(count) / size as f64 * recency_factor);
                    }
                }
            }
        }
        repeats
    }

    /// Hot-cold trend: `1 - |recent_rate - acceleration * older_rate|`,
    /// clipped at zero.
    #[expect(clippy::cast_precision_loss)]
    fn hot_cold_scores(&self, trail: &[Slot]) -> NumberScore {
        let recent_start = trail.len().saturating_sub(self.config.recent_len);
        let older_start = recent_start.saturating_sub(self.config.older_len);
        let recent = &trail[recent_start..];
        let older = &trail[older_start..recent_start];

        let recent_counts = frequency::tally(recent.iter().copied());
        let older_counts = frequency::tally(older.iter().copied());
        let recent_len = recent.len().max(1) as f64;
        let older_len = older.len().max(1) as f64;

        Slot::all()
            .map(|slot| {
                let recent_rate =
                    f64::from(recent_counts.get(&slot).copied().unwrap_or(0)) / recent_len;
                let older_rate =
                    f64::from(older_counts.get(&slot).copied().unwrap_or(0)) / older_len;
                let trend = 1.0 - (recent_rate - self.config.acceleration * older_rate).abs();
                (slot, trend.max(0.0))
            })
            .collect()
    }
}

impl ScoringAnalyzer for RepeatClusterAnalyzer {
    fn name(&self) -> &'static str {
        "repeat-cluster"
    }

    fn target_size(&self) -> usize {
        self.config.target_size
    }

    fn score(
        &self,
        wheel: &WheelTopology,
        window: &[Slot],
        _priors: Option<&PriorStats>,
    ) -> NumberScore {
        if window.is_empty() {
            return NumberScore::new();
        }
        let trail = &window[window.len().saturating_sub(self.config.trailing_len)..];

        let repeats = self.repeat_scores(trail);
        let mut clustered = repeats.clone();
        for (slot, score) in repeats.iter() {
            for neighbor in wheel.neighbors(slot, self.config.neighbor_radius) {
                clustered.add(neighbor, score * self.config.neighbor_weight);
            }
        }

        clustered.blended(
            &self.hot_cold_scores(trail),
            self.config.cluster_weight,
            self.config.trend_weight,
        )
    }

    /// Ranks by score, then applies the diversity rule when a prior ranking
    /// is available: at most half the target set may be already-known top
    /// performers, the rest must be newly surfaced numbers.
    fn candidates(
        &self,
        wheel: &WheelTopology,
        window: &[Slot],
        priors: Option<&PriorStats>,
    ) -> CandidateSet {
        let score = self.score(wheel, window, priors);
        let known: BTreeSet<Slot> = match priors {
            Some(p) if !p.ranking().is_empty() => p
                .ranking()
                .iter()
                .take(self.config.top_performer_pool)
                .copied()
                .collect(),
            _ => return score.select_top(self.config.target_size),
        };

        let known_cap = self.config.target_size / 2;
        let mut known_taken = 0;
        let mut set = CandidateSet::new();
        for slot in score.ranked() {
            if set.len() >= self.config.target_size {
                break;
            }
            if known.contains(&slot) {
                if known_taken < known_cap {
                    set.push(slot);
                    known_taken += 1;
                }
            } else {
                set.push(slot);
            }
        }
        set
    }
}
