//! Variance-balance analysis: maximum physical coverage of the rim.
//!
//! Unlike the other analyzers this one does not score raw frequency; it
//! greedily assembles a set whose members are as evenly spaced around the
//! wheel as possible. Spacing quality (*dispersion*) is the reciprocal of the
//! standard deviation of the circular gaps between the set's sorted rim
//! positions: perfectly even spacing has zero gap spread and therefore
//! maximal dispersion. Each greedy step balances dispersion against the
//! candidate's position in the supplied prior ranking.

use spinsight_stats::descriptive::DescriptiveStats;
use spinsight_wheel::{SLOT_COUNT, Slot, WheelTopology};

use crate::{
    analyzer::{PriorStats, ScoringAnalyzer},
    score::{CandidateSet, NumberScore},
};

/// Tuning constants for [`VarianceBalanceAnalyzer`].
#[derive(Debug, Clone)]
pub struct VarianceBalanceConfig {
    /// How many of the prior ranking's head form the candidate pool.
    pub pool_size: usize,
    /// Final set size.
    pub target_size: usize,
    /// Greedy weight of the dispersion objective.
    pub dispersion_weight: f64,
    /// Greedy weight of the prior-rank objective.
    pub rank_weight: f64,
    /// Floor applied to the gap standard deviation before taking the
    /// reciprocal, so perfectly even spacing stays finite.
    pub min_gap_std: f64,
}

impl Default for VarianceBalanceConfig {
    fn default() -> Self {
        Self {
            pool_size: 20,
            target_size: 8,
            dispersion_weight: 0.7,
            rank_weight: 0.3,
            min_gap_std: 1e-6,
        }
    }
}

/// Greedy dispersion-maximizing selector over a prior ranking.
#[derive(Debug, Clone, Default)]
pub struct VarianceBalanceAnalyzer {
    config: VarianceBalanceConfig,
}

impl VarianceBalanceAnalyzer {
    #[must_use]
    pub const fn new(config: VarianceBalanceConfig) -> Self {
        Self { config }
    }

    /// Spatial dispersion of a slot set on the rim.
    ///
    /// Sets of fewer than two slots have no gaps to compare and score zero.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn dispersion(&self, wheel: &WheelTopology, slots: &[Slot]) -> f64 {
        if slots.len() < 2 {
            return 0.0;
        }
        let mut positions: Vec<usize> = slots.iter().map(|&s| wheel.position_of(s)).collect();
        positions.sort_unstable();

        let gaps = positions.iter().enumerate().map(|(i, &pos)| {
            let next = positions[(i + 1) % positions.len()];
            let gap = if i + 1 == positions.len() {
                next + SLOT_COUNT - pos
            } else {
                next - pos
            };
            gap as f64
        });

        // len >= 2 guarantees at least two gaps.
        let stats = DescriptiveStats::new(gaps).unwrap();
        1.0 / stats.std_dev.max(self.config.min_gap_std)
    }

    #[expect(clippy::cast_precision_loss)]
    fn rank_weight(&self, rank_index: usize, pool_len: usize) -> f64 {
        1.0 - rank_index as f64 / pool_len as f64
    }
}

impl ScoringAnalyzer for VarianceBalanceAnalyzer {
    fn name(&self) -> &'static str {
        "variance-balance"
    }

    fn target_size(&self) -> usize {
        self.config.target_size
    }

    /// Rank weights over the pool; the real work happens in
    /// [`candidates`](ScoringAnalyzer::candidates).
    fn score(
        &self,
        _wheel: &WheelTopology,
        _window: &[Slot],
        priors: Option<&PriorStats>,
    ) -> NumberScore {
        let Some(priors) = priors else {
            return NumberScore::new();
        };
        let pool = &priors.ranking()[..self.config.pool_size.min(priors.ranking().len())];
        pool.iter()
            .enumerate()
            .map(|(i, &slot)| (slot, self.rank_weight(i, pool.len())))
            .collect()
    }

    /// Greedy build: repeatedly add the pool member maximizing
    /// `dispersion_weight x dispersion + rank_weight x rank weight`.
    ///
    /// Returns the set in the order slots were added. Without a ranking, or
    /// with a pool smaller than the target, there is nothing to optimize and
    /// the result is empty.
    fn candidates(
        &self,
        wheel: &WheelTopology,
        _window: &[Slot],
        priors: Option<&PriorStats>,
    ) -> CandidateSet {
        let mut set = CandidateSet::new();
        let Some(priors) = priors else {
            return set;
        };
        let pool: Vec<Slot> = priors
            .ranking()
            .iter()
            .take(self.config.pool_size)
            .copied()
            .collect();
        if pool.len() < self.config.target_size {
            return set;
        }

        let mut remaining: Vec<(usize, Slot)> = pool.iter().copied().enumerate().collect();
        let mut members: Vec<Slot> = Vec::with_capacity(self.config.target_size);
        while members.len() < self.config.target_size && !remaining.is_empty() {
            let mut best: Option<(usize, f64)> = None;
            for (idx, &(rank, slot)) in remaining.iter().enumerate() {
                let mut trial = members.clone();
                trial.push(slot);
                let combined = self.config.dispersion_weight * self.dispersion(wheel, &trial)
                    + self.config.rank_weight * self.rank_weight(rank, pool.len());
                if best.is_none_or(|(_, score)| combined > score) {
                    best = Some((idx, combined));
                }
            }
            // remaining is non-empty, so a best pick always exists.
            let (idx, _) = best.unwrap();
            let (_, slot) = remaining.remove(idx);
            members.push(slot);
        }

        for slot in members {
            set.push(slot);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn priors_with_ranking(labels: &[&str]) -> PriorStats {
        let ranking: Vec<Slot> = labels.iter().map(|l| l.parse().unwrap()).collect();
        let counts: BTreeMap<Slot, u32> = ranking
            .iter()
            .enumerate()
            .map(|(i, &s)| (s, u32::try_from(labels.len() - i).unwrap()))
            .collect();
        PriorStats::new(counts, ranking)
    }

    fn full_pool() -> PriorStats {
        priors_with_ranking(&[
            "0", "28", "9", "26", "30", "11", "7", "20", "32", "17", "5", "22", "34", "15", "3",
            "24", "36", "13", "1", "00",
        ])
    }

    #[test]
    fn test_even_spacing_beats_clustered_spacing() {
        let analyzer = VarianceBalanceAnalyzer::default();
        let wheel = WheelTopology::american();
        // Four slots evenly spread vs. four adjacent pockets.
        let even: Vec<Slot> = [0_usize, 9, 19, 28]
            .iter()
            .map(|&p| wheel.slot_at(p))
            .collect();
        let clustered: Vec<Slot> = (0..4).map(|p| wheel.slot_at(p)).collect();
        assert!(analyzer.dispersion(&wheel, &even) > analyzer.dispersion(&wheel, &clustered));
    }

    #[test]
    fn test_tiny_sets_have_zero_dispersion() {
        let analyzer = VarianceBalanceAnalyzer::default();
        let wheel = WheelTopology::american();
        assert_eq!(analyzer.dispersion(&wheel, &[]), 0.0);
        assert_eq!(analyzer.dispersion(&wheel, &[wheel.slot_at(5)]), 0.0);
    }

    #[test]
    fn test_perfectly_even_spacing_stays_finite() {
        let analyzer = VarianceBalanceAnalyzer::default();
        let wheel = WheelTopology::american();
        // Two slots exactly opposite: both gaps are 19, std dev is zero.
        let opposite = [wheel.slot_at(0), wheel.slot_at(19)];
        let d = analyzer.dispersion(&wheel, &opposite);
        assert!(d.is_finite());
        assert!(d > 0.0);
    }

    #[test]
    fn test_greedy_build_reaches_target_in_added_order() {
        let analyzer = VarianceBalanceAnalyzer::default();
        let wheel = WheelTopology::american();
        let priors = full_pool();
        let set = analyzer.candidates(&wheel, &[], Some(&priors));
        assert_eq!(set.len(), 8);
        // The first pick has no dispersion signal yet, so rank decides it.
        assert_eq!(set.as_slice()[0], priors.ranking()[0]);
    }

    #[test]
    fn test_without_ranking_there_is_nothing_to_optimize() {
        let analyzer = VarianceBalanceAnalyzer::default();
        let wheel = WheelTopology::american();
        assert!(analyzer.candidates(&wheel, &[], None).is_empty());
        let tiny = priors_with_ranking(&["1", "2", "3"]);
        assert!(analyzer.candidates(&wheel, &[], Some(&tiny)).is_empty());
    }

    #[test]
    fn test_selection_is_deterministic() {
        let analyzer = VarianceBalanceAnalyzer::default();
        let wheel = WheelTopology::american();
        let priors = full_pool();
        assert_eq!(
            analyzer.candidates(&wheel, &[], Some(&priors)),
            analyzer.candidates(&wheel, &[], Some(&priors))
        );
    }
}
