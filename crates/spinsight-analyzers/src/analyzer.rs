use std::{collections::BTreeMap, fmt};

use spinsight_stats::frequency;
use spinsight_wheel::{Slot, WheelTopology};

use crate::{
    chaotic_domain::ChaoticDomainAnalyzer,
    repeat_cluster::RepeatClusterAnalyzer,
    score::{CandidateSet, NumberScore},
    temporal_cycle::{CycleDetection, TemporalCycleAnalyzer},
    variance_balance::VarianceBalanceAnalyzer,
    visual_ballistics::VisualBallisticsAnalyzer,
};

/// Previously computed per-number statistics, injected into analyzers that
/// blend fresh signals with a prior.
///
/// Several analyzers mix their own signal with "how have the numbers done so
/// far": a per-slot hit count and a performance-ordered ranking. Passing the
/// prior explicitly (instead of analyzers reaching into shared state) keeps
/// every analyzer independently testable.
#[derive(Debug, Clone)]
pub struct PriorStats {
    hit_counts: BTreeMap<Slot, u32>,
    ranking: Vec<Slot>,
}

impl PriorStats {
    /// Builds hit counts and the frequency ranking from an analysis window.
    #[must_use]
    pub fn from_window(window: &[Slot]) -> Self {
        let hit_counts = frequency::tally(window.iter().copied());
        let ranking = frequency::ranking(&hit_counts);
        Self {
            hit_counts,
            ranking,
        }
    }

    /// Builds priors from externally supplied counts and ranking.
    #[must_use]
    pub const fn new(hit_counts: BTreeMap<Slot, u32>, ranking: Vec<Slot>) -> Self {
        Self {
            hit_counts,
            ranking,
        }
    }

    #[must_use]
    pub const fn hit_counts(&self) -> &BTreeMap<Slot, u32> {
        &self.hit_counts
    }

    /// Slots ordered best-performing first.
    #[must_use]
    pub fn ranking(&self) -> &[Slot] {
        &self.ranking
    }

    /// Total hits across all slots.
    #[must_use]
    pub fn total_hits(&self) -> u64 {
        self.hit_counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Hit frequencies normalized by the total, as a score map.
    ///
    /// Empty when there are no hits at all.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_frequencies(&self) -> NumberScore {
        let total = self.total_hits();
        if total == 0 {
            return NumberScore::new();
        }
        self.hit_counts
            .iter()
            .map(|(&slot, &count)| (slot, f64::from(count) / total as f64))
            .collect()
    }
}

/// A pure scoring function from an outcome window to a per-number score.
///
/// Implementations must be deterministic and side-effect-free: a fixed window
/// and configuration always produce an identical [`NumberScore`]. Analyzers
/// read the shared [`WheelTopology`] and their window; they never mutate
/// either.
///
/// Windows shorter than [`min_history`](Self::min_history) are a normal,
/// expected outcome: `score` returns an empty map and `candidates` an empty
/// set, never an error.
pub trait ScoringAnalyzer: fmt::Debug + Send + Sync {
    /// Stable identifier used in reports and logs.
    fn name(&self) -> &'static str;

    /// Minimum window length this analyzer needs; zero when any window works.
    fn min_history(&self) -> usize {
        0
    }

    /// Configured size bound for the candidate set.
    fn target_size(&self) -> usize;

    /// Scores every slot the analyzer has signal for over the window.
    fn score(
        &self,
        wheel: &WheelTopology,
        window: &[Slot],
        priors: Option<&PriorStats>,
    ) -> NumberScore;

    /// Turns the score into a bounded candidate set.
    ///
    /// The default goes through the shared stable selector; analyzers with
    /// their own combinatorial selection override this.
    fn candidates(
        &self,
        wheel: &WheelTopology,
        window: &[Slot],
        priors: Option<&PriorStats>,
    ) -> CandidateSet {
        self.score(wheel, window, priors)
            .select_top(self.target_size())
    }

    /// Periodicity diagnostics, for analyzers that detect one.
    fn detected_cycle(&self, window: &[Slot]) -> Option<CycleDetection> {
        let _ = window;
        None
    }
}

/// The five analyzers with their default configurations, in reporting order.
#[must_use]
pub fn default_analyzers() -> Vec<Box<dyn ScoringAnalyzer>> {
    vec![
        Box::new(TemporalCycleAnalyzer::default()),
        Box::new(RepeatClusterAnalyzer::default()),
        Box::new(ChaoticDomainAnalyzer::default()),
        Box::new(VarianceBalanceAnalyzer::default()),
        Box::new(VisualBallisticsAnalyzer::default()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(labels: &[&str]) -> Vec<Slot> {
        labels.iter().map(|l| l.parse().unwrap()).collect()
    }

    #[test]
    fn test_priors_from_window() {
        let window = slots(&["7", "7", "00", "3", "7", "00"]);
        let priors = PriorStats::from_window(&window);
        assert_eq!(priors.total_hits(), 6);
        assert_eq!(priors.ranking()[0], "7".parse().unwrap());
        assert_eq!(priors.ranking()[1], "00".parse().unwrap());
        let freq = priors.hit_frequencies();
        assert!((freq.get("7".parse().unwrap()) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_every_analyzer_handles_an_empty_window() {
        let wheel = WheelTopology::american();
        for analyzer in default_analyzers() {
            let set = analyzer.candidates(&wheel, &[], None);
            assert!(
                set.len() <= analyzer.target_size(),
                "{} exceeded its bound",
                analyzer.name()
            );
        }
    }

    #[test]
    fn test_short_windows_yield_empty_results_where_a_minimum_exists() {
        let wheel = WheelTopology::american();
        let short = slots(&["1", "2", "3"]);
        for analyzer in default_analyzers() {
            if analyzer.min_history() > short.len() {
                assert!(
                    analyzer.score(&wheel, &short, None).is_empty(),
                    "{} should report insufficient data as an empty score",
                    analyzer.name()
                );
            }
        }
    }
}
