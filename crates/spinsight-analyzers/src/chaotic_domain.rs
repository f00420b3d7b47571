//! Chaotic-domain analysis: strange-attractor numbers in phase space.
//!
//! The outcome sequence is embedded as a low-dimensional dynamical system:
//! each phase-space vector is `embedding_dim` outcomes sampled `time_delay`
//! apart, sliding one step at a time. Two signals come out of the embedding:
//!
//! - **recurrence**: vector pairs that match as unordered multisets within a
//!   bounded lookahead credit the outcome that immediately follows the
//!   earlier vector's position ("this state recurs and is followed by this
//!   number")
//! - **divergence**: nearby vector pairs (low component mismatch) contribute
//!   `gap / horizon` samples to the outcomes following the earlier position,
//!   a crude local-sensitivity estimate in the spirit of a Lyapunov exponent
//!
//! High recurrence combined with low divergence marks an attractor.

use std::collections::BTreeMap;

use spinsight_wheel::{Slot, WheelTopology};

use crate::{
    analyzer::{PriorStats, ScoringAnalyzer},
    score::NumberScore,
};

/// Tuning constants for [`ChaoticDomainAnalyzer`].
#[derive(Debug, Clone)]
pub struct ChaoticDomainConfig {
    /// Minimum window length before the embedding is attempted.
    pub min_history: usize,
    /// Only the trailing portion of the history this long is embedded.
    pub trailing_len: usize,
    /// Number of outcomes per phase-space vector.
    pub embedding_dim: usize,
    /// Sampling stride between a vector's outcomes.
    pub time_delay: usize,
    /// How far ahead to look for recurring vectors.
    pub recurrence_lookahead: usize,
    /// How far ahead to pair vectors for divergence sampling.
    pub divergence_window: usize,
    /// Future steps tracked per close vector pair.
    pub divergence_horizon: usize,
    /// Minimum matching components for a pair to count as "close".
    pub match_threshold: usize,
    /// Blend weight of the attractor signal when priors are present.
    pub attractor_weight: f64,
    /// Blend weight of the prior hit frequency (scaled x100).
    pub frequency_weight: f64,
    /// Size bound of the candidate set.
    pub target_size: usize,
}

impl Default for ChaoticDomainConfig {
    fn default() -> Self {
        Self {
            min_history: 500,
            trailing_len: 5_000,
            embedding_dim: 4,
            time_delay: 3,
            recurrence_lookahead: 100,
            divergence_window: 50,
            divergence_horizon: 20,
            match_threshold: 2,
            attractor_weight: 0.7,
            frequency_weight: 0.3,
            target_size: 8,
        }
    }
}

/// Scores numbers that recurring phase-space states tend to be followed by.
#[derive(Debug, Clone, Default)]
pub struct ChaoticDomainAnalyzer {
    config: ChaoticDomainConfig,
}

impl ChaoticDomainAnalyzer {
    #[must_use]
    pub const fn new(config: ChaoticDomainConfig) -> Self {
        Self { config }
    }

    /// Sliding phase-space vectors over `trail`.
    fn embed(&self, trail: &[Slot]) -> Vec<Vec<Slot>> {
        let span = (self.config.embedding_dim - 1) * self.config.time_delay;
        let count = trail.len().saturating_sub(span);
        (0..count)
            .map(|i| {
                (0..self.config.embedding_dim)
                    .map(|j| trail[i + j * self.config.time_delay])
                    .collect()
            })
            .collect()
    }

    /// Recurrence credit: multiset-equal vector pairs within the lookahead
    /// credit the outcome one step after the earlier vector's start.
    fn recurrence_scores(&self, trail: &[Slot], vectors: &[Vec<Slot>]) -> NumberScore {
        let sorted: Vec<Vec<Slot>> = vectors
            .iter()
            .map(|v| {
                let mut v = v.clone();
                v.sort_unstable();
                v
            })
            .collect();

        let mut recurrences = NumberScore::new();
        for i in 0..sorted.len() {
            let upper = (i + 1 + self.config.recurrence_lookahead).min(sorted.len());
            for j in i + 1..upper {
                if sorted[i] == sorted[j] {
                    recurrences.add(trail[i + 1], 1.0);
                }
            }
        }
        recurrences
    }

    /// Mean divergence rate per outcome following a "close" vector pair.
    #[expect(clippy::cast_precision_loss)]
    fn divergence_rates(&self, trail: &[Slot], vectors: &[Vec<Slot>]) -> BTreeMap<Slot, f64> {
        let horizon = self.config.divergence_horizon;
        let limit = vectors.len().saturating_sub(horizon);

        let mut sums: BTreeMap<Slot, (f64, u32)> = BTreeMap::new();
        for i in 0..limit {
            let upper = (i + 1 + self.config.divergence_window).min(limit);
            for j in i + 1..upper {
                let matching = vectors[i]
                    .iter()
                    .zip(&vectors[j])
                    .filter(|(a, b)| a == b)
                    .count();
                if matching < self.config.match_threshold {
                    continue;
                }
                let gap = (j - i) as f64;
                for steps in 1..horizon {
                    if i + steps < trail.len() && j + steps < trail.len() {
                        let entry = sums.entry(trail[i + steps]).or_insert((0.0, 0));
                        entry.0 += gap / steps as f64;
                        entry.1 += 1;
                    }
                }
            }
        }

        sums.into_iter()
            .map(|(slot, (sum, count))| (slot, sum / f64::from(count)))
            .collect()
    }
}

impl ScoringAnalyzer for ChaoticDomainAnalyzer {
    fn name(&self) -> &'static str {
        "chaotic-domain"
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
        priors: Option<&PriorStats>,
    ) -> NumberScore {
        if window.len() < self.config.min_history {
            return NumberScore::new();
        }
        let trail = &window[window.len().saturating_sub(self.config.trailing_len)..];
        let vectors = self.embed(trail);

        let recurrences = self.recurrence_scores(trail, &vectors);
        let divergence = self.divergence_rates(trail, &vectors);

        let attractors: NumberScore = Slot::all()
            .filter_map(|slot| {
                let recurrence = recurrences.get(slot);
                let strength = match divergence.get(&slot) {
                    Some(&rate) if rate > 0.0 => recurrence / (1.0 + rate),
                    _ => recurrence,
                };
                (strength > 0.0).then_some((slot, strength))
            })
            .collect();

        match priors {
            Some(p) if p.total_hits() > 0 => {
                // Frequencies are scaled x100 to sit on a comparable scale
                // with raw recurrence counts.
                let frequencies = p.hit_frequencies().scaled(100.0);
                attractors.blended(
                    &frequencies,
                    self.config.attractor_weight,
                    self.config.frequency_weight,
                )
            }
            _ => attractors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(label: &str) -> Slot {
        label.parse().unwrap()
    }

    /// A strongly recurrent stream: the block `[1, 2, 3, 4, 5, 6]` repeated,
    /// so every phase-space state recurs every 6 steps.
    fn periodic_window() -> Vec<Slot> {
        (0..900)
            .map(|i| Slot::straight(u8::try_from(i % 6 + 1).unwrap()).unwrap())
            .collect()
    }

    #[test]
    fn test_recurrent_states_produce_candidates() {
        let analyzer = ChaoticDomainAnalyzer::default();
        let wheel = WheelTopology::american();
        let set = analyzer.candidates(&wheel, &periodic_window(), None);
        assert!(!set.is_empty());
        assert!(set.len() <= 8);
        // Only the six block members can ever follow a recurring state.
        for s in &set {
            assert!(s.straight_value().unwrap() <= 6);
        }
    }

    #[test]
    fn test_insufficient_history_is_not_an_error() {
        let analyzer = ChaoticDomainAnalyzer::default();
        let wheel = WheelTopology::american();
        let short: Vec<Slot> = (0..499).map(|_| slot("9")).collect();
        assert!(analyzer.score(&wheel, &short, None).is_empty());
        assert!(analyzer.candidates(&wheel, &short, None).is_empty());
    }

    #[test]
    fn test_prior_blend_lifts_frequent_numbers() {
        let analyzer = ChaoticDomainAnalyzer::default();
        let wheel = WheelTopology::american();
        let window = periodic_window();
        let priors = PriorStats::from_window(&window);
        let with = analyzer.score(&wheel, &window, Some(&priors));
        let without = analyzer.score(&wheel, &window, None);
        // The blend only reweights; it must not invent slots outside the
        // union of the two signals.
        for (s, _) in with.iter() {
            assert!(without.get(s) > 0.0 || priors.hit_counts().contains_key(&s));
        }
    }

    #[test]
    fn test_score_is_deterministic() {
        let analyzer = ChaoticDomainAnalyzer::default();
        let wheel = WheelTopology::american();
        let window = periodic_window();
        assert_eq!(
            analyzer.score(&wheel, &window, None),
            analyzer.score(&wheel, &window, None)
        );
    }
}
