use std::collections::BTreeMap;

use crate::slot::Slot;

/// Ordered, append-only sequence of observed wheel outcomes.
///
/// The history is split into two non-overlapping views by a fixed holdout
/// count: the *analysis window* (everything but the most recent `holdout`
/// spins) drives scoring, the *validation window* (the most recent `holdout`
/// spins) is reserved for measuring realized performance. Scores must never
/// see a validation spin; keeping the split in one place makes that invariant
/// structural rather than a convention.
///
/// Outcomes are only ever appended; windows are borrowed slices, never
/// copies.
///
/// # Example
///
/// ```
/// use spinsight_wheel::{OutcomeHistory, Slot};
///
/// let mut history = OutcomeHistory::new(2);
/// for n in [4, 8, 15, 16, 23] {
///     history.push(Slot::straight(n)?);
/// }
/// assert_eq!(history.analysis_window().len(), 3);
/// assert_eq!(history.validation_window().len(), 2);
/// # Ok::<(), spinsight_wheel::UnknownSlotError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OutcomeHistory {
    outcomes: Vec<Slot>,
    holdout: usize,
}

impl OutcomeHistory {
    /// Creates an empty history reserving the trailing `holdout` spins for
    /// validation.
    #[must_use]
    pub const fn new(holdout: usize) -> Self {
        Self {
            outcomes: Vec::new(),
            holdout,
        }
    }

    /// Wraps an already-observed outcome sequence.
    #[must_use]
    pub fn from_outcomes(outcomes: Vec<Slot>, holdout: usize) -> Self {
        Self { outcomes, holdout }
    }

    /// Appends one observed outcome.
    pub fn push(&mut self, outcome: Slot) {
        self.outcomes.push(outcome);
    }

    /// Appends a batch of observed outcomes in order.
    pub fn extend<I: IntoIterator<Item = Slot>>(&mut self, outcomes: I) {
        self.outcomes.extend(outcomes);
    }

    /// Total number of recorded outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of trailing spins held out for validation.
    #[must_use]
    pub const fn holdout(&self) -> usize {
        self.holdout
    }

    /// Older spins used to compute scores.
    ///
    /// Empty while the history is shorter than the holdout.
    #[must_use]
    pub fn analysis_window(&self) -> &[Slot] {
        let split = self.outcomes.len().saturating_sub(self.holdout);
        &self.outcomes[..split]
    }

    /// Most recent spins, reserved for validation replay.
    #[must_use]
    pub fn validation_window(&self) -> &[Slot] {
        let split = self.outcomes.len().saturating_sub(self.holdout);
        &self.outcomes[split..]
    }

    /// Per-slot hit counts over the analysis window only.
    #[must_use]
    pub fn hit_counts(&self) -> BTreeMap<Slot, u32> {
        let mut counts = BTreeMap::new();
        for &slot in self.analysis_window() {
            *counts.entry(slot).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(labels: &[&str], holdout: usize) -> OutcomeHistory {
        OutcomeHistory::from_outcomes(labels.iter().map(|l| l.parse().unwrap()).collect(), holdout)
    }

    #[test]
    fn test_window_split() {
        let history = history_of(&["1", "2", "3", "4", "5"], 2);
        assert_eq!(history.analysis_window().len(), 3);
        assert_eq!(history.validation_window().len(), 2);
        assert_eq!(
            history.validation_window(),
            &["4".parse().unwrap(), "5".parse::<Slot>().unwrap()]
        );
    }

    #[test]
    fn test_short_history_is_all_validation() {
        let history = history_of(&["7"], 10);
        assert!(history.analysis_window().is_empty());
        assert_eq!(history.validation_window().len(), 1);
    }

    #[test]
    fn test_hit_counts_exclude_validation_window() {
        let history = history_of(&["7", "7", "9", "7"], 1);
        let counts = history.hit_counts();
        assert_eq!(counts[&"7".parse().unwrap()], 2);
        assert_eq!(counts[&"9".parse().unwrap()], 1);
        assert_eq!(counts.values().sum::<u32>(), 3);
    }
}
