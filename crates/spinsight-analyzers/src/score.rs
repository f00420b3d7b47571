use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use serde::Serialize;
use spinsight_wheel::Slot;

/// Upper bound on the size of any candidate set.
pub const MAX_CANDIDATES: usize = 10;

/// A mapping from slot to a non-negative score.
///
/// Absent slots score zero. Backed by a `BTreeMap`, so iteration is always in
/// slot order; combined with the stable selector this makes every ranking
/// deterministic. Analyzers produce a fresh `NumberScore` per call and never
/// mutate a shared one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberScore {
    scores: BTreeMap<Slot, f64>,
}

impl NumberScore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to a slot's score.
    pub fn add(&mut self, slot: Slot, weight: f64) {
        debug_assert!(weight.is_finite(), "score weights must be finite");
        *self.scores.entry(slot).or_insert(0.0) += weight;
    }

    /// The slot's score, zero when absent.
    #[must_use]
    pub fn get(&self, slot: Slot) -> f64 {
        self.scores.get(&slot).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Sum of all scores.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// Entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, f64)> + '_ {
        self.scores.iter().map(|(&s, &v)| (s, v))
    }

    /// This score scaled so its entries sum to one.
    ///
    /// A zero (or empty) total yields the score unchanged; no entry ever
    /// becomes NaN.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total <= 0.0 {
            return self.clone();
        }
        Self {
            scores: self.scores.iter().map(|(&s, &v)| (s, v / total)).collect(),
        }
    }

    /// This score with every entry multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            scores: self
                .scores
                .iter()
                .map(|(&s, &v)| (s, v * factor))
                .collect(),
        }
    }

    /// Weighted union of two scores: `wa * a + wb * b` per slot.
    #[must_use]
    pub fn blended(&self, other: &Self, self_weight: f64, other_weight: f64) -> Self {
        let mut out = Self::new();
        for (slot, v) in self.iter() {
            out.add(slot, v * self_weight);
        }
        for (slot, v) in other.iter() {
            out.add(slot, v * other_weight);
        }
        out
    }

    /// All slots ordered by score descending.
    ///
    /// Equal scores keep slot order (the map's iteration order), so the
    /// ranking is stable and pure.
    #[must_use]
    pub fn ranked(&self) -> Vec<Slot> {
        let mut entries: Vec<(Slot, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries.into_iter().map(|(slot, _)| slot).collect()
    }

    /// The shared candidate selector: top `target_size` slots by score.
    ///
    /// `target_size` is clamped to [`MAX_CANDIDATES`].
    #[must_use]
    pub fn select_top(&self, target_size: usize) -> CandidateSet {
        let mut set = CandidateSet::new();
        for slot in self.ranked() {
            if set.len() >= target_size.min(MAX_CANDIDATES) {
                break;
            }
            set.push(slot);
        }
        set
    }
}

impl FromIterator<(Slot, f64)> for NumberScore {
    fn from_iter<I: IntoIterator<Item = (Slot, f64)>>(iter: I) -> Self {
        let mut score = Self::new();
        for (slot, weight) in iter {
            score.add(slot, weight);
        }
        score
    }
}

/// An ordered, duplicate-free set of at most [`MAX_CANDIDATES`] slots.
///
/// Order is significant: it is the rank order the producing analyzer chose
/// (score order for most analyzers, insertion order for the dispersion
/// selector).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    slots: ArrayVec<Slot, MAX_CANDIDATES>,
}

impl CandidateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slot, refusing duplicates and overflow.
    ///
    /// Returns whether the slot was added.
    pub fn push(&mut self, slot: Slot) -> bool {
        if self.slots.is_full() || self.contains(slot) {
            return false;
        }
        self.slots.push(slot);
        true
    }

    #[must_use]
    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Slot] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots.iter().copied()
    }
}

impl Serialize for CandidateSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = Slot;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Slot>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter().copied()
    }
}
