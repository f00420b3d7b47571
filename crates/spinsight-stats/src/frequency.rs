use std::collections::BTreeMap;

/// Tallies occurrences of each key, in key order.
///
/// # Examples
///
/// ```
/// # use spinsight_stats::frequency::tally;
/// let counts = tally([3, 1, 3, 3]);
/// assert_eq!(counts[&3], 3);
/// assert_eq!(counts[&1], 1);
/// ```
#[must_use]
pub fn tally<T, I>(items: I) -> BTreeMap<T, u32>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Orders keys by descending count.
///
/// Ties keep key order, so the ranking is fully deterministic. Keys that
/// never occurred are absent, exactly as they are absent from the tally.
///
/// # Examples
///
/// ```
/// # use spinsight_stats::frequency::{ranking, tally};
/// let counts = tally(["b", "c", "b", "a", "c"]);
/// // b and c are tied at 2; the tie keeps key order.
/// assert_eq!(ranking(&counts), vec!["b", "c", "a"]);
/// ```
#[must_use]
pub fn ranking<T: Ord + Copy>(counts: &BTreeMap<T, u32>) -> Vec<T> {
    let mut ranked: Vec<T> = counts.keys().copied().collect();
    ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));
    ranked
}
