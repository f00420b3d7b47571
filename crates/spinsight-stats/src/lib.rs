//! Statistical helpers shared by the scoring analyzers.
//!
//! Deliberately dependency-free, this crate provides the two kinds of
//! arithmetic the analyzers need over and over:
//!
//! - [`descriptive`]: mean, variance, standard deviation, and mean absolute
//!   deviation over `f64` samples, with empty inputs handled as `None`
//!   instead of NaN
//! - [`frequency`]: ordered tallies and count-ranked orderings over any
//!   `Ord` key (slot hit counts, phase-bucket tallies)
//!
//! # Examples
//!
//! ```
//! use spinsight_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([2.0, 4.0, 6.0]).unwrap();
//! assert_eq!(stats.mean, 4.0);
//! ```
//!
//! ```
//! use spinsight_stats::frequency::{ranking, tally};
//!
//! let counts = tally(["a", "b", "a"]);
//! assert_eq!(ranking(&counts), vec!["a", "b"]);
//! ```

pub mod descriptive;
pub mod frequency;
