//! Scoring analyzers for roulette outcome histories.
//!
//! This crate implements the candidate-scoring half of the pipeline: a family
//! of independent analyzers that each convert an ordered history of wheel
//! outcomes into a per-number score, plus the shared selection logic that
//! turns scores into a bounded candidate set.
//!
//! # Architecture
//!
//! ```text
//! analysis window ──▶ ScoringAnalyzer ──▶ NumberScore ──▶ CandidateSet
//!                        (×5, independent)     (selector, stable)
//! ```
//!
//! The five analyzers share no state and no ordering dependency; each is a
//! pure function over an immutable window (and optional [`PriorStats`]), so
//! running them in parallel is an optimization, never a correctness concern.
//!
//! - [`temporal_cycle`] - hidden periodicity via phase-bucket statistics
//! - [`repeat_cluster`] - short-range repetition clusters over sliding
//!   windows, spread to physical neighbors
//! - [`chaotic_domain`] - phase-space recurrence and divergence
//!   ("strange attractor" numbers)
//! - [`variance_balance`] - greedy selection maximizing physical dispersion
//!   on the rim
//! - [`visual_ballistics`] - deflector-and-travel-distance landing bias
//!
//! # Determinism
//!
//! Every analyzer is deterministic: a fixed window and configuration always
//! produce an identical [`NumberScore`]. Score maps iterate in slot order and
//! the selector breaks ties stably, so candidate sets are reproducible
//! bit for bit.
//!
//! # Heuristic constants
//!
//! Blending weights (`0.6/0.4`, `0.7/0.3`, decay `0.7^k`, ...) come from the
//! field lore this system models, not from any derivation. They live in
//! per-analyzer configuration structs as named, overridable values; the
//! defaults reproduce the reference behavior.

pub use self::{
    analyzer::{PriorStats, ScoringAnalyzer, default_analyzers},
    chaotic_domain::{ChaoticDomainAnalyzer, ChaoticDomainConfig},
    repeat_cluster::{RepeatClusterAnalyzer, RepeatClusterConfig},
    score::{CandidateSet, MAX_CANDIDATES, NumberScore},
    temporal_cycle::{CycleDetection, TemporalCycleAnalyzer, TemporalCycleConfig},
    variance_balance::{VarianceBalanceAnalyzer, VarianceBalanceConfig},
    visual_ballistics::{DiamondProfile, VisualBallisticsAnalyzer, VisualBallisticsConfig},
};

mod analyzer;
pub mod chaotic_domain;
pub mod repeat_cluster;
mod score;
pub mod temporal_cycle;
pub mod variance_balance;
pub mod visual_ballistics;
