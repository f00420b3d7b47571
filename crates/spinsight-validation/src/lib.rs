//! Candidate-set validation against held-out spins.
//!
//! The other half of the pipeline: once an analyzer has produced a candidate
//! set, this crate measures how that set would have fared on spins the
//! analyzer never saw. The measurement is the same for every analyzer:
//!
//! ```text
//! win_rate    = 100 x wins / spins
//! coverage    = 100 x |candidates| / 38
//! performance = (win_rate / coverage - 1) x 100
//! ```
//!
//! A set performing exactly at its coverage-implied baseline has zero
//! performance; the wheel's edge means a realistic long-run expectation is
//! slightly below zero.
//!
//! Whether validation replays the held-out historical window
//! (deterministic, bit-identical across calls) or draws fresh simulated
//! spins (stochastic) is an explicit [`ValidationSource`] choice at every
//! call site, never an implicit default.

pub use self::{
    outcome::{AnalysisOutcome, ValidationResult},
    pipeline::{run_all_analyzers, run_analysis},
    validator::{ValidationSource, validate},
};

mod outcome;
mod pipeline;
mod validator;
