//! Core domain types for roulette outcome analysis.
//!
//! This crate models the physical wheel and the stream of observed outcomes:
//!
//! - [`Slot`]: one of the 38 labels of an American wheel (`0`-`36` plus `00`)
//! - [`WheelTopology`]: the physical (not numeric) circular ordering of slots,
//!   with position, neighbor, and distance queries
//! - [`OutcomeHistory`]: an append-only outcome sequence split into an analysis
//!   window and a held-out validation window
//! - [`WheelSession`]: a simulated wheel that appends uniform outcomes to a
//!   history through a caller-supplied RNG
//!
//! The topology is constructed once and shared read-only; analyzers never
//! mutate a history, they only borrow window views from it.

pub use self::{history::*, session::*, slot::*, topology::*};

mod history;
mod session;
mod slot;
mod topology;

/// A label that is not a member of the 38-slot American wheel.
///
/// Slots form a closed set, so this error can only occur at construction
/// boundaries (parsing user input, deserializing recorded outcomes). Inside
/// the crate every lookup is infallible by construction.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("label is not on an American wheel: {label:?}")]
pub struct UnknownSlotError {
    /// The rejected label, verbatim.
    pub label: String,
}
