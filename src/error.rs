//! Errors surfaced by the fallible table operations.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The slot array for a new or resized table could not be allocated.
    #[error("slot array allocation failed: {0}")]
    Alloc(#[from] TryReserveError),

    /// No prime slot count at or above the requested base capacity fits in
    /// addressable memory.
    #[error("capacity overflow: base capacity {requested} is too large")]
    CapacityOverflow { requested: usize },

    /// A `Config` violated one of its bounds.
    #[error("invalid table configuration: {0}")]
    InvalidConfig(&'static str),
}
