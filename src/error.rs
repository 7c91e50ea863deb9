//! Error taxonomy shared by every collection kind.
//!
//! Looking up an absent key is not an error and yields `None`. Broken
//! internal invariants are engine bugs and panic instead of surfacing here.

use thiserror::Error;

/// Recoverable failures reported by collection operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// First/last access or removal on a collection with no elements.
    #[error("collection is empty")]
    EmptyCollection,

    /// List position outside `[0, len)` (or `[0, len]` for insertion).
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending position.
        index: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },

    /// A cursor observed a structural modification of its source collection.
    ///
    /// Restart iteration from a fresh cursor to recover.
    #[error("collection was structurally modified during iteration")]
    ConcurrentModification,
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, Error>;
