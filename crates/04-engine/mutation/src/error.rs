//! Reorder validation failures.

use thiserror::Error;

/// Why a reorder request was refused.
///
/// Every variant is a structured failure reported to the caller; none of
/// them leaves the collection partially mutated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReorderError {
    /// The proposed order was empty.
    #[error("proposed order is empty")]
    EmptyOrder,
    /// The named live collection could not be resolved.
    #[error("collection `{0}` is unavailable")]
    CollectionUnavailable(String),
    /// An element failed the integrity sweep before computation.
    #[error("element {index} is corrupted; refusing to compute an arrangement")]
    CorruptedElement {
        /// Index of the corrupted element.
        index: usize,
    },
    /// The proposed order does not match the collection length.
    #[error("proposed order has {actual} entries for a collection of {expected}")]
    LengthMismatch {
        /// Current collection length.
        expected: usize,
        /// Proposed order length.
        actual: usize,
    },
    /// An index in the proposed order is outside the collection.
    #[error("index {index} is out of range for a collection of {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Current collection length.
        len: usize,
    },
    /// An index appears more than once in the proposed order.
    #[error("index {index} appears more than once")]
    DuplicateIndex {
        /// The repeated index.
        index: usize,
    },
    /// An element was invalidated by host activity between the integrity
    /// sweep and placement.
    #[error("element {index} was invalidated before placement")]
    ElementInvalidated {
        /// Index of the invalidated element.
        index: usize,
    },
}
