//! Validated mutation of live host collections.
//!
//! Two concerns live here:
//! * [`MutationEngine::reorder`] – applies a permutation to a live ordered
//!   collection, all-or-nothing: every validation failure leaves the
//!   original order untouched.
//! * [`MutationEngine::optimal_order`] and the hand sorts – advisory
//!   permutation computations that never mutate; callers apply them through
//!   `reorder`.

mod engine;
mod error;
mod sorting;
mod synergy;

pub use engine::MutationEngine;
pub use error::ReorderError;
pub use synergy::{ROLE_MIRROR_FIRST, ROLE_MIRROR_RIGHT};
