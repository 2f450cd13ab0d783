//! Wire payload types shared by the bridge and its controller.
//!
//! Everything here is plain data: the closed action vocabulary, the flat
//! snapshot records, the per-action result payload, and the pure rules that
//! decide which actions the current snapshot permits. No module in this
//! crate touches the host graph or the transport.

mod action;
mod dispatch;
mod result;
pub mod rules;
mod snapshot;

pub use action::Action;
pub use dispatch::ActionDispatcher;
pub use result::{ActionOutcome, ResultPayload};
pub use rules::RuleViolation;
pub use snapshot::{
    BlindView, CardView, ConsumableView, GamePhase, JokerView, ShopItemView, Snapshot,
};
