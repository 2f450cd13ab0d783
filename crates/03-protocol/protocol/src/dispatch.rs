//! The external action dispatcher boundary.

use crate::action::Action;
use crate::result::ActionOutcome;

/// Translates one decoded action into host-specific calls.
///
/// Implementations are thin per-action adapters supplied by the embedding
/// mod; the bridge invokes them synchronously, at most one at a time, and
/// reports their verdict back to the controller verbatim. A failed outcome
/// does not short-circuit the post-action state capture.
pub trait ActionDispatcher {
    /// Executes `action` against the host.
    fn execute(&mut self, action: &Action) -> ActionOutcome;
}
