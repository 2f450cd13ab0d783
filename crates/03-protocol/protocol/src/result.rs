//! Dispatch verdicts and the per-action result payload.

use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};

/// Verdict returned by an action dispatcher.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Whether the host accepted and executed the action.
    pub success: bool,
    /// Human-readable reason when `success` is false.
    pub error_message: Option<String>,
}

impl ActionOutcome {
    /// A successful outcome.
    pub fn ok() -> Self {
        Self {
            success: true,
            error_message: None,
        }
    }

    /// A failed outcome with a reason.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(reason.into()),
        }
    }
}

/// The reply written to the results channel for one consumed request.
///
/// `new_state` is captured one tick after dispatch and is always populated
/// by the time the payload is written; the controller needs the post-action
/// state whether or not the action succeeded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    /// Sequence number of the request this replies to.
    pub sequence: u64,
    /// Wire tag of the requested action.
    pub action_type: String,
    /// Whether the dispatch succeeded.
    pub success: bool,
    /// Failure reason, `null` on success.
    pub error_message: Option<String>,
    /// UTC wall-clock time of the capture.
    pub timestamp: String,
    /// Snapshot taken after the host settled the action.
    pub new_state: Option<Snapshot>,
}
