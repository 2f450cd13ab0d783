//! Loop state of the orchestrator.

/// Reply being held until the host settles the dispatched action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingResult {
    /// Sequence number of the request being answered.
    pub sequence: u64,
    /// Wire tag of the dispatched action.
    pub action_type: String,
    /// Dispatch verdict.
    pub success: bool,
    /// Dispatch failure reason.
    pub error_message: Option<String>,
    /// Ticks the capture has been withheld beyond the standard deferral.
    pub ticks_waited: u32,
}

/// The orchestrator's cross-tick state.
///
/// At most one request is in flight: while not [`LoopState::Idle`] the
/// actions channel is not polled, so a second inbound request stays in its
/// file until the loop comes back around.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for the next inbound request.
    Idle,
    /// A dispatch call is on the stack; transient within one tick.
    ActionInFlight,
    /// Dispatched; the post-action capture happens on a later tick.
    PendingCapture(PendingResult),
}

impl LoopState {
    /// Whether the loop can accept a new request.
    pub fn is_idle(&self) -> bool {
        matches!(self, LoopState::Idle)
    }
}
