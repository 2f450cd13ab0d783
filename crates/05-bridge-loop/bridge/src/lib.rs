//! The per-tick orchestrator connecting transport, projection, and
//! dispatch.
//!
//! The host calls [`Bridge::tick`] once per update cycle; everything the
//! bridge does happens inside that call, bounded and non-blocking.
//! Cross-tick behavior — the one-tick deferral between dispatch and
//! capture, settle timers, change-gated pushes — lives in explicit state
//! fields, never in blocked threads.

mod router;
mod settle;
mod state;

pub use router::ActionRouter;
pub use settle::SettleRule;
pub use state::{LoopState, PendingResult};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use host_abi::HostHandle;
use projector::StateProjector;
use protocol::{ActionDispatcher, ActionOutcome, ResultPayload};
use settle::SettleTimers;
use std::path::PathBuf;
use std::time::Duration;
use transport::{now_timestamp, Channel, FileTransport};

/// Default spacing between purge sweeps, in seconds.
pub const DEFAULT_PURGE_INTERVAL_SECONDS: f64 = 60.0;
/// Default age bound for abandoned channel files.
pub const DEFAULT_MAX_MESSAGE_AGE: Duration = Duration::from_secs(300);

/// The bridge loop.
///
/// One instance per hosted session. Request handling spans three ticks at
/// minimum: the request is consumed and dispatched in one, captured and
/// answered in the next, because the host settles action effects
/// asynchronously relative to the dispatch call.
pub struct Bridge {
    transport: FileTransport,
    projector: StateProjector,
    router: ActionRouter,
    state: LoopState,
    settle: SettleTimers,
    last_mode: Option<String>,
    last_digest: Option<u64>,
    purge_interval: f64,
    purge_accum: f64,
    max_message_age: Duration,
}

impl Bridge {
    /// Creates a new builder for constructing a bridge.
    pub fn builder() -> BridgeBuilder {
        BridgeBuilder::new()
    }

    /// Advances the loop by one host tick of `dt` seconds.
    ///
    /// Fixed in-tick sequence: transition detection, settle bookkeeping,
    /// pending-capture service, request polling, change-gated push,
    /// maintenance. At most one state-machine transition happens per tick,
    /// so dispatch and capture never share one: a tick that answers a
    /// request does not also poll for the next.
    pub fn tick(&mut self, dt: f64) {
        self.sample_mode();
        let settled = self.settle.advance(dt);
        let replied = self.service_pending_capture();
        if !replied {
            self.poll_actions();
        }
        if settled {
            self.push_snapshot();
        } else if !replied && !self.settle.is_active() {
            self.push_if_changed();
        }
        self.maintain(dt);
    }

    /// Current loop state.
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// The transport, for sequence inspection and restart recovery.
    pub fn transport(&self) -> &FileTransport {
        &self.transport
    }

    /// Mutable transport access.
    pub fn transport_mut(&mut self) -> &mut FileTransport {
        &mut self.transport
    }

    fn sample_mode(&mut self) {
        let mode = self.projector.mode();
        if mode == self.last_mode {
            return;
        }
        match (&self.last_mode, &mode) {
            (Some(prev), Some(next)) => log::debug!("host mode changed: {prev} -> {next}"),
            (None, Some(next)) => log::debug!("host mode observed: {next}"),
            (Some(prev), None) => log::debug!("host mode unreadable (was {prev})"),
            (None, None) => {}
        }
        if let Some(next) = &mode {
            if self.settle.on_mode_entered(next) {
                log::debug!("withholding captures while `{next}` populates");
            }
        }
        self.last_mode = mode;
    }

    /// Answers a matured pending capture. Returns whether a result was
    /// written this tick.
    fn service_pending_capture(&mut self) -> bool {
        let pending = match &self.state {
            LoopState::PendingCapture(pending) => pending.clone(),
            _ => return false,
        };
        if self.settle.is_active() {
            self.note_capture_withheld();
            return false;
        }

        let snapshot = self.projector.extract();
        let digest = snapshot.change_digest();
        let payload = ResultPayload {
            sequence: pending.sequence,
            action_type: pending.action_type.clone(),
            success: pending.success,
            error_message: pending.error_message.clone(),
            timestamp: now_timestamp(),
            new_state: Some(snapshot),
        };
        let value = match serde_json::to_value(&payload) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("result for sequence {} failed to encode: {err}", pending.sequence);
                self.note_capture_withheld();
                return false;
            }
        };
        if self.transport.write(Channel::Results, value) {
            log::info!(
                "answered `{}` (seq {}, success: {})",
                pending.action_type,
                pending.sequence,
                pending.success
            );
            // The controller just received this state; pushing it again
            // unsolicited would only burn a sequence number.
            self.last_digest = Some(digest);
            self.state = LoopState::Idle;
            true
        } else {
            self.note_capture_withheld();
            false
        }
    }

    fn note_capture_withheld(&mut self) {
        if let LoopState::PendingCapture(pending) = &mut self.state {
            pending.ticks_waited += 1;
            // There is no capture timeout; surface a long wait instead of
            // silently servicing nothing.
            if pending.ticks_waited % 600 == 0 {
                log::warn!(
                    "result for `{}` (seq {}) still pending after {} ticks",
                    pending.action_type,
                    pending.sequence,
                    pending.ticks_waited
                );
            }
        }
    }

    fn poll_actions(&mut self) {
        if !self.state.is_idle() {
            return;
        }
        let Some(delivery) = self.transport.read(Channel::Actions) else {
            return;
        };
        let sequence = delivery.sequence_id;

        match serde_json::from_value::<protocol::Action>(delivery.data.clone()) {
            Ok(action) => {
                log::info!("dispatching `{}` (seq {sequence})", action.kind());
                self.state = LoopState::ActionInFlight;
                let outcome = self.router.execute(&action);
                self.state = LoopState::PendingCapture(PendingResult {
                    sequence,
                    action_type: action.kind().to_owned(),
                    success: outcome.success,
                    error_message: outcome.error_message,
                    ticks_waited: 0,
                });
            }
            Err(err) => {
                // The request consumed a sequence number, so the controller
                // is owed an answer even though nothing was dispatched.
                log::warn!("malformed action request (seq {sequence}): {err}");
                let action_type = delivery
                    .data
                    .get("action_type")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown")
                    .to_owned();
                let outcome =
                    ActionOutcome::fail(format!("malformed action request: {err}"));
                self.state = LoopState::PendingCapture(PendingResult {
                    sequence,
                    action_type,
                    success: outcome.success,
                    error_message: outcome.error_message,
                    ticks_waited: 0,
                });
            }
        }
    }

    /// Pushes a snapshot unconditionally, updating the stored digest.
    fn push_snapshot(&mut self) {
        let snapshot = self.projector.extract();
        let digest = snapshot.change_digest();
        self.write_state(snapshot, digest);
    }

    /// Pushes a snapshot only when its structural digest moved.
    fn push_if_changed(&mut self) {
        let snapshot = self.projector.extract();
        let digest = snapshot.change_digest();
        if self.last_digest == Some(digest) {
            return;
        }
        self.write_state(snapshot, digest);
    }

    fn write_state(&mut self, snapshot: protocol::Snapshot, digest: u64) {
        let value = match serde_json::to_value(&snapshot) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("snapshot failed to encode: {err}");
                return;
            }
        };
        if self.transport.write(Channel::State, value) {
            self.last_digest = Some(digest);
        }
        // A failed write keeps the old digest, so the push retries on the
        // next tick through the same change gate.
    }

    fn maintain(&mut self, dt: f64) {
        self.purge_accum += dt;
        if self.purge_accum < self.purge_interval {
            return;
        }
        self.purge_accum = 0.0;
        self.transport.purge(self.max_message_age);
    }
}

/// Builder for assembling a [`Bridge`] from its collaborators.
pub struct BridgeBuilder {
    dir: Option<PathBuf>,
    host: Option<HostHandle>,
    adapter: Option<Box<dyn ActionDispatcher>>,
    session_id: Option<String>,
    settle_rules: Vec<SettleRule>,
    purge_interval: f64,
    max_message_age: Duration,
}

impl BridgeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            dir: None,
            host: None,
            adapter: None,
            session_id: None,
            settle_rules: Vec::new(),
            purge_interval: DEFAULT_PURGE_INTERVAL_SECONDS,
            max_message_age: DEFAULT_MAX_MESSAGE_AGE,
        }
    }

    /// Sets the shared transport directory.
    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Sets the host handle every component is built from.
    pub fn host(mut self, host: HostHandle) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the adapter for host-specific actions.
    pub fn dispatcher(mut self, adapter: Box<dyn ActionDispatcher>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Overrides the generated session identifier.
    pub fn session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    /// Adds one settle rule; may be called repeatedly.
    pub fn settle_rule(mut self, rule: SettleRule) -> Self {
        self.settle_rules.push(rule);
        self
    }

    /// Overrides the purge sweep interval.
    pub fn purge_interval(mut self, seconds: f64) -> Self {
        self.purge_interval = seconds;
        self
    }

    /// Overrides the stale-file age bound.
    pub fn max_message_age(mut self, age: Duration) -> Self {
        self.max_message_age = age;
        self
    }

    /// Builds a [`Bridge`], returning an error if a collaborator is
    /// missing or the transport directory cannot be opened.
    pub fn build(self) -> Result<Bridge> {
        let dir = self.dir.ok_or_else(|| anyhow!("missing transport directory"))?;
        let host = self.host.ok_or_else(|| anyhow!("missing host handle"))?;
        let adapter = self.adapter.ok_or_else(|| anyhow!("missing action dispatcher"))?;
        let session_id = self
            .session_id
            .unwrap_or_else(|| format!("table-{}", Utc::now().format("%Y%m%d%H%M%S")));

        let transport = FileTransport::new(&dir)
            .with_context(|| format!("opening transport directory {}", dir.display()))?;
        let projector = StateProjector::new(host.clone(), session_id.clone());
        let router = ActionRouter::new(host, session_id, adapter);

        Ok(Bridge {
            transport,
            projector,
            router,
            state: LoopState::Idle,
            settle: SettleTimers::new(self.settle_rules),
            last_mode: None,
            last_digest: None,
            purge_interval: self.purge_interval,
            purge_accum: 0.0,
            max_message_age: self.max_message_age,
        })
    }
}

impl Default for BridgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
