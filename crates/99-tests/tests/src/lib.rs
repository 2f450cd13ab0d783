//! Cross-crate integration harness.
//!
//! [`Controller`] plays the external controller process: it owns its own
//! transport over the shared directory and speaks the same envelopes the
//! bridge does, so scenarios exercise both ends of every channel.

use protocol::{ResultPayload, Snapshot};
use std::path::Path;
use transport::{Channel, FileTransport};

/// Controller-side endpoint over a shared transport directory.
pub struct Controller {
    transport: FileTransport,
}

impl Controller {
    /// Opens the controller end of `dir`.
    pub fn open(dir: &Path) -> Self {
        Self {
            transport: FileTransport::new(dir).expect("controller transport opens"),
        }
    }

    /// Sends one action request.
    pub fn request(&mut self, action: serde_json::Value) -> bool {
        self.transport.write(Channel::Actions, action)
    }

    /// Takes the pending action result, if one arrived.
    pub fn take_result(&mut self) -> Option<ResultPayload> {
        let delivery = self.transport.read(Channel::Results)?;
        Some(serde_json::from_value(delivery.data).expect("result payload decodes"))
    }

    /// Takes the pending state push, if one arrived.
    pub fn take_state(&mut self) -> Option<Snapshot> {
        let delivery = self.transport.read(Channel::State)?;
        Some(serde_json::from_value(delivery.data).expect("snapshot decodes"))
    }
}
