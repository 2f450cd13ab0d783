//! Error surface for transport internals.
//!
//! These errors never cross the public API; `FileTransport` logs them and
//! collapses every failure into `false` or `None` so the polling cadence of
//! the caller is the only retry mechanism.

use thiserror::Error;

/// Convenience alias for fallible transport internals.
pub type TransportResult<T, E = TransportError> = Result<T, E>;

/// Failures surfaced while writing, verifying, or reading a channel file.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Filesystem operation failed.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    /// Envelope could not be serialized or parsed.
    #[error("codec failure: {0}")]
    Codec(#[from] serde_json::Error),
    /// The re-read record did not carry the sequence number just written.
    #[error("write verification mismatch: wrote sequence {written}, read back {read_back}")]
    VerifyMismatch {
        /// Sequence number assigned to the write.
        written: u64,
        /// Sequence number found on re-read.
        read_back: u64,
    },
    /// The stored record carries a message type foreign to its channel.
    #[error("channel `{channel}` holds foreign message type `{found}`")]
    ForeignMessageType {
        /// File name of the channel.
        channel: &'static str,
        /// The message type tag found in the record.
        found: String,
    },
}
