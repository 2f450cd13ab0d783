//! Sequenced, file-mediated message transport.
//!
//! The bridge and its controller are separate processes with no shared
//! memory and no message queue; a directory of small JSON files is the
//! lowest-common-denominator transport between them. This crate exposes:
//! * [`Channel`] – the three independent sequenced streams.
//! * [`Envelope`] – the `{timestamp, sequence_id, message_type, data}`
//!   wrapper; `data` is never interpreted here.
//! * [`FileTransport`] – write-with-verification, at-most-once reads, and
//!   age-based purging.
//! * [`TransportError`] – internal error surface; the public operations fail
//!   closed (`false` / `None`) so callers treat any failure as "no message
//!   yet" and retry on their next tick.

mod channel;
mod envelope;
mod error;
mod store;

pub use channel::Channel;
pub use envelope::{now_timestamp, Envelope, MessageType};
pub use error::{TransportError, TransportResult};
pub use store::{Delivery, FileTransport};
