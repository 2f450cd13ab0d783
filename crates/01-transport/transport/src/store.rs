//! Directory-backed channel store with write verification.

use crate::channel::Channel;
use crate::envelope::Envelope;
use crate::error::{TransportError, TransportResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-channel sequence bookkeeping.
#[derive(Clone, Copy, Debug, Default)]
struct Lane {
    /// Last sequence number handed out to a write on this channel.
    issued: u64,
    /// Highest sequence number consumed from this channel.
    last_seen: u64,
}

/// A successfully consumed channel record.
#[derive(Clone, Debug, PartialEq)]
pub struct Delivery {
    /// Sequence number of the consumed envelope.
    pub sequence_id: u64,
    /// The payload, still uninterpreted.
    pub data: serde_json::Value,
}

/// File-per-channel message store.
///
/// Every operation is synchronous but bounded: one small file read, write,
/// or delete. Nothing here blocks on anything other than the filesystem, so
/// the store is safe to drive from inside a host update tick.
pub struct FileTransport {
    dir: PathBuf,
    lanes: [Lane; 3],
}

impl FileTransport {
    /// Opens (and creates if needed) a transport directory.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            lanes: [Lane::default(); 3],
        })
    }

    /// The directory backing the channels.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Highest sequence number consumed from `channel` so far.
    pub fn last_seen(&self, channel: Channel) -> u64 {
        self.lanes[channel.slot()].last_seen
    }

    /// Forces the consumption cursor of `channel` forward.
    ///
    /// Lets a process that restarted mid-conversation skip records its
    /// predecessor already acted on.
    pub fn resume_after(&mut self, channel: Channel, sequence_id: u64) {
        let lane = &mut self.lanes[channel.slot()];
        if sequence_id > lane.last_seen {
            lane.last_seen = sequence_id;
        }
    }

    /// Writes a payload to `channel` under the next sequence number.
    ///
    /// The record is serialized, stored atomically (temp file + rename),
    /// then re-read and re-parsed to confirm the stored sequence number
    /// matches — silent truncation on write is the failure mode this guards
    /// against. Returns `false` on any failure; the sequence counter has
    /// already advanced and is not rolled back.
    pub fn write(&mut self, channel: Channel, data: serde_json::Value) -> bool {
        let lane = &mut self.lanes[channel.slot()];
        lane.issued += 1;
        let sequence_id = lane.issued;

        match self.write_verified(channel, sequence_id, data) {
            Ok(()) => {
                log::debug!("{channel}: wrote sequence {sequence_id}");
                true
            }
            Err(err) => {
                log::warn!("{channel}: write of sequence {sequence_id} failed: {err}");
                false
            }
        }
    }

    /// Consumes the pending record on `channel`, if there is a fresh one.
    ///
    /// Absent, unparsable, foreign-typed, or stale records all yield `None`.
    /// A fresh record advances the consumption cursor and deletes its file
    /// before being returned, so each record is delivered at most once.
    pub fn read(&mut self, channel: Channel) -> Option<Delivery> {
        let path = self.channel_path(channel);
        if !path.exists() {
            return None;
        }

        let envelope = match Self::parse_record(channel, &path) {
            Ok(envelope) => envelope,
            Err(err) => {
                log::warn!("{channel}: ignoring unreadable record: {err}");
                return None;
            }
        };

        let lane = &mut self.lanes[channel.slot()];
        if envelope.sequence_id <= lane.last_seen {
            log::debug!(
                "{channel}: sequence {} already consumed (cursor {})",
                envelope.sequence_id,
                lane.last_seen
            );
            return None;
        }
        lane.last_seen = envelope.sequence_id;

        if let Err(err) = fs::remove_file(&path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                log::warn!("{channel}: failed to delete consumed record: {err}");
            }
        }

        log::debug!("{channel}: consumed sequence {}", envelope.sequence_id);
        Some(Delivery {
            sequence_id: envelope.sequence_id,
            data: envelope.data,
        })
    }

    /// Deletes channel files older than `max_age`, sequencing untouched.
    ///
    /// Bounds storage growth when a consumer is not running. Temp files from
    /// interrupted writes age out the same way.
    pub fn purge(&self, max_age: Duration) {
        for channel in Channel::ALL {
            for path in [
                self.channel_path(channel),
                self.channel_path(channel).with_extension("tmp"),
            ] {
                if Self::older_than(&path, max_age) {
                    match fs::remove_file(&path) {
                        Ok(()) => log::debug!("purged stale record {}", path.display()),
                        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                        Err(err) => log::warn!("failed to purge {}: {err}", path.display()),
                    }
                }
            }
        }
    }

    fn older_than(path: &Path, max_age: Duration) -> bool {
        let Ok(meta) = fs::metadata(path) else {
            return false;
        };
        let Ok(modified) = meta.modified() else {
            return false;
        };
        modified.elapsed().map_or(false, |age| age > max_age)
    }

    fn write_verified(
        &self,
        channel: Channel,
        sequence_id: u64,
        data: serde_json::Value,
    ) -> TransportResult<()> {
        let envelope = Envelope::new(sequence_id, channel.message_type(), data);
        let body = serde_json::to_string_pretty(&envelope)?;

        let path = self.channel_path(channel);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, body.as_bytes())?;
        fs::rename(&tmp, &path)?;

        let stored = Self::parse_record(channel, &path)?;
        if stored.sequence_id != sequence_id {
            return Err(TransportError::VerifyMismatch {
                written: sequence_id,
                read_back: stored.sequence_id,
            });
        }
        Ok(())
    }

    fn parse_record(channel: Channel, path: &Path) -> TransportResult<Envelope> {
        let raw = fs::read_to_string(path)?;
        let envelope: Envelope = serde_json::from_str(&raw)?;
        if envelope.message_type != channel.message_type() {
            return Err(TransportError::ForeignMessageType {
                channel: channel.file_name(),
                found: envelope.message_type.to_string(),
            });
        }
        Ok(envelope)
    }

    fn channel_path(&self, channel: Channel) -> PathBuf {
        self.dir.join(channel.file_name())
    }
}
