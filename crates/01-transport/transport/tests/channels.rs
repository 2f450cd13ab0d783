//! Behavioral coverage for the file-backed channel store.

use serde_json::json;
use std::fs;
use std::time::Duration;
use transport::{Channel, FileTransport};

fn open(dir: &tempfile::TempDir) -> FileTransport {
    FileTransport::new(dir.path()).expect("open transport")
}

/// Writing a payload and reading it back yields a structurally equal value.
#[test]
fn round_trip_preserves_payload() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = open(&dir);
    let mut reader = open(&dir);

    let payload = json!({"action_type": "buy_item", "shop_index": 2});
    assert!(writer.write(Channel::Actions, payload.clone()));

    let delivery = reader.read(Channel::Actions).expect("delivery");
    assert_eq!(delivery.data, payload);
    assert_eq!(delivery.sequence_id, 1);
}

/// A consumed record is gone: the second read returns nothing.
#[test]
fn consumption_is_at_most_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = open(&dir);
    let mut reader = open(&dir);

    writer.write(Channel::State, json!({"ante": 3}));

    assert!(reader.read(Channel::State).is_some());
    assert!(reader.read(Channel::State).is_none());
    assert!(!dir.path().join(Channel::State.file_name()).exists());
}

/// Stale or duplicate sequence numbers are never delivered; fresh ones are
/// delivered exactly once and advance the cursor.
#[test]
fn stale_sequences_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = open(&dir);
    let mut reader = open(&dir);
    reader.resume_after(Channel::Actions, 5);

    // Writer has issued 1..=5 elsewhere; replay one of them.
    for _ in 0..5 {
        writer.write(Channel::Actions, json!({"action_type": "reroll_shop"}));
    }
    assert!(reader.read(Channel::Actions).is_none());
    assert_eq!(reader.last_seen(Channel::Actions), 5);

    writer.write(Channel::Actions, json!({"action_type": "go_to_shop"}));
    let delivery = reader.read(Channel::Actions).expect("fresh record");
    assert_eq!(delivery.sequence_id, 6);
    assert_eq!(reader.last_seen(Channel::Actions), 6);
    assert!(reader.read(Channel::Actions).is_none());
}

/// Sequence counters are independent per channel.
#[test]
fn channels_sequence_independently() {
    let dir = tempfile::tempdir().unwrap();
    let mut bridge = open(&dir);

    bridge.write(Channel::State, json!({"money": 4}));
    bridge.write(Channel::State, json!({"money": 5}));
    bridge.write(Channel::Results, json!({"success": true}));

    let mut controller = open(&dir);
    assert_eq!(controller.read(Channel::State).unwrap().sequence_id, 2);
    assert_eq!(controller.read(Channel::Results).unwrap().sequence_id, 1);
}

/// A corrupted record is skipped without consuming the channel; once it is
/// overwritten, reads recover.
#[test]
fn corrupted_record_is_ignored_until_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = open(&dir);
    let mut reader = open(&dir);

    let path = dir.path().join(Channel::Actions.file_name());
    fs::write(&path, b"{ not json").unwrap();
    assert!(reader.read(Channel::Actions).is_none());
    // The unreadable file is left for the writer (or the purge) to replace.
    assert!(path.exists());

    writer.write(Channel::Actions, json!({"action_type": "reroll_boss"}));
    assert!(reader.read(Channel::Actions).is_some());
}

/// A record whose message type belongs to another channel is refused.
#[test]
fn foreign_message_type_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = open(&dir);
    let mut reader = open(&dir);

    writer.write(Channel::State, json!({"ante": 1}));
    let state_body = fs::read(dir.path().join(Channel::State.file_name())).unwrap();
    fs::write(dir.path().join(Channel::Actions.file_name()), state_body).unwrap();

    assert!(reader.read(Channel::Actions).is_none());
}

/// Purge removes records older than the age bound and spares fresh ones.
#[test]
fn purge_drops_only_old_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = open(&dir);

    writer.write(Channel::State, json!({"ante": 1}));
    writer.write(Channel::Results, json!({"success": false}));

    // Fresh files survive a generous age bound.
    writer.purge(Duration::from_secs(300));
    assert!(dir.path().join(Channel::State.file_name()).exists());

    // A zero age bound treats everything as stale.
    writer.purge(Duration::from_secs(0));
    assert!(!dir.path().join(Channel::State.file_name()).exists());
    assert!(!dir.path().join(Channel::Results.file_name()).exists());
}

/// A failed write reports `false` but still consumes its sequence number.
#[test]
fn failed_write_burns_the_sequence_number() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = open(&dir);

    // Turn the channel file into a directory so the rename fails.
    fs::create_dir(dir.path().join(Channel::State.file_name())).unwrap();
    assert!(!writer.write(Channel::State, json!({"ante": 1})));

    fs::remove_dir(dir.path().join(Channel::State.file_name())).unwrap();
    assert!(writer.write(Channel::State, json!({"ante": 1})));

    let mut reader = open(&dir);
    let delivery = reader.read(Channel::State).expect("second write lands");
    assert_eq!(delivery.sequence_id, 2);
}
