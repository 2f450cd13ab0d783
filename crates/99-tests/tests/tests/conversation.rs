//! End-to-end conversations between a controller and the bridge loop.

use bridge::{Bridge, SettleRule};
use mock::{sample_host, SampleHost, ScriptedDispatcher};
use pretty_assertions::assert_eq;
use protocol::GamePhase;
use serde_json::json;
use tests::Controller;

struct World {
    bridge: Bridge,
    controller: Controller,
    dispatcher: ScriptedDispatcher,
    sample: SampleHost,
    _dir: tempfile::TempDir,
}

fn world() -> World {
    let dir = tempfile::tempdir().unwrap();
    let sample = sample_host();
    let dispatcher = ScriptedDispatcher::new();
    let bridge = Bridge::builder()
        .directory(dir.path())
        .host(sample.handle.clone())
        .dispatcher(Box::new(dispatcher.clone()))
        .session_id("session-test")
        .settle_rule(SettleRule::new("shop", 0.4))
        .build()
        .expect("bridge builds");
    let controller = Controller::open(dir.path());

    World {
        bridge,
        controller,
        dispatcher,
        sample,
        _dir: dir,
    }
}

/// The full request/response cycle: observe, act, read the result, watch
/// the unsolicited push after a host-driven transition.
#[test]
fn controller_drives_a_round_end_to_end() {
    let mut world = world();

    // First tick publishes the baseline state.
    world.bridge.tick(0.1);
    let baseline = world.controller.take_state().expect("baseline push");
    assert_eq!(baseline.phase, GamePhase::HandSelection);
    assert_eq!(baseline.hand_cards.len(), 4);
    assert!(baseline.available_actions.iter().any(|t| t == "play_hand"));

    // The controller plays two cards; the bridge answers one tick later.
    assert!(world
        .controller
        .request(json!({"action_type": "play_hand", "card_indices": [0, 1]})));
    world.bridge.tick(0.1);
    assert!(world.controller.take_result().is_none(), "dispatch tick carries no result");
    world.bridge.tick(0.1);

    let result = world.controller.take_result().expect("result arrives");
    assert_eq!(result.action_type, "play_hand");
    assert_eq!(result.sequence, 1);
    assert!(result.success);
    let after = result.new_state.expect("post-action state attached");
    assert_eq!(after.session_id, "session-test");

    // The host wanders into the shop on its own; the push arrives only
    // after the shop has had time to populate.
    world.sample.table.root.set_str("mode", "shop");
    world.sample.table.round.set_int("money", 7);
    world.bridge.tick(0.1);
    assert!(world.controller.take_state().is_none(), "settle delay holds the push");
    world.bridge.tick(0.5);

    let shop_state = world.controller.take_state().expect("settled push");
    assert_eq!(shop_state.phase, GamePhase::Shop);
    assert_eq!(shop_state.money, 7);
    assert!(shop_state.available_actions.iter().any(|t| t == "buy_item"));
}

/// Ordering actions flow through the whole stack down to the live row.
#[test]
fn reorder_round_trip_reaches_the_live_collection() {
    let mut world = world();
    world.bridge.tick(0.1);
    let _ = world.controller.take_state();

    assert!(world
        .controller
        .request(json!({"action_type": "reorder_jokers", "new_order": [1, 3, 0, 2]})));
    world.bridge.tick(0.1);
    world.bridge.tick(0.1);

    let result = world.controller.take_result().expect("reorder result");
    assert!(result.success, "{:?}", result.error_message);
    assert!(world.dispatcher.executed().is_empty(), "engine-owned action");

    let ids: Vec<_> = (0..4)
        .map(|i| world.sample.table.joker_cards.child_str(i, "id").unwrap())
        .collect();
    assert_eq!(ids, ["j_juggler", "j_stamp", "j_scheme", "j_reverie"]);

    // The attached snapshot reflects the new arrangement.
    let state = result.new_state.unwrap();
    let names: Vec<_> = state.jokers.iter().map(|j| j.name.as_str()).collect();
    assert_eq!(names, ["Juggler", "Stamp", "Scheme", "Reverie"]);
}

/// Host corruption mid-conversation degrades answers instead of wedging
/// the loop.
#[test]
fn corruption_degrades_gracefully_and_recovers() {
    let mut world = world();
    world.bridge.tick(0.1);
    let _ = world.controller.take_state();

    // The graph tears down between requests.
    world.sample.host.drop_root();
    assert!(world
        .controller
        .request(json!({"action_type": "play_hand", "card_indices": [0]})));
    world.bridge.tick(0.1);
    world.bridge.tick(0.1);

    let result = world.controller.take_result().expect("still answered");
    assert!(!result.success, "action against a torn-down host is refused");
    let state = result.new_state.expect("default-filled snapshot attached");
    assert!(state.hand_cards.is_empty());
    assert!(!state.extraction_errors.is_empty());

    // The graph comes back; the changed digest triggers a push.
    let table = mock::sample_table();
    world.sample.host.install_root(table.root.clone());
    world.bridge.tick(0.1);
    let recovered = world.controller.take_state().expect("recovery push");
    assert_eq!(recovered.hand_cards.len(), 4);
}
