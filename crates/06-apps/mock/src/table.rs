//! The populated table graph most tests start from.

use crate::graph::GraphNode;
use crate::host::MockHost;
use crate::sink::MemorySink;
use host_abi::{zones, HostHandle};
use std::rc::Rc;

/// The standard mid-run table graph plus handles to its live zones.
pub struct SampleTable {
    /// Graph root.
    pub root: Rc<GraphNode>,
    /// The round counters node.
    pub round: Rc<GraphNode>,
    /// The hand's card list.
    pub hand_cards: Rc<GraphNode>,
    /// The joker row's card list.
    pub joker_cards: Rc<GraphNode>,
    /// The consumable slots' card list.
    pub consumable_cards: Rc<GraphNode>,
}

fn card(id: &str, rank: &str, suit: &str) -> Rc<GraphNode> {
    let node = GraphNode::new();
    node.set_str("id", id);
    node.set_str("rank", rank);
    node.set_str("suit", suit);
    node
}

fn joker(id: &str, name: &str, role: Option<&str>) -> Rc<GraphNode> {
    let node = GraphNode::new();
    node.set_str("id", id);
    node.set_str("name", name);
    if let Some(role) = role {
        node.set_str("role", role);
    }
    node
}

fn shop_item(kind: &str, name: &str, cost: i64) -> Rc<GraphNode> {
    let node = GraphNode::new();
    node.set_str("id", name);
    node.set_str("kind", kind);
    node.set_str("name", name);
    node.set_int("cost", cost);
    node
}

/// Builds the standard mid-run table graph.
///
/// Four hand cards, four jokers — a right-mirror at slot 0, plains at 1 and
/// 3, a first-mirror at slot 2 — one consumable, a small blind, and a
/// two-entry shop. The reorder window starts open.
pub fn sample_table() -> SampleTable {
    let root = GraphNode::new();
    root.set_str("mode", "hand_selection");

    let session = GraphNode::new();
    session.set_str("id", "session-test");
    root.set_node("session", session);

    let round = GraphNode::new();
    round.set_int("ante", 1);
    round.set_int("money", 10);
    round.set_int("hands_left", 3);
    round.set_int("discards_left", 2);
    root.set_node("round", round.clone());

    let hand_cards = GraphNode::list();
    hand_cards.push_node(card("c_2s", "2", "spades"));
    hand_cards.push_node(card("c_kh", "king", "hearts"));
    hand_cards.push_node(card("c_ad", "ace", "diamonds"));
    hand_cards.push_node(card("c_7c", "7", "clubs"));
    let hand = GraphNode::new();
    hand.set_node("cards", hand_cards.clone());

    let joker_cards = GraphNode::list();
    joker_cards.push_node(joker("j_scheme", "Scheme", Some("mirror_right")));
    joker_cards.push_node(joker("j_juggler", "Juggler", None));
    joker_cards.push_node(joker("j_reverie", "Reverie", Some("mirror_first")));
    joker_cards.push_node(joker("j_stamp", "Stamp", None));
    let jokers = GraphNode::new();
    jokers.set_node("cards", joker_cards.clone());

    let consumable_cards = GraphNode::list();
    let omen = GraphNode::new();
    omen.set_str("id", "c_omen");
    omen.set_str("name", "Omen");
    omen.set_str("kind", "tarot");
    consumable_cards.push_node(omen);
    let consumables = GraphNode::new();
    consumables.set_node("cards", consumable_cards.clone());

    let table_zones = GraphNode::new();
    table_zones.set_node("hand", hand);
    table_zones.set_node("jokers", jokers);
    table_zones.set_node("consumables", consumables);
    root.set_node("zones", table_zones);

    let blind = GraphNode::new();
    blind.set_str("name", "Small Blind");
    blind.set_str("kind", "small");
    blind.set_int("requirement", 300);
    blind.set_int("reward", 3);
    root.set_node("blind", blind);

    let shop_items = GraphNode::list();
    shop_items.push_node(shop_item("joker", "Juggler", 4));
    shop_items.push_node(shop_item("pack", "Arcana Pack", 6));
    let shop = GraphNode::new();
    shop.set_node("items", shop_items);
    root.set_node("shop", shop);

    let flags = GraphNode::new();
    flags.set_bool("reorder_window", true);
    root.set_node("flags", flags);

    SampleTable {
        root,
        round,
        hand_cards,
        joker_cards,
        consumable_cards,
    }
}

/// A complete substitute host: graph, live collections, handle, and sink.
pub struct SampleHost {
    /// The injected handle components are built from.
    pub handle: HostHandle,
    /// The host itself, for root swaps and collection registration.
    pub host: Rc<MockHost>,
    /// The collecting diagnostics sink.
    pub sink: Rc<MemorySink>,
    /// The graph and its live zone nodes.
    pub table: SampleTable,
}

/// A host serving [`sample_table`] with its zones registered as live
/// collections, bundled into a handle with a collecting sink.
pub fn sample_host() -> SampleHost {
    let table = sample_table();
    let host = MockHost::new();
    host.install_root(table.root.clone());
    host.register_collection(zones::HAND, table.hand_cards.clone());
    host.register_collection(zones::JOKERS, table.joker_cards.clone());
    host.register_collection(zones::CONSUMABLES, table.consumable_cards.clone());

    let sink = MemorySink::new();
    let handle = HostHandle::new(host.clone(), host.clone(), sink.clone());
    SampleHost {
        handle,
        host,
        sink,
        table,
    }
}
