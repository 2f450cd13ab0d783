//! The flat, primitive-only projection of host state.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Discrete phase of the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Playing or discarding from the hand. The baseline phase every
    /// defaulted snapshot reports.
    #[default]
    HandSelection,
    /// Browsing the shop between rounds.
    Shop,
    /// Choosing the next blind.
    BlindSelection,
    /// The host is animating a scored hand.
    Scoring,
}

impl GamePhase {
    /// Maps a raw host mode string onto a phase.
    pub fn from_mode(mode: &str) -> Option<Self> {
        match mode {
            "hand_selection" => Some(GamePhase::HandSelection),
            "shop" => Some(GamePhase::Shop),
            "blind_selection" => Some(GamePhase::BlindSelection),
            "scoring" => Some(GamePhase::Scoring),
            _ => None,
        }
    }

    /// The wire tag for this phase.
    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::HandSelection => "hand_selection",
            GamePhase::Shop => "shop",
            GamePhase::BlindSelection => "blind_selection",
            GamePhase::Scoring => "scoring",
        }
    }
}

/// One playing card, copied leaf by leaf out of the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    /// Host identifier of the card.
    pub id: String,
    /// Rank tag (`2`..`10`, `jack`, `queen`, `king`, `ace`).
    pub rank: String,
    /// Suit tag (`spades`, `hearts`, `clubs`, `diamonds`).
    pub suit: String,
    /// Enhancement tag, `none` when plain.
    pub enhancement: String,
    /// Edition tag, `none` when plain.
    pub edition: String,
    /// Seal tag, `none` when unsealed.
    pub seal: String,
}

/// One joker in the joker row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokerView {
    /// Host identifier of the joker.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current slot in the row.
    pub position: usize,
}

/// One held consumable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumableView {
    /// Host identifier of the consumable.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Consumable kind tag.
    pub kind: String,
}

/// The blind currently in play or on offer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindView {
    /// Display name.
    pub name: String,
    /// Blind kind tag (`small`, `big`, `boss`).
    pub blind_type: String,
    /// Chips required to clear the blind.
    pub requirement: i64,
    /// Money rewarded for clearing it.
    pub reward: i64,
}

/// One purchasable shop entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItemView {
    /// Slot index inside the shop.
    pub index: usize,
    /// Entry kind tag (`joker`, `consumable`, `pack`).
    pub item_type: String,
    /// Display name.
    pub name: String,
    /// Purchase cost.
    pub cost: i64,
}

/// A complete flat projection of the host state.
///
/// Every field is a copy of a primitive or a record built exclusively from
/// primitives; no value anywhere in a snapshot references a live host
/// object. A defaulted snapshot (everything empty, baseline phase) is what
/// the projector emits when the host graph is unreachable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Identifier of the bridge session that produced this snapshot.
    pub session_id: String,
    /// Current phase.
    pub phase: GamePhase,
    /// Current ante.
    pub ante: u32,
    /// Player money.
    pub money: i64,
    /// Hands left to play this round.
    pub hands_remaining: u32,
    /// Discards left this round.
    pub discards_remaining: u32,
    /// Cards currently in hand.
    pub hand_cards: Vec<CardView>,
    /// The joker row, in order.
    pub jokers: Vec<JokerView>,
    /// Held consumables.
    pub consumables: Vec<ConsumableView>,
    /// The active blind, when one is set.
    pub current_blind: Option<BlindView>,
    /// Shop entries, empty outside the shop.
    pub shop_contents: Vec<ShopItemView>,
    /// Action tags the current state permits.
    pub available_actions: Vec<String>,
    /// Whether the post-hand joker reorder window is open.
    pub post_hand_reorder_available: bool,
    /// Per-field extraction failures, empty on a clean capture.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extraction_errors: Vec<String>,
}

impl Snapshot {
    /// Structural change digest over the fields that signal a meaningful
    /// state transition: phase, resource counters, and collection sizes.
    ///
    /// Two snapshots with equal digests may still differ in detail (card
    /// identity, shop names); the digest only gates unsolicited pushes.
    pub fn change_digest(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.session_id.hash(&mut hasher);
        self.phase.hash(&mut hasher);
        self.ante.hash(&mut hasher);
        self.money.hash(&mut hasher);
        self.hands_remaining.hash(&mut hasher);
        self.discards_remaining.hash(&mut hasher);
        self.hand_cards.len().hash(&mut hasher);
        self.jokers.len().hash(&mut hasher);
        self.consumables.len().hash(&mut hasher);
        self.shop_contents.len().hash(&mut hasher);
        self.current_blind.is_some().hash(&mut hasher);
        self.post_hand_reorder_available.hash(&mut hasher);
        hasher.finish()
    }
}
