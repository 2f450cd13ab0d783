//! The closed action vocabulary.

use serde::{Deserialize, Serialize};

/// Every action a controller can request, as a closed tagged union.
///
/// The wire form is `{"action_type": "...", ...parameters}`; an unknown tag
/// fails decoding at the boundary instead of reaching a handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum Action {
    /// Play the selected cards from the hand.
    PlayHand {
        /// Hand indices of the cards to play.
        card_indices: Vec<usize>,
    },
    /// Discard the selected cards from the hand.
    DiscardCards {
        /// Hand indices of the cards to discard.
        card_indices: Vec<usize>,
    },
    /// Leave the round and enter the shop.
    GoToShop,
    /// Purchase one shop item.
    BuyItem {
        /// Index into the shop contents.
        shop_index: usize,
    },
    /// Sell a joker from the joker row.
    SellJoker {
        /// Index into the joker row.
        joker_index: usize,
    },
    /// Sell a held consumable.
    SellConsumable {
        /// Index into the consumable slots.
        consumable_index: usize,
    },
    /// Rearrange the joker row.
    ReorderJokers {
        /// Target arrangement: `new_order[slot]` is the current index of
        /// the joker that ends up in `slot`.
        new_order: Vec<usize>,
    },
    /// Choose which blind to play.
    SelectBlind {
        /// Blind kind tag (`small`, `big`, `boss`).
        blind_type: String,
    },
    /// Pick one offer out of an opened pack.
    SelectPackOffer {
        /// Index of the chosen offer.
        pack_index: usize,
    },
    /// Reroll the boss blind.
    RerollBoss,
    /// Reroll the shop contents.
    RerollShop,
    /// Sort the hand by card rank.
    SortHandByRank,
    /// Sort the hand by card suit.
    SortHandBySuit,
    /// Use a held consumable.
    UseConsumable {
        /// Identifier of the consumable to use.
        item_id: String,
    },
}

impl Action {
    /// The wire tag for this action, echoed into results.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::PlayHand { .. } => "play_hand",
            Action::DiscardCards { .. } => "discard_cards",
            Action::GoToShop => "go_to_shop",
            Action::BuyItem { .. } => "buy_item",
            Action::SellJoker { .. } => "sell_joker",
            Action::SellConsumable { .. } => "sell_consumable",
            Action::ReorderJokers { .. } => "reorder_jokers",
            Action::SelectBlind { .. } => "select_blind",
            Action::SelectPackOffer { .. } => "select_pack_offer",
            Action::RerollBoss => "reroll_boss",
            Action::RerollShop => "reroll_shop",
            Action::SortHandByRank => "sort_hand_by_rank",
            Action::SortHandBySuit => "sort_hand_by_suit",
            Action::UseConsumable { .. } => "use_consumable",
        }
    }
}
