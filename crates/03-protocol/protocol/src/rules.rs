//! Pure permission rules over a snapshot.
//!
//! These functions decide what the projected state permits; they never touch
//! the host. The router consults [`permitted`] before dispatching, and the
//! projector fills a snapshot's `available_actions` from
//! [`available_actions`] so the controller sees the same verdicts.

use crate::action::Action;
use crate::snapshot::{GamePhase, Snapshot};
use thiserror::Error;

/// Why the current state refuses an action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// The action is not meaningful in the current phase.
    #[error("`{action}` is not available during {phase}", phase = .phase.as_str())]
    WrongPhase {
        /// Wire tag of the refused action.
        action: &'static str,
        /// The phase that refused it.
        phase: GamePhase,
    },
    /// A card selection was empty.
    #[error("no cards selected")]
    NothingSelected,
    /// An index pointed outside its collection.
    #[error("index {index} is out of range for {collection} of size {len}")]
    IndexOutOfRange {
        /// Which collection was indexed.
        collection: &'static str,
        /// The offending index.
        index: usize,
        /// Current collection size.
        len: usize,
    },
    /// No hands left to play this round.
    #[error("no hands remaining")]
    NoHandsLeft,
    /// No discards left this round.
    #[error("no discards remaining")]
    NoDiscardsLeft,
    /// The item costs more than the player holds.
    #[error("cannot afford cost {cost} with {money}")]
    CannotAfford {
        /// Item cost.
        cost: i64,
        /// Money on hand.
        money: i64,
    },
    /// The post-hand reorder window is not open.
    #[error("joker reorder window is closed")]
    ReorderWindowClosed,
    /// A reorder request was not a permutation of the joker row.
    #[error("new order is not a permutation of the joker row")]
    NotAPermutation,
    /// The named consumable is not held.
    #[error("consumable `{0}` is not held")]
    UnknownConsumable(String),
}

fn require_phase(action: &'static str, snap: &Snapshot, phase: GamePhase) -> Result<(), RuleViolation> {
    if snap.phase == phase {
        Ok(())
    } else {
        Err(RuleViolation::WrongPhase {
            action,
            phase: snap.phase,
        })
    }
}

fn check_hand_selection(
    snap: &Snapshot,
    indices: &[usize],
) -> Result<(), RuleViolation> {
    if indices.is_empty() {
        return Err(RuleViolation::NothingSelected);
    }
    let len = snap.hand_cards.len();
    for &index in indices {
        if index >= len {
            return Err(RuleViolation::IndexOutOfRange {
                collection: "hand",
                index,
                len,
            });
        }
    }
    Ok(())
}

/// Checks one action against the projected state.
pub fn permitted(action: &Action, snap: &Snapshot) -> Result<(), RuleViolation> {
    match action {
        Action::PlayHand { card_indices } => {
            require_phase("play_hand", snap, GamePhase::HandSelection)?;
            if snap.hands_remaining == 0 {
                return Err(RuleViolation::NoHandsLeft);
            }
            check_hand_selection(snap, card_indices)
        }
        Action::DiscardCards { card_indices } => {
            require_phase("discard_cards", snap, GamePhase::HandSelection)?;
            if snap.discards_remaining == 0 {
                return Err(RuleViolation::NoDiscardsLeft);
            }
            check_hand_selection(snap, card_indices)
        }
        Action::GoToShop => require_phase("go_to_shop", snap, GamePhase::HandSelection),
        Action::BuyItem { shop_index } => {
            require_phase("buy_item", snap, GamePhase::Shop)?;
            let item = snap.shop_contents.get(*shop_index).ok_or_else(|| {
                RuleViolation::IndexOutOfRange {
                    collection: "shop",
                    index: *shop_index,
                    len: snap.shop_contents.len(),
                }
            })?;
            if snap.money < item.cost {
                return Err(RuleViolation::CannotAfford {
                    cost: item.cost,
                    money: snap.money,
                });
            }
            Ok(())
        }
        Action::SellJoker { joker_index } => {
            require_phase("sell_joker", snap, GamePhase::Shop)?;
            if *joker_index >= snap.jokers.len() {
                return Err(RuleViolation::IndexOutOfRange {
                    collection: "jokers",
                    index: *joker_index,
                    len: snap.jokers.len(),
                });
            }
            Ok(())
        }
        Action::SellConsumable { consumable_index } => {
            require_phase("sell_consumable", snap, GamePhase::Shop)?;
            if *consumable_index >= snap.consumables.len() {
                return Err(RuleViolation::IndexOutOfRange {
                    collection: "consumables",
                    index: *consumable_index,
                    len: snap.consumables.len(),
                });
            }
            Ok(())
        }
        Action::ReorderJokers { new_order } => {
            if !snap.post_hand_reorder_available {
                return Err(RuleViolation::ReorderWindowClosed);
            }
            let len = snap.jokers.len();
            if new_order.len() != len {
                return Err(RuleViolation::NotAPermutation);
            }
            let mut seen = vec![false; len];
            for &index in new_order {
                if index >= len || seen[index] {
                    return Err(RuleViolation::NotAPermutation);
                }
                seen[index] = true;
            }
            Ok(())
        }
        Action::SelectBlind { .. } => {
            require_phase("select_blind", snap, GamePhase::BlindSelection)
        }
        // Pack offers carry no projected state to check against yet.
        Action::SelectPackOffer { .. } => Ok(()),
        Action::RerollBoss => require_phase("reroll_boss", snap, GamePhase::BlindSelection),
        Action::RerollShop => require_phase("reroll_shop", snap, GamePhase::Shop),
        Action::SortHandByRank => {
            require_phase("sort_hand_by_rank", snap, GamePhase::HandSelection)
        }
        Action::SortHandBySuit => {
            require_phase("sort_hand_by_suit", snap, GamePhase::HandSelection)
        }
        Action::UseConsumable { item_id } => {
            if snap.consumables.iter().any(|c| &c.id == item_id) {
                Ok(())
            } else {
                Err(RuleViolation::UnknownConsumable(item_id.clone()))
            }
        }
    }
}

/// Action tags the projected state currently permits, in a fixed order.
pub fn available_actions(snap: &Snapshot) -> Vec<&'static str> {
    let mut tags = Vec::new();
    match snap.phase {
        GamePhase::HandSelection => {
            if snap.hands_remaining > 0 && !snap.hand_cards.is_empty() {
                tags.push("play_hand");
            }
            if snap.discards_remaining > 0 && !snap.hand_cards.is_empty() {
                tags.push("discard_cards");
            }
            if !snap.hand_cards.is_empty() {
                tags.push("sort_hand_by_rank");
                tags.push("sort_hand_by_suit");
            }
            tags.push("go_to_shop");
        }
        GamePhase::Shop => {
            if !snap.shop_contents.is_empty() {
                tags.push("buy_item");
            }
            if !snap.jokers.is_empty() {
                tags.push("sell_joker");
            }
            if !snap.consumables.is_empty() {
                tags.push("sell_consumable");
            }
            tags.push("reroll_shop");
        }
        GamePhase::BlindSelection => {
            tags.push("select_blind");
            tags.push("reroll_boss");
        }
        GamePhase::Scoring => {}
    }
    if snap.post_hand_reorder_available && !snap.jokers.is_empty() {
        tags.push("reorder_jokers");
    }
    if !snap.consumables.is_empty() {
        tags.push("use_consumable");
    }
    tags
}
