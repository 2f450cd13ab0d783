//! Defensive projection of the host graph into flat snapshots.
//!
//! [`StateProjector::extract`] is a total function: whatever shape the host
//! graph is in, it returns a fully-populated [`Snapshot`]. Extraction runs
//! as a fixed sequence of named sub-extractors, one per snapshot field; a
//! failing extractor is logged, recorded on the snapshot, and replaced by
//! the field's default without disturbing any other field. A single
//! corrupted substructure must never blank the whole snapshot.

mod records;

use host_abi::probe::{self, Seg};
use host_abi::{HostHandle, NodeRef, ProbeError};
use protocol::{rules, BlindView, CardView, ConsumableView, GamePhase, JokerView, ShopItemView,
    Snapshot};

/// Projects the live host graph into serializable snapshots.
pub struct StateProjector {
    host: HostHandle,
    session_id: String,
}

impl StateProjector {
    /// Creates a projector over `host`, stamping snapshots with
    /// `session_id` when the graph does not carry its own.
    pub fn new(host: HostHandle, session_id: impl Into<String>) -> Self {
        Self {
            host,
            session_id: session_id.into(),
        }
    }

    /// The raw host mode string, sampled for transition detection.
    pub fn mode(&self) -> Option<String> {
        let root = self.host.observer().root()?;
        probe::nested_str(&root, &[Seg::Field("mode")]).ok()
    }

    /// Captures a complete snapshot of the host state.
    ///
    /// Never fails: an unreachable graph yields the all-defaults snapshot,
    /// and each per-field failure is isolated and recorded under
    /// `extraction_errors`.
    pub fn extract(&self) -> Snapshot {
        let mut snap = Snapshot {
            session_id: self.session_id.clone(),
            ..Snapshot::default()
        };

        let Some(root) = self.host.observer().root() else {
            log::warn!("host graph unreachable; emitting default snapshot");
            snap.extraction_errors.push("root: host graph unreachable".into());
            return snap;
        };
        let mut errors = Vec::new();

        assign(&mut snap.session_id, "session_id", self.session(&root), &mut errors);
        assign(&mut snap.phase, "phase", self.phase(&root), &mut errors);
        assign(&mut snap.ante, "ante", counter(&root, "ante"), &mut errors);
        assign(&mut snap.money, "money", money(&root), &mut errors);
        assign(
            &mut snap.hands_remaining,
            "hands_remaining",
            counter(&root, "hands_left"),
            &mut errors,
        );
        assign(
            &mut snap.discards_remaining,
            "discards_remaining",
            counter(&root, "discards_left"),
            &mut errors,
        );
        assign(
            &mut snap.hand_cards,
            "hand_cards",
            self.hand_cards(&root, &mut errors),
            &mut errors,
        );
        assign(&mut snap.jokers, "jokers", self.jokers(&root, &mut errors), &mut errors);
        assign(
            &mut snap.consumables,
            "consumables",
            self.consumables(&root, &mut errors),
            &mut errors,
        );
        assign(&mut snap.current_blind, "current_blind", self.blind(&root), &mut errors);
        assign(
            &mut snap.shop_contents,
            "shop_contents",
            self.shop(&root, &mut errors),
            &mut errors,
        );
        assign(
            &mut snap.post_hand_reorder_available,
            "post_hand_reorder_available",
            probe::nested_bool(&root, &[Seg::Field("flags"), Seg::Field("reorder_window")]),
            &mut errors,
        );

        snap.available_actions = rules::available_actions(&snap)
            .into_iter()
            .map(str::to_owned)
            .collect();
        snap.extraction_errors = errors;
        snap
    }

    fn session(&self, root: &NodeRef) -> Result<String, ProbeError> {
        probe::nested_str(root, &[Seg::Field("session"), Seg::Field("id")])
    }

    fn phase(&self, root: &NodeRef) -> Result<GamePhase, ProbeError> {
        let mode = probe::nested_str(root, &[Seg::Field("mode")])?;
        GamePhase::from_mode(&mode).ok_or(ProbeError::Unrecognized {
            path: "mode".into(),
            value: mode,
        })
    }

    fn hand_cards(
        &self,
        root: &NodeRef,
        errors: &mut Vec<String>,
    ) -> Result<Vec<CardView>, ProbeError> {
        let cards = probe::nested_node(
            root,
            &[Seg::Field("zones"), Seg::Field("hand"), Seg::Field("cards")],
        )?;
        Ok(records::collect(&cards, "hand_cards", errors, records::card_view))
    }

    fn jokers(
        &self,
        root: &NodeRef,
        errors: &mut Vec<String>,
    ) -> Result<Vec<JokerView>, ProbeError> {
        let cards = probe::nested_node(
            root,
            &[Seg::Field("zones"), Seg::Field("jokers"), Seg::Field("cards")],
        )?;
        Ok(records::collect(&cards, "jokers", errors, records::joker_view))
    }

    fn consumables(
        &self,
        root: &NodeRef,
        errors: &mut Vec<String>,
    ) -> Result<Vec<ConsumableView>, ProbeError> {
        let cards = probe::nested_node(
            root,
            &[
                Seg::Field("zones"),
                Seg::Field("consumables"),
                Seg::Field("cards"),
            ],
        )?;
        Ok(records::collect(&cards, "consumables", errors, records::consumable_view))
    }

    fn blind(&self, root: &NodeRef) -> Result<Option<BlindView>, ProbeError> {
        match probe::lookup(root, &[Seg::Field("blind")]) {
            // No blind set is a legitimate state, not a failure.
            Err(ProbeError::Missing(_)) => Ok(None),
            Err(err) => Err(err),
            Ok(value) => {
                let node = value
                    .as_node()
                    .ok_or_else(|| ProbeError::WrongType("blind".into()))?;
                records::blind_view(&node).map(Some)
            }
        }
    }

    fn shop(
        &self,
        root: &NodeRef,
        errors: &mut Vec<String>,
    ) -> Result<Vec<ShopItemView>, ProbeError> {
        let items = probe::nested_node(root, &[Seg::Field("shop"), Seg::Field("items")])?;
        Ok(records::collect(&items, "shop_contents", errors, records::shop_item_view))
    }
}

/// Applies one sub-extractor outcome: the value on success, the default (by
/// leaving the slot untouched) plus a recorded reason on failure.
fn assign<T>(slot: &mut T, name: &str, outcome: Result<T, ProbeError>, errors: &mut Vec<String>) {
    match outcome {
        Ok(value) => *slot = value,
        Err(err) => {
            log::warn!("snapshot field `{name}` fell back to default: {err}");
            errors.push(format!("{name}: {err}"));
        }
    }
}

fn counter(root: &NodeRef, key: &str) -> Result<u32, ProbeError> {
    let value = probe::nested_i64(root, &[Seg::Field("round"), Seg::Field(key)])?;
    Ok(value.max(0) as u32)
}

fn money(root: &NodeRef) -> Result<i64, ProbeError> {
    probe::nested_i64(root, &[Seg::Field("round"), Seg::Field("money")])
}
