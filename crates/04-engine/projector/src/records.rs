//! Primitive-only record extraction.
//!
//! Host elements can be mutually referential (card ↔ owning zone ↔ table ↔
//! card), so record builders copy primitive leaves and nothing else: a
//! nested value where a primitive is expected yields the field default, and
//! required fields that cannot be read drop the element rather than the
//! whole list.

use host_abi::probe::{self, Seg};
use host_abi::{NodeRef, ProbeError};
use protocol::{BlindView, CardView, ConsumableView, JokerView, ShopItemView};

/// Builds views for every readable element of an array-like node.
///
/// Per-element failures are logged and recorded, never escalated; a single
/// unreadable element costs exactly that element.
pub(crate) fn collect<T>(
    list: &NodeRef,
    label: &str,
    errors: &mut Vec<String>,
    build: impl Fn(&NodeRef, usize) -> Result<T, ProbeError>,
) -> Vec<T> {
    let len = list.len().unwrap_or(0);
    let mut out = Vec::with_capacity(len);
    for idx in 0..len {
        let element = match list.index(idx).and_then(|value| value.as_node()) {
            Some(node) => node,
            None => {
                log::warn!("{label}[{idx}] is not a readable element; skipped");
                errors.push(format!("{label}[{idx}]: not a readable element"));
                continue;
            }
        };
        match build(&element, idx) {
            Ok(view) => out.push(view),
            Err(err) => {
                log::warn!("{label}[{idx}] dropped: {err}");
                errors.push(format!("{label}[{idx}]: {err}"));
            }
        }
    }
    out
}

pub(crate) fn card_view(node: &NodeRef, _idx: usize) -> Result<CardView, ProbeError> {
    Ok(CardView {
        id: probe::nested_str(node, &[Seg::Field("id")])?,
        rank: probe::nested_str(node, &[Seg::Field("rank")])?,
        suit: probe::nested_str(node, &[Seg::Field("suit")])?,
        enhancement: probe::primitive_str(node.as_ref(), "enhancement", "none"),
        edition: probe::primitive_str(node.as_ref(), "edition", "none"),
        seal: probe::primitive_str(node.as_ref(), "seal", "none"),
    })
}

pub(crate) fn joker_view(node: &NodeRef, idx: usize) -> Result<JokerView, ProbeError> {
    Ok(JokerView {
        id: probe::nested_str(node, &[Seg::Field("id")])?,
        name: probe::nested_str(node, &[Seg::Field("name")])?,
        position: idx,
    })
}

pub(crate) fn consumable_view(node: &NodeRef, _idx: usize) -> Result<ConsumableView, ProbeError> {
    Ok(ConsumableView {
        id: probe::nested_str(node, &[Seg::Field("id")])?,
        name: probe::nested_str(node, &[Seg::Field("name")])?,
        kind: probe::primitive_str(node.as_ref(), "kind", ""),
    })
}

pub(crate) fn blind_view(node: &NodeRef) -> Result<BlindView, ProbeError> {
    Ok(BlindView {
        name: probe::nested_str(node, &[Seg::Field("name")])?,
        blind_type: probe::primitive_str(node.as_ref(), "kind", "small"),
        requirement: probe::primitive_i64(node.as_ref(), "requirement", 0),
        reward: probe::primitive_i64(node.as_ref(), "reward", 0),
    })
}

pub(crate) fn shop_item_view(node: &NodeRef, idx: usize) -> Result<ShopItemView, ProbeError> {
    Ok(ShopItemView {
        index: idx,
        item_type: probe::primitive_str(node.as_ref(), "kind", "unknown"),
        name: probe::nested_str(node, &[Seg::Field("name")])?,
        cost: probe::primitive_i64(node.as_ref(), "cost", 0),
    })
}
