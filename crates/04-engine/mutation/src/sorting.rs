//! Stable hand-sorting permutations.

use host_abi::probe::primitive_str;
use host_abi::HostCollection;

/// Keys a hand element by rank: deuce lowest, ace highest.
pub(crate) fn rank_key(collection: &dyn HostCollection, index: usize) -> u32 {
    read_key(collection, index, "rank", rank_value)
}

/// Keys a hand element by suit, in the fixed spades/hearts/clubs/diamonds
/// order.
pub(crate) fn suit_key(collection: &dyn HostCollection, index: usize) -> u32 {
    read_key(collection, index, "suit", suit_value)
}

/// Stable permutation of `collection` ordered by `key`.
///
/// Elements whose key cannot be read sort last, keeping their original
/// relative order, so one unreadable card never scrambles the rest of the
/// hand.
pub(crate) fn sort_order(
    collection: &dyn HostCollection,
    key: impl Fn(&dyn HostCollection, usize) -> u32,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..collection.len()).collect();
    order.sort_by_key(|&index| key(collection, index));
    order
}

fn read_key(
    collection: &dyn HostCollection,
    index: usize,
    field: &str,
    value: impl Fn(&str) -> Option<u32>,
) -> u32 {
    collection
        .element(index)
        .and_then(|element| value(&primitive_str(element.as_ref(), field, "")))
        .unwrap_or(u32::MAX)
}

fn rank_value(rank: &str) -> Option<u32> {
    match rank {
        "2" => Some(2),
        "3" => Some(3),
        "4" => Some(4),
        "5" => Some(5),
        "6" => Some(6),
        "7" => Some(7),
        "8" => Some(8),
        "9" => Some(9),
        "10" => Some(10),
        "jack" => Some(11),
        "queen" => Some(12),
        "king" => Some(13),
        "ace" => Some(14),
        _ => None,
    }
}

fn suit_value(suit: &str) -> Option<u32> {
    match suit {
        "spades" => Some(0),
        "hearts" => Some(1),
        "clubs" => Some(2),
        "diamonds" => Some(3),
        _ => None,
    }
}
