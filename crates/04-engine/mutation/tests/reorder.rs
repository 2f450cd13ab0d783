//! Permutation laws and abort semantics of the reorder engine.

use host_abi::zones;
use mock::{sample_host, SampleHost};
use mutation::{MutationEngine, ReorderError};

fn joker_ids(sample: &SampleHost) -> Vec<String> {
    (0..4)
        .filter_map(|idx| sample.table.joker_cards.child_str(idx, "id"))
        .collect()
}

/// A valid bijection is applied exactly: slot `i` receives element
/// `order[i]`.
#[test]
fn valid_permutation_is_applied() {
    let sample = sample_host();
    let engine = MutationEngine::new(sample.handle.clone());

    engine.reorder(zones::JOKERS, &[3, 2, 1, 0]).expect("reorder applies");

    assert_eq!(
        joker_ids(&sample),
        ["j_stamp", "j_reverie", "j_juggler", "j_scheme"]
    );
}

#[test]
fn empty_order_is_refused() {
    let sample = sample_host();
    let engine = MutationEngine::new(sample.handle.clone());

    assert_eq!(engine.reorder(zones::JOKERS, &[]), Err(ReorderError::EmptyOrder));
}

#[test]
fn unavailable_collection_is_refused() {
    let sample = sample_host();
    sample.host.unregister_collection(zones::JOKERS);
    let engine = MutationEngine::new(sample.handle.clone());

    assert_eq!(
        engine.reorder(zones::JOKERS, &[0]),
        Err(ReorderError::CollectionUnavailable("jokers".into()))
    );
}

#[test]
fn length_mismatch_is_refused() {
    let sample = sample_host();
    let engine = MutationEngine::new(sample.handle.clone());

    assert_eq!(
        engine.reorder(zones::JOKERS, &[0, 1, 2]),
        Err(ReorderError::LengthMismatch {
            expected: 4,
            actual: 3
        })
    );
    assert_eq!(joker_ids(&sample)[0], "j_scheme", "order untouched");
}

#[test]
fn out_of_range_index_is_refused() {
    let sample = sample_host();
    let engine = MutationEngine::new(sample.handle.clone());

    assert_eq!(
        engine.reorder(zones::JOKERS, &[0, 1, 2, 9]),
        Err(ReorderError::IndexOutOfRange { index: 9, len: 4 })
    );
}

#[test]
fn duplicate_index_is_refused() {
    let sample = sample_host();
    let engine = MutationEngine::new(sample.handle.clone());

    assert_eq!(
        engine.reorder(zones::JOKERS, &[0, 1, 1, 2]),
        Err(ReorderError::DuplicateIndex { index: 1 })
    );
}

/// One corrupted element aborts the whole operation before any index math,
/// and the live order is untouched.
#[test]
fn corrupted_element_aborts_with_order_untouched() {
    let sample = sample_host();
    sample
        .table
        .joker_cards
        .index_node(1)
        .expect("joker 1")
        .remove("id");
    let engine = MutationEngine::new(sample.handle.clone());

    assert_eq!(
        engine.reorder(zones::JOKERS, &[3, 2, 1, 0]),
        Err(ReorderError::CorruptedElement { index: 1 })
    );
    assert_eq!(sample.table.joker_cards.child_str(0, "id").unwrap(), "j_scheme");
    assert!(sample.sink.saw("reorder integrity sweep"));
    assert!(sample.sink.saw("aborted"));
}

/// The synergy ordering puts non-copiers first and copiers last, each group
/// keeping its original relative order.
#[test]
fn optimal_order_builds_the_copier_chain() {
    let sample = sample_host();
    let engine = MutationEngine::new(sample.handle.clone());

    // Sample row: 0 = right-mirror, 1 = plain, 2 = first-mirror, 3 = plain.
    assert_eq!(engine.optimal_order(zones::JOKERS), vec![1, 3, 0, 2]);
}

/// Synergy scanning is advisory: a corrupted element is excluded, not
/// fatal.
#[test]
fn optimal_order_skips_corrupted_elements() {
    let sample = sample_host();
    sample
        .table
        .joker_cards
        .index_node(3)
        .expect("joker 3")
        .remove("id");
    let engine = MutationEngine::new(sample.handle.clone());

    assert_eq!(engine.optimal_order(zones::JOKERS), vec![1, 0, 2]);
    assert!(sample.sink.saw("synergy scan"));
}

#[test]
fn optimal_order_of_missing_collection_is_empty() {
    let sample = sample_host();
    sample.host.unregister_collection(zones::JOKERS);
    let engine = MutationEngine::new(sample.handle.clone());

    assert!(engine.optimal_order(zones::JOKERS).is_empty());
    assert!(sample.sink.saw("unavailable"));
}

/// Rank sort: 2♠, K♥, A♦, 7♣ sorts to 2, 7, K, A.
#[test]
fn rank_sort_order_is_stable_ascending() {
    let sample = sample_host();
    let engine = MutationEngine::new(sample.handle.clone());

    let order = engine.rank_sort_order(zones::HAND);
    assert_eq!(order, vec![0, 3, 1, 2]);

    engine.reorder(zones::HAND, &order).expect("sort applies");
    assert_eq!(sample.table.hand_cards.child_str(0, "rank").unwrap(), "2");
    assert_eq!(sample.table.hand_cards.child_str(3, "rank").unwrap(), "ace");
}

/// Suit sort follows the fixed spades/hearts/clubs/diamonds order.
#[test]
fn suit_sort_order_groups_by_suit() {
    let sample = sample_host();
    let engine = MutationEngine::new(sample.handle.clone());

    // Suits by slot: spades, hearts, diamonds, clubs.
    assert_eq!(engine.suit_sort_order(zones::HAND), vec![0, 1, 3, 2]);
}

/// A card with an unreadable rank sorts last without scrambling the rest.
#[test]
fn unreadable_rank_sorts_last() {
    let sample = sample_host();
    sample
        .table
        .hand_cards
        .index_node(0)
        .expect("first card")
        .set_str("rank", "wildcard");
    let engine = MutationEngine::new(sample.handle.clone());

    assert_eq!(engine.rank_sort_order(zones::HAND), vec![3, 1, 2, 0]);
}

mod properties {
    use super::*;
    use mock::{GraphNode, MockHost};
    use host_abi::HostHandle;
    use proptest::prelude::*;

    fn host_with_row(len: usize) -> (HostHandle, std::rc::Rc<GraphNode>) {
        let host = MockHost::new();
        let root = GraphNode::new();
        host.install_root(root);
        let row = GraphNode::list();
        for idx in 0..len {
            let joker = GraphNode::new();
            joker.set_str("id", &format!("j_{idx}"));
            joker.set_str("name", &format!("Joker {idx}"));
            row.push_node(joker);
        }
        host.register_collection(zones::JOKERS, row.clone());
        let sink = mock::MemorySink::new();
        (HostHandle::new(host.clone(), host, sink), row)
    }

    proptest! {
        /// Every valid permutation applies and lands elements exactly where
        /// the proposed order says.
        #[test]
        fn valid_bijections_always_apply(order in proptest::sample::select(&[2usize, 3, 5, 8][..])
            .prop_flat_map(|len| Just((0..len).collect::<Vec<_>>()).prop_shuffle())) {
            let (handle, row) = host_with_row(order.len());
            let engine = MutationEngine::new(handle);

            prop_assert!(engine.reorder(zones::JOKERS, &order).is_ok());
            for (slot, &src) in order.iter().enumerate() {
                prop_assert_eq!(
                    row.child_str(slot, "id").unwrap(),
                    format!("j_{src}")
                );
            }
        }

        /// A proposed order of the wrong length is always refused with the length
        /// reason, whatever its contents.
        #[test]
        fn wrong_length_orders_always_refuse(len in 1usize..6, extra in 1usize..4) {
            let (handle, row) = host_with_row(len);
            let engine = MutationEngine::new(handle);
            let order: Vec<usize> = (0..len + extra).map(|i| i % len).collect();

            prop_assert_eq!(
                engine.reorder(zones::JOKERS, &order),
                Err(ReorderError::LengthMismatch { expected: len, actual: len + extra })
            );
            prop_assert_eq!(row.child_str(0, "id").unwrap(), "j_0");
        }
    }
}
