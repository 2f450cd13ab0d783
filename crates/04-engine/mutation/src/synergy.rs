//! Copier-aware synergy ordering.

use host_abi::{DiagnosticsSink, HostCollection, HostValue};
use smallvec::SmallVec;

/// Role tag of a copier that replicates the leftmost element's effect.
pub const ROLE_MIRROR_FIRST: &str = "mirror_first";
/// Role tag of a copier that replicates its immediate right neighbor's
/// effect.
pub const ROLE_MIRROR_RIGHT: &str = "mirror_right";

fn is_copier(element: &dyn host_abi::HostNode) -> bool {
    matches!(
        element.field("role"),
        Some(HostValue::Str(role)) if role == ROLE_MIRROR_FIRST || role == ROLE_MIRROR_RIGHT
    )
}

/// Computes the synergy-optimized arrangement of `collection`.
///
/// Non-copier elements come first in their original relative order, copiers
/// follow in theirs. With every non-copier ahead of it, a leftmost-mirror
/// replicates the strongest available effect, and a right-mirror placed
/// just before it replicates that already-amplified effect in turn.
pub fn optimal_order(
    collection: &dyn HostCollection,
    label: &str,
    sink: &dyn DiagnosticsSink,
) -> Vec<usize> {
    let mut keepers: SmallVec<[usize; 8]> = SmallVec::new();
    let mut copiers: SmallVec<[usize; 8]> = SmallVec::new();

    for index in 0..collection.len() {
        let Some(element) = collection.element(index) else {
            sink.log(&format!(
                "synergy scan: {label} element {index} is unreadable; excluded"
            ));
            continue;
        };
        if !sink.validate(&element, label, "synergy scan") {
            continue;
        }
        if is_copier(element.as_ref()) {
            copiers.push(index);
        } else {
            keepers.push(index);
        }
    }

    keepers.into_iter().chain(copiers).collect()
}
