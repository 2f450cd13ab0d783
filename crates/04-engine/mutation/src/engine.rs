//! The reorder engine.

use crate::error::ReorderError;
use crate::sorting;
use crate::synergy;
use host_abi::{HostCollection, HostHandle};
use std::rc::Rc;

/// Applies validated ordering changes to live host collections.
pub struct MutationEngine {
    host: HostHandle,
}

impl MutationEngine {
    /// Creates an engine over `host`.
    pub fn new(host: HostHandle) -> Self {
        Self { host }
    }

    /// Rearranges the named collection according to `order`.
    ///
    /// `order[slot]` names the current index of the element that ends up
    /// in `slot`. The validation sequence fails fast and mutates nothing
    /// on any failure:
    /// 1. an empty order is refused;
    /// 2. the collection must be resolvable;
    /// 3. every current element must pass the integrity marker — a safe
    ///    target arrangement cannot be computed over an unknown-shape
    ///    element;
    /// 4. the order length must match the collection length;
    /// 5. the order must be a bijection on `[0, len)`;
    /// 6. each element is re-validated immediately before placement, since
    ///    host activity may invalidate elements between steps 3 and 6.
    ///
    /// On success the arrangement is replaced in one step; no
    /// partially-applied ordering is ever observable.
    pub fn reorder(&self, name: &str, order: &[usize]) -> Result<(), ReorderError> {
        self.checked(name, order).inspect_err(|err| {
            self.host
                .diagnostics()
                .log(&format!("reorder of `{name}` aborted: {err}"));
        })
    }

    fn checked(&self, name: &str, order: &[usize]) -> Result<(), ReorderError> {
        if order.is_empty() {
            return Err(ReorderError::EmptyOrder);
        }
        let collection = self
            .collection(name)
            .ok_or_else(|| ReorderError::CollectionUnavailable(name.to_owned()))?;

        let len = collection.len();
        for index in 0..len {
            if !self.element_valid(&collection, name, index, "reorder integrity sweep") {
                return Err(ReorderError::CorruptedElement { index });
            }
        }

        if order.len() != len {
            return Err(ReorderError::LengthMismatch {
                expected: len,
                actual: order.len(),
            });
        }
        let mut seen = vec![false; len];
        for &index in order {
            if index >= len {
                return Err(ReorderError::IndexOutOfRange { index, len });
            }
            if seen[index] {
                return Err(ReorderError::DuplicateIndex { index });
            }
            seen[index] = true;
        }

        for &index in order {
            if !self.element_valid(&collection, name, index, "reorder placement") {
                return Err(ReorderError::ElementInvalidated { index });
            }
        }

        collection.set_order(order);
        Ok(())
    }

    /// Computes the synergy-optimized arrangement of the named collection.
    ///
    /// Advisory: nothing is mutated, and elements failing the integrity
    /// marker are logged and excluded rather than aborting, since the
    /// caller decides whether to apply the result via [`Self::reorder`].
    /// An unavailable collection yields an empty arrangement.
    pub fn optimal_order(&self, name: &str) -> Vec<usize> {
        match self.collection(name) {
            Some(collection) => {
                synergy::optimal_order(collection.as_ref(), name, self.host.diagnostics())
            }
            None => {
                self.host
                    .diagnostics()
                    .log(&format!("synergy scan: collection `{name}` is unavailable"));
                Vec::new()
            }
        }
    }

    /// Stable permutation sorting the named collection by card rank.
    pub fn rank_sort_order(&self, name: &str) -> Vec<usize> {
        self.sort_order(name, sorting::rank_key)
    }

    /// Stable permutation sorting the named collection by card suit.
    pub fn suit_sort_order(&self, name: &str) -> Vec<usize> {
        self.sort_order(name, sorting::suit_key)
    }

    fn sort_order(
        &self,
        name: &str,
        key: impl Fn(&dyn HostCollection, usize) -> u32,
    ) -> Vec<usize> {
        match self.collection(name) {
            Some(collection) => sorting::sort_order(collection.as_ref(), key),
            None => {
                self.host
                    .diagnostics()
                    .log(&format!("sort scan: collection `{name}` is unavailable"));
                Vec::new()
            }
        }
    }

    fn collection(&self, name: &str) -> Option<Rc<dyn HostCollection>> {
        self.host.mutator().collection(name)
    }

    fn element_valid(
        &self,
        collection: &Rc<dyn HostCollection>,
        name: &str,
        index: usize,
        context: &str,
    ) -> bool {
        match collection.element(index) {
            Some(element) => self.host.diagnostics().validate(&element, name, context),
            None => {
                self.host
                    .diagnostics()
                    .log(&format!("{context}: {name} element {index} is unreadable"));
                false
            }
        }
    }
}
