//! The substitute host.

use crate::graph::{as_node_ref, GraphNode};
use host_abi::{HostCollection, HostMutator, HostNode, HostObserver, NodeRef};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// In-memory host serving a graph root and named live collections.
#[derive(Default)]
pub struct MockHost {
    root: RefCell<Option<Rc<GraphNode>>>,
    collections: RefCell<BTreeMap<String, Rc<MockCollection>>>,
}

impl MockHost {
    /// A host with no graph installed; `root()` reports unreachable.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Installs (or replaces) the graph root.
    pub fn install_root(&self, root: Rc<GraphNode>) {
        *self.root.borrow_mut() = Some(root);
    }

    /// Tears the graph down, simulating a host mid-restart.
    pub fn drop_root(&self) {
        *self.root.borrow_mut() = None;
    }

    /// The installed root as a concrete node, for test-side mutation.
    pub fn root_node(&self) -> Option<Rc<GraphNode>> {
        self.root.borrow().clone()
    }

    /// Registers `node`'s children as the live collection called `name`.
    pub fn register_collection(&self, name: &str, node: Rc<GraphNode>) {
        self.collections
            .borrow_mut()
            .insert(name.to_owned(), Rc::new(MockCollection { node }));
    }

    /// Unregisters a collection, simulating an unreachable zone.
    pub fn unregister_collection(&self, name: &str) {
        self.collections.borrow_mut().remove(name);
    }
}

impl HostObserver for MockHost {
    fn root(&self) -> Option<NodeRef> {
        self.root.borrow().as_ref().map(as_node_ref)
    }
}

impl HostMutator for MockHost {
    fn collection(&self, name: &str) -> Option<Rc<dyn HostCollection>> {
        self.collections
            .borrow()
            .get(name)
            .map(|c| c.clone() as Rc<dyn HostCollection>)
    }
}

/// Live collection view over one array-like graph node.
struct MockCollection {
    node: Rc<GraphNode>,
}

impl HostCollection for MockCollection {
    fn len(&self) -> usize {
        HostNode::len(self.node.as_ref()).unwrap_or(0)
    }

    fn element(&self, idx: usize) -> Option<NodeRef> {
        self.node.index(idx)?.as_node()
    }

    fn set_order(&self, order: &[usize]) {
        self.node.apply_order(order);
    }
}
