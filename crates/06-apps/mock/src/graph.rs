//! In-memory object graph nodes.

use host_abi::{HostNode, HostValue, NodeRef};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// A mutable graph node serving both field and indexed access.
///
/// Tests mutate nodes mid-scenario to simulate the host's own activity:
/// dropping fields, replacing containers with primitives, or splicing in
/// reference cycles.
#[derive(Default)]
pub struct GraphNode {
    fields: RefCell<BTreeMap<String, HostValue>>,
    children: RefCell<Vec<Rc<GraphNode>>>,
    list: Cell<bool>,
}

impl GraphNode {
    /// A fresh record-like node.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// A fresh array-like node; reports a length even while empty.
    pub fn list() -> Rc<Self> {
        let node = Self::new();
        node.list.set(true);
        node
    }

    /// Stores a raw value under `key`.
    pub fn set(&self, key: &str, value: HostValue) {
        self.fields.borrow_mut().insert(key.to_owned(), value);
    }

    /// Stores a string leaf.
    pub fn set_str(&self, key: &str, value: &str) {
        self.set(key, HostValue::Str(value.to_owned()));
    }

    /// Stores an integer leaf.
    pub fn set_int(&self, key: &str, value: i64) {
        self.set(key, HostValue::Int(value));
    }

    /// Stores a boolean leaf.
    pub fn set_bool(&self, key: &str, value: bool) {
        self.set(key, HostValue::Bool(value));
    }

    /// Stores a nested node.
    pub fn set_node(&self, key: &str, value: Rc<GraphNode>) {
        self.set(key, HostValue::Node(value));
    }

    /// Removes a field, simulating host teardown.
    pub fn remove(&self, key: &str) {
        self.fields.borrow_mut().remove(key);
    }

    /// Appends an indexed child.
    pub fn push_node(&self, value: Rc<GraphNode>) {
        self.list.set(true);
        self.children.borrow_mut().push(value);
    }

    /// Replaces the children with the given arrangement of current indices.
    pub(crate) fn apply_order(&self, order: &[usize]) {
        let mut children = self.children.borrow_mut();
        let old = children.clone();
        *children = order.iter().filter_map(|&idx| old.get(idx).cloned()).collect();
    }

    /// The concrete child at `idx`, for test-side mutation.
    pub fn index_node(&self, idx: usize) -> Option<Rc<GraphNode>> {
        self.children.borrow().get(idx).cloned()
    }

    /// String field of the child at `idx`, for assertions over order.
    pub fn child_str(&self, idx: usize, key: &str) -> Option<String> {
        let child = self.index_node(idx)?;
        let value = child.field(key)?;
        value.as_str().map(str::to_owned)
    }
}

impl HostNode for GraphNode {
    fn field(&self, key: &str) -> Option<HostValue> {
        self.fields.borrow().get(key).cloned()
    }

    fn len(&self) -> Option<usize> {
        self.list.get().then(|| self.children.borrow().len())
    }

    fn index(&self, idx: usize) -> Option<HostValue> {
        let child = self.children.borrow().get(idx)?.clone();
        Some(HostValue::Node(child))
    }
}

/// Upcasts a concrete node to the trait handle.
pub(crate) fn as_node_ref(node: &Rc<GraphNode>) -> NodeRef {
    node.clone()
}
