//! Dynamic view of the host's live object graph.
//!
//! The host graph is deeply nested, partially unstable, and may contain
//! reference cycles (an element pointing back at its owning collection).
//! Nothing in this module copies nested structure; traversal hands out
//! reference-counted handles and leaves the graph where it lives.

use std::rc::Rc;

/// Reference-counted handle to a node in the host graph.
///
/// The bridge is single-threaded and cooperative, so `Rc` is the honest
/// ownership model; handles must never cross the host tick boundary into
/// serialized output.
pub type NodeRef = Rc<dyn HostNode>;

/// A single dynamically-typed value stored in the host graph.
#[derive(Clone)]
pub enum HostValue {
    /// UTF-8 string leaf.
    Str(String),
    /// Integer leaf.
    Int(i64),
    /// Floating-point leaf.
    Num(f64),
    /// Boolean leaf.
    Bool(bool),
    /// Nested node; may participate in cycles.
    Node(NodeRef),
}

impl HostValue {
    /// Whether this value is a primitive leaf (string, number, or boolean).
    pub fn is_primitive(&self) -> bool {
        !matches!(self, HostValue::Node(_))
    }

    /// Borrows the string payload when this is a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, accepting numeric leaves of either kind.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HostValue::Int(v) => Some(*v),
            HostValue::Num(v) if v.is_finite() => Some(*v as i64),
            _ => None,
        }
    }

    /// Returns the boolean payload when this is a boolean leaf.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HostValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the nested node when this value is a node.
    pub fn as_node(&self) -> Option<NodeRef> {
        match self {
            HostValue::Node(n) => Some(n.clone()),
            _ => None,
        }
    }
}

impl std::fmt::Debug for HostValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostValue::Str(s) => write!(f, "Str({s:?})"),
            HostValue::Int(v) => write!(f, "Int({v})"),
            HostValue::Num(v) => write!(f, "Num({v})"),
            HostValue::Bool(b) => write!(f, "Bool({b})"),
            // Never recurse: the node may be cyclic.
            HostValue::Node(_) => write!(f, "Node(..)"),
        }
    }
}

/// Read-only access to one node of the host graph.
///
/// Implementations must be total: a lookup that cannot be answered returns
/// `None` rather than faulting, whatever state the host is in.
pub trait HostNode {
    /// Looks up a named field on this node.
    fn field(&self, key: &str) -> Option<HostValue>;

    /// Number of indexed children when this node is array-like.
    fn len(&self) -> Option<usize>;

    /// Indexed child access for array-like nodes.
    fn index(&self, idx: usize) -> Option<HostValue>;

    /// Whether an array-like node has no children.
    fn is_empty(&self) -> bool {
        self.len().map_or(true, |len| len == 0)
    }
}

/// Read-only entry point into the host graph.
pub trait HostObserver {
    /// Root of the live object graph.
    ///
    /// `None` means the host has not finished booting or the graph is
    /// currently torn down; callers must degrade to defaults, never fault.
    fn root(&self) -> Option<NodeRef>;
}

/// A live ordered collection inside the host (a card zone).
pub trait HostCollection {
    /// Current number of elements.
    fn len(&self) -> usize;

    /// Whether the collection currently holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element currently at `idx`, if the slot is readable.
    fn element(&self, idx: usize) -> Option<NodeRef>;

    /// Replaces the collection order in one step.
    ///
    /// `order[slot]` names the current index of the element that ends up in
    /// `slot`. Callers are responsible for validating the permutation first;
    /// implementations apply it atomically with respect to the host tick.
    fn set_order(&self, order: &[usize]);
}

/// Mutation surface of the host.
pub trait HostMutator {
    /// Resolves a named live collection, `None` when it does not exist or is
    /// not currently reachable.
    fn collection(&self, name: &str) -> Option<Rc<dyn HostCollection>>;
}
