//! Total traversal helpers over the host graph.
//!
//! The host graph is duck-shaped: any field may be missing, any interior
//! node may have been replaced by a primitive mid-transition. Every helper
//! here treats a miss as a typed outcome. Nothing in this module panics on
//! any graph whatsoever.

use crate::graph::{HostNode, HostValue, NodeRef};
use thiserror::Error;

/// One step of a traversal path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seg<'a> {
    /// Named field access.
    Field(&'a str),
    /// Indexed child access on an array-like node.
    Index(usize),
}

impl std::fmt::Display for Seg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seg::Field(key) => write!(f, "{key}"),
            Seg::Index(idx) => write!(f, "[{idx}]"),
        }
    }
}

/// Why a traversal could not be answered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// A path step named a field or index the node does not have.
    #[error("`{0}` is missing")]
    Missing(String),
    /// A mid-path value was a primitive where a container was required.
    #[error("`{0}` is not a container")]
    NotAContainer(String),
    /// The leaf exists but holds a different type than requested.
    #[error("`{0}` has an unexpected type")]
    WrongType(String),
    /// The leaf holds a value outside the recognized vocabulary.
    #[error("`{path}` holds unrecognized value {value:?}")]
    Unrecognized {
        /// Rendered path of the offending leaf.
        path: String,
        /// The stored string value.
        value: String,
    },
}

fn render(path: &[Seg<'_>], upto: usize) -> String {
    let mut out = String::new();
    for seg in path.iter().take(upto + 1) {
        if !out.is_empty() && matches!(seg, Seg::Field(_)) {
            out.push('.');
        }
        out.push_str(&seg.to_string());
    }
    out
}

/// Walks `path` from `root`, returning the value at the end of the chain.
pub fn lookup(root: &NodeRef, path: &[Seg<'_>]) -> Result<HostValue, ProbeError> {
    let mut current = HostValue::Node(root.clone());
    for (depth, seg) in path.iter().enumerate() {
        let node = match &current {
            HostValue::Node(node) => node.clone(),
            _ => return Err(ProbeError::NotAContainer(render(path, depth.saturating_sub(1)))),
        };
        let next = match seg {
            Seg::Field(key) => node.field(key),
            Seg::Index(idx) => node.index(*idx),
        };
        current = next.ok_or_else(|| ProbeError::Missing(render(path, depth)))?;
    }
    Ok(current)
}

/// Whether the full path resolves to any value.
pub fn path_exists(root: &NodeRef, path: &[Seg<'_>]) -> bool {
    lookup(root, path).is_ok()
}

/// Resolves `path` to a nested node.
pub fn nested_node(root: &NodeRef, path: &[Seg<'_>]) -> Result<NodeRef, ProbeError> {
    lookup(root, path)?
        .as_node()
        .ok_or_else(|| ProbeError::WrongType(render(path, path.len().saturating_sub(1))))
}

/// Resolves `path` to a string leaf.
pub fn nested_str(root: &NodeRef, path: &[Seg<'_>]) -> Result<String, ProbeError> {
    lookup(root, path)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ProbeError::WrongType(render(path, path.len().saturating_sub(1))))
}

/// Resolves `path` to an integer leaf, accepting either numeric kind.
pub fn nested_i64(root: &NodeRef, path: &[Seg<'_>]) -> Result<i64, ProbeError> {
    lookup(root, path)?
        .as_i64()
        .ok_or_else(|| ProbeError::WrongType(render(path, path.len().saturating_sub(1))))
}

/// Resolves `path` to a boolean leaf.
pub fn nested_bool(root: &NodeRef, path: &[Seg<'_>]) -> Result<bool, ProbeError> {
    lookup(root, path)?
        .as_bool()
        .ok_or_else(|| ProbeError::WrongType(render(path, path.len().saturating_sub(1))))
}

/// Copies a string field off `node`, substituting `default` unless the
/// stored value is a string leaf.
///
/// This is the hard extraction policy for building serializable records:
/// only primitive leaves may cross into output, so a nested (possibly
/// cyclic) value yields the default instead of a reference.
pub fn primitive_str(node: &dyn HostNode, key: &str, default: &str) -> String {
    match node.field(key) {
        Some(HostValue::Str(s)) => s,
        _ => default.to_owned(),
    }
}

/// Copies an integer field off `node`, substituting `default` unless the
/// stored value is a numeric leaf.
pub fn primitive_i64(node: &dyn HostNode, key: &str, default: i64) -> i64 {
    node.field(key).and_then(|v| v.as_i64()).unwrap_or(default)
}

/// Copies a boolean field off `node`, substituting `default` unless the
/// stored value is a boolean leaf.
pub fn primitive_bool(node: &dyn HostNode, key: &str, default: bool) -> bool {
    match node.field(key) {
        Some(HostValue::Bool(b)) => b,
        _ => default,
    }
}
