//! Diagnostics sink and element-integrity validation.

use crate::graph::{HostValue, NodeRef};

/// Destination for bridge diagnostics.
///
/// Validation outcomes are never silently dropped: `validate` logs every
/// rejection through the sink before returning, so callers only decide
/// whether a failure aborts the operation.
pub trait DiagnosticsSink {
    /// Records a diagnostic message.
    fn log(&self, message: &str);

    /// Checks the structural integrity of one collection element.
    ///
    /// `label` names the collection, `context` names the operation being
    /// validated for. A `false` return has already been logged.
    fn validate(&self, node: &NodeRef, label: &str, context: &str) -> bool;
}

/// The integrity marker every intact collection element carries: a primitive
/// string `id`. Elements mid-teardown lose it first, which is what makes it
/// a usable corruption probe.
pub fn element_intact(node: &NodeRef) -> bool {
    matches!(node.field("id"), Some(HostValue::Str(id)) if !id.is_empty())
}

/// Standard sink backed by the `log` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphDiagnostics;

impl GraphDiagnostics {
    /// Creates the standard sink.
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticsSink for GraphDiagnostics {
    fn log(&self, message: &str) {
        log::warn!("{message}");
    }

    fn validate(&self, node: &NodeRef, label: &str, context: &str) -> bool {
        if element_intact(node) {
            true
        } else {
            self.log(&format!("{context}: {label} element failed integrity marker"));
            false
        }
    }
}
