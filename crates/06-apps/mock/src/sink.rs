//! Collecting diagnostics sink.

use host_abi::{element_intact, DiagnosticsSink, NodeRef};
use std::cell::RefCell;
use std::rc::Rc;

/// Sink that retains every message for assertions.
///
/// Validation uses the same integrity marker as the standard sink so mock
/// scenarios exercise the real corruption policy.
#[derive(Default)]
pub struct MemorySink {
    messages: RefCell<Vec<String>>,
}

impl MemorySink {
    /// A fresh empty sink.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Everything logged so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Whether any logged message contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.messages.borrow().iter().any(|m| m.contains(needle))
    }
}

impl DiagnosticsSink for MemorySink {
    fn log(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
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
