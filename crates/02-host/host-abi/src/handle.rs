//! The injected bundle of host surfaces.

use crate::graph::{HostMutator, HostObserver};
use crate::sink::DiagnosticsSink;
use std::rc::Rc;

/// Bundles the observation, mutation, and diagnostics surfaces of one live
/// host.
///
/// Components never reach for ambient host state; each is constructed from a
/// handle, which is what makes them testable against substitute hosts.
#[derive(Clone)]
pub struct HostHandle {
    observer: Rc<dyn HostObserver>,
    mutator: Rc<dyn HostMutator>,
    diagnostics: Rc<dyn DiagnosticsSink>,
}

impl HostHandle {
    /// Bundles the three host surfaces into one handle.
    pub fn new(
        observer: Rc<dyn HostObserver>,
        mutator: Rc<dyn HostMutator>,
        diagnostics: Rc<dyn DiagnosticsSink>,
    ) -> Self {
        Self {
            observer,
            mutator,
            diagnostics,
        }
    }

    /// Read-only graph access.
    pub fn observer(&self) -> &dyn HostObserver {
        self.observer.as_ref()
    }

    /// Live collection access.
    pub fn mutator(&self) -> &dyn HostMutator {
        self.mutator.as_ref()
    }

    /// Diagnostics destination.
    pub fn diagnostics(&self) -> &dyn DiagnosticsSink {
        self.diagnostics.as_ref()
    }
}
