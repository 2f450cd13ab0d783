//! Host boundary types shared by the projection and mutation engines.
//!
//! This crate defines the protocol boundary between the bridge and the live
//! host application, with no knowledge of any concrete host:
//! * [`HostNode`] / [`HostValue`] – read-only dynamic view of the host's
//!   object graph, cycles permitted.
//! * [`HostObserver`] / [`HostMutator`] – the observation and mutation
//!   surfaces a host adapter must provide.
//! * [`DiagnosticsSink`] – logging and element-integrity validation.
//! * [`probe`] – total traversal helpers; absence is a typed outcome, never
//!   a panic.
//! * [`HostHandle`] – the injected bundle every component is built from.

mod graph;
mod handle;
pub mod probe;
mod sink;
pub mod zones;

pub use graph::{HostCollection, HostMutator, HostNode, HostObserver, HostValue, NodeRef};
pub use handle::HostHandle;
pub use probe::{ProbeError, Seg};
pub use sink::{element_intact, DiagnosticsSink, GraphDiagnostics};
