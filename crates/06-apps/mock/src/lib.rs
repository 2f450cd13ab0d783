//! Substitute host, dispatcher, and diagnostics for tests.
//!
//! [`MockHost`] serves a mutable in-memory object graph through the same
//! traits a real host adapter implements, including working live
//! collections, so the projector, mutation engine, and bridge loop can be
//! exercised without a running game. [`sample_table`] builds the populated
//! graph most tests start from.

mod dispatch;
mod graph;
mod host;
mod sink;
mod table;

pub use dispatch::ScriptedDispatcher;
pub use graph::GraphNode;
pub use host::MockHost;
pub use sink::MemorySink;
pub use table::{sample_host, sample_table, SampleHost, SampleTable};
