//! Wayfind Graph - in-memory graphs for path search
//!
//! This crate loads graph documents (JSON node and edge lists) into a
//! [`MemoryGraph`] that implements [`wayfind_core::GraphAccessor`].

pub mod document;
pub mod error;
pub mod memory;

pub use document::{EdgeRecord, GraphDocument, NodeRecord};
pub use error::{GraphError, GraphResult};
pub use memory::{EdgeId, MemoryGraph, NodeId};
