// src/dag/mod.rs

//! Generic DAG container.
//!
//! - [`node`] holds node identity ([`NodeId`]), labelled [`Node`]s and
//!   layout [`Position`] hints.
//! - [`edge`] holds the dependency [`Edge`] type.
//! - [`graph`] holds [`DirectedAcyclicGraph`], which rejects cycles on every
//!   insertion and derives topological order and layers.

pub mod edge;
pub mod graph;
pub mod node;

pub use edge::Edge;
pub use graph::DirectedAcyclicGraph;
pub use node::{Node, NodeId, Position};
