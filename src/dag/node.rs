// src/dag/node.rs

//! Node identity and layout hints.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque node identity.
///
/// Ids come from a process-wide counter, so every node ever created gets a
/// distinct id and ordering by id is creation order. Identity never depends
/// on the node's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 2D position hint used only for layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A graph node: a fresh identity wrapping a label.
///
/// Equality and hashing look at the id only, so two nodes carrying identical
/// labels are still different nodes.
#[derive(Debug, Clone)]
pub struct Node<T> {
    id: NodeId,
    pub label: T,
    pub position: Option<Position>,
}

impl<T> Node<T> {
    pub fn new(label: T) -> Self {
        Self {
            id: NodeId::next(),
            label,
            position: None,
        }
    }

    pub fn with_position(label: T, position: Position) -> Self {
        Self {
            id: NodeId::next(),
            label,
            position: Some(position),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<T> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Node<T> {}

impl<T> Hash for Node<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
