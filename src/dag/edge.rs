// src/dag/edge.rs

use std::fmt;

use crate::dag::node::NodeId;
use crate::errors::{Result, StepGraphError};

/// Directed edge: `destination` depends on `source` having completed.
///
/// Edges are plain id pairs; the graph that stores them guarantees both
/// endpoints are members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    source: NodeId,
    destination: NodeId,
}

impl Edge {
    /// Build an edge, rejecting self loops.
    pub fn new(source: NodeId, destination: NodeId) -> Result<Self> {
        if source == destination {
            return Err(StepGraphError::SelfLoop(source));
        }
        Ok(Self {
            source,
            destination,
        })
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}
