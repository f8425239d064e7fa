// src/dag/graph.rs

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::Direction;
use petgraph::algo::has_path_connecting;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::dag::edge::Edge;
use crate::dag::node::{Node, NodeId};
use crate::errors::{Result, StepGraphError};

/// Generic directed acyclic graph of labelled nodes.
///
/// Structure lives in a `petgraph` [`DiGraphMap`] keyed by [`NodeId`]; the
/// labels live next to it, ordered by id (i.e. creation order). Every edge
/// insertion is checked for self loops, membership and reachability, so the
/// graph can never hold a cycle. Rejected insertions leave it untouched.
#[derive(Debug, Clone)]
pub struct DirectedAcyclicGraph<T> {
    structure: DiGraphMap<NodeId, ()>,
    nodes: BTreeMap<NodeId, Node<T>>,
}

impl<T> Default for DirectedAcyclicGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DirectedAcyclicGraph<T> {
    pub fn new() -> Self {
        Self {
            structure: DiGraphMap::new(),
            nodes: BTreeMap::new(),
        }
    }

    /// Build a graph from a node set and an edge set.
    ///
    /// Fails if any edge is a self loop, references a node outside `nodes`,
    /// or closes a cycle. Nothing partial is returned.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = Node<T>>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self> {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        for edge in edges {
            graph.insert_edge(edge)?;
        }
        Ok(graph)
    }

    /// Insert a node. Adding a node whose id is already present is a no-op.
    pub fn add_node(&mut self, node: Node<T>) -> NodeId {
        let id = node.id();
        if !self.nodes.contains_key(&id) {
            self.structure.add_node(id);
            self.nodes.insert(id, node);
        }
        id
    }

    /// Remove a node together with every edge touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node<T>> {
        let node = self.nodes.remove(&id)?;
        self.structure.remove_node(id);
        debug!(node = %id, "removed node and its incident edges");
        Some(node)
    }

    /// Add the edge `source -> destination`.
    ///
    /// Errors:
    /// - [`StepGraphError::SelfLoop`] when both ends are the same node,
    /// - [`StepGraphError::NodeNotFound`] when an end is not in the graph,
    /// - [`StepGraphError::CycleDetected`] when `destination` already reaches
    ///   `source`.
    pub fn add_edge(&mut self, source: NodeId, destination: NodeId) -> Result<Edge> {
        let edge = Edge::new(source, destination)?;
        self.insert_edge(edge)
    }

    /// Insert a pre-built edge with the same checks as [`Self::add_edge`].
    pub fn insert_edge(&mut self, edge: Edge) -> Result<Edge> {
        let (source, destination) = (edge.source(), edge.destination());

        for id in [source, destination] {
            if !self.contains_node(id) {
                return Err(StepGraphError::NodeNotFound(id));
            }
        }

        if self.structure.contains_edge(source, destination) {
            return Ok(edge);
        }

        if has_path_connecting(&self.structure, destination, source, None) {
            debug!(%edge, "rejecting edge: destination already reaches source");
            return Err(StepGraphError::CycleDetected {
                from: source,
                to: destination,
            });
        }

        self.structure.add_edge(source, destination, ());
        Ok(edge)
    }

    /// Remove an edge; returns whether it was present.
    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        self.structure
            .remove_edge(edge.source(), edge.destination())
            .is_some()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn contains_edge(&self, source: NodeId, destination: NodeId) -> bool {
        self.structure.contains_edge(source, destination)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(&id)
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<T>> {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node<T>> {
        self.nodes.values_mut()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// All edges, sorted by (source, destination).
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .structure
            .all_edges()
            .filter_map(|(s, d, _)| Edge::new(s, d).ok())
            .collect();
        edges.sort();
        edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.structure.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct predecessors (sources of edges ending at `id`), sorted by id.
    pub fn predecessors(&self, id: NodeId) -> Vec<NodeId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Direct successors (destinations of edges starting at `id`), sorted by id.
    pub fn successors(&self, id: NodeId) -> Vec<NodeId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Nodes with no incoming edges, in creation order.
    pub fn sources(&self) -> Vec<NodeId> {
        self.node_ids()
            .filter(|id| self.in_degree(*id) == 0)
            .collect()
    }

    fn in_degree(&self, id: NodeId) -> usize {
        if !self.structure.contains_node(id) {
            return 0;
        }
        self.structure
            .neighbors_directed(id, Direction::Incoming)
            .count()
    }

    fn neighbors(&self, id: NodeId, dir: Direction) -> Vec<NodeId> {
        if !self.structure.contains_node(id) {
            return Vec::new();
        }
        let mut out: Vec<NodeId> = self.structure.neighbors_directed(id, dir).collect();
        out.sort();
        out
    }

    /// Every node, ordered so that each edge's source precedes its
    /// destination.
    ///
    /// Kahn's algorithm; among nodes that are ready at the same time the
    /// oldest (smallest id) goes first, so the order is stable for a given
    /// graph.
    pub fn topologically_sorted_nodes(&self) -> Vec<NodeId> {
        let mut remaining: HashMap<NodeId, usize> = self
            .node_ids()
            .map(|id| (id, self.in_degree(id)))
            .collect();

        let mut ready: BTreeSet<NodeId> = remaining
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(id, _)| *id)
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(id) = ready.pop_first() {
            order.push(id);
            for next in self.structure.neighbors_directed(id, Direction::Outgoing) {
                if let Some(deg) = remaining.get_mut(&next) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.insert(next);
                    }
                }
            }
        }

        order
    }

    /// Partition nodes into layers by longest path from a source.
    ///
    /// Sources are layer 0; any other node sits one layer below its deepest
    /// direct predecessor. Nodes inside a layer keep topological order.
    pub fn node_layers(&self) -> Vec<Vec<NodeId>> {
        let mut depth: HashMap<NodeId, usize> = HashMap::new();
        let mut layers: Vec<Vec<NodeId>> = Vec::new();

        for id in self.topologically_sorted_nodes() {
            let layer = self
                .structure
                .neighbors_directed(id, Direction::Incoming)
                .filter_map(|pred| depth.get(&pred))
                .map(|d| d + 1)
                .max()
                .unwrap_or(0);

            depth.insert(id, layer);
            if layers.len() <= layer {
                layers.resize_with(layer + 1, Vec::new);
            }
            layers[layer].push(id);
        }

        layers
    }

    /// Layer index of every node (see [`Self::node_layers`]).
    pub fn layer_of(&self) -> HashMap<NodeId, usize> {
        self.node_layers()
            .into_iter()
            .enumerate()
            .flat_map(|(layer, ids)| ids.into_iter().map(move |id| (id, layer)))
            .collect()
    }
}
