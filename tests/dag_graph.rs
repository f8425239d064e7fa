// tests/dag_graph.rs

mod common;
use crate::common::init_tracing;

use std::collections::HashMap;

use stepgraph::dag::{DirectedAcyclicGraph, Edge, Node, NodeId, Position};
use stepgraph::errors::StepGraphError;

/// Adds `count` nodes labelled "n0".."n{count-1}" and returns their ids.
fn graph_with_nodes(count: usize) -> (DirectedAcyclicGraph<String>, Vec<NodeId>) {
    let mut dag = DirectedAcyclicGraph::new();
    let ids = (0..count)
        .map(|i| dag.add_node(Node::new(format!("n{i}"))))
        .collect();
    (dag, ids)
}

fn position_in(order: &[NodeId]) -> HashMap<NodeId, usize> {
    order.iter().enumerate().map(|(i, id)| (*id, i)).collect()
}

#[test]
fn nodes_with_equal_labels_are_distinct() {
    init_tracing();

    let a = Node::new("boil".to_string());
    let b = Node::new("boil".to_string());
    assert_ne!(a, b);
    assert_ne!(a.id(), b.id());

    let mut dag = DirectedAcyclicGraph::new();
    dag.add_node(a);
    dag.add_node(b);
    assert_eq!(dag.node_count(), 2);
}

#[test]
fn add_node_is_idempotent() {
    let mut dag = DirectedAcyclicGraph::new();
    let node = Node::with_position("knead".to_string(), Position::new(1.0, 2.0));
    let id = dag.add_node(node.clone());
    let again = dag.add_node(node);

    assert_eq!(id, again);
    assert_eq!(dag.node_count(), 1);
    assert_eq!(dag.node(id).and_then(|n| n.position), Some(Position::new(1.0, 2.0)));
}

#[test]
fn self_loop_is_rejected_without_mutation() {
    let (mut dag, ids) = graph_with_nodes(1);

    let err = dag.add_edge(ids[0], ids[0]).unwrap_err();
    assert!(matches!(err, StepGraphError::SelfLoop(id) if id == ids[0]));
    assert_eq!(dag.edge_count(), 0);

    assert!(matches!(
        Edge::new(ids[0], ids[0]),
        Err(StepGraphError::SelfLoop(_))
    ));
}

#[test]
fn cycle_is_rejected_and_edge_set_unchanged() {
    let (mut dag, ids) = graph_with_nodes(3);
    dag.add_edge(ids[0], ids[1]).unwrap();
    dag.add_edge(ids[1], ids[2]).unwrap();
    let before = dag.edges();

    let err = dag.add_edge(ids[2], ids[0]).unwrap_err();
    assert!(matches!(
        err,
        StepGraphError::CycleDetected { from, to } if from == ids[2] && to == ids[0]
    ));
    assert_eq!(dag.edges(), before);

    // Direct back edge too.
    assert!(dag.add_edge(ids[1], ids[0]).is_err());
    assert_eq!(dag.edges(), before);
}

#[test]
fn edge_to_unknown_node_is_rejected() {
    let (mut dag, ids) = graph_with_nodes(1);
    let stranger = Node::new("elsewhere".to_string());

    let err = dag.add_edge(ids[0], stranger.id()).unwrap_err();
    assert!(matches!(err, StepGraphError::NodeNotFound(id) if id == stranger.id()));
    assert_eq!(dag.edge_count(), 0);
}

#[test]
fn duplicate_edge_is_a_no_op() {
    let (mut dag, ids) = graph_with_nodes(2);
    dag.add_edge(ids[0], ids[1]).unwrap();
    dag.add_edge(ids[0], ids[1]).unwrap();
    assert_eq!(dag.edge_count(), 1);
}

#[test]
fn removing_a_node_removes_incident_edges() {
    let (mut dag, ids) = graph_with_nodes(3);
    dag.add_edge(ids[0], ids[1]).unwrap();
    dag.add_edge(ids[1], ids[2]).unwrap();
    dag.add_edge(ids[0], ids[2]).unwrap();

    let removed = dag.remove_node(ids[1]).expect("node present");
    assert_eq!(removed.label, "n1");
    assert!(!dag.contains_node(ids[1]));
    assert_eq!(dag.edges(), vec![Edge::new(ids[0], ids[2]).unwrap()]);
    assert!(dag.remove_node(ids[1]).is_none());
}

#[test]
fn remove_edge_reports_presence() {
    let (mut dag, ids) = graph_with_nodes(2);
    let edge = dag.add_edge(ids[0], ids[1]).unwrap();

    assert!(dag.remove_edge(&edge));
    assert!(!dag.remove_edge(&edge));
    assert!(!dag.contains_edge(ids[0], ids[1]));

    // The reverse edge is now legal.
    dag.add_edge(ids[1], ids[0]).unwrap();
}

#[test]
fn from_parts_rejects_cycles() {
    let a = Node::new("a");
    let b = Node::new("b");
    let edges = vec![
        Edge::new(a.id(), b.id()).unwrap(),
        Edge::new(b.id(), a.id()).unwrap(),
    ];

    let result = DirectedAcyclicGraph::from_parts(vec![a, b], edges);
    assert!(matches!(result, Err(StepGraphError::CycleDetected { .. })));
}

#[test]
fn diamond_order_and_layers() {
    //   0
    //  / \
    // 1   2
    //  \ / \
    //   3   |
    //    \  |
    //     4-+
    let (mut dag, ids) = graph_with_nodes(5);
    for (s, d) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (2, 4)] {
        dag.add_edge(ids[s], ids[d]).unwrap();
    }

    let order = dag.topologically_sorted_nodes();
    assert_eq!(order.len(), 5);
    let pos = position_in(&order);
    for edge in dag.edges() {
        assert!(pos[&edge.source()] < pos[&edge.destination()], "{edge}");
    }

    let layers = dag.node_layers();
    assert_eq!(
        layers,
        vec![
            vec![ids[0]],
            vec![ids[1], ids[2]],
            vec![ids[3]],
            vec![ids[4]],
        ]
    );
    assert_eq!(dag.sources(), vec![ids[0]]);
    assert_eq!(dag.predecessors(ids[4]), vec![ids[2], ids[3]]);
    assert_eq!(dag.successors(ids[0]), vec![ids[1], ids[2]]);
}

#[test]
fn layer_is_longest_path_not_shortest() {
    // 0 -> 1 -> 2 -> 3 and a shortcut 0 -> 3.
    let (mut dag, ids) = graph_with_nodes(4);
    for (s, d) in [(0, 1), (1, 2), (2, 3), (0, 3)] {
        dag.add_edge(ids[s], ids[d]).unwrap();
    }

    let layer = dag.layer_of();
    assert_eq!(layer[&ids[3]], 3);
}

#[test]
fn chain_sorts_in_chain_order() {
    let (mut dag, ids) = graph_with_nodes(4);
    // Build the chain backwards so creation order disagrees with it.
    dag.add_edge(ids[3], ids[2]).unwrap();
    dag.add_edge(ids[2], ids[1]).unwrap();
    dag.add_edge(ids[1], ids[0]).unwrap();

    assert_eq!(
        dag.topologically_sorted_nodes(),
        vec![ids[3], ids[2], ids[1], ids[0]]
    );
}

#[test]
fn empty_graph() {
    let dag: DirectedAcyclicGraph<()> = DirectedAcyclicGraph::default();
    assert!(dag.is_empty());
    assert!(dag.topologically_sorted_nodes().is_empty());
    assert!(dag.node_layers().is_empty());
}
