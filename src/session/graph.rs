// src/session/graph.rs

use std::collections::HashMap;

use tracing::{debug, info};

use crate::dag::{DirectedAcyclicGraph, Edge, Node, NodeId};
use crate::errors::{Result, StepGraphError};
use crate::recipe::{RecipeStep, RecipeStepGraph};
use crate::session::step::{SessionRecipeStep, SessionRecipeStepNode, StepTimer};
use crate::timer::TickOutcome;

/// A timer that reached zero during [`SessionRecipeStepGraph::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEnded {
    pub node: NodeId,
    pub step_id: String,
    pub index: usize,
    pub span: String,
}

/// Runtime copy of a recipe's step graph for one cooking session.
///
/// Carries per-step completion and timer state that the recipe itself does
/// not have. Completability is recomputed for every node after each
/// mutation; recipe graphs are small, so there is no incremental update.
#[derive(Debug, Clone, Default)]
pub struct SessionRecipeStepGraph {
    dag: DirectedAcyclicGraph<SessionRecipeStepNode>,
    /// Recipe node id -> session node id.
    from_recipe: HashMap<NodeId, NodeId>,
    by_step_id: HashMap<String, NodeId>,
}

impl SessionRecipeStepGraph {
    /// Empty session; what callers fall back to when construction fails.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_recipe_graph(graph: &RecipeStepGraph) -> Result<Self> {
        let edges = graph.dag().edges();
        Self::from_parts(graph.dag().nodes(), &edges)
    }

    /// Map recipe nodes and edges 1:1 into a session graph.
    ///
    /// Every edge must resolve to two mapped nodes; otherwise the whole
    /// construction fails with [`StepGraphError::GraphConstructionFailed`].
    pub fn from_parts<'a>(
        nodes: impl IntoIterator<Item = &'a Node<RecipeStep>>,
        edges: &[Edge],
    ) -> Result<Self> {
        let mut from_recipe = HashMap::new();
        let mut by_step_id = HashMap::new();
        let mut session_nodes = Vec::new();

        for recipe_node in nodes {
            let step = SessionRecipeStep::from_step(&recipe_node.label);
            let mut node = Node::new(SessionRecipeStepNode::new(step));
            node.position = recipe_node.position;

            from_recipe.insert(recipe_node.id(), node.id());
            by_step_id.insert(recipe_node.label.id.clone(), node.id());
            session_nodes.push(node);
        }

        let mut session_edges = Vec::with_capacity(edges.len());
        for edge in edges {
            let (Some(source), Some(destination)) = (
                from_recipe.get(&edge.source()),
                from_recipe.get(&edge.destination()),
            ) else {
                return Err(StepGraphError::GraphConstructionFailed(format!(
                    "edge {edge} references a step outside the graph"
                )));
            };
            session_edges.push(Edge::new(*source, *destination)?);
        }

        let dag = DirectedAcyclicGraph::from_parts(session_nodes, session_edges)
            .map_err(|e| StepGraphError::GraphConstructionFailed(e.to_string()))?;

        let mut graph = Self {
            dag,
            from_recipe,
            by_step_id,
        };
        graph.recompute_completability();

        info!(
            steps = graph.dag.node_count(),
            timers = graph.timer_count(),
            "session graph ready"
        );
        Ok(graph)
    }

    pub fn dag(&self) -> &DirectedAcyclicGraph<SessionRecipeStepNode> {
        &self.dag
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<SessionRecipeStepNode>> {
        self.dag.node(id)
    }

    pub fn is_empty(&self) -> bool {
        self.dag.is_empty()
    }

    /// Session node for a recipe-level step id.
    pub fn node_for_step(&self, step_id: &str) -> Result<NodeId> {
        self.by_step_id
            .get(step_id)
            .copied()
            .ok_or_else(|| StepGraphError::StepNotFound(step_id.to_string()))
    }

    /// Session node that was created from the given recipe node.
    pub fn session_node_for(&self, recipe_node: NodeId) -> Option<NodeId> {
        self.from_recipe.get(&recipe_node).copied()
    }

    pub fn topologically_sorted_nodes(&self) -> Vec<NodeId> {
        self.dag.topologically_sorted_nodes()
    }

    pub fn node_layers(&self) -> Vec<Vec<NodeId>> {
        self.dag.node_layers()
    }

    pub fn timer_count(&self) -> usize {
        self.dag.nodes().map(|n| n.label.step.timers().len()).sum()
    }

    /// Mark every step as not completed and recompute.
    pub fn reset_steps(&mut self) {
        for node in self.dag.nodes_mut() {
            node.label.is_completed = false;
        }
        self.recompute_completability();
        debug!("session steps reset");
    }

    /// Flip a step's completion and recompute. Returns the new state.
    pub fn toggle_step(&mut self, id: NodeId) -> Result<bool> {
        let node = self
            .dag
            .node_mut(id)
            .ok_or(StepGraphError::NodeNotFound(id))?;
        node.label.is_completed = !node.label.is_completed;
        let completed = node.label.is_completed;

        debug!(node = %id, step = %node.label.step.id(), completed, "toggled step");
        self.recompute_completability();
        Ok(completed)
    }

    /// Mark a step completed (no change if it already is) and recompute.
    pub fn complete_step(&mut self, id: NodeId) -> Result<()> {
        let node = self
            .dag
            .node_mut(id)
            .ok_or(StepGraphError::NodeNotFound(id))?;
        if !node.label.is_completed {
            node.label.is_completed = true;
            debug!(node = %id, step = %node.label.step.id(), "completed step");
        }
        self.recompute_completability();
        Ok(())
    }

    /// The actionable frontier: completable but not completed, in
    /// topological order.
    pub fn completable_nodes(&self) -> Vec<NodeId> {
        self.topologically_sorted_nodes()
            .into_iter()
            .filter(|id| {
                self.dag
                    .node(*id)
                    .is_some_and(|n| n.label.is_actionable())
            })
            .collect()
    }

    /// Every step is completed. An empty session is never finished.
    pub fn is_finished(&self) -> bool {
        !self.dag.is_empty() && self.dag.nodes().all(|n| n.label.is_completed)
    }

    /// Recompute `is_completable` for every node from scratch.
    ///
    /// A node is completable iff every direct predecessor is completed.
    /// Running timers on steps outside the frontier are paused.
    fn recompute_completability(&mut self) {
        let completed: HashMap<NodeId, bool> = self
            .dag
            .nodes()
            .map(|n| (n.id(), n.label.is_completed))
            .collect();

        let completable: Vec<(NodeId, bool)> = self
            .dag
            .node_ids()
            .map(|id| {
                let ready = self
                    .dag
                    .predecessors(id)
                    .iter()
                    .all(|pred| completed.get(pred).copied().unwrap_or(false));
                (id, ready)
            })
            .collect();

        for (id, ready) in completable {
            let Some(node) = self.dag.node_mut(id) else {
                continue;
            };
            node.label.is_completable = ready;

            if !node.label.is_actionable() {
                for (index, t) in node.label.step.timers_mut().iter_mut().enumerate() {
                    if t.timer.pause() {
                        debug!(node = %id, index, "paused timer on step outside the frontier");
                    }
                }
            }
        }
    }

    pub fn timers(&self, id: NodeId) -> Result<&[StepTimer]> {
        self.dag
            .node(id)
            .map(|n| n.label.step.timers())
            .ok_or(StepGraphError::NodeNotFound(id))
    }

    pub fn timer(&self, id: NodeId, index: usize) -> Result<&StepTimer> {
        let node = self.dag.node(id).ok_or(StepGraphError::NodeNotFound(id))?;
        node.label
            .step
            .timers()
            .get(index)
            .ok_or_else(|| StepGraphError::TimerNotFound {
                step: node.label.step.id().to_string(),
                index,
            })
    }

    /// Start a timer. Only steps in the frontier may run timers.
    pub fn start_timer(&mut self, id: NodeId, index: usize) -> Result<bool> {
        let t = self.actionable_timer_mut(id, index)?;
        Ok(t.timer.start())
    }

    /// Resume a paused timer. Only steps in the frontier may run timers.
    pub fn resume_timer(&mut self, id: NodeId, index: usize) -> Result<bool> {
        let t = self.actionable_timer_mut(id, index)?;
        Ok(t.timer.resume())
    }

    pub fn pause_timer(&mut self, id: NodeId, index: usize) -> Result<bool> {
        let t = self.timer_mut(id, index)?;
        Ok(t.timer.pause())
    }

    pub fn restart_timer(&mut self, id: NodeId, index: usize) -> Result<()> {
        let t = self.timer_mut(id, index)?;
        t.timer.restart();
        Ok(())
    }

    /// Feed elapsed time to every running timer; report those that ended.
    pub fn tick(&mut self, elapsed_secs: u32) -> Vec<TimerEnded> {
        let mut ended = Vec::new();
        for node in self.dag.nodes_mut() {
            let node_id = node.id();
            let step_id = node.label.step.id().to_string();
            for (index, t) in node.label.step.timers_mut().iter_mut().enumerate() {
                if t.timer.tick(elapsed_secs) == TickOutcome::Ended {
                    ended.push(TimerEnded {
                        node: node_id,
                        step_id: step_id.clone(),
                        index,
                        span: t.span.clone(),
                    });
                }
            }
        }
        ended
    }

    fn timer_mut(&mut self, id: NodeId, index: usize) -> Result<&mut StepTimer> {
        let node = self
            .dag
            .node_mut(id)
            .ok_or(StepGraphError::NodeNotFound(id))?;
        let step_id = node.label.step.id().to_string();
        node.label
            .step
            .timers_mut()
            .get_mut(index)
            .ok_or(StepGraphError::TimerNotFound {
                step: step_id,
                index,
            })
    }

    fn actionable_timer_mut(&mut self, id: NodeId, index: usize) -> Result<&mut StepTimer> {
        let node = self.dag.node(id).ok_or(StepGraphError::NodeNotFound(id))?;
        if !node.label.is_actionable() {
            return Err(StepGraphError::StepNotCompletable(
                node.label.step.id().to_string(),
            ));
        }
        self.timer_mut(id, index)
    }
}
