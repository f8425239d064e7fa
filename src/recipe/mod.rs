// src/recipe/mod.rs

//! Recipe steps and the recipe-level step graph.

use std::collections::HashMap;

use tracing::debug;

use crate::config::model::RecipeFile;
use crate::dag::{DirectedAcyclicGraph, Edge, Node, NodeId, Position};
use crate::errors::{Result, StepGraphError};
use crate::parser::{parse_time_taken, parse_timer_durations};

/// One recipe step as authored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeStep {
    /// Recipe-level key, stable across loads (e.g. `"sear"`).
    pub id: String,
    /// Free-text instruction.
    pub text: String,
    /// Durations stored alongside the step, if any.
    ///
    /// When their count matches the spans found in `text` they replace the
    /// parsed values; otherwise the text is parsed again.
    pub timer_durations: Option<Vec<u32>>,
}

impl RecipeStep {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            timer_durations: None,
        }
    }

    pub fn with_timer_durations(mut self, durations: Vec<u32>) -> Self {
        self.timer_durations = Some(durations);
        self
    }
}

pub type RecipeStepNode = Node<RecipeStep>;

/// The dependency graph of a recipe's steps.
#[derive(Debug, Clone, Default)]
pub struct RecipeStepGraph {
    dag: DirectedAcyclicGraph<RecipeStep>,
    by_step_id: HashMap<String, NodeId>,
}

impl RecipeStepGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the step graph from a validated [`RecipeFile`].
    ///
    /// Steps are added in file order and each `after = [...]` entry becomes
    /// an edge from the dependency to the step. Layout positions are
    /// assigned from the resulting layers.
    pub fn from_recipe(recipe: &RecipeFile) -> Result<Self> {
        let mut graph = Self::new();

        for step in recipe.steps() {
            let mut recipe_step = RecipeStep::new(step.id.clone(), step.text.clone());
            recipe_step.timer_durations = step.timer_durations.clone();
            graph.add_step(recipe_step)?;
        }

        for step in recipe.steps() {
            for dep in &step.after {
                graph.add_dependency(dep, &step.id)?;
            }
        }

        graph.assign_layout_positions();
        debug!(
            steps = graph.dag.node_count(),
            edges = graph.dag.edge_count(),
            "built recipe step graph"
        );
        Ok(graph)
    }

    /// Add a step; step ids must be unique within the recipe.
    pub fn add_step(&mut self, step: RecipeStep) -> Result<NodeId> {
        if self.by_step_id.contains_key(&step.id) {
            return Err(StepGraphError::ConfigError(format!(
                "duplicate step id '{}'",
                step.id
            )));
        }
        let step_id = step.id.clone();
        let id = self.dag.add_node(Node::new(step));
        self.by_step_id.insert(step_id, id);
        Ok(id)
    }

    /// Remove a step and every dependency touching it.
    pub fn remove_step(&mut self, step_id: &str) -> Option<RecipeStepNode> {
        let id = self.by_step_id.remove(step_id)?;
        self.dag.remove_node(id)
    }

    /// Record that `step_id` waits for `depends_on`.
    pub fn add_dependency(&mut self, depends_on: &str, step_id: &str) -> Result<Edge> {
        let source = self.node_for_step(depends_on)?;
        let destination = self.node_for_step(step_id)?;
        self.dag.add_edge(source, destination)
    }

    pub fn node_for_step(&self, step_id: &str) -> Result<NodeId> {
        self.by_step_id
            .get(step_id)
            .copied()
            .ok_or_else(|| StepGraphError::StepNotFound(step_id.to_string()))
    }

    pub fn dag(&self) -> &DirectedAcyclicGraph<RecipeStep> {
        &self.dag
    }

    pub fn step(&self, id: NodeId) -> Option<&RecipeStep> {
        self.dag.node(id).map(|n| &n.label)
    }

    pub fn topologically_sorted_nodes(&self) -> Vec<NodeId> {
        self.dag.topologically_sorted_nodes()
    }

    pub fn node_layers(&self) -> Vec<Vec<NodeId>> {
        self.dag.node_layers()
    }

    /// Whether any step mentions a duration.
    pub fn has_timers(&self) -> bool {
        self.dag
            .nodes()
            .any(|n| !parse_timer_durations(&n.label.text).is_empty())
    }

    /// Sum of every duration mentioned across all steps, saturating.
    pub fn total_time_seconds(&self) -> u32 {
        self.dag
            .nodes()
            .map(|n| parse_time_taken(&n.label.text))
            .fold(0u32, u32::saturating_add)
    }

    /// Set each node's position hint: `x` is the index inside its layer and
    /// `y` is the layer.
    pub fn assign_layout_positions(&mut self) {
        for (layer, ids) in self.dag.node_layers().into_iter().enumerate() {
            for (column, id) in ids.into_iter().enumerate() {
                if let Some(node) = self.dag.node_mut(id) {
                    node.position = Some(Position::new(column as f64, layer as f64));
                }
            }
        }
    }
}
