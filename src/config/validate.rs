// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{RawRecipeFile, RecipeFile};
use crate::errors::{Result, StepGraphError};
use crate::timer::MAX_DURATION_SECS;

impl TryFrom<RawRecipeFile> for RecipeFile {
    type Error = StepGraphError;

    fn try_from(raw: RawRecipeFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_recipe(&raw)?;
        Ok(RecipeFile::new_unchecked(raw.recipe, raw.session, raw.step))
    }
}

fn validate_raw_recipe(cfg: &RawRecipeFile) -> Result<()> {
    ensure_has_steps(cfg)?;
    validate_session(cfg)?;
    validate_steps(cfg)?;
    validate_step_dependencies(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_steps(cfg: &RawRecipeFile) -> Result<()> {
    if cfg.step.is_empty() {
        return Err(StepGraphError::ConfigError(
            "recipe must contain at least one [[step]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_session(cfg: &RawRecipeFile) -> Result<()> {
    if cfg.session.tick_seconds == 0 {
        return Err(StepGraphError::ConfigError(
            "[session].tick_seconds must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_steps(cfg: &RawRecipeFile) -> Result<()> {
    let mut seen = HashSet::new();
    for step in cfg.step.iter() {
        if step.id.trim().is_empty() {
            return Err(StepGraphError::ConfigError(
                "every step needs a non-empty `id`".to_string(),
            ));
        }
        if !seen.insert(step.id.as_str()) {
            return Err(StepGraphError::ConfigError(format!(
                "duplicate step id '{}'",
                step.id
            )));
        }
        if step.text.trim().is_empty() {
            return Err(StepGraphError::ConfigError(format!(
                "step '{}' has empty `text`",
                step.id
            )));
        }
        if let Some(durations) = &step.timer_durations {
            if let Some(bad) = durations.iter().find(|d| **d > MAX_DURATION_SECS) {
                return Err(StepGraphError::ConfigError(format!(
                    "step '{}' has timer duration {}s above the {}s limit",
                    step.id, bad, MAX_DURATION_SECS
                )));
            }
        }
    }
    Ok(())
}

fn validate_step_dependencies(cfg: &RawRecipeFile) -> Result<()> {
    let ids: HashSet<&str> = cfg.step.iter().map(|s| s.id.as_str()).collect();
    for step in cfg.step.iter() {
        for dep in step.after.iter() {
            if !ids.contains(dep.as_str()) {
                return Err(StepGraphError::ConfigError(format!(
                    "step '{}' has unknown dependency '{}' in `after`",
                    step.id, dep
                )));
            }
            if dep == &step.id {
                return Err(StepGraphError::ConfigError(format!(
                    "step '{}' cannot depend on itself in `after`",
                    step.id
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawRecipeFile) -> Result<()> {
    // Edge direction: dep -> step, so `after = ["prep"]` on "sear" is
    // prep -> sear.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for step in cfg.step.iter() {
        graph.add_node(step.id.as_str());
    }

    for step in cfg.step.iter() {
        for dep in step.after.iter() {
            graph.add_edge(dep.as_str(), step.id.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(StepGraphError::ConfigError(format!(
            "cycle detected in recipe steps involving step '{}'",
            cycle.node_id()
        ))),
    }
}
