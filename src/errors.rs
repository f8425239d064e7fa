// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::dag::NodeId;

#[derive(Error, Debug)]
pub enum StepGraphError {
    #[error("Edge would be a self loop on node {0}")]
    SelfLoop(NodeId),

    #[error("Edge {from} -> {to} would create a cycle")]
    CycleDetected { from: NodeId, to: NodeId },

    #[error("Node not found in graph: {0}")]
    NodeNotFound(NodeId),

    #[error("Session graph construction failed: {0}")]
    GraphConstructionFailed(String),

    #[error("Invalid timer duration: {0}")]
    InvalidDuration(String),

    #[error("Step not found: {0}")]
    StepNotFound(String),

    #[error("Step '{0}' is not completable yet")]
    StepNotCompletable(String),

    #[error("Step '{step}' has no timer #{index}")]
    TimerNotFound { step: String, index: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StepGraphError>;
