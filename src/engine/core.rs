// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`RuntimeEvent`]s and produces:
//! - an updated session state
//! - a list of notifications for the IO shell to show
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for reading
//! stdin, generating ticks and handling Ctrl+C. The core is unit tested
//! without any Tokio, channels or terminal IO.

use tracing::{debug, info};

use crate::engine::event_handlers::{CoreStep, handle_command, handle_tick};
use crate::engine::{Notification, RuntimeEvent, SessionOptions};
use crate::session::SessionRecipeStepGraph;

/// Pure core runtime state: the session graph plus options.
#[derive(Debug)]
pub struct CoreRuntime {
    session: SessionRecipeStepGraph,
    options: SessionOptions,
}

impl CoreRuntime {
    pub fn new(session: SessionRecipeStepGraph, options: SessionOptions) -> Self {
        Self { session, options }
    }

    pub fn session(&self) -> &SessionRecipeStepGraph {
        &self.session
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Notifications to show before the first event: the opening frontier.
    pub fn opening(&self) -> Vec<Notification> {
        let steps = self
            .session
            .completable_nodes()
            .into_iter()
            .filter_map(|id| self.session.node(id))
            .map(|n| n.label.step.id().to_string())
            .collect();
        vec![Notification::FrontierChanged { steps }]
    }

    /// Handle a single runtime event, updating the session and returning
    /// what the IO shell should do next.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::Command(command) => {
                handle_command(&mut self.session, &self.options, command)
            }
            RuntimeEvent::InvalidInput { line, reason } => {
                debug!(%line, %reason, "ignoring invalid input");
                CoreStep {
                    notifications: vec![Notification::Rejected { reason }],
                    keep_running: true,
                }
            }
            RuntimeEvent::Tick { elapsed_secs } => handle_tick(&mut self.session, elapsed_secs),
            RuntimeEvent::InputClosed => {
                info!("input closed; ending session");
                CoreStep {
                    notifications: Vec::new(),
                    keep_running: false,
                }
            }
            RuntimeEvent::ShutdownRequested => CoreStep {
                notifications: Vec::new(),
                keep_running: false,
            },
        }
    }
}
