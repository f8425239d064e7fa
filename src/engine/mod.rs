// src/engine/mod.rs

//! Cooking-session engine.
//!
//! This module ties together:
//! - the session step graph (completion + frontier + timers)
//! - parsed user commands
//! - a periodic tick that drives running timers
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`]. Notifications leave the shell through a
//! [`NotificationSink`].

use std::fmt;

pub mod command;
pub mod core;
pub mod event_handlers;
pub mod runtime;
pub mod sink;

pub use command::SessionCommand;
pub use core::CoreRuntime;
pub use event_handlers::CoreStep;
pub use runtime::Runtime;
pub use sink::{NotificationSink, StdoutSink};

/// Canonical step key type used in commands and notifications.
pub type StepKey = String;

/// Options shared by the core and the async shell.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Seconds of countdown applied per tick.
    pub tick_seconds: u32,
    /// Stop once every step is completed.
    pub exit_when_finished: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_seconds: 1,
            exit_when_finished: true,
        }
    }
}

/// Events flowing into the runtime from stdin, the ticker and signals.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A parsed user command.
    Command(SessionCommand),
    /// A line of input that did not parse as a command.
    InvalidInput { line: String, reason: String },
    /// Periodic tick; running timers count down by `elapsed_secs`.
    Tick { elapsed_secs: u32 },
    /// The input stream ended.
    InputClosed,
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Something the UI layer should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    StepCompleted { step: StepKey },
    StepReopened { step: StepKey },
    /// The set of actionable steps changed.
    FrontierChanged { steps: Vec<StepKey> },
    TimerStarted { step: StepKey, index: usize, span: String, remaining: u32 },
    TimerPaused { step: StepKey, index: usize },
    TimerResumed { step: StepKey, index: usize },
    TimerRestarted { step: StepKey, index: usize },
    TimerEnded { step: StepKey, index: usize, span: String },
    SessionReset,
    SessionFinished,
    Status(String),
    Rejected { reason: String },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::StepCompleted { step } => write!(f, "done: {step}"),
            Notification::StepReopened { step } => write!(f, "reopened: {step}"),
            Notification::FrontierChanged { steps } if steps.is_empty() => {
                write!(f, "next: (nothing)")
            }
            Notification::FrontierChanged { steps } => write!(f, "next: {}", steps.join(", ")),
            Notification::TimerStarted {
                step,
                index,
                span,
                remaining,
            } => write!(f, "timer {step}#{index} started ({span}, {remaining}s left)"),
            Notification::TimerPaused { step, index } => write!(f, "timer {step}#{index} paused"),
            Notification::TimerResumed { step, index } => {
                write!(f, "timer {step}#{index} resumed")
            }
            Notification::TimerRestarted { step, index } => {
                write!(f, "timer {step}#{index} reset")
            }
            Notification::TimerEnded { step, index, span } => {
                write!(f, "timer {step}#{index} ended ({span})")
            }
            Notification::SessionReset => write!(f, "session reset"),
            Notification::SessionFinished => write!(f, "all steps done"),
            Notification::Status(text) => write!(f, "{text}"),
            Notification::Rejected { reason } => write!(f, "rejected: {reason}"),
        }
    }
}
