// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use std::collections::HashSet;
use std::fmt::Write as _;

use tracing::{debug, info};

use crate::dag::NodeId;
use crate::engine::{Notification, SessionCommand, SessionOptions, StepKey};
use crate::errors::{Result, StepGraphError};
use crate::session::SessionRecipeStepGraph;
use crate::timer::TimerStatus;

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone, Default)]
pub struct CoreStep {
    /// What the IO shell should show, in order.
    pub notifications: Vec<Notification>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn continue_with(notifications: Vec<Notification>) -> Self {
        Self {
            notifications,
            keep_running: true,
        }
    }

    fn stop_with(notifications: Vec<Notification>) -> Self {
        Self {
            notifications,
            keep_running: false,
        }
    }

    fn rejected(err: impl ToString) -> Self {
        Self::continue_with(vec![Notification::Rejected {
            reason: err.to_string(),
        }])
    }
}

/// Handle one parsed command.
///
/// Graph and timer errors never escape: they become a
/// [`Notification::Rejected`] and the session keeps going.
pub fn handle_command(
    session: &mut SessionRecipeStepGraph,
    options: &SessionOptions,
    command: SessionCommand,
) -> CoreStep {
    debug!(?command, "handling session command");

    let result = match command {
        SessionCommand::Complete(step) => complete(session, options, &step),
        SessionCommand::Toggle(step) => toggle(session, options, &step),
        SessionCommand::StartTimer { step, index } => start_timer(session, &step, index),
        SessionCommand::PauseTimer { step, index } => {
            timer_transition(session, &step, index, TimerAction::Pause)
        }
        SessionCommand::ResumeTimer { step, index } => {
            timer_transition(session, &step, index, TimerAction::Resume)
        }
        SessionCommand::RestartTimer { step, index } => {
            timer_transition(session, &step, index, TimerAction::Restart)
        }
        SessionCommand::Reset => Ok(reset(session)),
        SessionCommand::Status => Ok(CoreStep::continue_with(vec![Notification::Status(
            render_status(session),
        )])),
        SessionCommand::Quit => {
            info!("quit requested");
            Ok(CoreStep::stop_with(Vec::new()))
        }
    };

    result.unwrap_or_else(|e| CoreStep::rejected(e))
}

/// Count every running timer down and report the ones that ended.
pub fn handle_tick(session: &mut SessionRecipeStepGraph, elapsed_secs: u32) -> CoreStep {
    let notifications = session
        .tick(elapsed_secs)
        .into_iter()
        .map(|ended| {
            info!(step = %ended.step_id, index = ended.index, text = %ended.span, "timer ended");
            Notification::TimerEnded {
                step: ended.step_id,
                index: ended.index,
                span: ended.span,
            }
        })
        .collect();
    CoreStep::continue_with(notifications)
}

fn complete(
    session: &mut SessionRecipeStepGraph,
    options: &SessionOptions,
    step: &str,
) -> Result<CoreStep> {
    let id = session.node_for_step(step)?;
    let node = session.node(id).ok_or(StepGraphError::NodeNotFound(id))?;
    if node.label.is_completed() {
        return Ok(CoreStep::rejected(format!("step '{step}' is already done")));
    }
    if !node.label.is_completable() {
        return Err(StepGraphError::StepNotCompletable(step.to_string()));
    }

    let before = Snapshot::take(session);
    session.complete_step(id)?;

    let mut notifications = vec![Notification::StepCompleted {
        step: step.to_string(),
    }];
    before.diff_into(session, &mut notifications);
    Ok(finish_or_continue(session, options, notifications))
}

fn toggle(
    session: &mut SessionRecipeStepGraph,
    options: &SessionOptions,
    step: &str,
) -> Result<CoreStep> {
    let id = session.node_for_step(step)?;
    // Reopening is always allowed; completing needs the step on the frontier.
    let node = session.node(id).ok_or(StepGraphError::NodeNotFound(id))?;
    if !node.label.is_completed() && !node.label.is_completable() {
        return Err(StepGraphError::StepNotCompletable(step.to_string()));
    }

    let before = Snapshot::take(session);
    let completed = session.toggle_step(id)?;

    let step = step.to_string();
    let mut notifications = vec![if completed {
        Notification::StepCompleted { step }
    } else {
        Notification::StepReopened { step }
    }];
    before.diff_into(session, &mut notifications);
    Ok(finish_or_continue(session, options, notifications))
}

fn reset(session: &mut SessionRecipeStepGraph) -> CoreStep {
    let before = Snapshot::take(session);
    session.reset_steps();

    let mut notifications = vec![Notification::SessionReset];
    before.diff_into(session, &mut notifications);
    CoreStep::continue_with(notifications)
}

fn start_timer(session: &mut SessionRecipeStepGraph, step: &str, index: usize) -> Result<CoreStep> {
    let id = session.node_for_step(step)?;
    if !session.start_timer(id, index)? {
        return Ok(CoreStep::rejected(format!(
            "timer {step}#{index} is already running, has ended, or has no duration"
        )));
    }

    let t = session.timer(id, index)?;
    Ok(CoreStep::continue_with(vec![Notification::TimerStarted {
        step: step.to_string(),
        index,
        span: t.span.clone(),
        remaining: t.timer.remaining(),
    }]))
}

#[derive(Debug, Clone, Copy)]
enum TimerAction {
    Pause,
    Resume,
    Restart,
}

impl TimerAction {
    fn verb(self) -> &'static str {
        match self {
            TimerAction::Pause => "pause",
            TimerAction::Resume => "resume",
            TimerAction::Restart => "restart",
        }
    }
}

fn timer_transition(
    session: &mut SessionRecipeStepGraph,
    step: &str,
    index: usize,
    action: TimerAction,
) -> Result<CoreStep> {
    let id = session.node_for_step(step)?;
    let step = step.to_string();

    let notification = match action {
        TimerAction::Pause => session
            .pause_timer(id, index)?
            .then_some(Notification::TimerPaused { step, index }),
        TimerAction::Resume => session
            .resume_timer(id, index)?
            .then_some(Notification::TimerResumed { step, index }),
        TimerAction::Restart => {
            session.restart_timer(id, index)?;
            Some(Notification::TimerRestarted { step, index })
        }
    };

    Ok(match notification {
        Some(n) => CoreStep::continue_with(vec![n]),
        None => CoreStep::rejected(format!(
            "timer #{index} cannot {} from its current state",
            action.verb()
        )),
    })
}

fn finish_or_continue(
    session: &SessionRecipeStepGraph,
    options: &SessionOptions,
    mut notifications: Vec<Notification>,
) -> CoreStep {
    if session.is_finished() {
        info!("every step completed");
        notifications.push(Notification::SessionFinished);
        if options.exit_when_finished {
            return CoreStep::stop_with(notifications);
        }
    }
    CoreStep::continue_with(notifications)
}

/// Frontier and running timers before a mutation, to report what changed.
struct Snapshot {
    frontier: Vec<NodeId>,
    running: HashSet<(NodeId, usize)>,
}

impl Snapshot {
    fn take(session: &SessionRecipeStepGraph) -> Self {
        Self {
            frontier: session.completable_nodes(),
            running: running_timers(session),
        }
    }

    fn diff_into(self, session: &SessionRecipeStepGraph, out: &mut Vec<Notification>) {
        let mut paused: Vec<(NodeId, usize)> = self
            .running
            .difference(&running_timers(session))
            .copied()
            .collect();
        paused.sort();
        for (id, index) in paused {
            out.push(Notification::TimerPaused {
                step: step_key(session, id),
                index,
            });
        }

        let frontier = session.completable_nodes();
        if frontier != self.frontier {
            out.push(Notification::FrontierChanged {
                steps: frontier.iter().map(|id| step_key(session, *id)).collect(),
            });
        }
    }
}

fn running_timers(session: &SessionRecipeStepGraph) -> HashSet<(NodeId, usize)> {
    session
        .dag()
        .nodes()
        .flat_map(|n| {
            let id = n.id();
            n.label
                .step
                .timers()
                .iter()
                .enumerate()
                .filter(|(_, t)| t.timer.is_running())
                .map(move |(index, _)| (id, index))
        })
        .collect()
}

fn step_key(session: &SessionRecipeStepGraph, id: NodeId) -> StepKey {
    session
        .node(id)
        .map(|n| n.label.step.id().to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Human-readable session overview: steps in topological order with their
/// state and timers.
pub fn render_status(session: &SessionRecipeStepGraph) -> String {
    let mut out = String::new();
    for id in session.topologically_sorted_nodes() {
        let Some(node) = session.node(id) else {
            continue;
        };
        let state = &node.label;
        let mark = if state.is_completed() {
            "[x]"
        } else if state.is_completable() {
            "[>]"
        } else {
            "[ ]"
        };
        let _ = writeln!(out, "{mark} {}: {}", state.step.id(), state.step.text());

        for (index, t) in state.step.timers().iter().enumerate() {
            let status = match t.timer.status() {
                TimerStatus::Pending => "pending",
                TimerStatus::Running => "running",
                TimerStatus::Paused => "paused",
                TimerStatus::Ended => "ended",
            };
            let _ = writeln!(
                out,
                "      #{index} \"{}\" {}s/{}s {status}",
                t.span,
                t.timer.remaining(),
                t.timer.duration_seconds()
            );
        }
    }
    out.trim_end().to_string()
}
