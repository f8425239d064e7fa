// src/session/step.rs

//! Per-step session data: the step, its timers and its completion flags.

use tracing::warn;

use crate::parser::{parse_timer_durations, parse_to_time};
use crate::recipe::RecipeStep;
use crate::timer::CountdownTimer;

/// A timer attached to the span of step text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTimer {
    /// Matched substring, e.g. `"1–2 minutes"`.
    pub span: String,
    pub timer: CountdownTimer,
}

/// A recipe step paired with the timers derived from its text.
///
/// The pairing is fixed at construction; only timer state changes later.
#[derive(Debug, Clone)]
pub struct SessionRecipeStep {
    step: RecipeStep,
    timers: Vec<StepTimer>,
}

impl SessionRecipeStep {
    pub fn from_step(step: &RecipeStep) -> Self {
        let spans = parse_timer_durations(&step.text);

        let durations: Vec<u32> = match &step.timer_durations {
            Some(stored) if stored.len() == spans.len() => stored.clone(),
            Some(stored) => {
                warn!(
                    step = %step.id,
                    stored = stored.len(),
                    parsed = spans.len(),
                    "stored timer durations do not match step text; re-parsing"
                );
                spans.iter().map(|s| parse_to_time(s)).collect()
            }
            None => spans.iter().map(|s| parse_to_time(s)).collect(),
        };

        let timers = spans
            .into_iter()
            .zip(durations)
            .map(|(span, secs)| StepTimer {
                span,
                timer: CountdownTimer::clamped(secs),
            })
            .collect();

        Self {
            step: step.clone(),
            timers,
        }
    }

    pub fn step(&self) -> &RecipeStep {
        &self.step
    }

    pub fn id(&self) -> &str {
        &self.step.id
    }

    pub fn text(&self) -> &str {
        &self.step.text
    }

    pub fn timers(&self) -> &[StepTimer] {
        &self.timers
    }

    pub(crate) fn timers_mut(&mut self) -> &mut [StepTimer] {
        &mut self.timers
    }
}

/// Session state for one step node.
#[derive(Debug, Clone)]
pub struct SessionRecipeStepNode {
    pub step: SessionRecipeStep,
    pub(crate) is_completed: bool,
    pub(crate) is_completable: bool,
}

impl SessionRecipeStepNode {
    pub fn new(step: SessionRecipeStep) -> Self {
        Self {
            step,
            is_completed: false,
            is_completable: false,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn is_completable(&self) -> bool {
        self.is_completable
    }

    /// Completable and not yet done: the step is actionable right now.
    pub fn is_actionable(&self) -> bool {
        self.is_completable && !self.is_completed
    }
}
