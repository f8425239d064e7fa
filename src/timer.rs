// src/timer.rs

//! Countdown timer state machine.
//!
//! ```text
//! Pending --start--> Running --pause--> Paused
//!                    Running <--resume-- Paused
//!                    Running --tick to 0--> Ended
//! any --restart--> Pending (full duration)
//! ```
//!
//! The timer never measures time itself; an outside tick source calls
//! [`CountdownTimer::tick`] with the elapsed seconds.

use crate::errors::{Result, StepGraphError};

/// Longest allowed duration: one day minus one second.
pub const MAX_DURATION_SECS: u32 = 86_399;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Pending,
    Running,
    Paused,
    Ended,
}

/// Result of feeding elapsed time to a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; nothing changed.
    Idle,
    /// Timer is still counting down.
    Counting { remaining: u32 },
    /// Timer reached zero on this tick.
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    duration_seconds: u32,
    remaining: u32,
    status: TimerStatus,
    /// Set on the first successful `start`; never cleared.
    started_once: bool,
}

impl CountdownTimer {
    /// Create a pending timer, rejecting durations above [`MAX_DURATION_SECS`].
    pub fn new(duration_seconds: u32) -> Result<Self> {
        validate_duration(duration_seconds)?;
        Ok(Self::clamped(duration_seconds))
    }

    /// Create a pending timer, capping the duration at [`MAX_DURATION_SECS`].
    pub fn clamped(duration_seconds: u32) -> Self {
        let duration_seconds = duration_seconds.min(MAX_DURATION_SECS);
        Self {
            duration_seconds,
            remaining: duration_seconds,
            status: TimerStatus::Pending,
            started_once: false,
        }
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn has_started(&self) -> bool {
        self.started_once
    }

    /// Begin counting down. From `Paused` this behaves like [`Self::resume`].
    ///
    /// No-op when already running, ended, or the duration is zero.
    pub fn start(&mut self) -> bool {
        if self.duration_seconds == 0 {
            return false;
        }
        match self.status {
            TimerStatus::Pending | TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                self.started_once = true;
                true
            }
            TimerStatus::Running | TimerStatus::Ended => false,
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.status == TimerStatus::Running {
            self.status = TimerStatus::Paused;
            true
        } else {
            false
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.status == TimerStatus::Paused {
            self.status = TimerStatus::Running;
            true
        } else {
            false
        }
    }

    /// Back to `Pending` with the full duration. Does not start the timer.
    pub fn restart(&mut self) {
        self.remaining = self.duration_seconds;
        self.status = TimerStatus::Pending;
    }

    /// Count down by `elapsed_secs` if running.
    pub fn tick(&mut self, elapsed_secs: u32) -> TickOutcome {
        if self.status != TimerStatus::Running {
            return TickOutcome::Idle;
        }

        self.remaining = self.remaining.saturating_sub(elapsed_secs);
        if self.remaining == 0 {
            self.status = TimerStatus::Ended;
            TickOutcome::Ended
        } else {
            TickOutcome::Counting {
                remaining: self.remaining,
            }
        }
    }

    /// Change the duration of a timer that has never been started.
    pub fn update_default_time(&mut self, duration_seconds: u32) -> Result<()> {
        validate_duration(duration_seconds)?;
        if self.started_once {
            return Err(StepGraphError::InvalidDuration(
                "cannot change the duration of a timer that has been started".to_string(),
            ));
        }
        self.duration_seconds = duration_seconds;
        self.remaining = duration_seconds;
        Ok(())
    }
}

fn validate_duration(duration_seconds: u32) -> Result<()> {
    if duration_seconds > MAX_DURATION_SECS {
        return Err(StepGraphError::InvalidDuration(format!(
            "{duration_seconds}s is outside 0..={MAX_DURATION_SECS}s"
        )));
    }
    Ok(())
}
