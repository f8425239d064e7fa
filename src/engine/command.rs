// src/engine/command.rs

//! Text commands accepted by an interactive session.

use std::str::FromStr;

use crate::engine::StepKey;

/// A single user action on the session.
///
/// Timer indices are zero-based and default to the step's first timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// `done <step>`: mark the step completed.
    Complete(StepKey),
    /// `undo <step>` / `toggle <step>`: flip the step's completion.
    Toggle(StepKey),
    StartTimer { step: StepKey, index: usize },
    PauseTimer { step: StepKey, index: usize },
    ResumeTimer { step: StepKey, index: usize },
    RestartTimer { step: StepKey, index: usize },
    /// Clear all completion.
    Reset,
    Status,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| "empty command".to_string())?
            .to_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match verb.as_str() {
            "done" | "complete" => SessionCommand::Complete(single_step(&verb, &args)?),
            "undo" | "toggle" => SessionCommand::Toggle(single_step(&verb, &args)?),
            "start" => {
                let (step, index) = timer_target(&verb, &args)?;
                SessionCommand::StartTimer { step, index }
            }
            "pause" => {
                let (step, index) = timer_target(&verb, &args)?;
                SessionCommand::PauseTimer { step, index }
            }
            "resume" => {
                let (step, index) = timer_target(&verb, &args)?;
                SessionCommand::ResumeTimer { step, index }
            }
            "restart" => {
                let (step, index) = timer_target(&verb, &args)?;
                SessionCommand::RestartTimer { step, index }
            }
            "reset" => no_args(&verb, &args, SessionCommand::Reset)?,
            "status" | "ls" => no_args(&verb, &args, SessionCommand::Status)?,
            "quit" | "exit" | "q" => no_args(&verb, &args, SessionCommand::Quit)?,
            other => return Err(format!("unknown command '{other}'")),
        };

        Ok(command)
    }
}

fn single_step(verb: &str, args: &[&str]) -> Result<StepKey, String> {
    match args {
        [step] => Ok(step.to_string()),
        _ => Err(format!("usage: {verb} <step>")),
    }
}

fn timer_target(verb: &str, args: &[&str]) -> Result<(StepKey, usize), String> {
    match args {
        [step] => Ok((step.to_string(), 0)),
        [step, index] => {
            let index = index
                .trim_start_matches('#')
                .parse::<usize>()
                .map_err(|e| format!("invalid timer index '{index}': {e}"))?;
            Ok((step.to_string(), index))
        }
        _ => Err(format!("usage: {verb} <step> [timer#]")),
    }
}

fn no_args(verb: &str, args: &[&str], command: SessionCommand) -> Result<SessionCommand, String> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(format!("'{verb}' takes no arguments"))
    }
}
