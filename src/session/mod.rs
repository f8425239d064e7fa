// src/session/mod.rs

//! Cooking-session state over a recipe's step graph.
//!
//! - [`step`] pairs each step with the timers parsed from its text and its
//!   completion flags.
//! - [`graph`] holds [`SessionRecipeStepGraph`], which recomputes the
//!   completable frontier after every toggle and gates timers on it.

pub mod graph;
pub mod step;

pub use graph::{SessionRecipeStepGraph, TimerEnded};
pub use step::{SessionRecipeStep, SessionRecipeStepNode, StepTimer};
