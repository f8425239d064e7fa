// src/parser/mod.rs

//! Text parsing helpers.
//!
//! - [`duration`] pulls cooking durations out of free-text step
//!   instructions and resolves them to seconds.

pub mod duration;

pub use duration::{
    DEFAULT_DURATION_SECS, parse_time_taken, parse_timer_durations, parse_to_time,
};
