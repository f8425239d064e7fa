// src/engine/sink.rs

//! Pluggable notification output.
//!
//! The runtime hands every [`Notification`] to a `NotificationSink` instead
//! of printing directly, so tests can record what a session showed.

use std::io::Write;

use crate::engine::Notification;
use crate::errors::Result;

/// Where session notifications go.
pub trait NotificationSink: Send {
    fn notify(&mut self, notification: Notification) -> Result<()>;
}

/// Production sink: one notification per line on stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl NotificationSink for StdoutSink {
    fn notify(&mut self, notification: Notification) -> Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{notification}")?;
        out.flush()?;
        Ok(())
    }
}
