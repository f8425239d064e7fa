use std::sync::{Arc, Mutex};

use stepgraph::engine::{Notification, NotificationSink};
use stepgraph::errors::Result;

/// A sink that:
/// - records every notification it receives
/// - shares the record between clones, so a test can keep one clone while
///   the runtime owns the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    /// Notifications rendered the way the terminal shows them.
    pub fn lines(&self) -> Vec<String> {
        self.notifications().iter().map(|n| n.to_string()).collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, notification: Notification) -> Result<()> {
        self.seen.lock().unwrap().push(notification);
        Ok(())
    }
}
