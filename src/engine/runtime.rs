// src/engine/runtime.rs

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::errors::Result;

use super::core::CoreRuntime;
use super::sink::NotificationSink;
use super::RuntimeEvent;

/// Drives a cooking session in response to `RuntimeEvent`s and a periodic
/// tick, and hands notifications to a `NotificationSink`.
///
/// This is a pure IO shell around `CoreRuntime`, which contains all the
/// session semantics. Dropping the runtime drops the session, its timers and
/// the tick interval together.
pub struct Runtime<S: NotificationSink> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    sink: S,
    tick_period: Duration,
}

impl<S: NotificationSink> fmt::Debug for Runtime<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("tick_period", &self.tick_period)
            .finish_non_exhaustive()
    }
}

impl<S: NotificationSink> Runtime<S> {
    /// Tick period defaults to `tick_seconds` of wall-clock time.
    pub fn new(core: CoreRuntime, event_rx: mpsc::Receiver<RuntimeEvent>, sink: S) -> Self {
        let tick_period = Duration::from_secs(u64::from(core.options().tick_seconds.max(1)));
        Self {
            core,
            event_rx,
            sink,
            tick_period,
        }
    }

    /// Override the wall-clock tick period (the countdown per tick stays
    /// `tick_seconds`).
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Main event loop.
    ///
    /// - Emits the opening frontier.
    /// - Consumes `RuntimeEvent`s from `event_rx` and ticks from the interval.
    /// - Feeds them into the core runtime and forwards notifications.
    ///
    /// Returns the core so callers can inspect the final session state.
    pub async fn run(mut self) -> Result<CoreRuntime> {
        info!(steps = self.core.session().dag().node_count(), "session started");

        for notification in self.core.opening() {
            self.sink.notify(notification)?;
        }

        let elapsed_secs = self.core.options().tick_seconds;
        let mut ticker = tokio::time::interval(self.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            let event = tokio::select! {
                maybe = self.event_rx.recv() => match maybe {
                    Some(e) => e,
                    None => {
                        info!("runtime event channel closed; exiting");
                        break;
                    }
                },
                _ = ticker.tick() => RuntimeEvent::Tick { elapsed_secs },
            };

            if !matches!(event, RuntimeEvent::Tick { .. }) {
                debug!(?event, "runtime received event");
            }

            let step = self.core.step(event);
            for notification in step.notifications {
                self.sink.notify(notification)?;
            }

            if !step.keep_running {
                info!("core requested exit; stopping session");
                break;
            }
        }

        info!("session ended");
        Ok(self.core)
    }
}
