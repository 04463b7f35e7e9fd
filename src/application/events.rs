//! Event delivery from the worker thread to whoever started the run.
//!
//! Every notable occurrence is mirrored to the `log` facade and, when the
//! caller asked for it, pushed on a `crossbeam_channel` so a UI or console can
//! render it. The final `Finished` event is sent exactly once per run.

use crate::application::job_runner::JobState;
use chrono::{DateTime, Local};
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::Level;
use std::fmt;

/// One line of run output, or the end-of-run signal.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Log {
        level: Level,
        message: String,
        at: DateTime<Local>,
    },
    /// The worker left its loop in the given terminal state.
    Finished(JobState),
}

impl RunEvent {
    pub fn message(&self) -> Option<&str> {
        match self {
            RunEvent::Log { message, .. } => Some(message),
            RunEvent::Finished(_) => None,
        }
    }
}

impl fmt::Display for RunEvent {
    /// `[HH:MM:SS] message` for info lines, `[HH:MM:SS] LEVEL: message` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::Log { level, message, at } => {
                let stamp = at.format("[%H:%M:%S]");
                match level {
                    Level::Info | Level::Debug | Level::Trace => write!(f, "{} {}", stamp, message),
                    _ => write!(f, "{} {}: {}", stamp, level, message),
                }
            }
            RunEvent::Finished(state) => write!(f, "Run finished ({})", state),
        }
    }
}

/// Sink handed to the runner. Cloning shares the same channel.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<Sender<RunEvent>>,
}

impl EventSink {
    /// A sink that only writes to the `log` facade.
    pub fn log_only() -> Self {
        Self { tx: None }
    }

    /// A sink plus the receiving end for the caller.
    pub fn channel() -> (Self, Receiver<RunEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(Level::Info, message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.emit(Level::Warn, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(Level::Error, message.into());
    }

    pub(crate) fn finished(&self, state: JobState) {
        log::info!("Run finished ({})", state);
        self.send(RunEvent::Finished(state));
    }

    fn emit(&self, level: Level, message: String) {
        log::log!(level, "{}", message);
        self.send(RunEvent::Log {
            level,
            message,
            at: Local::now(),
        });
    }

    fn send(&self, event: RunEvent) {
        if let Some(tx) = &self.tx {
            // A caller that dropped its receiver no longer wants events.
            let _ = tx.send(event);
        }
    }
}
