// libpn532/src/session/events.rs

use std::fmt;

use derive_more::Display;
use log::{error, info, warn};
use tokio::sync::broadcast;

/// Severity of a session event line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventLevel {
    /// Normal progress.
    #[display(fmt = "info")]
    Info,
    /// Recoverable trouble.
    #[display(fmt = "warn")]
    Warn,
    /// Operation failed.
    #[display(fmt = "error")]
    Error,
}

/// Human-readable status line for the UI. The text is meant to be shown
/// verbatim, never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionEvent {
    /// Severity.
    pub level: EventLevel,
    /// Human-readable text.
    pub message: String,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Broadcasts events and mirrors each one to the `log` facade.
#[derive(Debug, Clone)]
pub(crate) struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub(crate) fn emit(&self, level: EventLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            EventLevel::Info => info!("{}", message),
            EventLevel::Warn => warn!("{}", message),
            EventLevel::Error => error!("{}", message),
        }
        // No subscribers is fine.
        let _ = self.tx.send(SessionEvent { level, message });
    }

    pub(crate) fn info(&self, message: impl Into<String>) {
        self.emit(EventLevel::Info, message);
    }

    pub(crate) fn warn(&self, message: impl Into<String>) {
        self.emit(EventLevel::Warn, message);
    }

    pub(crate) fn error(&self, message: impl Into<String>) {
        self.emit(EventLevel::Error, message);
    }
}
