// libpn532/src/session/mod.rs

/// Session construction.
pub mod builder;
/// Timing, page range and transport settings.
pub mod config;
/// Progress notifications.
pub mod events;
/// The `CardSession` handle and its operations.
pub mod handle;
/// Accumulation of page dumps.
pub mod pages;
/// Connection state machine.
pub mod state;

pub use builder::SessionBuilder;
pub use config::SessionConfig;
pub use events::{EventLevel, SessionEvent};
pub use handle::CardSession;
pub use pages::PageBuffer;
pub use state::ConnectionState;
