// libpn532/src/protocol/mod.rs

/// Length and data checksums.
pub mod checksum;
/// Incremental decoding of ACK, NACK and data frames.
pub mod codec;
/// Host-to-reader command encoders.
pub mod commands;
/// Normal information frame.
pub mod frame;
/// One-shot frame parsing.
pub mod parser;
/// Reader-to-host response decoders.
pub mod responses;

pub use checksum::{dcs, lcs};
pub use codec::{FrameReader, Message};
pub use commands::{Command, CommandBuilder};
pub use frame::Frame;
pub use responses::Response;
