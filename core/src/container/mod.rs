//! Frame container decoder.
//!
//! Responsibilities:
//! - Open a serialized container and locate its frame list
//! - Report the frame count without touching any record
//! - Resolve records lazily, one at a time
//!
//! Non-responsibilities:
//! - Opening files
//! - Rendering payloads

pub mod types;
pub mod decode;
pub mod frame;

pub use types::ContainerError;
pub use decode::{FrameContainer, Frames};
pub use frame::Frame;
