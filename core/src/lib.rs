//! frames-core
//!
//! Reader for Cap'n Proto encoded media frame containers.
//! Decode only: no I/O beyond the caller's `Read`. The `frames_capnp`
//! builders exist so fixtures and producers share one field layout.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;

// Wire layer
pub mod wire;

// Schema and decoding
pub mod frames_capnp;
pub mod schema;
pub mod container;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::container::{ContainerError, Frame, FrameContainer};
    pub use crate::schema::{AudioFrame, FrameBody, FrameKind, PixelFormat, Rational, VideoFrame};
    pub use crate::telemetry::FrameCounters;
    pub use crate::wire::{FormatError, ReaderOptions};
}
