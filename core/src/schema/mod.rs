//! Frame container schema.
//!
//! Decoded, owned-by-value views of the records in `frames.capnp`. The
//! wire accessors live in `frames_capnp`; this module holds what callers
//! see after a record has been resolved.

pub mod types;

pub use types::{
    AudioFrame,
    FrameBody,
    FrameKind,
    PixelFormat,
    Rational,
    VideoFrame,
};
