//! Cap'n Proto wire layer.
//!
//! Responsibilities:
//! - Turn caller limits into `capnp` reader options
//! - Read one framed message from a stream or a shared buffer
//! - Wrap `capnp::Error` as the crate's `FormatError`
//!
//! Non-responsibilities:
//! - Pointer following (done by `capnp`)
//! - Schema knowledge (see `frames_capnp` and `schema`)
//! - Writing messages

pub mod types;
pub mod message;

pub use types::{FormatError, ReaderOptions};
pub use message::{buffer_segments, read_segments, size_in_words};
