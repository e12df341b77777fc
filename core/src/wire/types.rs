//! wire/types.rs
//! Shared types for the Cap'n Proto wire layer.
//!
//! Notes:
//! - `ReaderOptions` is the caller-facing limit set; it converts into
//!   `capnp::message::ReaderOptions` at the point a message is read.
//! - Every structural failure is a `capnp::Error` underneath. `FormatError`
//!   keeps it whole and adds the questions callers actually ask.

use capnp::ErrorKind;
use thiserror::Error;

use crate::constants::{DEFAULT_NESTING_LIMIT, DEFAULT_TRAVERSAL_LIMIT_IN_WORDS};

/// Limits applied while reading a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Maximum words the open-time walk may visit, segment table excluded.
    /// A message larger than this is rejected before its body is read.
    pub traversal_limit_in_words: u64,
    /// Maximum depth of pointer dereferences from the root.
    pub nesting_limit: u32,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            traversal_limit_in_words: DEFAULT_TRAVERSAL_LIMIT_IN_WORDS,
            nesting_limit: DEFAULT_NESTING_LIMIT,
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn traversal_limit_in_words(mut self, words: u64) -> Self {
        self.traversal_limit_in_words = words;
        self
    }

    pub fn nesting_limit(mut self, depth: u32) -> Self {
        self.nesting_limit = depth;
        self
    }

    /// Same nesting limit, no traversal budget. Used once a message has
    /// been validated and is only read through O(1) record accessors.
    pub(crate) fn unmetered(self) -> capnp::message::ReaderOptions {
        let mut out: capnp::message::ReaderOptions = self.into();
        out.traversal_limit_in_words = None;
        out
    }
}

impl From<ReaderOptions> for capnp::message::ReaderOptions {
    fn from(options: ReaderOptions) -> Self {
        let mut out = capnp::message::ReaderOptions::new();
        out.traversal_limit_in_words(Some(usize::try_from(options.traversal_limit_in_words).unwrap_or(usize::MAX)))
            .nesting_limit(i32::try_from(options.nesting_limit).unwrap_or(i32::MAX));
        out
    }
}

/// Structural decode failure.
///
/// Raised for the whole message when the segment table, root pointer or
/// frame list is corrupt, and for a single record when only that record's
/// body is.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct FormatError {
    #[from]
    source: capnp::Error,
}

impl FormatError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind
    }

    pub fn as_capnp(&self) -> &capnp::Error {
        &self.source
    }

    /// The input ended before the message did.
    pub fn is_truncated(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::PrematureEndOfFile
                | ErrorKind::MessageEndsPrematurely(..)
                | ErrorKind::EmptySlice
                | ErrorKind::EmptyBuffer
                | ErrorKind::FailedToFillTheWholeBuffer
        )
    }

    /// A `ReaderOptions` limit was hit.
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MessageTooLarge(_)
                | ErrorKind::ReadLimitExceeded
                | ErrorKind::NestingLimitExceeded
                | ErrorKind::MessageIsTooDeeplyNested
                | ErrorKind::MessageIsTooDeeplyNestedOrContainsCycles
        )
    }
}

impl From<std::io::Error> for FormatError {
    fn from(e: std::io::Error) -> Self {
        Self { source: e.into() }
    }
}
