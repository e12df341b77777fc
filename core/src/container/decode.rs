//! container/decode.rs
//!
//! Opening a frame container.
//!
//! Design notes:
//! - `open` validates only the global framing: segment table, root
//!   pointer and the frame list pointer. A corrupt header aborts the open
//!   and no partial container is returned.
//! - Records are not touched at open time. The count comes from the list
//!   pointer; tags and bodies are read on access.
//! - The traversal limit is spent by the open-time walk. Record access
//!   afterwards is O(1) per call and runs on an unmetered reader with the
//!   same nesting limit, so repeated reads never exhaust a budget.

use std::fmt;
use std::io::Read;

use bytes::Bytes;
use capnp::message::{Reader, ReaderSegments};
use capnp::serialize::{BufferSegments, OwnedSegments};
use tracing::{debug, warn};

use crate::container::frame::Frame;
use crate::container::types::ContainerError;
use crate::frames_capnp::{frame_list, frames};
use crate::telemetry::FrameCounters;
use crate::wire::{self, FormatError, ReaderOptions};

/// Decoded container: an immutable message plus the length of its frame list.
pub struct FrameContainer<S: ReaderSegments = OwnedSegments> {
    message: Reader<S>,
    count: u32,
    segments: usize,
    words: usize,
}

impl FrameContainer {
    /// Read one container from `source` with default limits.
    pub fn open<R: Read>(source: &mut R) -> Result<Self, FormatError> {
        Self::open_with_options(source, ReaderOptions::default())
    }

    pub fn open_with_options<R: Read>(source: &mut R, options: ReaderOptions) -> Result<Self, FormatError> {
        Self::from_segments(wire::read_segments(source, options)?, options)
    }
}

impl FrameContainer<BufferSegments<Bytes>> {
    /// Open an in-memory container without copying it.
    pub fn from_bytes(buf: impl Into<Bytes>, options: ReaderOptions) -> Result<Self, FormatError> {
        Self::from_segments(wire::buffer_segments(buf.into(), options)?, options)
    }
}

impl<S: ReaderSegments> FrameContainer<S> {
    /// Validate the root and frame list of an already framed message.
    pub fn from_segments(segments: S, options: ReaderOptions) -> Result<Self, FormatError> {
        let message = Reader::new(segments, options.into());
        let count = message.get_root::<frames::Reader<'_>>()?.get_frames()?.len();

        let segments = message.into_segments();
        let segment_count = segments.len();
        let words = wire::size_in_words(&segments);
        let message = Reader::new(segments, options.unmetered());

        debug!(frames = count, segments = segment_count, words, "opened frame container");

        Ok(Self {
            message,
            count,
            segments: segment_count,
            words,
        })
    }

    /// Number of frames. O(1).
    pub fn count(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn frame(&self, index: usize) -> Result<Frame<'_>, ContainerError> {
        let out_of_range = ContainerError::IndexOutOfRange { index, count: self.count() };
        let Ok(i) = u32::try_from(index) else {
            return Err(out_of_range);
        };
        let reader = self.list()?.try_get(i).ok_or(out_of_range)?;
        Ok(Frame::new(index, reader))
    }

    /// Frames in decode order.
    pub fn frames(&self) -> Result<Frames<'_>, FormatError> {
        Ok(Frames { list: self.list()?, next: 0 })
    }

    /// Walk every record once and count variants.
    ///
    /// Records whose body fails to resolve are counted as malformed; the
    /// walk continues past them.
    pub fn summary(&self) -> Result<FrameCounters, FormatError> {
        let mut counters = FrameCounters::default();
        for frame in self.frames()? {
            match frame.body() {
                Ok(body) => counters.add_frame(&body),
                Err(e) => {
                    warn!(index = frame.index(), error = %e, "frame body is malformed");
                    counters.add_malformed();
                }
            }
        }
        Ok(counters)
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Message size in words, segment table excluded.
    pub fn size_in_words(&self) -> usize {
        self.words
    }

    /// Re-derive the frame list. O(1); validated at open under the same
    /// nesting limit.
    fn list(&self) -> Result<frame_list::Reader<'_>, FormatError> {
        Ok(self.message.get_root::<frames::Reader<'_>>()?.get_frames()?)
    }
}

impl<S: ReaderSegments> fmt::Debug for FrameContainer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameContainer")
            .field("count", &self.count)
            .field("segments", &self.segments)
            .field("words", &self.words)
            .finish_non_exhaustive()
    }
}

/// Iterator over a container's frames, in order.
#[derive(Clone)]
pub struct Frames<'a> {
    list: frame_list::Reader<'a>,
    next: u32,
}

impl<'a> Iterator for Frames<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.list.try_get(self.next)?;
        let frame = Frame::new(self.next as usize, reader);
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.list.len() - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Frames<'_> {}
