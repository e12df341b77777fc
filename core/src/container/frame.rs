//! container/frame.rs
//!
//! Lazy view of one record in the frame list.
//!
//! `Frame::new` reads the discriminant and nothing else. The union body is
//! only dereferenced by `as_audio`, `as_video` or `body`, and only the
//! active variant's fields are read. A `Frame` never changes after
//! construction, so every accessor is idempotent.

use std::fmt;

use crate::constants::frame_tags;
use crate::container::types::ContainerError;
use crate::frames_capnp::{audio_frame, frame, rational, video_frame};
use crate::schema::{AudioFrame, FrameBody, FrameKind, PixelFormat, Rational, VideoFrame};
use crate::wire::FormatError;

#[derive(Clone, Copy)]
pub struct Frame<'a> {
    index: usize,
    kind: FrameKind,
    reader: frame::Reader<'a>,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(index: usize, reader: frame::Reader<'a>) -> Self {
        let kind = match reader.get_discriminant() {
            frame_tags::AUDIO_FRAME => FrameKind::Audio,
            frame_tags::VIDEO_FRAME => FrameKind::Video,
            tag => FrameKind::Unknown(tag),
        };
        Self { index, kind, reader }
    }

    /// Position in the container.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn discriminant(&self) -> FrameKind {
        self.kind
    }

    pub fn as_audio(&self) -> Result<AudioFrame<'a>, ContainerError> {
        match self.reader.which() {
            Ok(frame::Which::AudioFrame(af)) => self.resolve(af.and_then(read_audio)),
            _ => Err(self.mismatch(FrameKind::Audio)),
        }
    }

    pub fn as_video(&self) -> Result<VideoFrame<'a>, ContainerError> {
        match self.reader.which() {
            Ok(frame::Which::VideoFrame(vf)) => self.resolve(vf.and_then(read_video)),
            _ => Err(self.mismatch(FrameKind::Video)),
        }
    }

    /// Resolve the active variant.
    pub fn body(&self) -> Result<FrameBody<'a>, ContainerError> {
        match self.reader.which() {
            Ok(frame::Which::AudioFrame(af)) => self.resolve(af.and_then(read_audio)).map(FrameBody::Audio),
            Ok(frame::Which::VideoFrame(vf)) => self.resolve(vf.and_then(read_video)).map(FrameBody::Video),
            Err(capnp::NotInSchema(tag)) => Ok(FrameBody::Unknown(tag)),
        }
    }

    fn mismatch(&self, expected: FrameKind) -> ContainerError {
        ContainerError::VariantMismatch {
            index: self.index,
            expected,
            actual: self.kind,
        }
    }

    fn resolve<T>(&self, body: capnp::Result<T>) -> Result<T, ContainerError> {
        body.map_err(|e| ContainerError::Record {
            index: self.index,
            source: FormatError::from(e),
        })
    }
}

impl fmt::Debug for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("index", &self.index)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

fn read_rational(r: rational::Reader<'_>) -> Rational {
    Rational {
        num: r.get_num(),
        den: r.get_den(),
    }
}

fn read_audio(r: audio_frame::Reader<'_>) -> capnp::Result<AudioFrame<'_>> {
    Ok(AudioFrame {
        num_samples: r.get_num_samples(),
        channels: r.get_channels(),
        stream_id: r.get_stream_id(),
        pts: read_rational(r.get_pts()?),
        data: r.get_data()?,
    })
}

fn read_video(r: video_frame::Reader<'_>) -> capnp::Result<VideoFrame<'_>> {
    Ok(VideoFrame {
        width: r.get_width(),
        height: r.get_height(),
        pixel_format: PixelFormat::from(r.get_pixel_format()),
        stream_id: r.get_stream_id(),
        pts: read_rational(r.get_pts()?),
        data: r.get_data()?,
    })
}
