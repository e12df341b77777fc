//! schema/types.rs
//! Record variants and field shapes of the frame container.
//!
//! Notes:
//! - The variant set is closed at compile time; tags outside it are kept
//!   as `Unknown(tag)` instead of failing the decode.
//! - Payload slices borrow from the container that produced them.

use std::fmt;

use serde::Serialize;

use crate::constants::{frame_tags, pixel_formats};
use crate::frames_capnp::video_frame;

/// Which variant of a frame is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FrameKind {
    Audio,
    Video,
    Unknown(u16),
}

impl FrameKind {
    /// Raw discriminant as stored on the wire.
    pub fn tag(self) -> u16 {
        match self {
            FrameKind::Audio => frame_tags::AUDIO_FRAME,
            FrameKind::Video => frame_tags::VIDEO_FRAME,
            FrameKind::Unknown(tag) => tag,
        }
    }

    /// Schema name of the variant.
    pub fn name(self) -> &'static str {
        match self {
            FrameKind::Audio => "audioFrame",
            FrameKind::Video => "videoFrame",
            FrameKind::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Unknown(tag) => write!(f, "unknown({tag})"),
            kind => f.write_str(kind.name()),
        }
    }
}

/// Presentation timestamp as a fraction.
///
/// `den == 0` is representable; the decoder never divides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rational {
    pub num: u32,
    pub den: u32,
}

impl Rational {
    pub const fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// `num / den`, or `None` for a zero denominator.
    pub fn to_f64(self) -> Option<f64> {
        if self.den == 0 {
            return None;
        }
        Some(self.num as f64 / self.den as f64)
    }
}

impl From<Rational> for (u32, u32) {
    fn from(r: Rational) -> Self {
        (r.num, r.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PixelFormat {
    Rgba,
    Unknown(u16),
}

impl PixelFormat {
    pub fn raw(self) -> u16 {
        match self {
            PixelFormat::Rgba => pixel_formats::RGBA,
            PixelFormat::Unknown(raw) => raw,
        }
    }
}

impl From<Result<video_frame::PixelFormat, capnp::NotInSchema>> for PixelFormat {
    fn from(wire: Result<video_frame::PixelFormat, capnp::NotInSchema>) -> Self {
        match wire {
            Ok(video_frame::PixelFormat::Rgba) => PixelFormat::Rgba,
            Err(capnp::NotInSchema(raw)) => PixelFormat::Unknown(raw),
        }
    }
}

/// Decoded `AudioFrame`. All accessors are infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFrame<'a> {
    pub(crate) num_samples: u32,
    pub(crate) channels: u16,
    pub(crate) stream_id: u32,
    pub(crate) pts: Rational,
    pub(crate) data: &'a [u8],
}

impl<'a> AudioFrame<'a> {
    pub fn num_samples(&self) -> u32 {
        self.num_samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn stream_id(&self) -> u32 {
        self.stream_id
    }

    pub fn pts(&self) -> Rational {
        self.pts
    }

    /// Raw payload; empty when the frame carries none.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// Decoded `VideoFrame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFrame<'a> {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) pixel_format: PixelFormat,
    pub(crate) stream_id: u32,
    pub(crate) pts: Rational,
    pub(crate) data: &'a [u8],
}

impl<'a> VideoFrame<'a> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    pub fn stream_id(&self) -> u32 {
        self.stream_id
    }

    pub fn pts(&self) -> Rational {
        self.pts
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// Fully resolved frame body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameBody<'a> {
    Audio(AudioFrame<'a>),
    Video(VideoFrame<'a>),
    Unknown(u16),
}

impl FrameBody<'_> {
    pub fn kind(&self) -> FrameKind {
        match self {
            FrameBody::Audio(_) => FrameKind::Audio,
            FrameBody::Video(_) => FrameKind::Video,
            FrameBody::Unknown(tag) => FrameKind::Unknown(*tag),
        }
    }

    /// Payload length in bytes (zero for unknown variants).
    pub fn payload_len(&self) -> usize {
        match self {
            FrameBody::Audio(a) => a.data.len(),
            FrameBody::Video(v) => v.data.len(),
            FrameBody::Unknown(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_back_to_tags() {
        assert_eq!(FrameKind::Audio.tag(), 0);
        assert_eq!(FrameKind::Video.tag(), 1);
        assert_eq!(FrameKind::Unknown(9).tag(), 9);
    }

    #[test]
    fn pixel_formats_outside_the_schema_are_kept() {
        assert_eq!(PixelFormat::from(Ok(video_frame::PixelFormat::Rgba)), PixelFormat::Rgba);
        assert_eq!(PixelFormat::from(Err(capnp::NotInSchema(42))), PixelFormat::Unknown(42));
        assert_eq!(PixelFormat::Unknown(42).raw(), 42);
    }

    #[test]
    fn zero_denominator_is_guarded() {
        assert_eq!(Rational::new(5, 0).to_f64(), None);
        assert_eq!(Rational::new(1, 4).to_f64(), Some(0.25));
    }

    #[test]
    fn display_forms() {
        assert_eq!(FrameKind::Audio.to_string(), "audioFrame");
        assert_eq!(FrameKind::Unknown(7).to_string(), "unknown(7)");
        assert_eq!(Rational::new(1, 30).to_string(), "1/30");
    }
}
