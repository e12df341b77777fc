//! Fixtures for the integration tests.
//!
//! Well-formed containers are encoded with `capnp::message::Builder`
//! through the `frames_capnp` builders, then framed by
//! `capnp::serialize`. Hand-assembled words are only used for inputs no
//! encoder would produce (bad pointers, corrupt segment tables).
//!
//! With the default allocator a small container lands in one segment, in
//! allocation order:
//!
//! ```text
//! word 0        root pointer -> word 1
//! word 1        Frames { frames } pointer -> word 2
//! word 2        composite tag (n elements, 1 data word, 1 pointer)
//! word 3 + 2i   Frame i data word (discriminant)
//! word 4 + 2i   Frame i body pointer
//! ...           bodies, payloads and pts structs
//! ```

#![allow(dead_code)]

use capnp::message::{AllocationStrategy, Allocator, Builder, HeapAllocator};
use frames_core::constants::frame_tags;
use frames_core::frames_capnp::{frames, video_frame};

// -----------------------------------------------------------------------------
// Encoded fixtures
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct AudioDef {
    pub num_samples: u32,
    pub channels: u16,
    pub stream_id: u32,
    pub pts: Option<(u32, u32)>,
    pub data: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default)]
pub struct VideoDef {
    pub width: u32,
    pub height: u32,
    /// Raw enumerant, so values newer than the schema can be written.
    pub pixel_format: u16,
    pub stream_id: u32,
    pub pts: Option<(u32, u32)>,
    pub data: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub enum FrameDef {
    Audio(AudioDef),
    Video(VideoDef),
    /// Audio tag with a null body pointer.
    EmptyAudio,
    /// Discriminant from a newer schema, no body.
    Unknown(u16),
}

pub fn audio(channels: u16, pts: (u32, u32), data: &[u8]) -> FrameDef {
    FrameDef::Audio(AudioDef {
        channels,
        pts: Some(pts),
        data: Some(data.to_vec()),
        ..Default::default()
    })
}

pub fn video(width: u32, height: u32, pts: (u32, u32), data: &[u8]) -> FrameDef {
    FrameDef::Video(VideoDef {
        width,
        height,
        pts: Some(pts),
        data: Some(data.to_vec()),
        ..Default::default()
    })
}

/// Fill `message` with a `Frames` root holding `defs`.
pub fn encode<A: Allocator>(message: &mut Builder<A>, defs: &[FrameDef]) {
    let root = message.init_root::<frames::Builder<'_>>();
    let mut list = root.init_frames(defs.len() as u32);

    for (i, def) in defs.iter().enumerate() {
        let mut frame = list.reborrow().get(i as u32);
        match def {
            FrameDef::Audio(a) => {
                let mut af = frame.init_audio_frame();
                af.set_num_samples(a.num_samples);
                af.set_channels(a.channels);
                af.set_stream_id(a.stream_id);
                if let Some(data) = &a.data {
                    af.set_data(data);
                }
                if let Some((num, den)) = a.pts {
                    let mut pts = af.init_pts();
                    pts.set_num(num);
                    pts.set_den(den);
                }
            }
            FrameDef::Video(v) => {
                let mut vf = frame.init_video_frame();
                vf.set_width(v.width);
                vf.set_height(v.height);
                vf.set_pixel_format_raw(v.pixel_format);
                vf.set_stream_id(v.stream_id);
                if let Some(data) = &v.data {
                    vf.set_data(data);
                }
                if let Some((num, den)) = v.pts {
                    let mut pts = vf.init_pts();
                    pts.set_num(num);
                    pts.set_den(den);
                }
            }
            FrameDef::EmptyAudio => frame.set_discriminant(frame_tags::AUDIO_FRAME),
            FrameDef::Unknown(tag) => frame.set_discriminant(*tag),
        }
    }
}

/// Serialized message holding `defs`, default allocator.
pub fn build(defs: &[FrameDef]) -> Vec<u8> {
    let mut message = Builder::new_default();
    encode(&mut message, defs);
    capnp::serialize::write_message_to_words(&message)
}

/// Serialized message whose segments hold at most `words` words each,
/// so struct and list pointers cross segments through far pointers.
pub fn build_fragmented(defs: &[FrameDef], words: u32) -> Vec<u8> {
    let allocator = HeapAllocator::new()
        .first_segment_words(words)
        .allocation_strategy(AllocationStrategy::FixedSize);
    let mut message = Builder::new(allocator);
    encode(&mut message, defs);
    capnp::serialize::write_message_to_words(&message)
}

/// Words of the single segment `build` would frame.
pub fn build_segment(defs: &[FrameDef]) -> Vec<u64> {
    let mut message = Builder::new_default();
    encode(&mut message, defs);
    let segments = message.get_segments_for_output();
    assert_eq!(segments.len(), 1, "fixture spilled into a second segment");
    segments[0]
        .chunks_exact(8)
        .map(|w| u64::from_le_bytes(w.try_into().unwrap()))
        .collect()
}

/// Word index of frame `i`'s body pointer in a `build_segment` layout.
pub fn body_pointer_word(i: usize) -> usize {
    4 + 2 * i
}

pub const RGBA: u16 = video_frame::PixelFormat::Rgba as u16;

// -----------------------------------------------------------------------------
// Hand-assembled words, for malformed input only
// -----------------------------------------------------------------------------

pub fn struct_ptr(at: usize, target: usize, data: u16, ptrs: u16) -> u64 {
    let off = target as i64 - at as i64 - 1;
    (((off as i32) << 2) as u32 as u64) | ((data as u64) << 32) | ((ptrs as u64) << 48)
}

pub fn list_ptr(at: usize, target: usize, size: u8, count: u32) -> u64 {
    let off = target as i64 - at as i64 - 1;
    (((off as i32) << 2) as u32 as u64) | 1 | ((size as u64) << 32) | ((count as u64) << 35)
}

pub fn composite_tag(count: u32, data: u16, ptrs: u16) -> u64 {
    ((count as u64) << 2) | ((data as u64) << 32) | ((ptrs as u64) << 48)
}

pub fn far_ptr(segment: u32, pad: u32, double: bool) -> u64 {
    ((pad as u64) << 3) | ((double as u64) << 2) | 2 | ((segment as u64) << 32)
}

/// Frame `segments` with a standard segment table.
pub fn serialize(segments: &[Vec<u64>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&((segments.len() - 1) as u32).to_le_bytes());
    for s in segments {
        out.extend_from_slice(&(s.len() as u32).to_le_bytes());
    }
    if out.len() % 8 != 0 {
        out.extend_from_slice(&[0u8; 4]);
    }
    for s in segments {
        for w in s {
            out.extend_from_slice(&w.to_le_bytes());
        }
    }
    out
}
