//! Presentation of decoded frames: text and JSON.

use std::io::{self, Write};

use frames_core::prelude::*;
use serde::Serialize;

/// Whole-file report.
#[derive(Debug, Clone, Serialize)]
pub struct DumpReport {
    pub frames: usize,
    pub segments: usize,
    pub words: usize,
    pub summary: FrameCounters,
    pub records: Vec<FrameReport>,
}

/// One frame as shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub index: usize,
    pub kind: FrameKind,
    pub tag: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_samples: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_format: Option<PixelFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pts: Option<Rational>,
    /// `None` when the denominator is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pts_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_hex: Option<String>,
    /// Per-record decode failure; siblings are unaffected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// `capnp` error kind behind `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl FrameReport {
    fn new(index: usize, kind: FrameKind) -> Self {
        Self {
            index,
            kind,
            tag: kind.tag(),
            channels: None,
            num_samples: None,
            width: None,
            height: None,
            pixel_format: None,
            stream_id: None,
            pts: None,
            pts_seconds: None,
            data_len: None,
            data_hex: None,
            error: None,
            error_kind: None,
        }
    }
}

fn hex_prefix(data: &[u8], max_bytes: Option<usize>) -> String {
    match max_bytes {
        Some(max) if data.len() > max => format!("{}...", hex::encode(&data[..max])),
        _ => hex::encode(data),
    }
}

pub fn frame_report(frame: &Frame<'_>, max_bytes: Option<usize>) -> FrameReport {
    let mut report = FrameReport::new(frame.index(), frame.discriminant());

    match frame.body() {
        Ok(FrameBody::Audio(af)) => {
            report.channels = Some(af.channels());
            report.num_samples = Some(af.num_samples());
            report.stream_id = Some(af.stream_id());
            report.pts = Some(af.pts());
            report.pts_seconds = af.pts().to_f64();
            report.data_len = Some(af.data().len());
            report.data_hex = Some(hex_prefix(af.data(), max_bytes));
        }
        Ok(FrameBody::Video(vf)) => {
            report.width = Some(vf.width());
            report.height = Some(vf.height());
            report.pixel_format = Some(vf.pixel_format());
            report.stream_id = Some(vf.stream_id());
            report.pts = Some(vf.pts());
            report.pts_seconds = vf.pts().to_f64();
            report.data_len = Some(vf.data().len());
            report.data_hex = Some(hex_prefix(vf.data(), max_bytes));
        }
        Ok(FrameBody::Unknown(_)) => {}
        Err(e) => {
            report.error_kind = e.format_error().map(|f| format!("{:?}", f.kind()));
            report.error = Some(e.to_string());
        }
    }

    report
}

fn write_pts<W: Write>(out: &mut W, pts: Rational) -> io::Result<()> {
    match pts.to_f64() {
        Some(seconds) => writeln!(out, "  pts: {pts} ({seconds:.6}s)"),
        None => writeln!(out, "  pts: {pts} (zero denominator)"),
    }
}

pub fn write_frame<W: Write>(out: &mut W, r: &FrameReport) -> io::Result<()> {
    match r.kind {
        FrameKind::Unknown(tag) => writeln!(out, "frame {}: unknown frame type (tag {tag})", r.index)?,
        kind => writeln!(out, "frame {}: {kind}", r.index)?,
    }

    if let Some(err) = &r.error {
        writeln!(out, "  error: {err}")?;
        return Ok(());
    }

    if let Some(channels) = r.channels {
        writeln!(out, "  channels: {channels}")?;
    }
    if let (Some(w), Some(h)) = (r.width, r.height) {
        writeln!(out, "  size: {w}x{h}")?;
    }
    if let Some(format) = r.pixel_format {
        writeln!(out, "  pixel format: {format:?}")?;
    }
    if let Some(stream_id) = r.stream_id {
        writeln!(out, "  stream id: {stream_id}")?;
    }
    if let Some(pts) = r.pts {
        write_pts(out, pts)?;
    }
    if let (Some(len), Some(hex)) = (r.data_len, &r.data_hex) {
        writeln!(out, "  data ({len} bytes): {hex}")?;
    }
    Ok(())
}

pub fn write_text<W: Write>(out: &mut W, report: &DumpReport) -> io::Result<()> {
    writeln!(out, "number of frames: {}", report.frames)?;
    for r in &report.records {
        write_frame(out, r)?;
    }
    let s = &report.summary;
    if s.frames > 0 {
        writeln!(
            out,
            "summary: {} audio, {} video, {} unknown, {} malformed, {} payload bytes",
            s.audio, s.video, s.unknown, s.malformed, s.payload_bytes
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use capnp::message::Builder;
    use frames_core::frames_capnp::{audio_frame, frames};

    use super::*;

    /// One frame built by the capnp encoder; `fill` sets its body.
    fn encoded(fill: impl FnOnce(frames_core::frames_capnp::frame::Builder<'_>)) -> Vec<u8> {
        let mut message = Builder::new_default();
        let list = message.init_root::<frames::Builder<'_>>().init_frames(1);
        fill(list.get(0));
        capnp::serialize::write_message_to_words(&message)
    }

    fn audio(pts: (u32, u32)) -> Vec<u8> {
        encoded(|frame| {
            let mut af: audio_frame::Builder<'_> = frame.init_audio_frame();
            af.set_channels(2);
            af.set_data(&[0xDE, 0xAD, 0xBE, 0xEF]);
            let mut r = af.init_pts();
            r.set_num(pts.0);
            r.set_den(pts.1);
        })
    }

    fn report_of(wire: Vec<u8>) -> FrameReport {
        let c = FrameContainer::from_bytes(wire, ReaderOptions::default()).unwrap();
        frame_report(&c.frame(0).unwrap(), None)
    }

    fn text_of(r: &FrameReport) -> String {
        let mut out = Vec::new();
        write_frame(&mut out, r).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn audio_report_and_text() {
        let r = report_of(audio((1, 30)));
        assert_eq!(r.kind, FrameKind::Audio);
        assert_eq!(r.channels, Some(2));
        assert_eq!(r.pts, Some(Rational::new(1, 30)));
        assert_eq!(r.data_hex.as_deref(), Some("deadbeef"));

        let text = text_of(&r);
        assert!(text.contains("frame 0: audioFrame"));
        assert!(text.contains("channels: 2"));
        assert!(text.contains("pts: 1/30 (0.033333s)"));
        assert!(text.contains("data (4 bytes): deadbeef"));
    }

    #[test]
    fn zero_denominator_is_not_divided() {
        let r = report_of(audio((5, 0)));
        assert_eq!(r.pts, Some(Rational::new(5, 0)));
        assert_eq!(r.pts_seconds, None);
        assert!(text_of(&r).contains("5/0 (zero denominator)"));
    }

    #[test]
    fn unknown_tag_report() {
        let r = report_of(encoded(|mut frame| frame.set_discriminant(9)));
        assert_eq!(r.kind, FrameKind::Unknown(9));
        assert_eq!(r.tag, 9);
        assert!(r.data_hex.is_none());
        assert!(r.error.is_none());
        assert_eq!(text_of(&r), "frame 0: unknown frame type (tag 9)\n");

        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["kind"], serde_json::json!({ "unknown": 9 }));
    }

    #[test]
    fn known_kind_is_named_in_json() {
        let json = serde_json::to_value(report_of(audio((1, 30)))).unwrap();
        assert_eq!(json["kind"], "audio");
        assert_eq!(json["tag"], 0);
    }

    #[test]
    fn corrupt_body_is_reported() {
        let mut wire = audio((1, 30));
        // frame 0 body pointer: table (8 bytes) + word 4; offset 256 words, past the segment
        wire[40..48].copy_from_slice(&0x0002_0002_0000_0400u64.to_le_bytes());
        let r = report_of(wire);

        assert_eq!(r.kind, FrameKind::Audio);
        assert!(r.error.as_deref().is_some_and(|e| e.starts_with("frame 0 is malformed")));
        assert_eq!(r.error_kind.as_deref(), Some("MessageContainsOutOfBoundsPointer"));
        assert!(text_of(&r).contains("  error: frame 0 is malformed"));
    }

    #[test]
    fn hex_is_truncated_on_request() {
        assert_eq!(hex_prefix(&[1, 2, 3], Some(2)), "0102...");
        assert_eq!(hex_prefix(&[1, 2, 3], Some(3)), "010203");
        assert_eq!(hex_prefix(&[1, 2, 3], None), "010203");
    }
}
