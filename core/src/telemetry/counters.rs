//! telemetry/counters.rs
//! Per-variant counters collected while walking a container.
//!
//! Summary: one pass over the frame list, one `add_*` call per record.

use serde::Serialize;

use crate::schema::FrameBody;

/// Counts gathered over a container's records.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrameCounters {
    pub frames: u64,
    pub audio: u64,
    pub video: u64,
    pub unknown: u64,
    /// Records whose body pointers failed to resolve.
    pub malformed: u64,
    /// Audio and video payload bytes.
    pub payload_bytes: u64,
}

impl FrameCounters {
    /// Record one resolved frame.
    pub fn add_frame(&mut self, body: &FrameBody<'_>) {
        self.frames += 1;
        match body {
            FrameBody::Audio(_) => self.audio += 1,
            FrameBody::Video(_) => self.video += 1,
            FrameBody::Unknown(_) => self.unknown += 1,
        }
        self.payload_bytes += body.payload_len() as u64;
    }

    /// Record one frame whose body could not be decoded.
    pub fn add_malformed(&mut self) {
        self.frames += 1;
        self.malformed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_and_malformed_are_counted_separately() {
        let mut c = FrameCounters::default();
        c.add_frame(&FrameBody::Unknown(7));
        c.add_malformed();
        assert_eq!(c.frames, 2);
        assert_eq!(c.unknown, 1);
        assert_eq!(c.malformed, 1);
        assert_eq!(c.payload_bytes, 0);
    }
}
