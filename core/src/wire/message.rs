//! wire/message.rs
//!
//! Standard Cap'n Proto stream framing, read through `capnp::serialize`.
//!
//! ```text
//! u32          segment_count - 1
//! u32 * count  segment sizes in words
//! [u32]        padding when count is even (keeps segments word aligned)
//! segments     concatenated, each size * 8 bytes
//! ```

use std::io::Read;

use bytes::Bytes;
use capnp::message::ReaderSegments;
use capnp::serialize::{self, BufferSegments, OwnedSegments};

use crate::constants::BYTES_PER_WORD;
use crate::wire::types::{FormatError, ReaderOptions};

/// Read exactly one message from `source`.
///
/// The segment table is checked against the traversal limit before any
/// body bytes are allocated. The source is left positioned directly after
/// the message.
pub fn read_segments<R: Read>(source: R, options: ReaderOptions) -> Result<OwnedSegments, FormatError> {
    Ok(serialize::read_message(source, options.into())?.into_segments())
}

/// Use an in-memory message without copying it. Bytes past the end of the
/// message are ignored.
pub fn buffer_segments(buf: Bytes, options: ReaderOptions) -> Result<BufferSegments<Bytes>, FormatError> {
    let options = options.into();
    // The flat-slice reader reports short input as an error; BufferSegments
    // alone treats it as a bug.
    serialize::read_message_from_flat_slice(&mut &buf[..], options)?;
    Ok(BufferSegments::new(buf, options)?)
}

/// Message size in words, segment table excluded.
pub fn size_in_words<S: ReaderSegments>(segments: &S) -> usize {
    (0..segments.len())
        .filter_map(|i| u32::try_from(i).ok().and_then(|i| segments.get_segment(i)))
        .map(|seg| seg.len() / BYTES_PER_WORD)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_word_message() -> Vec<u8> {
        // one segment of one word: a null root pointer
        vec![0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    }

    #[test]
    fn buffer_and_stream_agree() {
        let wire = one_word_message();
        let owned = read_segments(wire.as_slice(), ReaderOptions::default()).unwrap();
        let mapped = buffer_segments(Bytes::from(wire), ReaderOptions::default()).unwrap();

        assert_eq!(ReaderSegments::len(&owned), 1);
        assert_eq!(ReaderSegments::len(&mapped), 1);
        assert_eq!(size_in_words(&owned), 1);
        assert_eq!(size_in_words(&mapped), 1);
    }

    #[test]
    fn short_buffer_is_an_error_not_a_panic() {
        let mut wire = one_word_message();
        wire.truncate(12);
        let err = buffer_segments(Bytes::from(wire), ReaderOptions::default()).err().expect("expected an error");
        assert!(err.is_truncated());
    }
}
