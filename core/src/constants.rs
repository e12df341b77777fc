/// Size of one Cap'n Proto word in bytes.
pub const BYTES_PER_WORD: usize = 8;

/// Upper bound on segments in one message (matches the reference Cap'n Proto readers).
pub const MAX_SEGMENTS: usize = 512;

/// Defaults when `ReaderOptions` is not supplied.
pub const DEFAULT_TRAVERSAL_LIMIT_IN_WORDS: u64 = 8 * 1024 * 1024; // 64 MiB
pub const DEFAULT_NESTING_LIMIT: u32 = 64;

/// Frame union discriminants.
pub mod frame_tags {
    pub const AUDIO_FRAME: u16 = 0x0000;
    pub const VIDEO_FRAME: u16 = 0x0001;
}

/// Pixel format enumerants.
pub mod pixel_formats {
    pub const RGBA: u16 = 0x0000;
}
