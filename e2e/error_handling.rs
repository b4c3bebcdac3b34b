//! E2E Test Suite 05: Error Handling
//!
//! Every precondition violation must surface as `InvalidArgument` without any
//! work being attempted; every corruption as `CorruptBlock`.  Also checks the
//! numeric codes and display strings the error type carries over from the
//! original interface.

extern crate lz32;

use lz32::{
    compress_bound, compress_fast, compress_with_level, decompress_safe, Lz32Error,
};

struct AlignedBuf {
    raw: Vec<u64>,
    len: usize,
}

impl AlignedBuf {
    fn new(len: usize) -> Self {
        Self {
            raw: vec![0u64; len.div_ceil(8)],
            len,
        }
    }

    fn as_slice(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.raw.as_ptr() as *const u8, self.len) }
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.raw.as_mut_ptr() as *mut u8, self.len) }
    }

    /// View of the same storage starting one byte in — guaranteed to violate
    /// the 4-byte alignment precondition.
    fn as_misaligned_mut(&mut self) -> &mut [u8] {
        let s = self.as_mut_slice();
        let len = s.len();
        unsafe { std::slice::from_raw_parts_mut(s.as_mut_ptr().add(1), len - 1) }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Compression preconditions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_empty_source_rejected() {
    let mut dst = AlignedBuf::new(64);
    assert_eq!(
        compress_fast(b"", dst.as_mut_slice()),
        Err(Lz32Error::InvalidArgument)
    );
}

#[test]
fn test_compress_tiny_destination_rejected() {
    // Anything that floors below one 16-byte unit is unusable.
    for cap in 0..16usize {
        let mut dst = AlignedBuf::new(cap);
        assert_eq!(
            compress_fast(b"hello world", dst.as_mut_slice()),
            Err(Lz32Error::InvalidArgument),
            "cap {cap}"
        );
    }
}

#[test]
fn test_compress_misaligned_destination_rejected() {
    let mut dst = AlignedBuf::new(65);
    assert_eq!(
        compress_fast(b"hello world", dst.as_misaligned_mut()),
        Err(Lz32Error::InvalidArgument)
    );
}

#[test]
fn test_compress_bad_level_rejected() {
    let mut dst = AlignedBuf::new(64);
    for level in [-3, 10, 42] {
        assert_eq!(
            compress_with_level(b"hello world", dst.as_mut_slice(), level),
            Err(Lz32Error::InvalidArgument),
            "level {level}"
        );
    }
    // Level 0 means "unset" and is accepted.
    assert!(compress_with_level(b"hello world", dst.as_mut_slice(), 0).is_ok());
}

#[test]
fn test_compress_bound_empty_rejected() {
    assert_eq!(compress_bound(0), Err(Lz32Error::InvalidArgument));
}

// ─────────────────────────────────────────────────────────────────────────────
// Decompression preconditions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decompress_source_not_unit_multiple_rejected() {
    let src = AlignedBuf::new(40);
    let mut out = [0u8; 16];
    assert_eq!(
        decompress_safe(src.as_slice(), &mut out),
        Err(Lz32Error::InvalidArgument)
    );
}

#[test]
fn test_decompress_source_too_short_rejected() {
    let src = AlignedBuf::new(0);
    let mut out = [0u8; 16];
    assert_eq!(
        decompress_safe(src.as_slice(), &mut out),
        Err(Lz32Error::InvalidArgument)
    );
}

#[test]
fn test_decompress_misaligned_source_rejected() {
    let mut src = AlignedBuf::new(33);
    let mut out = [0u8; 16];
    assert_eq!(
        decompress_safe(&src.as_misaligned_mut()[..32], &mut out),
        Err(Lz32Error::InvalidArgument)
    );
}

#[test]
fn test_decompress_empty_destination_rejected() {
    // The destination length is independent of the source length, but zero
    // is never valid.
    let src = AlignedBuf::new(16);
    let mut out = [0u8; 0];
    assert_eq!(
        decompress_safe(src.as_slice(), &mut out),
        Err(Lz32Error::InvalidArgument)
    );
}

#[test]
fn test_decompress_short_destination_accepted() {
    // A 16-byte raw block carrying one payload byte must decode into a
    // 1-byte destination even though src_len - 4 is far larger.
    let mut src = AlignedBuf::new(16);
    src.as_mut_slice()[0] = 0x42;
    let mut out = [0u8; 1];
    assert_eq!(decompress_safe(src.as_slice(), &mut out), Ok(1));
    assert_eq!(out[0], 0x42);
}

// ─────────────────────────────────────────────────────────────────────────────
// Error codes and messages
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_error_codes() {
    assert_eq!(Lz32Error::InvalidArgument.code(), 1);
    assert_eq!(Lz32Error::CorruptBlock.code(), 2);
    assert_eq!(Lz32Error::Unknown.code(), 15);
}

#[test]
fn test_error_display() {
    assert_eq!(Lz32Error::InvalidArgument.to_string(), "invalid argument");
    assert_eq!(Lz32Error::CorruptBlock.to_string(), "corrupt block");
    assert_eq!(Lz32Error::Unknown.to_string(), "unknown error");
}

#[test]
fn test_error_is_std_error() {
    fn takes_error<E: std::error::Error>(_: E) {}
    takes_error(Lz32Error::CorruptBlock);
}
