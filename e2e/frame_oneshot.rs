//! E2E Test Suite 04: Framed Data Format
//!
//! Validates the lz32d frame: header/footer layout, size reporting from
//! metadata alone, checksum verification, and framed round-trips over both
//! engines.

extern crate lz32;

use lz32::{
    lz32d_compress_bound, lz32d_compress_fast, lz32d_compress_high, lz32d_decompress_safe,
    lz32d_decompress_size, Lz32Error,
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
}

fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut state = seed | 1;
    let mut out = Vec::with_capacity(len + 8);
    while out.len() < len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        out.extend_from_slice(&state.to_le_bytes());
    }
    out.truncate(len);
    out
}

fn compress_frame(data: &[u8], high: bool) -> AlignedBuf {
    let (accepted, bound) = lz32d_compress_bound(data.len()).unwrap();
    assert_eq!(accepted, data.len());

    let mut dst = AlignedBuf::new(bound);
    let (consumed, frame_len) = if high {
        lz32d_compress_high(data, dst.as_mut_slice()).unwrap()
    } else {
        lz32d_compress_fast(data, dst.as_mut_slice()).unwrap()
    };
    assert_eq!(consumed, data.len(), "bound-sized frame must cover the input");
    assert_eq!(frame_len % 16, 0);
    assert!(frame_len <= bound);
    dst.len = frame_len;
    dst
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_frame_roundtrip_both_engines() {
    let inputs: Vec<Vec<u8>> = vec![
        b"x".to_vec(),
        b"framed format smoke test, framed format smoke test".repeat(20),
        random_bytes(11, 700),
        vec![0u8; 5000],
    ];

    for data in &inputs {
        for high in [false, true] {
            let frame = compress_frame(data, high);

            let mut out = vec![0u8; data.len()];
            let n = lz32d_decompress_safe(frame.as_slice(), &mut out).unwrap();
            assert_eq!(n, data.len());
            assert_eq!(&out[..], &data[..], "high={high}");
        }
    }
}

#[test]
fn test_frame_trusting_decoder() {
    let data = b"trusted frame payload ".repeat(64);
    let frame = compress_frame(&data, false);

    let mut out = vec![0u8; data.len()];
    // SAFETY: the frame was produced by this crate's framed compressor.
    let n = unsafe { lz32::lz32d_decompress_fast(frame.as_slice(), &mut out) }.unwrap();
    assert_eq!(n, data.len());
    assert_eq!(&out[..], &data[..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Sizing from metadata
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decompress_size_reads_header_only() {
    let data = random_bytes(21, 2500);
    let frame = compress_frame(&data, false);

    let (frame_len, raw_len) = lz32d_decompress_size(frame.as_slice()).unwrap();
    assert_eq!(frame_len, frame.as_slice().len());
    assert_eq!(raw_len, data.len());
}

#[test]
fn test_bound_layout() {
    // Block bound plus the 16 metadata bytes: ceil16(len + 20).
    for &(len, want) in &[(1usize, 32usize), (12, 32), (13, 48), (1000, 1024)] {
        let (_, bound) = lz32d_compress_bound(len).unwrap();
        assert_eq!(bound, want, "frame bound for {len}");
    }
    assert_eq!(lz32d_compress_bound(0), Err(Lz32Error::InvalidArgument));
}

// ─────────────────────────────────────────────────────────────────────────────
// Corruption and precondition handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_bad_magic_rejected() {
    let data = b"payload-payload-payload-payload!".repeat(8);
    let mut frame = compress_frame(&data, false);
    frame.as_mut_slice()[1] ^= 0x40;

    let mut out = vec![0u8; data.len()];
    assert_eq!(
        lz32d_decompress_safe(frame.as_slice(), &mut out),
        Err(Lz32Error::InvalidArgument)
    );
    assert_eq!(
        lz32d_decompress_size(frame.as_slice()),
        Err(Lz32Error::InvalidArgument)
    );
}

#[test]
fn test_checksum_mismatch_rejected() {
    // Flip one literal byte inside the inner block: the token stream still
    // decodes, but the payload checksum no longer matches.
    let data = b"checksummed payload, checksummed payload".repeat(16);
    let mut frame = compress_frame(&data, false);
    frame.as_mut_slice()[8] ^= 0x01;

    let mut out = vec![0u8; data.len()];
    assert_eq!(
        lz32d_decompress_safe(frame.as_slice(), &mut out),
        Err(Lz32Error::CorruptBlock)
    );
}

#[test]
fn test_zero_checksum_accepted() {
    // A zeroed checksum slot means "producer did not checksum" and must pass.
    let data = b"no checksum here".repeat(10);
    let mut frame = compress_frame(&data, false);
    let flen = frame.as_slice().len();
    frame.as_mut_slice()[flen - 4..flen].fill(0);

    let mut out = vec![0u8; data.len()];
    let n = lz32d_decompress_safe(frame.as_slice(), &mut out).unwrap();
    assert_eq!(n, data.len());
    assert_eq!(&out[..], &data[..]);
}

#[test]
fn test_destination_too_small_rejected() {
    let data = random_bytes(31, 400);
    let frame = compress_frame(&data, false);

    let mut out = vec![0u8; data.len() - 1];
    assert_eq!(
        lz32d_decompress_safe(frame.as_slice(), &mut out),
        Err(Lz32Error::InvalidArgument)
    );
}

#[test]
fn test_truncated_frame_rejected() {
    let data = random_bytes(41, 4000);
    let frame = compress_frame(&data, false);
    let flen = frame.as_slice().len();

    let mut out = vec![0u8; data.len()];
    assert_eq!(
        lz32d_decompress_safe(&frame.as_slice()[..flen - 16], &mut out),
        Err(Lz32Error::InvalidArgument)
    );
}
