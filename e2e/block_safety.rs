//! E2E Test Suite 02: Safe-Mode Robustness
//!
//! decompress_safe must reject every malformed source with a corrupt-block
//! error — wrong token invariants, literal runs that eat the token region,
//! match sources before the buffer start, outputs past the destination end,
//! missing raw tails — and must never panic or touch memory outside the two
//! buffers, whatever bytes are thrown at it.

extern crate lz32;

use lz32::{compress_fast, decompress_safe, Lz32Error};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

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

/// Build an aligned block of `len` bytes whose top token region is given
/// explicitly; the rest of the block is filled with `fill`.
fn block_with_tokens(len: usize, fill: u8, tokens_top_down: &[u32]) -> AlignedBuf {
    assert!(len % 16 == 0);
    let mut buf = AlignedBuf::new(len);
    for b in buf.as_mut_slice().iter_mut() {
        *b = fill;
    }
    // First element is the first token the decoder sees (highest address).
    let mut pos = len;
    for &tkn in tokens_top_down {
        pos -= 4;
        buf.as_mut_slice()[pos..pos + 4].copy_from_slice(&tkn.to_le_bytes());
    }
    buf
}

fn token(ll: u32, ml: u32, mo: u32) -> u32 {
    (mo << 16) | (ml << 8) | ll
}

fn xorshift(state: &mut u64) -> u64 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    *state
}

// ─────────────────────────────────────────────────────────────────────────────
// Token-invariant violations
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_short_match_with_offset_rejected() {
    // MO=2, ML=3 violates "MO != 0 => ML >= 5".
    let src = block_with_tokens(16, 0, &[token(0, 3, 2), 0]);
    let mut out = [0u8; 8];
    assert_eq!(
        decompress_safe(src.as_slice(), &mut out),
        Err(Lz32Error::CorruptBlock)
    );
}

#[test]
fn test_match_without_offset_rejected() {
    // MO=0, ML=7 violates "MO = 0 => ML = 0".
    let src = block_with_tokens(16, 0, &[token(0, 7, 0), 0]);
    let mut out = [0u8; 8];
    assert_eq!(
        decompress_safe(src.as_slice(), &mut out),
        Err(Lz32Error::CorruptBlock)
    );
}

#[test]
fn test_every_short_match_length_rejected() {
    for ml in 1..5u32 {
        for mo in [1u32, 2, 15, 16, 65535] {
            let src = block_with_tokens(32, 0, &[token(0, ml, mo), 0]);
            let mut out = [0u8; 16];
            assert_eq!(
                decompress_safe(src.as_slice(), &mut out),
                Err(Lz32Error::CorruptBlock),
                "ml={ml} mo={mo}"
            );
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Copy-overlap violations
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_literal_run_eating_token_region_rejected() {
    // LL=200 in a 16-byte block: only 12 bytes exist below the first token.
    let src = block_with_tokens(16, 0xAB, &[token(200, 0, 0), 0]);
    let mut out = [0u8; 255];
    assert_eq!(
        decompress_safe(src.as_slice(), &mut out),
        Err(Lz32Error::CorruptBlock)
    );
}

#[test]
fn test_match_before_output_start_rejected() {
    // First token wants to copy from 100 bytes before anything was written.
    let src = block_with_tokens(32, 0xCD, &[token(0, 5, 100), 0]);
    let mut out = [0u8; 16];
    assert_eq!(
        decompress_safe(src.as_slice(), &mut out),
        Err(Lz32Error::CorruptBlock)
    );
}

#[test]
fn test_output_overflow_rejected() {
    // 8 literals + 255 match bytes into a 16-byte destination.
    let src = block_with_tokens(48, 0x11, &[token(8, 255, 4), 0]);
    let mut out = [0u8; 16];
    assert_eq!(
        decompress_safe(src.as_slice(), &mut out),
        Err(Lz32Error::CorruptBlock)
    );
}

#[test]
fn test_missing_raw_tail_rejected() {
    // A raw block holding 12 payload bytes cannot fill a 13-byte destination.
    let src = block_with_tokens(16, 0x77, &[0]);
    let mut out = [0u8; 13];
    assert_eq!(
        decompress_safe(src.as_slice(), &mut out),
        Err(Lz32Error::CorruptBlock)
    );
    // 12 bytes is exactly what the block carries.
    let mut out = [0u8; 12];
    assert_eq!(decompress_safe(src.as_slice(), &mut out), Ok(12));
    assert_eq!(out, [0x77u8; 12]);
}

#[test]
fn test_endless_token_chain_rejected() {
    // Plausible-looking tokens all the way down: the decoder must stop with
    // an error once literals + token reads exhaust the region, not run off
    // the front of the block.
    let tokens: Vec<u32> = std::iter::repeat(token(8, 0, 0)).take(16).collect();
    let src = block_with_tokens(64, 0x3C, &tokens);
    let mut out = [0u8; 256];
    assert_eq!(
        decompress_safe(src.as_slice(), &mut out),
        Err(Lz32Error::CorruptBlock)
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Truncation of valid streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_truncated_valid_block_never_panics() {
    let data: Vec<u8> = b"abcdefgh".repeat(200);
    let mut dst = AlignedBuf::new(1616);
    let (consumed, produced) = compress_fast(&data, dst.as_mut_slice()).unwrap();
    assert_eq!(consumed, data.len());

    // Chop 16 bytes at a time off the end; every prefix is still aligned and
    // 16-multiple, so it must parse or fail cleanly.
    let mut cut = produced;
    while cut >= 16 {
        let mut out = vec![0u8; consumed];
        let _ = decompress_safe(&dst.as_slice()[..cut], &mut out);
        cut -= 16;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Random garbage
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_random_blocks_never_panic() {
    let mut state = 0x1234_5678_9ABC_DEF0u64;

    for round in 0..512usize {
        let len = 16 * (1 + (xorshift(&mut state) as usize % 16));
        let mut src = AlignedBuf::new(len);
        for chunk in src.raw.iter_mut() {
            *chunk = xorshift(&mut state);
        }

        let dst_len = 1 + (xorshift(&mut state) as usize % 512);
        let mut out = vec![0u8; dst_len];

        // Any outcome is fine except a panic or an out-of-bounds access.
        match decompress_safe(src.as_slice(), &mut out) {
            Ok(n) => assert_eq!(n, dst_len, "round {round}"),
            Err(e) => assert_eq!(e, Lz32Error::CorruptBlock, "round {round}"),
        }
    }
}

#[test]
fn test_random_token_regions_never_panic() {
    // Valid-range garbage tokens over a zeroed literal area — exercises the
    // validation order rather than the decoder fast paths.
    let mut state = 0xFEED_FACE_CAFE_BEEFu64;

    for _ in 0..512usize {
        let ntok = 1 + (xorshift(&mut state) as usize % 8);
        let mut tokens = Vec::with_capacity(ntok + 1);
        for _ in 0..ntok {
            let r = xorshift(&mut state);
            tokens.push(token(
                (r & 0xFF) as u32,
                ((r >> 8) & 0xFF) as u32,
                ((r >> 16) & 0xFFFF) as u32,
            ));
        }
        tokens.push(0);

        let src = block_with_tokens(96, 0, &tokens);
        let mut out = vec![0u8; 300];
        let _ = decompress_safe(src.as_slice(), &mut out);
    }
}
