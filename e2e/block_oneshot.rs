//! E2E Test Suite 01: Block One-Shot API
//!
//! Validates the core lz32 block compression and decompression functions:
//! - compress_bound
//! - compress_fast / compress_high / compress_with_level
//! - decompress_safe / decompress_fast
//!
//! Covers round-trips over compressible, incompressible and RLE inputs, the
//! bidirectional block layout (literals up, tokens down, zero terminator),
//! the raw-fallback path, and partial consumption under a tight destination.

extern crate lz32;

use lz32::{compress_bound, compress_fast, compress_with_level, decompress_safe};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Destination/source buffer with the 4-byte alignment the block API demands
/// (backed by u64, so 8-byte aligned in practice).
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

/// Deterministic pseudo-random bytes (xorshift64).
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

/// Walk the token region of a produced block from its top, collecting
/// `(lit_len, mtc_len, mtc_off)` triples until the zero terminator.
fn scan_tokens(block: &[u8]) -> Vec<(usize, usize, usize)> {
    let mut tokens = Vec::new();
    let mut pos = block.len();
    loop {
        pos -= 4;
        let tkn = u32::from_le_bytes(block[pos..pos + 4].try_into().unwrap());
        if tkn == 0 {
            break;
        }
        tokens.push((
            (tkn & 0xFF) as usize,
            ((tkn >> 8) & 0xFF) as usize,
            (tkn >> 16) as usize,
        ));
    }
    tokens
}

/// Compress with a bound-sized destination, check the block invariants, and
/// decode the result back.  Returns the produced block for extra assertions.
fn roundtrip(data: &[u8], level: i32) -> Vec<u8> {
    let (accepted, bound) = compress_bound(data.len()).expect("bound");
    assert_eq!(accepted, data.len());

    let mut dst = AlignedBuf::new(bound);
    let (consumed, produced) =
        compress_with_level(data, dst.as_mut_slice(), level).expect("compression should succeed");

    assert_eq!(
        consumed,
        data.len(),
        "a bound-sized destination must consume the whole input"
    );
    assert!(produced <= bound, "produced {produced} exceeds bound {bound}");
    assert_eq!(produced % 16, 0, "blocks are 16-byte units");
    assert!(produced >= 16);

    let block = dst.as_slice()[..produced].to_vec();

    let mut out = vec![0u8; consumed];
    let n = decompress_safe(&dst.as_slice()[..produced], &mut out).expect("decompression");
    assert_eq!(n, consumed);
    assert_eq!(&out[..], data, "round-trip mismatch at level {level}");

    block
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: compress_bound basics
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_bound_covers_terminator_and_alignment() {
    for &(len, want) in &[(1usize, 16usize), (12, 16), (13, 32), (511, 528), (4096, 4112)] {
        let (accepted, bound) = compress_bound(len).unwrap();
        assert_eq!(accepted, len);
        assert_eq!(bound, want, "bound for {len}");
        assert_eq!(bound % 16, 0);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: round-trips across sizes and engines
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_typical_data_both_engines() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(40);
    for level in [1, 9] {
        let block = roundtrip(&original, level);
        assert!(
            block.len() < original.len(),
            "repetitive data should shrink at level {level}"
        );
    }
}

#[test]
fn test_roundtrip_size_sweep() {
    for &len in &[
        1usize, 2, 5, 15, 16, 17, 63, 64, 255, 256, 257, 511, 512, 513, 1000, 4095, 4096, 70000,
    ] {
        let data = random_bytes(len as u64 + 7, len);
        roundtrip(&data, 1);
        roundtrip(&data, 9);
    }
}

#[test]
fn test_roundtrip_structured_sweep() {
    // Period-p patterns exercise every small-offset expansion class.
    for &period in &[1usize, 2, 3, 4, 5, 7, 8, 11, 13, 15, 16, 31] {
        let pattern: Vec<u8> = (0..period).map(|i| (i * 37 + 11) as u8).collect();
        let data: Vec<u8> = pattern.iter().cycle().take(2000).copied().collect();
        for level in [1, 9] {
            let block = roundtrip(&data, level);
            assert!(
                block.len() < data.len() / 4,
                "period-{period} data should compress hard at level {level}"
            );
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: concrete scenario — single byte becomes a raw block
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_single_byte_raw_block() {
    let (_, bound) = compress_bound(1).unwrap();
    assert_eq!(bound, 16);

    let mut dst = AlignedBuf::new(16);
    let (consumed, produced) = compress_fast(b"A", dst.as_mut_slice()).unwrap();
    assert_eq!((consumed, produced), (1, 16));

    let block = dst.as_slice();
    assert_eq!(block[0], b'A');
    assert!(block[1..16].iter().all(|&b| b == 0), "zero padding + terminator");

    let mut out = [0u8; 1];
    assert_eq!(decompress_safe(block, &mut out), Ok(1));
    assert_eq!(&out, b"A");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: concrete scenario — RLE input produces MO=1 tokens
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_rle_produces_offset_one_match() {
    let data = vec![b'A'; 1024];
    let block = roundtrip(&data, 1);

    let tokens = scan_tokens(&block);
    assert!(
        tokens.iter().any(|&(_, ml, mo)| mo == 1 && ml == 255),
        "RLE input should emit a full-length offset-1 match, got {tokens:?}"
    );

    // Also check a 1000-byte single-byte run decodes byte-identically.
    let data = vec![0x5Au8; 1000];
    roundtrip(&data, 9);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: concrete scenario — match-free input falls back to a raw block
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_matchless_input_raw_fallback() {
    // 16-bit big-endian counters: no 5-byte window ever repeats, so no match
    // of length >= 5 exists and the token stream cannot pay for itself.
    let data: Vec<u8> = (0u16..=256).flat_map(|k| k.to_be_bytes()).take(513).collect();
    assert_eq!(data.len(), 513);

    let block = roundtrip(&data, 1);
    assert_eq!(block.len(), 528);
    assert_eq!(&block[..513], &data[..], "raw fallback carries input verbatim");
    assert!(block[513..].iter().all(|&b| b == 0));
    assert!(scan_tokens(&block).is_empty(), "raw block has no tokens");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: concrete scenario — doubled buffer yields long-range matches
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_doubled_buffer_long_range_match() {
    let half = random_bytes(42, 300);
    let mut data = half.clone();
    data.extend_from_slice(&half);

    let block = roundtrip(&data, 9);
    let tokens = scan_tokens(&block);
    assert!(
        tokens.iter().any(|&(_, ml, mo)| mo == 300 && ml == 255),
        "high engine should find the 300-byte-offset copy, got {tokens:?}"
    );
    // The duplicate continues past the full-length token with 45 bytes left;
    // the match scan stops 15 bytes short of the input end, so the follow-up
    // token covers 30 of them (the rest ride in the raw tail).
    assert!(
        tokens.iter().any(|&(_, ml, mo)| mo == 300 && ml == 30),
        "high engine should continue the offset-300 match, got {tokens:?}"
    );

    // The balanced engine must also round-trip (it may find a shorter chain).
    roundtrip(&data, 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: concrete scenario — terminator-only block with a gap payload
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_terminator_only_block_decodes_gap_byte() {
    let mut src = AlignedBuf::new(16);
    src.as_mut_slice()[0] = 0xFF;
    // Bytes 12..16 stay zero: the terminator is the only token.

    let mut out = [0u8; 1];
    assert_eq!(decompress_safe(src.as_slice(), &mut out), Ok(1));
    assert_eq!(out[0], 0xFF);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: forced literal flush (LL=255 tokens) on long matchless stretches
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_forced_literal_flush_token() {
    // 400 random bytes (two forced flushes), then a copy of the head so the
    // stream holds at least one real match and stays worth keeping.
    let head = random_bytes(99, 400);
    let mut data = head.clone();
    data.extend_from_slice(&head[..60]);

    let (_, bound) = compress_bound(data.len()).unwrap();
    let mut dst = AlignedBuf::new(bound);
    let (consumed, produced) = compress_fast(&data, dst.as_mut_slice()).unwrap();
    assert_eq!(consumed, data.len());

    let block = &dst.as_slice()[..produced];
    let mut out = vec![0u8; consumed];
    decompress_safe(block, &mut out).unwrap();
    assert_eq!(out, data);

    let tokens = scan_tokens(block);
    if !tokens.is_empty() {
        assert!(
            tokens.iter().any(|&(ll, ml, mo)| ll == 255 && ml == 0 && mo == 0),
            "a 400-byte literal stretch needs a forced flush token, got {tokens:?}"
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 9: partial consumption under a tight destination
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_tight_destination_consumes_prefix() {
    let data = random_bytes(7, 1000);

    for &cap in &[16usize, 64, 256, 512] {
        let mut dst = AlignedBuf::new(cap);
        let (consumed, produced) = compress_fast(&data, dst.as_mut_slice()).unwrap();

        assert!(consumed >= 1);
        assert!(consumed <= data.len());
        assert!(produced <= cap);
        assert_eq!(produced % 16, 0);

        let mut out = vec![0u8; consumed];
        let n = decompress_safe(&dst.as_slice()[..produced], &mut out).unwrap();
        assert_eq!(n, consumed);
        assert_eq!(&out[..], &data[..consumed], "prefix round-trip at cap {cap}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 10: cross-engine / cross-decoder compatibility
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_either_decoder_accepts_either_engine() {
    let data = {
        let mut d = b"compressible-compressible-compressible-".repeat(30);
        d.extend_from_slice(&random_bytes(3, 500));
        d
    };
    let (_, bound) = compress_bound(data.len()).unwrap();

    for level in [1, 9] {
        let mut dst = AlignedBuf::new(bound);
        let (consumed, produced) =
            compress_with_level(&data, dst.as_mut_slice(), level).unwrap();
        assert_eq!(consumed, data.len());
        let block = &dst.as_slice()[..produced];

        let mut safe_out = vec![0u8; consumed];
        decompress_safe(block, &mut safe_out).unwrap();
        assert_eq!(safe_out, data);

        let mut fast_out = vec![0u8; consumed];
        // SAFETY: the block was produced by this crate's compressor and
        // dst.len() equals the consumed count.
        let n = unsafe { lz32::decompress_fast(block, &mut fast_out) }.unwrap();
        assert_eq!(n, consumed);
        assert_eq!(fast_out, data);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 11: high engine is at least as tight as the balanced engine
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_high_ratio_on_scattered_repeats() {
    // Repeated phrases at many distinct distances: bucket collisions make the
    // balanced engine miss matches the chain walk recovers.
    let mut data = Vec::new();
    let phrases: Vec<Vec<u8>> = (0..32u8)
        .map(|i| random_bytes(1000 + i as u64, 48))
        .collect();
    for round in 0..40usize {
        data.extend_from_slice(&phrases[(round * 7) % 32]);
        data.extend_from_slice(&phrases[(round * 13 + 5) % 32]);
    }

    let fast_block = roundtrip(&data, 1);
    let high_block = roundtrip(&data, 9);
    assert!(
        high_block.len() <= fast_block.len(),
        "chained search should never lose to the single probe here: {} vs {}",
        high_block.len(),
        fast_block.len()
    );
}
