//! E2E Test Suite 03: High-Ratio Engine
//!
//! Exercises the chain-walking match search: long-range back-references near
//! the window limit, hash-bucket collisions recovered through the chain
//! table, and level dispatch (1–3 balanced, 4–9 chained).

extern crate lz32;

use lz32::{compress_bound, compress_high, compress_with_level, decompress_safe};

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

fn compress_at(data: &[u8], level: i32) -> (Vec<u8>, usize) {
    let (_, bound) = compress_bound(data.len()).unwrap();
    let mut dst = AlignedBuf::new(bound);
    let (consumed, produced) = compress_with_level(data, dst.as_mut_slice(), level).unwrap();
    assert_eq!(consumed, data.len());
    (dst.as_slice()[..produced].to_vec(), consumed)
}

fn check_roundtrip(data: &[u8], block: &[u8]) {
    let mut out = vec![0u8; data.len()];
    let n = decompress_safe(block, &mut out).unwrap();
    assert_eq!(n, data.len());
    assert_eq!(&out[..], data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: long-range match close to the window limit
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_finds_match_near_window_edge() {
    // 500 planted bytes duplicated 60000 bytes later, inside random filler.
    let mut data = random_bytes(5, 62_000);
    let plant: Vec<u8> = data[..500].to_vec();
    data[60_000..60_500].copy_from_slice(&plant);

    let (block, _) = compress_at(&data, 9);
    check_roundtrip(&data, &block);

    let tokens = scan_tokens(&block);
    assert!(
        tokens.iter().any(|&(_, ml, mo)| mo == 60_000 && ml == 255),
        "expected a 60000-byte back-reference, got {} tokens",
        tokens.len()
    );
}

#[test]
fn test_ignores_match_beyond_window() {
    // The duplicate sits 70000 bytes back — outside the 64 KiB window — so
    // the stream must still round-trip without using it.
    let mut data = random_bytes(6, 71_000);
    let plant: Vec<u8> = data[..400].to_vec();
    data[70_000..70_400].copy_from_slice(&plant);

    let (block, _) = compress_at(&data, 9);
    check_roundtrip(&data, &block);

    let tokens = scan_tokens(&block);
    assert!(
        tokens.iter().all(|&(_, _, mo)| mo < 65_536),
        "no offset may leave the window"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: chain walk recovers bucket collisions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_chain_walk_beats_single_probe() {
    // Interleave many distinct 48-byte phrases so single-probe buckets are
    // frequently stolen before the repeat shows up.
    let phrases: Vec<Vec<u8>> = (0..64u8)
        .map(|i| random_bytes(300 + i as u64, 48))
        .collect();
    let mut data = Vec::new();
    for round in 0..120usize {
        data.extend_from_slice(&phrases[(round * 29) % 64]);
        data.extend_from_slice(&phrases[(round * 47 + 3) % 64]);
    }

    let (fast_block, _) = compress_at(&data, 1);
    let (high_block, _) = compress_at(&data, 9);
    check_roundtrip(&data, &fast_block);
    check_roundtrip(&data, &high_block);

    assert!(
        high_block.len() <= fast_block.len(),
        "chained search lost to the single probe: {} vs {}",
        high_block.len(),
        fast_block.len()
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: level dispatch
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_levels_agree_within_engine_family() {
    let data = b"abcabcabcabc-abcabcabcabc-abcabcabcabc-".repeat(50);

    let (l1, _) = compress_at(&data, 1);
    let (l3, _) = compress_at(&data, 3);
    assert_eq!(l1, l3, "levels 1-3 share the balanced engine");

    let (l4, _) = compress_at(&data, 4);
    let (l9, _) = compress_at(&data, 9);
    assert_eq!(l4, l9, "levels 4-9 share the chained engine");

    check_roundtrip(&data, &l1);
    check_roundtrip(&data, &l4);
}

#[test]
fn test_compress_high_equals_level_nine() {
    let data = random_bytes(77, 3000);
    let (via_level, _) = compress_at(&data, 9);

    let (_, bound) = compress_bound(data.len()).unwrap();
    let mut dst = AlignedBuf::new(bound);
    let (consumed, produced) = compress_high(&data, dst.as_mut_slice()).unwrap();
    assert_eq!(consumed, data.len());
    assert_eq!(&dst.as_slice()[..produced], &via_level[..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: dense self-similar data
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_overlapping_periodic_data() {
    // Periods straddling the byte-wise/block-copy boundary of the decoder.
    for period in [3usize, 9, 14, 17, 250] {
        let pattern: Vec<u8> = (0..period).map(|i| (i * 151 + 7) as u8).collect();
        let data: Vec<u8> = pattern.iter().cycle().take(30_000).copied().collect();

        let (block, _) = compress_at(&data, 9);
        check_roundtrip(&data, &block);
        assert!(block.len() < data.len() / 8, "period {period}");
    }
}
