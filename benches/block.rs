//! Criterion benchmarks for the lz32 block API.
//!
//! Run with:
//!   cargo bench --bench block
//!
//! Times both engines and both decoders on synthetic chunks mixing text-like
//! repetition with incompressible noise.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Destination buffer with the 4-byte alignment the block API demands.
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

/// Half text-like repetition, half xorshift noise — a middling-ratio corpus.
fn synthetic_chunk(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len + 8);
    let phrase = b"lorem ipsum dolor sit amet, consectetur adipiscing elit, ";
    let mut state = 0x6A09_E667_F3BC_C908u64;
    while out.len() < len {
        out.extend_from_slice(phrase);
        for _ in 0..8 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            out.extend_from_slice(&state.to_le_bytes());
        }
    }
    out.truncate(len);
    out
}

fn bench_block_compress_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_compress_decompress");

    for &chunk_size in &[65_536usize, 262_144] {
        let chunk = synthetic_chunk(chunk_size);
        let (_, bound) = lz32::compress_bound(chunk_size).unwrap();

        // ── compress_fast ───────────────────────────────────────────────────
        {
            let mut dst = AlignedBuf::new(bound);
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new("compress_fast", chunk_size),
                &chunk,
                |b, chunk| b.iter(|| lz32::compress_fast(chunk, dst.as_mut_slice()).unwrap()),
            );
        }

        // ── compress_high ───────────────────────────────────────────────────
        {
            let mut dst = AlignedBuf::new(bound);
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new("compress_high", chunk_size),
                &chunk,
                |b, chunk| b.iter(|| lz32::compress_high(chunk, dst.as_mut_slice()).unwrap()),
            );
        }

        // ── decompressors — pre-compress the chunk once, then benchmark ─────
        {
            let mut tmp = AlignedBuf::new(bound);
            let (consumed, produced) = lz32::compress_fast(&chunk, tmp.as_mut_slice()).unwrap();
            assert_eq!(consumed, chunk_size);
            tmp.len = produced;
            let mut out = vec![0u8; consumed];

            // Throughput measured in *decompressed* bytes.
            group.throughput(Throughput::Bytes(chunk_size as u64));
            group.bench_with_input(
                BenchmarkId::new("decompress_safe", chunk_size),
                &tmp,
                |b, tmp| b.iter(|| lz32::decompress_safe(tmp.as_slice(), &mut out).unwrap()),
            );

            group.bench_with_input(
                BenchmarkId::new("decompress_fast", chunk_size),
                &tmp,
                |b, tmp| {
                    // SAFETY: the block comes from this crate's compressor and
                    // `out` has exactly the consumed length.
                    b.iter(|| unsafe { lz32::decompress_fast(tmp.as_slice(), &mut out) }.unwrap())
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_block_compress_decompress);
criterion_main!(benches);
