// lz32 — Rust port

pub mod block;
pub mod error;
pub mod frame;
pub mod hc;
pub mod xxhash;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level convenience re-exports for the most common API entry points.
// These mirror the primary symbols from lz32.h.
// ─────────────────────────────────────────────────────────────────────────────

/// Error type shared by every entry point.
pub use error::Lz32Error;

/// Minimum destination capacity for a block.  Equivalent to `lz32_compress_bound`.
pub use block::compress::compress_bound;
/// Balanced one-shot block compression.  Equivalent to `lz32_compress_fast`.
pub use block::compress::compress_fast;
/// High-ratio one-shot block compression.  Equivalent to `lz32_compress_high`.
pub use block::compress::compress_high;
/// Level-parameterised block compression (levels 1–3 balanced, 4–9 chained).
pub use block::compress::compress_with_level;

/// Trusting one-shot block decompression.  Equivalent to `lz32_decompress_fast`.
pub use block::decompress_api::decompress_fast;
/// Validating one-shot block decompression.  Equivalent to `lz32_decompress_safe`.
pub use block::decompress_api::decompress_safe;

// ─────────────────────────────────────────────────────────────────────────────
// Framed data-format re-exports  (lz32d_* interfaces)
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum destination capacity for a frame.  Equivalent to `lz32d_compress_bound`.
pub use frame::compress::compress_bound as lz32d_compress_bound;
/// Balanced framed compression.  Equivalent to `lz32d_compress_fast`.
pub use frame::compress::compress_fast as lz32d_compress_fast;
/// High-ratio framed compression.  Equivalent to `lz32d_compress_high`.
pub use frame::compress::compress_high as lz32d_compress_high;
/// Frame sizing from header/footer only.  Equivalent to `lz32d_decompress_size`.
pub use frame::decompress::decompress_size as lz32d_decompress_size;
/// Trusting framed decompression.  Equivalent to `lz32d_decompress_fast`.
pub use frame::decompress::decompress_fast as lz32d_decompress_fast;
/// Validating framed decompression.  Equivalent to `lz32d_decompress_safe`.
pub use frame::decompress::decompress_safe as lz32d_decompress_safe;

// ─────────────────────────────────────────────────────────────────────────────
// Size-limit re-exports
// ─────────────────────────────────────────────────────────────────────────────

/// Raw payload limits accepted by the block compressors.
pub use block::types::{RAW_SIZE_MAX, RAW_SIZE_MIN};

/// Block size limits produced/accepted by the codec.
pub use block::types::{BLK_SIZE_MAX, BLK_SIZE_MIN};

// ─────────────────────────────────────────────────────────────────────────────
// Version API
// ─────────────────────────────────────────────────────────────────────────────

pub const LZ32_VERSION_MAJOR: i32 = 0;
pub const LZ32_VERSION_MINOR: i32 = 3;
pub const LZ32_VERSION_RELEASE: i32 = 0;
pub const LZ32_VERSION_NUMBER: i32 =
    LZ32_VERSION_MAJOR * 100 * 100 + LZ32_VERSION_MINOR * 100 + LZ32_VERSION_RELEASE;
pub const LZ32_VERSION_STRING: &str = "0.3.0";

/// Returns the library version number (e.g. 300 for v0.3.0).
pub fn version_number() -> i32 {
    LZ32_VERSION_NUMBER
}

/// Returns the library version string (e.g. `"0.3.0"`).
pub fn version_string() -> &'static str {
    LZ32_VERSION_STRING
}
