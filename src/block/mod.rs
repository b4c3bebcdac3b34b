//! lz32 block compression and decompression.
//!
//! The core of the codec, ported from lz32.c: a block is addressed from both
//! ends — literals grow up from the start, 32-bit tokens grow down from the
//! end — and the two meet in a middle gap that carries raw tail bytes and
//! padding.

pub mod compress;
pub mod decompress_api;
pub mod decompress_core;
pub mod types;

// Re-export the most important public API items at the module level.
pub use compress::{compress_bound, compress_fast, compress_high, compress_with_level};
pub use decompress_api::{decompress_fast, decompress_safe};
pub use types::{BLK_SIZE_MAX, BLK_SIZE_MIN, RAW_SIZE_MAX, RAW_SIZE_MIN};
