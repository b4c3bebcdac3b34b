//! lz32d framed data format.
//!
//! A frame wraps one compressed block with 16 bytes of metadata: an 8-byte
//! header (magic number, total framed length) and an 8-byte footer (raw
//! length, content checksum).  The inner block occupies the bytes in
//! between, so a frame can be sized, validated, and decompressed without any
//! out-of-band information.
//!
//! Ported from the `lz32d_*` interfaces of lz32.c.

pub mod compress;
pub mod decompress;
pub mod header;

pub use compress::{compress_bound, compress_fast, compress_high};
pub use decompress::{decompress_fast, decompress_safe, decompress_size};
pub use header::{FRAME_MAGIC, FRAME_OVERHEAD};
