//! Framed decompression (`lz32d_decompress_size` / `lz32d_decompress_fast` /
//! `lz32d_decompress_safe`).

use super::header::parse_frame;
use crate::block;
use crate::error::Lz32Error;
use crate::xxhash::xxh64_low32;

/// Report a frame's total size and payload size from its header and footer
/// alone, without touching the token stream (`lz32d_decompress_size`).
///
/// Returns `(frame_len, raw_len)`.
pub fn decompress_size(src: &[u8]) -> Result<(usize, usize), Lz32Error> {
    if src.as_ptr() as usize & 3 != 0 {
        return Err(Lz32Error::InvalidArgument);
    }
    let info = parse_frame(src)?;
    Ok((info.block_len, info.raw_len))
}

/// Validating framed decompression (`lz32d_decompress_safe`).
///
/// Decodes the inner block into `dst[..raw_len]` and verifies the stored
/// content checksum when present (a zero slot means the producer did not
/// checksum).  Returns the payload length.
pub fn decompress_safe(src: &[u8], dst: &mut [u8]) -> Result<usize, Lz32Error> {
    if src.as_ptr() as usize & 3 != 0 {
        return Err(Lz32Error::InvalidArgument);
    }
    let info = parse_frame(src)?;
    if dst.len() < info.raw_len {
        return Err(Lz32Error::InvalidArgument);
    }

    let inner = &src[8..info.block_len - 8];
    block::decompress_safe(inner, &mut dst[..info.raw_len])?;

    if info.checksum != 0 && xxh64_low32(&dst[..info.raw_len]) != info.checksum {
        return Err(Lz32Error::CorruptBlock);
    }

    Ok(info.raw_len)
}

/// Trusting framed decompression (`lz32d_decompress_fast`).
///
/// Header and footer fields are still validated, but the token stream is
/// decoded without data checks and the checksum is not verified.
///
/// # Safety
/// The frame must have been produced by this crate's framed compressors (or
/// an equivalent writer); see `block::decompress_fast` for the underlying
/// contract.
pub unsafe fn decompress_fast(src: &[u8], dst: &mut [u8]) -> Result<usize, Lz32Error> {
    if src.as_ptr() as usize & 3 != 0 {
        return Err(Lz32Error::InvalidArgument);
    }
    let info = parse_frame(src)?;
    if dst.len() < info.raw_len {
        return Err(Lz32Error::InvalidArgument);
    }

    let inner = &src[8..info.block_len - 8];
    block::decompress_fast(inner, &mut dst[..info.raw_len])?;

    Ok(info.raw_len)
}
