//! Framed compression (`lz32d_compress_bound` / `lz32d_compress_fast` /
//! `lz32d_compress_high`).
//!
//! The inner block is compressed straight into the destination at offset 8,
//! then the header and footer are written around it.  The footer checksum is
//! the low 32 bits of the payload's XXH64.

use super::header::{
    write_footer, write_header, FRAME_BLK_SIZE_MAX, FRAME_BLK_SIZE_MIN, FRAME_OVERHEAD,
    FRAME_RAW_SIZE_MAX, FRAME_RAW_SIZE_MIN,
};
use crate::block;
use crate::block::types::{ceil16, floor16, COMPR_LEVEL_MAX, COMPR_LEVEL_MIN};
use crate::error::Lz32Error;
use crate::xxhash::xxh64_low32;

/// Minimum destination capacity guaranteed to hold any frame for `src_len`
/// input bytes.
///
/// Returns `(accepted_src_len, min_dst_capacity)`; the source length is
/// clamped to [`FRAME_RAW_SIZE_MAX`].  The bound is the block bound plus the
/// 16 bytes of frame overhead: `ceil16(src_len + 20)`.
pub fn compress_bound(src_len: usize) -> Result<(usize, usize), Lz32Error> {
    if src_len < FRAME_RAW_SIZE_MIN {
        return Err(Lz32Error::InvalidArgument);
    }
    let slen = src_len.min(FRAME_RAW_SIZE_MAX);
    Ok((slen, ceil16(slen + FRAME_OVERHEAD + 4)))
}

fn compress_with_level(
    src: &[u8],
    dst: &mut [u8],
    level: i32,
) -> Result<(usize, usize), Lz32Error> {
    let mut scap = src.len();
    if scap > FRAME_RAW_SIZE_MAX {
        scap = FRAME_RAW_SIZE_MAX;
    }
    if scap < FRAME_RAW_SIZE_MIN {
        return Err(Lz32Error::InvalidArgument);
    }

    if dst.as_ptr() as usize & 3 != 0 {
        return Err(Lz32Error::InvalidArgument);
    }
    let mut dcap = floor16(dst.len());
    if dcap > FRAME_BLK_SIZE_MAX {
        dcap = FRAME_BLK_SIZE_MAX;
    }
    if dcap < FRAME_BLK_SIZE_MIN {
        return Err(Lz32Error::InvalidArgument);
    }

    // Inner block between header and footer; dcap is 16-aligned, so the
    // inner capacity is too.
    let inner_cap = dcap - FRAME_OVERHEAD;
    let (consumed, inner_len) =
        block::compress::compress_with_level(&src[..scap], &mut dst[8..8 + inner_cap], level)?;

    let block_len = inner_len + FRAME_OVERHEAD;
    write_header(dst, block_len);
    write_footer(dst, block_len, consumed, xxh64_low32(&src[..consumed]));

    Ok((consumed, block_len))
}

/// Balanced framed compression (`lz32d_compress_fast`).
///
/// Returns `(consumed, frame_len)`.
pub fn compress_fast(src: &[u8], dst: &mut [u8]) -> Result<(usize, usize), Lz32Error> {
    compress_with_level(src, dst, COMPR_LEVEL_MIN)
}

/// High-ratio framed compression (`lz32d_compress_high`).
///
/// Returns `(consumed, frame_len)`.
pub fn compress_high(src: &[u8], dst: &mut [u8]) -> Result<(usize, usize), Lz32Error> {
    compress_with_level(src, dst, COMPR_LEVEL_MAX)
}
