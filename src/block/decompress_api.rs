//! Public lz32 block decompression API.
//!
//! Implements `lz32_decompress_fast` / `lz32_decompress_safe` from lz32.c as
//! slice wrappers over the pointer core in `decompress_core`.  Parameter
//! validation is identical for both entry points; only the per-token data
//! validation differs.
//!
//! # Safety model
//!
//! [`decompress_safe`] is a fully safe function: any byte pattern in `src`
//! either decodes or returns [`Lz32Error::CorruptBlock`].  [`decompress_fast`]
//! skips every data check and is `unsafe`: it is intended for blocks from a
//! trusted producer (typically this crate's own compressors), and feeding it
//! malformed data is undefined behaviour.

use super::decompress_core::decompress_internal;
use super::types::{BLK_SIZE_MAX, BLK_SIZE_MIN, RAW_SIZE_MAX, RAW_SIZE_MIN};
use crate::error::Lz32Error;

/// Shared parameter validation for both decompression modes.
///
/// The source must be 4-byte aligned and a whole number of 16-byte units;
/// the destination length may be anything in `[1, 2³⁰]` — a block carrying a
/// short payload inside its padding is still decodable into a short buffer.
fn validate_params(src: &[u8], dst_len: usize) -> Result<(), Lz32Error> {
    if src.as_ptr() as usize & 3 != 0 {
        return Err(Lz32Error::InvalidArgument);
    }
    if src.len() < BLK_SIZE_MIN || src.len() > BLK_SIZE_MAX || src.len() % 16 != 0 {
        return Err(Lz32Error::InvalidArgument);
    }
    if dst_len < RAW_SIZE_MIN || dst_len > RAW_SIZE_MAX {
        return Err(Lz32Error::InvalidArgument);
    }
    Ok(())
}

/// Validating one-shot block decompression (`lz32_decompress_safe`).
///
/// Produces exactly `dst.len()` bytes and returns that count.  Every token is
/// range-checked before use; corrupt input returns
/// [`Lz32Error::CorruptBlock`] without reading or writing outside the two
/// buffers.
pub fn decompress_safe(src: &[u8], dst: &mut [u8]) -> Result<usize, Lz32Error> {
    validate_params(src, dst.len())?;

    // SAFETY: parameters validated above; slices guarantee valid,
    // non-overlapping regions; safe mode bounds every copy.
    unsafe { decompress_internal(src.as_ptr(), src.len(), dst.as_mut_ptr(), dst.len(), true) }?;

    Ok(dst.len())
}

/// Trusting one-shot block decompression (`lz32_decompress_fast`).
///
/// Produces exactly `dst.len()` bytes and returns that count.  Skips all
/// per-token validation.
///
/// # Safety
/// `src` must be a well-formed block produced by this crate's compressors,
/// and `dst.len()` must not exceed the number of source bytes that block
/// covers.  Anything else is undefined behaviour; use [`decompress_safe`]
/// for untrusted data.
pub unsafe fn decompress_fast(src: &[u8], dst: &mut [u8]) -> Result<usize, Lz32Error> {
    validate_params(src, dst.len())?;

    decompress_internal(src.as_ptr(), src.len(), dst.as_mut_ptr(), dst.len(), false)?;

    Ok(dst.len())
}
