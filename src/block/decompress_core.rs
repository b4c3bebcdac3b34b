//! lz32 block decompression core engine.
//!
//! Implements `lz32_decompress_internal` from lz32.c: tokens are read from
//! the highest 4 bytes of the block downwards, literals are pulled forward
//! from the block start, and whatever the destination still owes after the
//! zero terminator comes verbatim from the raw tail between the two cursors.
//!
//! # Security boundary
//!
//! This module is the security-critical decompression path.  In safe mode
//! every token is validated before any copy derived from it runs, and every
//! 16-byte copy clamps its trailing chunk to the buffer ends, so malformed
//! input returns a [`DecodeFault`] — it must never touch memory outside the
//! two caller buffers.  In trusting mode the validations are skipped and the
//! contract moves to the caller (see `decompress_api`).
//!
//! All `unsafe` blocks carry the bounds argument localising the proof.

use core::ptr;

use super::types::{copy16, decode_token, read32_le, MTC_LEN_MIN, OFF_MAP};
use crate::error::DecodeFault;

// ─────────────────────────────────────────────────────────────────────────────
// Clamped chunk copy
// ─────────────────────────────────────────────────────────────────────────────

/// Copy `len` bytes in 16-byte units, clamping the trailing partial chunk so
/// neither the read nor the write leaves its buffer.
///
/// # Safety
/// - `[s, s + len)` readable and below `s_end`; `[d, d + len)` writable and
///   below `d_end`; `s_end` / `d_end` are one-past-the-end of their buffers.
/// - When the regions belong to the same buffer, `d - s >= 16`.
#[inline(always)]
unsafe fn copy_chunked(
    mut d: *mut u8,
    mut s: *const u8,
    len: usize,
    s_end: *const u8,
    d_end: *mut u8,
) {
    let mut rem = len;
    while rem >= 16 {
        copy16(d, s);
        d = d.add(16);
        s = s.add(16);
        rem -= 16;
    }
    if rem != 0 {
        if d_end.offset_from(d) as usize >= 16 && s_end.offset_from(s) as usize >= 16 {
            // Whole-unit tail: the extra bytes land ahead of the write head
            // and are overwritten by the next copy or the raw tail.
            copy16(d, s);
        } else {
            ptr::copy_nonoverlapping(s, d, rem);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Core decode loop (lz32_decompress_internal)
// ─────────────────────────────────────────────────────────────────────────────

/// Decode one block, producing exactly `dst_len` bytes.
///
/// `safe` selects the validating mode; with `safe == false` all token checks
/// are skipped and malformed input is undefined behaviour.
///
/// # Safety
/// - `src_ptr` readable for `src_len` bytes, 4-byte aligned; `src_len` a
///   multiple of 16 in `[BLK_SIZE_MIN, BLK_SIZE_MAX]`.
/// - `dst_ptr` writable for `dst_len` bytes, `dst_len ∈ [RAW_SIZE_MIN,
///   RAW_SIZE_MAX]`.
/// - The buffers must not overlap.
/// - With `safe == false`, `src` must additionally be a well-formed block as
///   produced by this crate's compressors for some input prefix of length
///   `dst_len`.
pub(crate) unsafe fn decompress_internal(
    src_ptr: *const u8,
    src_len: usize,
    dst_ptr: *mut u8,
    dst_len: usize,
    safe: bool,
) -> Result<(), DecodeFault> {
    let inp_beg = src_ptr;
    let inp_end = src_ptr.add(src_len);
    let mut inp_lit = inp_beg;
    let mut inp_tkn = inp_end;

    let out_beg = dst_ptr;
    let out_end = dst_ptr.add(dst_len);
    let mut out_cur = out_beg;

    inp_tkn = inp_tkn.sub(4);
    let mut cur_tkn = read32_le(inp_tkn);

    while cur_tkn != 0 {
        let (lit_len, mtc_len, mtc_off) = decode_token(cur_tkn);

        if safe {
            // Token invariant: MO = 0 ⇒ ML = 0, MO ≠ 0 ⇒ ML ≥ 5.
            if mtc_off != 0 {
                if mtc_len < MTC_LEN_MIN {
                    return Err(DecodeFault::InvalidToken);
                }
            } else if mtc_len != 0 {
                return Err(DecodeFault::InvalidToken);
            }

            // The literal run and the next token must both fit between the
            // literal cursor and the token cursor.
            let inp_bnd = inp_tkn.offset_from(inp_lit) as usize;
            if lit_len + 4 > inp_bnd {
                return Err(DecodeFault::CopyOverlap);
            }

            // The match source must not reach below the destination start.
            let off_bnd = out_cur.offset_from(out_beg) as usize;
            if off_bnd + lit_len < mtc_off {
                return Err(DecodeFault::CopyOverlap);
            }

            // Literals plus match must fit in the destination.
            let out_bnd = out_end.offset_from(out_cur) as usize;
            if lit_len + mtc_len > out_bnd {
                return Err(DecodeFault::CopyOverlap);
            }
        }

        // ── Literal copy ─────────────────────────────────────────────────
        if lit_len != 0 {
            let s = inp_lit;
            let d = out_cur;
            inp_lit = inp_lit.add(lit_len);
            out_cur = out_cur.add(lit_len);
            // SAFETY: reads bounded by inp_end, writes by out_end (validated
            // in safe mode, trusted otherwise); distinct buffers.
            copy_chunked(d, s, lit_len, inp_end, out_end);
        }

        // ── Match copy ───────────────────────────────────────────────────
        if mtc_len != 0 {
            let mut s = out_cur.sub(mtc_off);
            let mut d = out_cur;
            out_cur = out_cur.add(mtc_len);

            if mtc_off < 16 {
                // Byte-wise fanout: replicate the short pattern across one
                // 16-byte unit, then hop the read pointer back to a window
                // that is both a multiple of the offset and a full unit
                // behind the write head (OFF_MAP), and resume block copies.
                if out_end.offset_from(d) as usize >= 16 {
                    for i in 0..16 {
                        *d.add(i) = *s.add(i);
                    }
                    d = d.add(16);
                    s = d.sub(OFF_MAP[mtc_off]);

                    while d < out_cur {
                        if out_end.offset_from(d) as usize >= 16 {
                            copy16(d, s);
                            d = d.add(16);
                            s = s.add(16);
                        } else {
                            let rem = out_cur.offset_from(d) as usize;
                            ptr::copy_nonoverlapping(s, d, rem);
                            break;
                        }
                    }
                } else {
                    // Too close to the block end for whole units: plain
                    // ascending byte copy handles any overlap.
                    for i in 0..mtc_len {
                        *d.add(i) = *s.add(i);
                    }
                }
            } else {
                // Offset of at least one unit: chunks never overlap.
                copy_chunked(d, s, mtc_len, out_end as *const u8, out_end);
            }
        }

        inp_tkn = inp_tkn.sub(4);
        cur_tkn = read32_le(inp_tkn);
    }

    // ── Raw tail ─────────────────────────────────────────────────────────
    debug_assert!(out_cur <= out_end);
    let head_len = out_cur.offset_from(out_beg) as usize;
    let tail_len = dst_len - head_len;

    let inp_bnd = inp_tkn.offset_from(inp_lit) as usize;
    if tail_len > inp_bnd {
        return Err(DecodeFault::StreamOverlap);
    }

    ptr::copy_nonoverlapping(inp_lit, out_cur, tail_len);

    Ok(())
}
