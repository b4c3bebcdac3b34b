//! lz32 block compression — balanced engine, finalisation, and the public API.
//!
//! Corresponds to the following routines in lz32.c:
//!
//! | Rust function           | C equivalent                        |
//! |-------------------------|-------------------------------------|
//! | [`compress_balanced`]   | `lz32_compress_internal_balanced`   |
//! | [`compress_internal`]   | `lz32_compress_internal`            |
//! | [`compress_fast`]       | `lz32_compress_fast`                |
//! | [`compress_high`]       | `lz32_compress_high`                |
//! | [`compress_bound`]      | `lz32_compress_bound`               |
//!
//! A block is written from both ends at once: literals grow up from the start
//! while 32-bit tokens grow down from the end, the zero sentinel riding just
//! below the most recently written token.  When the two cursors would cross,
//! the engine stops and finalisation fills the middle gap with raw tail bytes
//! and padding — or rewrites the whole block as a raw block when the token
//! stream failed to pay for itself.

use core::ptr;

use super::types::{
    ceil16, copy_forward, count_match_255, encode_token, floor16, hash40, read64_le, set_bits0,
    write32_le, BLK_SIZE_MAX, BLK_SIZE_MIN, BLK_SIZE_PROC_MIN, COMPR_LEVEL_HIGH, COMPR_LEVEL_MAX,
    COMPR_LEVEL_MIN, COMPR_LEVEL_UNSET, HTB_LOG_FAST, HTB_NOMATCH, MTC_LEN_MIN, RAW_SIZE_MAX,
    RAW_SIZE_MIN, RAW_SIZE_PROC_MIN, WINDOW_LOG,
};
use crate::error::Lz32Error;

// ─────────────────────────────────────────────────────────────────────────────
// Engine bookkeeping
// ─────────────────────────────────────────────────────────────────────────────

/// What one engine run produced: input bytes consumed, literal-region length,
/// token-region length (terminator included).
pub(crate) struct EngineRun {
    pub consumed: usize,
    pub head_len: usize,
    pub tail_len: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Compression bound (lz32_compress_bound)
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum destination capacity guaranteed to hold any output covering
/// `src_len` input bytes.
///
/// Returns `(accepted_src_len, min_dst_capacity)`.  The source length is
/// clamped so that the bound itself stays inside [`BLK_SIZE_MAX`]: a block
/// can cover at most `BLK_SIZE_MAX - 4` raw bytes.  Empty input is an error.
pub fn compress_bound(src_len: usize) -> Result<(usize, usize), Lz32Error> {
    if src_len < RAW_SIZE_MIN {
        return Err(Lz32Error::InvalidArgument);
    }
    let mut raw_len = src_len.min(RAW_SIZE_MAX);

    let mut blk_bnd = ceil16(raw_len + 4);
    if blk_bnd > BLK_SIZE_MAX {
        blk_bnd = BLK_SIZE_MAX;
        raw_len = blk_bnd - 4;
    }
    debug_assert!(blk_bnd >= BLK_SIZE_MIN);

    Ok((raw_len, blk_bnd))
}

// ─────────────────────────────────────────────────────────────────────────────
// Balanced engine (lz32_compress_internal_balanced)
// ─────────────────────────────────────────────────────────────────────────────

/// Single-probe engine: one 2¹⁴-entry hash table, full 64 KiB window.
///
/// # Safety
/// - `src_ptr` readable for `src_cap` bytes, `dst_ptr` writable for `dst_cap`.
/// - `src_cap ∈ [RAW_SIZE_PROC_MIN, RAW_SIZE_MAX]`,
///   `dst_cap ∈ [BLK_SIZE_PROC_MIN, BLK_SIZE_MAX]` and a multiple of 16.
/// - The two buffers must not overlap.
pub(crate) unsafe fn compress_balanced(
    src_ptr: *const u8,
    src_cap: usize,
    dst_ptr: *mut u8,
    dst_cap: usize,
) -> EngineRun {
    debug_assert!(src_cap >= RAW_SIZE_PROC_MIN);
    debug_assert!(src_cap <= RAW_SIZE_MAX);
    debug_assert!(dst_cap >= BLK_SIZE_PROC_MIN);
    debug_assert!(dst_cap <= BLK_SIZE_MAX);
    debug_assert!(dst_cap % 16 == 0);

    let mut htb = vec![HTB_NOMATCH; 1usize << HTB_LOG_FAST];
    let htb_ptr = htb.as_mut_ptr();

    let inp_beg = src_ptr;
    let inp_end = src_ptr.add(src_cap);
    let mut inp_lit = inp_beg;
    let mut inp_cur = inp_beg;
    let inp_lim = inp_end.sub(15);

    let out_beg = dst_ptr;
    let out_end = dst_ptr.add(dst_cap);
    let mut out_lit = out_beg;
    let mut out_tkn = out_end;

    let off_lim = 1usize << WINDOW_LOG;
    let mut cur_pos: usize = 0;

    out_tkn = out_tkn.sub(4);
    write32_le(out_tkn, 0);

    while inp_cur < inp_lim {
        debug_assert!(inp_cur >= inp_lit);
        let mut lit_len = inp_cur.offset_from(inp_lit) as usize;
        debug_assert!(lit_len <= 256);

        // Emission guard: the pending literals plus 15 bytes of copy slack
        // must fit below the token region.
        let out_gap = out_tkn.offset_from(out_lit) as usize;
        if lit_len + 15 > out_gap {
            break;
        }

        // Forced literal flush.  256 bytes are copied but only 255 are
        // consumed: the last byte is re-emitted as the first literal of the
        // next token.
        if lit_len == 256 {
            ptr::copy_nonoverlapping(inp_lit, out_lit, 256);
            inp_lit = inp_lit.add(255);
            out_lit = out_lit.add(255);

            write32_le(out_tkn, encode_token(255, 0, 0));
            out_tkn = out_tkn.sub(4);
            write32_le(out_tkn, 0);

            lit_len -= 255;
        }

        // Probe the table and claim the slot in the same step.
        let cur_seq = read64_le(inp_cur);
        let htb_idx = hash40(cur_seq, HTB_LOG_FAST);
        let htb_prev = *htb_ptr.add(htb_idx);
        *htb_ptr.add(htb_idx) = cur_pos as u32;

        let mut mtc_len: usize = 0;
        let mut mtc_off: usize = 0;

        if htb_prev != HTB_NOMATCH {
            let mtc_pos = htb_prev as usize;
            debug_assert!(mtc_pos < cur_pos);
            mtc_off = cur_pos - mtc_pos;
            if mtc_off < off_lim {
                mtc_len = count_match_255(inp_beg.add(mtc_pos), inp_cur, inp_lim);
            }
        }

        if mtc_len >= MTC_LEN_MIN {
            let out_gap = out_tkn.offset_from(out_lit) as usize;
            if lit_len + mtc_len + 15 > out_gap {
                break;
            }

            // The guard reserved 15 bytes of slack, so the literal copy may
            // round up to a whole 16-byte unit.
            ptr::copy_nonoverlapping(inp_lit, out_lit, ceil16(lit_len));
            inp_lit = inp_lit.add(lit_len);
            out_lit = out_lit.add(lit_len);

            inp_lit = inp_lit.add(mtc_len);

            write32_le(out_tkn, encode_token(lit_len, mtc_len, mtc_off));
            out_tkn = out_tkn.sub(4);
            write32_le(out_tkn, 0);

            // Backfill the table for the positions inside the match.  Four
            // hashes are amortised from one 64-bit load by shifting the
            // window right 8 bits between them.
            let mut upd_cnt = mtc_len - 1;

            while upd_cnt > 3 {
                let mut seq = read64_le(inp_cur.add(1));
                inp_cur = inp_cur.add(4);

                let idx0 = hash40(seq, HTB_LOG_FAST);
                seq >>= 8;
                let idx1 = hash40(seq, HTB_LOG_FAST);
                seq >>= 8;
                let idx2 = hash40(seq, HTB_LOG_FAST);
                seq >>= 8;
                let idx3 = hash40(seq, HTB_LOG_FAST);

                *htb_ptr.add(idx0) = (cur_pos + 1) as u32;
                *htb_ptr.add(idx1) = (cur_pos + 2) as u32;
                *htb_ptr.add(idx2) = (cur_pos + 3) as u32;
                *htb_ptr.add(idx3) = (cur_pos + 4) as u32;
                cur_pos += 4;

                upd_cnt -= 4;
            }

            while upd_cnt != 0 {
                inp_cur = inp_cur.add(1);
                let seq = read64_le(inp_cur);
                let idx = hash40(seq, HTB_LOG_FAST);

                cur_pos += 1;
                *htb_ptr.add(idx) = cur_pos as u32;

                upd_cnt -= 1;
            }
        }

        inp_cur = inp_cur.add(1);
        cur_pos += 1;
    }

    EngineRun {
        consumed: inp_lit.offset_from(inp_beg) as usize,
        head_len: out_lit.offset_from(out_beg) as usize,
        tail_len: out_end.offset_from(out_tkn) as usize,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine dispatch + finalisation (lz32_compress_internal)
// ─────────────────────────────────────────────────────────────────────────────

/// Run an engine, fill the middle gap, and fall back to a raw block when
/// compression failed to pay for itself.
///
/// Returns `(consumed, produced)`.
///
/// # Safety
/// - `src_ptr` readable for `src_cap`, `dst_ptr` writable for `dst_cap`.
/// - `src_cap ∈ [RAW_SIZE_MIN, RAW_SIZE_MAX]`; `dst_cap` a multiple of 16 in
///   `[BLK_SIZE_MIN, BLK_SIZE_MAX]`.
/// - The buffers must not overlap.
pub(crate) unsafe fn compress_internal(
    src_ptr: *const u8,
    src_cap: usize,
    dst_ptr: *mut u8,
    dst_cap: usize,
    cmr_lvl: i32,
) -> (usize, usize) {
    debug_assert!(src_cap >= RAW_SIZE_MIN);
    debug_assert!(src_cap <= RAW_SIZE_MAX);
    debug_assert!(dst_cap >= BLK_SIZE_MIN);
    debug_assert!(dst_cap <= BLK_SIZE_MAX);
    debug_assert!(dst_cap % 16 == 0);
    debug_assert!(
        cmr_lvl == COMPR_LEVEL_UNSET || (COMPR_LEVEL_MIN..=COMPR_LEVEL_MAX).contains(&cmr_lvl)
    );

    let mut calg = 5;
    if (COMPR_LEVEL_MIN..=COMPR_LEVEL_MAX).contains(&cmr_lvl) && cmr_lvl >= COMPR_LEVEL_HIGH {
        calg = 9;
    }
    // Tiny inputs and tiny destinations go straight to a raw block.
    if src_cap < RAW_SIZE_PROC_MIN || dst_cap < BLK_SIZE_PROC_MIN {
        calg = 1;
    }

    let mut slen: usize = 0;
    let mut dlen: usize = 0;

    if calg != 1 {
        let run = if calg == 9 {
            crate::hc::compress_chained(src_ptr, src_cap, dst_ptr, dst_cap)
        } else {
            compress_balanced(src_ptr, src_cap, dst_ptr, dst_cap)
        };
        let rlen = run.consumed;
        let hlen = run.head_len;
        let flen = run.tail_len;

        // Fill the gap between the literal region and the token region:
        // raw carry-through bytes first, then the sub-16 remainder zeroed,
        // then the token region pulled down over the unused 16-aligned rest.
        let mut plen = dst_cap - (hlen + flen);
        let mut tlen = src_cap - rlen;
        if tlen > plen {
            tlen = plen;
        }

        if tlen != 0 {
            ptr::copy_nonoverlapping(src_ptr.add(rlen), dst_ptr.add(hlen), tlen);
            plen -= tlen;
        }

        let mlen = floor16(plen);
        plen -= mlen;
        if plen != 0 {
            set_bits0(dst_ptr.add(hlen + tlen), plen);
        }

        if mlen != 0 {
            copy_forward(
                dst_ptr.add(hlen + tlen + plen),
                dst_ptr.add(dst_cap - flen),
                flen,
            );
        }

        slen = rlen + tlen;
        dlen = hlen + tlen + plen + flen;

        // Worse than a raw block?  Re-emit the whole thing raw.
        if slen + 4 < dlen {
            calg = 1;
        }
    }

    if calg == 1 {
        let mut raw_len = dst_cap - 4;
        if src_cap < raw_len {
            raw_len = src_cap;
        }

        ptr::copy_nonoverlapping(src_ptr, dst_ptr, raw_len);

        let blk_len = ceil16(raw_len + 4);
        set_bits0(dst_ptr.add(raw_len), blk_len - raw_len);

        slen = raw_len;
        dlen = blk_len;
    }

    (slen, dlen)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API (lz32_compress_fast / lz32_compress_high)
// ─────────────────────────────────────────────────────────────────────────────

/// Validate parameters and run [`compress_internal`] at the given level.
///
/// Level 0 is "unset" (balanced); 1–3 select the balanced engine, 4–9 the
/// high-ratio engine.  Returns `(consumed, produced)`: how many source bytes
/// the block covers and how many destination bytes were written.  `produced`
/// is always a multiple of 16.
pub fn compress_with_level(
    src: &[u8],
    dst: &mut [u8],
    level: i32,
) -> Result<(usize, usize), Lz32Error> {
    if level != COMPR_LEVEL_UNSET && !(COMPR_LEVEL_MIN..=COMPR_LEVEL_MAX).contains(&level) {
        return Err(Lz32Error::InvalidArgument);
    }

    let mut scap = src.len();
    if scap > RAW_SIZE_MAX {
        scap = RAW_SIZE_MAX;
    }
    if scap < RAW_SIZE_MIN {
        return Err(Lz32Error::InvalidArgument);
    }

    if dst.as_ptr() as usize & 3 != 0 {
        return Err(Lz32Error::InvalidArgument);
    }
    let mut dcap = floor16(dst.len());
    if dcap > BLK_SIZE_MAX {
        dcap = BLK_SIZE_MAX;
    }
    if dcap < BLK_SIZE_MIN {
        return Err(Lz32Error::InvalidArgument);
    }

    // SAFETY: lengths validated and clamped above; `src` and `dst` are live
    // slices, so the regions are readable/writable and cannot overlap.
    let (slen, dlen) = unsafe { compress_internal(src.as_ptr(), scap, dst.as_mut_ptr(), dcap, level) };

    Ok((slen, dlen))
}

/// Balanced one-shot block compression (`lz32_compress_fast`).
pub fn compress_fast(src: &[u8], dst: &mut [u8]) -> Result<(usize, usize), Lz32Error> {
    compress_with_level(src, dst, COMPR_LEVEL_MIN)
}

/// High-ratio one-shot block compression (`lz32_compress_high`).
pub fn compress_high(src: &[u8], dst: &mut [u8]) -> Result<(usize, usize), Lz32Error> {
    compress_with_level(src, dst, COMPR_LEVEL_MAX)
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_is_ceil16_plus_terminator() {
        assert_eq!(compress_bound(1).unwrap(), (1, 16));
        assert_eq!(compress_bound(12).unwrap(), (12, 16));
        assert_eq!(compress_bound(13).unwrap(), (13, 32));
        assert_eq!(compress_bound(1000).unwrap(), (1000, 1008));
    }

    #[test]
    fn bound_clamps_at_format_limits() {
        // A block can cover at most BLK_SIZE_MAX - 4 raw bytes, so both the
        // limit input and anything beyond it land on the same answer.
        for len in [RAW_SIZE_MAX - 4, RAW_SIZE_MAX, RAW_SIZE_MAX + 123] {
            let (accepted, bnd) = compress_bound(len).unwrap();
            assert_eq!(accepted, BLK_SIZE_MAX - 4);
            assert_eq!(bnd, BLK_SIZE_MAX);
        }
        // Just inside the limit the plain formula applies.
        let (accepted, bnd) = compress_bound(RAW_SIZE_MAX - 20).unwrap();
        assert_eq!(accepted, RAW_SIZE_MAX - 20);
        assert_eq!(bnd, ceil16(RAW_SIZE_MAX - 16));
    }

    #[test]
    fn bound_rejects_empty() {
        assert_eq!(compress_bound(0), Err(Lz32Error::InvalidArgument));
    }

    #[test]
    fn level_out_of_range_is_einval() {
        let src = [0u8; 64];
        let mut dst = vec![0u64; 16];
        let dst_bytes = unsafe {
            core::slice::from_raw_parts_mut(dst.as_mut_ptr() as *mut u8, 128)
        };
        assert_eq!(
            compress_with_level(&src, dst_bytes, 10),
            Err(Lz32Error::InvalidArgument)
        );
        assert_eq!(
            compress_with_level(&src, dst_bytes, -1),
            Err(Lz32Error::InvalidArgument)
        );
    }
}
