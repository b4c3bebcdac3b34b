//! Chained high-ratio engine (`lz32_compress_internal_highcompress`).
//!
//! On top of the primary hash table this engine maintains a chain table of
//! 16-bit back-distances, indexed by `position & 0xFFFF`.  Each slot records
//! how far back the previous occupant of the same hash bucket sits, so a
//! probe can walk every candidate inside the window and keep the longest
//! match.  Backfill must run one position at a time here — every position
//! needs its chain bookkeeping — so the balanced engine's four-hash
//! amortisation does not apply.

use core::ptr;

use crate::block::compress::EngineRun;
use crate::block::types::{
    ceil16, count_match_255, encode_token, hash40, read64_le, write32_le, BLK_SIZE_MAX,
    BLK_SIZE_PROC_MIN, CTB_NOMATCH, HTB_LOG_HIGH, HTB_NOMATCH, MTC_LEN_MIN, RAW_SIZE_MAX,
    RAW_SIZE_PROC_MIN, WINDOW_LOG,
};

/// Chain-table slot mask: one slot per position inside the 64 KiB window.
const CTB_MASK: usize = (1 << WINDOW_LOG) - 1;

/// Chained engine: 2¹⁵-entry primary table plus 2¹⁶-entry chain table.
///
/// # Safety
/// Same contract as `block::compress::compress_balanced`:
/// - `src_ptr` readable for `src_cap` bytes, `dst_ptr` writable for `dst_cap`.
/// - `src_cap ∈ [RAW_SIZE_PROC_MIN, RAW_SIZE_MAX]`,
///   `dst_cap ∈ [BLK_SIZE_PROC_MIN, BLK_SIZE_MAX]` and a multiple of 16.
/// - The two buffers must not overlap.
pub(crate) unsafe fn compress_chained(
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

    let mut htb = vec![HTB_NOMATCH; 1usize << HTB_LOG_HIGH];
    let htb_ptr = htb.as_mut_ptr();

    let mut ctb = vec![CTB_NOMATCH; 1usize << WINDOW_LOG];
    let ctb_ptr = ctb.as_mut_ptr();

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

        let out_gap = out_tkn.offset_from(out_lit) as usize;
        if lit_len + 15 > out_gap {
            break;
        }

        // Forced literal flush — copies 256, consumes 255; the last byte is
        // re-emitted as the first literal of the next token.
        if lit_len == 256 {
            ptr::copy_nonoverlapping(inp_lit, out_lit, 256);
            inp_lit = inp_lit.add(255);
            out_lit = out_lit.add(255);

            write32_le(out_tkn, encode_token(255, 0, 0));
            out_tkn = out_tkn.sub(4);
            write32_le(out_tkn, 0);

            lit_len -= 255;
        }

        let cur_seq = read64_le(inp_cur);
        let htb_idx = hash40(cur_seq, HTB_LOG_HIGH);
        let htb_prev = *htb_ptr.add(htb_idx);
        *htb_ptr.add(htb_idx) = cur_pos as u32;

        let ctb_idx = cur_pos & CTB_MASK;
        let mut ctb_next = CTB_NOMATCH;

        let mut mtc_len: usize = 0;
        let mut mtc_off: usize = 0;

        if htb_prev != HTB_NOMATCH {
            let mut mtc_pos = htb_prev as usize;
            debug_assert!(mtc_pos < cur_pos);
            let mut cur_off = cur_pos - mtc_pos;

            if cur_off < off_lim {
                ctb_next = cur_off as u16;
            }

            // Walk the chain, scoring every candidate still inside the
            // window; ties keep the first-found (most recent) candidate.
            let mut inp_mtc = inp_beg.add(mtc_pos);

            while cur_off < off_lim {
                let cur_mtc = count_match_255(inp_mtc, inp_cur, inp_lim);

                if cur_mtc > mtc_len {
                    mtc_len = cur_mtc;
                    mtc_off = cur_off;
                }

                // The slot of a position closer than the window is always
                // fresh: no other in-window position shares its residue.
                let mtc_idx = mtc_pos & CTB_MASK;
                let ctb_prev = *ctb_ptr.add(mtc_idx);
                if ctb_prev == CTB_NOMATCH {
                    break;
                }

                let ctb_dist = ctb_prev as usize;
                inp_mtc = inp_mtc.sub(ctb_dist);
                mtc_pos -= ctb_dist;
                cur_off += ctb_dist;
            }
        }

        *ctb_ptr.add(ctb_idx) = ctb_next;

        if mtc_len >= MTC_LEN_MIN {
            let out_gap = out_tkn.offset_from(out_lit) as usize;
            if lit_len + mtc_len + 15 > out_gap {
                break;
            }

            ptr::copy_nonoverlapping(inp_lit, out_lit, ceil16(lit_len));
            inp_lit = inp_lit.add(lit_len);
            out_lit = out_lit.add(lit_len);

            inp_lit = inp_lit.add(mtc_len);

            write32_le(out_tkn, encode_token(lit_len, mtc_len, mtc_off));
            out_tkn = out_tkn.sub(4);
            write32_le(out_tkn, 0);

            // Per-position backfill: primary slot plus the chain link built
            // from whatever the primary slot displaced.
            let mut upd_cnt = mtc_len - 1;

            while upd_cnt != 0 {
                inp_cur = inp_cur.add(1);
                let seq = read64_le(inp_cur);

                let htb_idx = hash40(seq, HTB_LOG_HIGH);
                let htb_prev = *htb_ptr.add(htb_idx);

                cur_pos += 1;
                *htb_ptr.add(htb_idx) = cur_pos as u32;

                let mut ctb_next = CTB_NOMATCH;
                let ctb_idx = cur_pos & CTB_MASK;

                if htb_prev != HTB_NOMATCH {
                    let mtc_pos = htb_prev as usize;
                    debug_assert!(mtc_pos < cur_pos);
                    let cur_off = cur_pos - mtc_pos;

                    if cur_off < off_lim {
                        ctb_next = cur_off as u16;
                    }
                }

                *ctb_ptr.add(ctb_idx) = ctb_next;

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
