#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let (accepted, bound) = match lz32::lz32d_compress_bound(data.len()) {
        Ok(v) => v,
        Err(_) => return,
    };

    let mut dst = vec![0u64; bound.div_ceil(8)];
    let dst_bytes =
        unsafe { std::slice::from_raw_parts_mut(dst.as_mut_ptr() as *mut u8, bound) };

    let (consumed, frame_len) =
        lz32::lz32d_compress_fast(data, dst_bytes).expect("framed compression cannot fail");
    assert_eq!(consumed, accepted);

    let frame = &dst_bytes[..frame_len];

    let (blen, rlen) = lz32::lz32d_decompress_size(frame).expect("own frame must size");
    assert_eq!(blen, frame_len);
    assert_eq!(rlen, consumed);

    let mut out = vec![0u8; rlen];
    let n = lz32::lz32d_decompress_safe(frame, &mut out).expect("own frame must decode");
    assert_eq!(n, rlen);
    assert_eq!(&out[..], &data[..consumed]);
});
