#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let (accepted, bound) = match lz32::compress_bound(data.len()) {
        Ok(v) => v,
        Err(_) => return,
    };

    // u64 backing gives the 4-byte destination alignment the API demands.
    let mut dst = vec![0u64; bound.div_ceil(8)];
    let dst_bytes =
        unsafe { std::slice::from_raw_parts_mut(dst.as_mut_ptr() as *mut u8, bound) };

    for level in [1, 9] {
        let (consumed, produced) =
            lz32::compress_with_level(data, dst_bytes, level).expect("compression cannot fail");
        assert_eq!(consumed, accepted, "bound-sized destination must cover the input");
        assert_eq!(produced % 16, 0);

        let mut out = vec![0u8; consumed];
        let n = lz32::decompress_safe(&dst_bytes[..produced], &mut out)
            .expect("own output must decode");
        assert_eq!(n, consumed);
        assert_eq!(&out[..], &data[..consumed], "round-trip mismatch at level {level}");
    }
});
