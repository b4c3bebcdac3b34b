#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through the frame parser and decoder; errors are fine,
    // panics and out-of-bounds accesses are not.

    let src_len = data.len() & !7;
    if src_len == 0 {
        return;
    }
    let mut src = vec![0u64; src_len / 8];
    unsafe {
        std::ptr::copy_nonoverlapping(data.as_ptr(), src.as_mut_ptr() as *mut u8, src_len);
    }
    let src_bytes = unsafe { std::slice::from_raw_parts(src.as_ptr() as *const u8, src_len) };

    let _ = lz32::lz32d_decompress_size(src_bytes);

    let mut dst = vec![0u8; 8192];
    let _ = lz32::lz32d_decompress_safe(src_bytes, &mut dst);
});
