#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes through the safe block decompressor.
    // Err results are expected and fine; what we verify is no panics or UB.

    // Round down to whole 16-byte units in an aligned copy.
    let src_len = data.len() & !15;
    if src_len == 0 {
        return;
    }
    let mut src = vec![0u64; src_len / 8];
    unsafe {
        std::ptr::copy_nonoverlapping(data.as_ptr(), src.as_mut_ptr() as *mut u8, src_len);
    }
    let src_bytes = unsafe { std::slice::from_raw_parts(src.as_ptr() as *const u8, src_len) };

    // Tiny output buffer.
    {
        let mut dst = vec![0u8; 1];
        let _ = lz32::decompress_safe(src_bytes, &mut dst);
    }

    // 4 KiB output buffer — covers most real payload sizes.
    {
        let mut dst = vec![0u8; 4096];
        let _ = lz32::decompress_safe(src_bytes, &mut dst);
    }

    // Output buffer as large as the block itself (a common heuristic).
    {
        let mut dst = vec![0u8; src_len];
        let _ = lz32::decompress_safe(src_bytes, &mut dst);
    }

    // Large output buffer to stress the raw-tail accounting.
    {
        // Cap at 1 MiB so the fuzzer doesn't OOM on tiny inputs.
        let large = (src_len.saturating_mul(255)).min(1 << 20);
        let mut dst = vec![0u8; large];
        let _ = lz32::decompress_safe(src_bytes, &mut dst);
    }
});
