//! Thin wrapper around the `xxhash-rust` crate providing the XXH64-derived
//! checksum used by the framed format (the footer slot lz32.h sketches as
//! `xxh64_hash_low32`).

/// Low 32 bits of the one-shot XXH64 of `data`, seed 0.
#[inline]
pub fn xxh64_low32(data: &[u8]) -> u32 {
    xxhash_rust::xxh64::xxh64(data, 0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_deterministic_and_spread() {
        let a = xxh64_low32(b"lz32");
        let b = xxh64_low32(b"lz32");
        let c = xxh64_low32(b"lz33");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn empty_input_reference_value() {
        // Low half of XXH64("") with seed 0 (0xEF46DB3751D8E999).
        assert_eq!(xxh64_low32(b""), 0x51D8_E999);
    }
}
