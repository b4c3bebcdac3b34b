//! Error types shared by the block and frame layers.
//!
//! The numeric codes mirror lz32.h: `LZ32_SUCCESS` is the `Ok` path,
//! `LZ32_EINVAL` / `LZ32_EDATA` / `LZ32_EUNKNOWN` map to the three variants
//! below.  The safe decompressor distinguishes three data-corruption
//! conditions internally ([`DecodeFault`]); all of them fold to
//! [`Lz32Error::CorruptBlock`] at the public boundary, exactly as the C
//! interface folds its internal codes 1–3 to `LZ32_EDATA`.

use thiserror::Error;

/// Public error type for every lz32 entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[repr(i32)]
pub enum Lz32Error {
    /// A caller-supplied parameter violates a precondition: empty or
    /// out-of-range length, misaligned buffer, wrong block-size multiple.
    /// No work is attempted.
    #[error("invalid argument")]
    InvalidArgument = 1,

    /// The compressed block is malformed.  Only decompression reports this;
    /// compression always produces either a compressed or a raw block.
    #[error("corrupt block")]
    CorruptBlock = 2,

    /// Internal inconsistency.  A correct build never returns this.
    #[error("unknown error")]
    Unknown = 15,
}

impl Lz32Error {
    /// Numeric code of the original C interface (`LZ32_EINVAL` etc.).
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Internal decode faults detected by the safe decompressor.
///
/// The messages are the ones the C build logs before folding to `LZ32_EDATA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum DecodeFault {
    /// The raw tail left between the literal cursor and the token region is
    /// shorter than the destination bytes still owed.
    #[error("decompression stream overlap")]
    StreamOverlap,

    /// A token violates `MO = 0 ⇒ ML = 0` / `MO ≠ 0 ⇒ ML ≥ 5`.
    #[error("invalid sequence token")]
    InvalidToken,

    /// A literal or match copy would read before a buffer start or run past
    /// either buffer's end.
    #[error("data copy overlap")]
    CopyOverlap,
}

impl From<DecodeFault> for Lz32Error {
    fn from(_: DecodeFault) -> Self {
        Lz32Error::CorruptBlock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_header() {
        assert_eq!(Lz32Error::InvalidArgument.code(), 1);
        assert_eq!(Lz32Error::CorruptBlock.code(), 2);
        assert_eq!(Lz32Error::Unknown.code(), 15);
    }

    #[test]
    fn faults_fold_to_edata() {
        for fault in [
            DecodeFault::StreamOverlap,
            DecodeFault::InvalidToken,
            DecodeFault::CopyOverlap,
        ] {
            assert_eq!(Lz32Error::from(fault), Lz32Error::CorruptBlock);
        }
    }

    #[test]
    fn display_strings() {
        assert_eq!(Lz32Error::InvalidArgument.to_string(), "invalid argument");
        assert_eq!(
            DecodeFault::StreamOverlap.to_string(),
            "decompression stream overlap"
        );
        assert_eq!(
            DecodeFault::InvalidToken.to_string(),
            "invalid sequence token"
        );
        assert_eq!(DecodeFault::CopyOverlap.to_string(), "data copy overlap");
    }
}
