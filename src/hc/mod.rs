//! High-ratio chained compression engine (levels 4–9).
//!
//! Emits the same block format as the balanced engine in `crate::block`; the
//! only difference is match quality.  A 2¹⁶-entry chain table lets the engine
//! revisit every previous same-bucket position inside the window and keep the
//! longest match instead of the most recent one.

pub mod compress;

pub(crate) use compress::compress_chained;
