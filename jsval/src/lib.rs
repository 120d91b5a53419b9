//! A stable interface to the jsval value cell.
//!
//! The value cell itself is implemented in `jsval-core`. This crate re-exports the parts of it
//! that embedders are expected to rely on and, with the `capi` feature (enabled by default),
//! exposes them as a flat C API. Its goals are:
//!
//! - Stability: the layout of [JsValue] and the numbering of [ValueTag] are part of the ABI and
//!   don't change.
//! - Embeddability: every operation is available to C callers without going through Rust types.

pub use jsval_core::{
    both_are_float, both_are_int, dup_value, float64_nan, free_value, tag_has_ref_count,
    tag_is_float64, BlockRc, JsObject, JsValue, RefCountHeader, Value, ValueContentRef, ValueError,
    ValueTag, FLOAT64_NAN_BITS,
};

/// C callers pass [JsValue] by value and read the header of blocks directly, so both layouts are
/// fixed. This is checked at compile time without needing a dependency like
/// [static_assertions][https://crates.io/crates/static_assertions]. Courtesy of
/// [matklad][https://users.rust-lang.org/t/ensure-that-struct-t-has-size-n-at-compile-time/61108/4].
const _ENSURE_VALUE_IS_16_BYTES: () = [(); 1][(std::mem::size_of::<JsValue>() == 16) as usize ^ 1];
const _ENSURE_HEADER_IS_4_BYTES: () =
    [(); 1][(std::mem::size_of::<RefCountHeader>() == 4) as usize ^ 1];

#[cfg(feature = "capi")]
pub mod capi;
