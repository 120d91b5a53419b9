//! The value cell of a QuickJS-style engine.
//!
//! Every runtime value (`undefined`, `null`, booleans, small integers, doubles, heap objects and
//! the engine's internal markers) is represented by a [JsValue]: a 16-byte record made of a
//! payload union and a tag, which can be passed by value across the C boundary without allocating
//! for primitives.
//!
//! Heap-backed values point to blocks starting with a [RefCountHeader]. [BlockRc] allocates such
//! blocks, [dup_value] and [free_value] implement the reference-counting protocol over raw values,
//! and [Value] ties this protocol to Rust ownership.

pub(crate) mod metrics;

pub mod block;
pub mod error;
pub mod owned;
pub mod tag;
pub mod value;

pub use block::{dup_value, free_value, BlockRc, RefCountHeader};
pub use error::ValueError;
pub use owned::{Value, ValueContentRef};
pub use tag::{tag_has_ref_count, tag_is_float64, ValueTag};
pub use value::{
    both_are_float, both_are_int, float64_nan, JsObject, JsValue, ValuePayload, FLOAT64_NAN_BITS,
};
