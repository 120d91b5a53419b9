//! Errors of the checked value accessors.
//!
//! The unchecked accessors of [crate::value::JsValue] never fail: using the wrong one is a
//! contract violation caught by debug assertions. Only the checked surface (`TryFrom`
//! conversions, [crate::block::BlockRc::into_value], ...) reports errors, through [ValueError].
use crate::tag::ValueTag;

/// An error raised by the checked value accessors.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    /// A value didn't have the tag required by the accessor.
    #[error("expected a value tagged `{expected}`, got tag {found}")]
    TagMismatch { expected: ValueTag, found: i32 },
    /// A raw tag isn't one of the known tags.
    #[error("unknown value tag {0}")]
    UnknownTag(i32),
    /// A heap block was wrapped with a tag that doesn't carry a reference count.
    #[error("values tagged `{0}` don't carry a reference count")]
    NotRefCounted(ValueTag),
}
