//! An owning view of values.
//!
//! [JsValue] is `Copy` and leaves the reference-count bookkeeping to the caller. [Value] owns one
//! reference instead: cloning it dups the value and dropping it frees the value, as for
//! [crate::block::BlockRc].
use std::{fmt, ops::Deref};

use crate::{
    block::{body_from_raw, dup_value, free_value, BlockRc, RefCountHeader},
    error::ValueError,
    tag::ValueTag,
    value::JsValue,
};

/// A value owning one reference to its pointee, if any.
///
/// # Invariant
///
/// If the inner value carries a reference count and a non-null pointer, the pointer is to a live
/// block allocated by [BlockRc::new], and this value owns one of its references.
pub struct Value(JsValue);

/// A borrowed, decoded view of a [Value], for matching on the content instead of testing tags.
#[derive(Debug, Clone, Copy)]
pub enum ValueContentRef<'a> {
    Undefined,
    Null,
    Uninitialized,
    Exception,
    CatchOffset(i32),
    Bool(bool),
    Int(i32),
    Float64(f64),
    /// A value with a reference count. `header` is the header of the pointee, which is kept alive
    /// by the borrowed value.
    Heap {
        tag: i32,
        header: &'a RefCountHeader,
    },
    /// A value with an inline payload and an unknown tag, or a reference-counted tag with a null
    /// pointer.
    Other { tag: i32, bits: u64 },
}

impl Value {
    pub const fn undefined() -> Self {
        Value(JsValue::undefined())
    }

    pub const fn null() -> Self {
        Value(JsValue::null())
    }

    pub const fn uninitialized() -> Self {
        Value(JsValue::uninitialized())
    }

    pub const fn exception() -> Self {
        Value(JsValue::exception())
    }

    pub const fn nan() -> Self {
        Value(JsValue::nan())
    }

    /// Wraps a block as a value with the given reference-counted tag. The reference held by
    /// `block` is moved into the value.
    pub fn from_block<T: 'static>(tag: ValueTag, block: BlockRc<T>) -> Result<Self, ValueError> {
        block.into_value(tag).map(Value)
    }

    /// Allocates a new block holding `body` and wraps it as an object.
    ///
    /// ```
    /// # use jsval_core::Value;
    /// let obj = Value::new_object(String::from("body"));
    /// assert!(obj.is_object());
    /// assert_eq!(obj.ref_count(), 1);
    /// ```
    ///
    /// The body can't borrow anything, since the value may outlive the borrow:
    ///
    /// ```compile_fail
    /// # use jsval_core::Value;
    /// let local = String::from("body");
    /// let obj = Value::new_object(&local);
    /// drop(local);
    /// drop(obj);
    /// ```
    pub fn new_object<T: 'static>(body: T) -> Self {
        let block = BlockRc::new(body);
        Value(block.into_value_unchecked(ValueTag::Object as i32))
    }

    /// Takes ownership of a raw value, without incrementing its reference count.
    ///
    /// # Safety
    ///
    /// If `value` carries a reference count and a non-null pointer, the pointee must be a live
    /// block allocated by [BlockRc::new], and the caller must give up one of its references.
    pub unsafe fn from_raw(value: JsValue) -> Self {
        Value(value)
    }

    /// Converts this value to a raw value, transferring the owned reference to the caller, who
    /// becomes responsible for freeing it (see [free_value]).
    pub fn into_raw(self) -> JsValue {
        let value = self.0;
        std::mem::forget(self);
        value
    }

    /// Returns a copy of the raw value, without incrementing the reference count. The copy is
    /// only valid as long as `self` is alive.
    pub fn as_raw(&self) -> JsValue {
        self.0
    }

    /// Returns the reference count of the pointee, or `-1` if this value doesn't carry one.
    pub fn ref_count(&self) -> i32 {
        // Safety: the pointee, if any, is kept alive by `self`.
        unsafe { self.0.ref_count() }
    }

    /// Decodes this value.
    pub fn content_ref(&self) -> ValueContentRef<'_> {
        let v = &self.0;

        match v.value_tag() {
            Ok(ValueTag::Undefined) => ValueContentRef::Undefined,
            Ok(ValueTag::Null) => ValueContentRef::Null,
            Ok(ValueTag::Uninitialized) => ValueContentRef::Uninitialized,
            Ok(ValueTag::Exception) => ValueContentRef::Exception,
            Ok(ValueTag::CatchOffset) => ValueContentRef::CatchOffset(v.get_int()),
            Ok(ValueTag::Bool) => ValueContentRef::Bool(v.get_bool()),
            Ok(ValueTag::Int) => ValueContentRef::Int(v.get_int()),
            Ok(ValueTag::Float64) => ValueContentRef::Float64(v.get_float64()),
            _ => match v.header() {
                Some(header) => ValueContentRef::Heap {
                    tag: v.tag(),
                    // Safety: the pointee is kept alive by `self` for the lifetime of the borrow.
                    header: unsafe { header.as_ref() },
                },
                None => ValueContentRef::Other {
                    tag: v.tag(),
                    bits: v.payload_bits(),
                },
            },
        }
    }

    /// Returns a reference to the body of the pointee, or `None` if this value doesn't carry a
    /// reference count or holds a null pointer.
    ///
    /// # Safety
    ///
    /// The pointee must have been allocated as a `BlockRc<T>`.
    pub unsafe fn downcast_ref<T>(&self) -> Option<&T> {
        self.0.header().map(|header| body_from_raw::<T>(header))
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        // Safety: guaranteed by the invariant of `Value`.
        Value(unsafe { dup_value(self.0) })
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        // Safety: guaranteed by the invariant of `Value`, and the reference is given up here.
        unsafe { free_value(self.0) }
    }
}

impl Deref for Value {
    type Target = JsValue;

    fn deref(&self) -> &JsValue {
        &self.0
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::undefined()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value(JsValue::bool_value(b))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value(JsValue::int32(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value(JsValue::float64(x))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
