//! C bindings for the value cell.
//!
//! Values are passed and returned by value as [JsValue], whose layout is the one of the C struct
//!
//! ```c
//! typedef struct jsval {
//!     union { int32_t int32; double float64; void *ptr; } u;
//!     int64_t tag;
//! } jsval_t;
//! ```
//!
//! Predicates return `1` for true and `0` for false. None of these functions check the tag of
//! their arguments: as for the Rust extractors, the caller is expected to test it first.

#![allow(clippy::missing_safety_doc)]
#![allow(non_camel_case_types)]
#![deny(missing_docs)]

use std::ffi::{c_int, c_void};

use jsval_core::block::body_from_raw;

use crate::{JsObject, JsValue, Value};

/// A value cell. See the module documentation for its C layout.
pub type jsval_t = JsValue;

/// A callback releasing the user data of an opaque object.
pub type jsval_finalizer = extern "C" fn(user_data: *mut c_void);

/// The body of objects created by [`jsval_new_opaque_object`].
struct OpaqueObject {
    user_data: *mut c_void,
    finalizer: Option<jsval_finalizer>,
}

impl Drop for OpaqueObject {
    fn drop(&mut self) {
        if let Some(finalizer) = self.finalizer {
            finalizer(self.user_data);
        }
    }
}

/// The `undefined` value.
#[no_mangle]
pub extern "C" fn jsval_undefined() -> jsval_t {
    JsValue::undefined()
}

/// The `null` value.
#[no_mangle]
pub extern "C" fn jsval_null() -> jsval_t {
    JsValue::null()
}

/// The boolean `true`.
#[no_mangle]
pub extern "C" fn jsval_true() -> jsval_t {
    JsValue::bool_true()
}

/// The boolean `false`.
#[no_mangle]
pub extern "C" fn jsval_false() -> jsval_t {
    JsValue::bool_false()
}

/// The exception marker.
#[no_mangle]
pub extern "C" fn jsval_exception() -> jsval_t {
    JsValue::exception()
}

/// The uninitialized marker.
#[no_mangle]
pub extern "C" fn jsval_uninitialized() -> jsval_t {
    JsValue::uninitialized()
}

/// The canonical NaN value.
#[no_mangle]
pub extern "C" fn jsval_nan() -> jsval_t {
    JsValue::nan()
}

/// The canonical NaN double, with bits `0x7FF8000000000000`.
#[no_mangle]
pub extern "C" fn jsval_float64_nan() -> f64 {
    crate::float64_nan()
}

/// Create a boolean. Any non-zero `b` is true.
#[no_mangle]
pub extern "C" fn jsval_new_bool(b: c_int) -> jsval_t {
    JsValue::bool_value(b != 0)
}

/// Create an integer.
#[no_mangle]
pub extern "C" fn jsval_new_int32(val: i32) -> jsval_t {
    JsValue::int32(val)
}

/// Create a number from an unsigned integer. The result is an integer if `val` fits in an
/// `int32_t`, and a float otherwise.
#[no_mangle]
pub extern "C" fn jsval_new_uint32(val: u32) -> jsval_t {
    JsValue::uint32(val)
}

/// Create a number from a 64-bit integer. The result is an integer if `val` fits in an
/// `int32_t`, and a float otherwise.
#[no_mangle]
pub extern "C" fn jsval_new_int64(val: i64) -> jsval_t {
    JsValue::int64(val)
}

/// Create a float.
#[no_mangle]
pub extern "C" fn jsval_new_float64(val: f64) -> jsval_t {
    JsValue::float64(val)
}

/// Create a value with an arbitrary tag and an integer payload.
#[no_mangle]
pub extern "C" fn jsval_mkval(tag: c_int, val: i32) -> jsval_t {
    JsValue::from_int(tag, val)
}

/// Create a value with an arbitrary tag and a pointer payload.
///
/// The reference count of the pointee isn't incremented: the new value takes over a reference
/// owned by the caller.
#[no_mangle]
pub extern "C" fn jsval_mkptr(tag: c_int, ptr: *mut c_void) -> jsval_t {
    JsValue::from_ptr(tag, ptr)
}

/// The tag of a value.
#[no_mangle]
pub extern "C" fn jsval_get_tag(v: jsval_t) -> c_int {
    v.tag()
}

/// The integer payload of a value with an inline integer payload.
#[no_mangle]
pub extern "C" fn jsval_get_int(v: jsval_t) -> i32 {
    v.get_int()
}

/// The payload of a boolean, as `0` or `1`.
#[no_mangle]
pub extern "C" fn jsval_get_bool(v: jsval_t) -> c_int {
    v.get_bool() as c_int
}

/// The payload of a float.
#[no_mangle]
pub extern "C" fn jsval_get_float64(v: jsval_t) -> f64 {
    v.get_float64()
}

/// The pointer payload of a reference-counted value.
#[no_mangle]
pub extern "C" fn jsval_get_ptr(v: jsval_t) -> *mut c_void {
    v.get_ptr()
}

/// The pointer payload of an object.
#[no_mangle]
pub extern "C" fn jsval_get_object(v: jsval_t) -> *mut JsObject {
    v.get_object()
}

/// Is `tag` the tag of floats?
#[no_mangle]
pub extern "C" fn jsval_tag_is_float64(tag: c_int) -> c_int {
    crate::tag_is_float64(tag) as c_int
}

/// Does `v` point to a reference-counted block?
#[no_mangle]
pub extern "C" fn jsval_has_ref_count(v: jsval_t) -> c_int {
    v.has_ref_count() as c_int
}

/// Are both values integers?
#[no_mangle]
pub extern "C" fn jsval_both_are_int(a: jsval_t, b: jsval_t) -> c_int {
    crate::both_are_int(&a, &b) as c_int
}

/// Are both values floats?
#[no_mangle]
pub extern "C" fn jsval_both_are_float(a: jsval_t, b: jsval_t) -> c_int {
    crate::both_are_float(&a, &b) as c_int
}

/// The reference count of the pointee of `v`, or `-1` if `v` isn't reference counted.
///
/// If `v` is reference counted, its pointee must be alive.
#[no_mangle]
pub unsafe extern "C" fn jsval_get_ref_count(v: jsval_t) -> c_int {
    v.ref_count()
}

/// Create a new reference to the pointee of `v`, and return `v`.
///
/// Does nothing for values that aren't reference counted. The returned value must eventually be
/// released with [`jsval_free`].
#[no_mangle]
pub unsafe extern "C" fn jsval_dup(v: jsval_t) -> jsval_t {
    crate::dup_value(v)
}

/// Release the reference owned by `v`. The pointee is freed when this was its last reference.
///
/// Does nothing for values that aren't reference counted. The pointee must have been allocated
/// by this library, for example with [`jsval_new_opaque_object`].
#[no_mangle]
pub unsafe extern "C" fn jsval_free(v: jsval_t) {
    if v.has_ref_count() && v.get_ptr().is_null() {
        log::debug!(
            "jsval_free: ignoring a value tagged {} with a null pointer",
            v.tag()
        );
        return;
    }

    crate::free_value(v)
}

/// Allocate an object wrapping `user_data`, with a reference count of one.
///
/// If `finalizer` isn't NULL, it is called with `user_data` when the object is freed. Free the
/// object with [`jsval_free`].
#[no_mangle]
pub extern "C" fn jsval_new_opaque_object(
    user_data: *mut c_void,
    finalizer: Option<jsval_finalizer>,
) -> jsval_t {
    Value::new_object(OpaqueObject {
        user_data,
        finalizer,
    })
    .into_raw()
}

/// The user data of an object created by [`jsval_new_opaque_object`], or NULL if `v` isn't an
/// object.
///
/// If `v` is an object, it must have been created by [`jsval_new_opaque_object`] and be alive.
#[no_mangle]
pub unsafe extern "C" fn jsval_opaque_object_data(v: jsval_t) -> *mut c_void {
    if !v.is_object() {
        return std::ptr::null_mut();
    }

    match v.header() {
        Some(header) => body_from_raw::<OpaqueObject>(header).user_data,
        None => std::ptr::null_mut(),
    }
}
