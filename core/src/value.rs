//! The value cell.
//!
//! [JsValue] is the fixed-width representation of every runtime value: a payload union followed
//! by a tag. It is 16 bytes on every target, `Copy`, and passed by value across the C boundary.
//!
//! # Layout
//!
//! ```text
//! +----------------------------------+-----------+
//! | payload: i32 | f64 | *mut c_void | tag: i64  |
//! +----------------------------------+-----------+
//! ```
//!
//! Floats are always stored inline in the payload (no NaN-boxing). Every constructor initializes
//! the 8 bytes of the payload, unused bytes being zero, so that two values built the same way are
//! bit-identical (see [JsValue::phys_eq]).
//!
//! # Unchecked accessors
//!
//! The `get_*` extractors don't look at the tag: the caller is expected to have checked it. Using
//! the wrong extractor is a logic error which panics in debug builds and returns unspecified bits
//! in release builds. It is never memory-unsafe by itself, since the whole payload is always
//! initialized; only dereferencing a pointer payload is. The `as_*` methods and the `TryFrom`
//! conversions are the checked counterparts.
use std::{
    ffi::c_void,
    fmt,
    marker::{PhantomData, PhantomPinned},
    ptr::NonNull,
};

use crate::{
    block::RefCountHeader,
    error::ValueError,
    tag::{tag_has_ref_count, tag_is_float64, ValueTag},
};

/// The bit pattern of the canonical not-a-number double.
pub const FLOAT64_NAN_BITS: u64 = 0x7FF8_0000_0000_0000;

/// Returns the canonical not-a-number double, whose bits are [FLOAT64_NAN_BITS].
#[inline(always)]
pub const fn float64_nan() -> f64 {
    f64::from_bits(FLOAT64_NAN_BITS)
}

/// The payload of a [JsValue]. Which field is meaningful is determined by the tag.
#[repr(C)]
#[derive(Clone, Copy)]
pub union ValuePayload {
    int32: i32,
    float64: f64,
    ptr: PtrPayload,
    bits: u64,
}

/// A pointer padded to 8 bytes, so that pointer payloads initialize the whole union on 32-bit
/// targets too.
#[repr(C)]
#[derive(Clone, Copy)]
struct PtrPayload {
    ptr: *mut c_void,
    #[cfg(target_pointer_width = "32")]
    _pad: u32,
}

impl ValuePayload {
    const ZERO: Self = ValuePayload { bits: 0 };

    const fn from_int32(value: i32) -> Self {
        // The integer field sits at offset 0, which holds the low half of `bits` on little-endian
        // targets and the high half on big-endian ones.
        #[cfg(target_endian = "little")]
        let bits = value as u32 as u64;
        #[cfg(target_endian = "big")]
        let bits = (value as u32 as u64) << 32;

        ValuePayload { bits }
    }

    const fn from_float64(value: f64) -> Self {
        ValuePayload { float64: value }
    }

    const fn from_ptr(ptr: *mut c_void) -> Self {
        ValuePayload {
            ptr: PtrPayload {
                ptr,
                #[cfg(target_pointer_width = "32")]
                _pad: 0,
            },
        }
    }
}

/// An engine object, as seen through a value tagged [ValueTag::Object].
///
/// This is an opaque type: only its leading reference-count header is known at this level.
#[repr(C)]
pub struct JsObject {
    header: RefCountHeader,
    _opaque: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

impl JsObject {
    /// Returns the reference-count header of this object.
    pub fn header(&self) -> &RefCountHeader {
        &self.header
    }
}

/// The runtime value cell.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct JsValue {
    u: ValuePayload,
    tag: i64,
}

impl JsValue {
    const fn with_payload(tag: i32, u: ValuePayload) -> Self {
        let tag = tag as i64;
        JsValue { u, tag }
    }

    /// The `undefined` value.
    pub const fn undefined() -> Self {
        Self::with_payload(ValueTag::Undefined as i32, ValuePayload::ZERO)
    }

    /// The `null` value.
    pub const fn null() -> Self {
        Self::with_payload(ValueTag::Null as i32, ValuePayload::ZERO)
    }

    /// The marker of a binding that hasn't been initialized yet.
    pub const fn uninitialized() -> Self {
        Self::with_payload(ValueTag::Uninitialized as i32, ValuePayload::ZERO)
    }

    /// The marker returned by an operation that raised an exception. The exception itself is
    /// stored by the engine, not in the value.
    pub const fn exception() -> Self {
        Self::with_payload(ValueTag::Exception as i32, ValuePayload::ZERO)
    }

    /// The boolean `true`, with payload `1`.
    pub const fn bool_true() -> Self {
        Self::from_int(ValueTag::Bool as i32, 1)
    }

    /// The boolean `false`, with payload `0`.
    pub const fn bool_false() -> Self {
        Self::from_int(ValueTag::Bool as i32, 0)
    }

    /// The canonical NaN, a float value whose payload is [FLOAT64_NAN_BITS].
    pub const fn nan() -> Self {
        Self::float64(float64_nan())
    }

    /// Creates a boolean value. The payload is `1` for `true` and `0` for `false`.
    pub const fn bool_value(value: bool) -> Self {
        Self::from_int(ValueTag::Bool as i32, value as i32)
    }

    /// Creates a value with an arbitrary tag and a 32-bit integer payload.
    ///
    /// This is the generic constructor for every tag whose payload fits in 32 bits. No check is
    /// performed on `tag`.
    pub const fn from_int(tag: i32, value: i32) -> Self {
        Self::with_payload(tag, ValuePayload::from_int32(value))
    }

    /// Creates a value with an arbitrary tag and a pointer payload.
    ///
    /// The reference count of the pointee is left untouched: whether the new value steals an
    /// existing reference or stands for a new one (see [crate::block::dup_value]) is up to the
    /// caller.
    ///
    /// Building the value is always safe, but if `tag` carries a reference count, the unsafe
    /// operations reading through the payload ([Self::ref_count], [crate::block::free_value], ...)
    /// require `ptr` to point to a live block starting with a [RefCountHeader].
    pub const fn from_ptr(tag: i32, ptr: *mut c_void) -> Self {
        Self::with_payload(tag, ValuePayload::from_ptr(ptr))
    }

    /// Creates an integer value.
    pub const fn int32(value: i32) -> Self {
        Self::from_int(ValueTag::Int as i32, value)
    }

    /// Creates a float value.
    pub const fn float64(value: f64) -> Self {
        Self::with_payload(ValueTag::Float64 as i32, ValuePayload::from_float64(value))
    }

    /// Creates a number from an unsigned integer: an integer value if it fits in an `i32`, a
    /// float value otherwise.
    pub fn uint32(value: u32) -> Self {
        match i32::try_from(value) {
            Ok(value) => Self::int32(value),
            Err(_) => Self::float64(f64::from(value)),
        }
    }

    /// Creates a number from a 64-bit integer: an integer value if it fits in an `i32`, a float
    /// value otherwise (possibly rounded).
    pub fn int64(value: i64) -> Self {
        match i32::try_from(value) {
            Ok(value) => Self::int32(value),
            Err(_) => Self::float64(value as f64),
        }
    }

    /// Creates a catch offset, used by the interpreter to mark exception handlers on its stack.
    pub const fn catch_offset(offset: i32) -> Self {
        Self::from_int(ValueTag::CatchOffset as i32, offset)
    }

    /// Returns the raw tag of this value.
    #[inline(always)]
    pub const fn tag(&self) -> i32 {
        self.tag as i32
    }

    /// Returns the tag of this value as a [ValueTag], or an error if the tag is unknown.
    pub fn value_tag(&self) -> Result<ValueTag, ValueError> {
        ValueTag::try_from(self.tag())
    }

    /// Returns the integer payload.
    ///
    /// Valid for every tag with an inline integer payload ([ValueTag::Int], [ValueTag::Bool],
    /// [ValueTag::CatchOffset], or any tag built with [Self::from_int]).
    #[inline(always)]
    pub fn get_int(&self) -> i32 {
        debug_assert!(
            !tag_has_ref_count(self.tag()) && !tag_is_float64(self.tag()),
            "get_int on a value tagged {}",
            self.tag()
        );
        // Safety: the whole payload is initialized by every constructor.
        unsafe { self.u.int32 }
    }

    /// Returns the boolean payload. Valid for [ValueTag::Bool] only.
    #[inline(always)]
    pub fn get_bool(&self) -> bool {
        debug_assert!(
            self.tag == ValueTag::Bool as i64,
            "get_bool on a value tagged {}",
            self.tag()
        );
        // Safety: the whole payload is initialized by every constructor.
        unsafe { self.u.int32 != 0 }
    }

    /// Returns the float payload. Valid for [ValueTag::Float64] only.
    #[inline(always)]
    pub fn get_float64(&self) -> f64 {
        debug_assert!(
            tag_is_float64(self.tag()),
            "get_float64 on a value tagged {}",
            self.tag()
        );
        // Safety: the whole payload is initialized by every constructor.
        unsafe { self.u.float64 }
    }

    /// Returns the pointer payload. Valid for reference-counted tags only.
    #[inline(always)]
    pub fn get_ptr(&self) -> *mut c_void {
        debug_assert!(
            tag_has_ref_count(self.tag()),
            "get_ptr on a value tagged {}",
            self.tag()
        );
        // Safety: the whole payload is initialized by every constructor.
        unsafe { self.u.ptr.ptr }
    }

    /// Returns the pointer payload as an object pointer. Valid for [ValueTag::Object] only.
    ///
    /// This is distinct from [Self::get_ptr] because other reference-counted tags (strings,
    /// symbols, ...) point to blocks that aren't objects.
    #[inline(always)]
    pub fn get_object(&self) -> *mut JsObject {
        debug_assert!(
            self.tag == ValueTag::Object as i64,
            "get_object on a value tagged {}",
            self.tag()
        );
        // Safety: the whole payload is initialized by every constructor.
        unsafe { self.u.ptr.ptr.cast() }
    }

    /// Returns the integer payload if this is an integer value (tagged [ValueTag::Int]).
    pub fn as_int(&self) -> Option<i32> {
        (self.tag == ValueTag::Int as i64).then(|| self.get_int())
    }

    /// Returns the boolean payload if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        self.is_bool().then(|| self.get_bool())
    }

    /// Returns the float payload if this is a float value.
    pub fn as_float64(&self) -> Option<f64> {
        tag_is_float64(self.tag()).then(|| self.get_float64())
    }

    /// Returns the pointer payload if this value carries a reference count.
    pub fn as_ptr(&self) -> Option<*mut c_void> {
        self.has_ref_count().then(|| self.get_ptr())
    }

    /// Returns the object pointer if this is an object.
    pub fn as_object(&self) -> Option<*mut JsObject> {
        self.is_object().then(|| self.get_object())
    }

    /// Returns a pointer to the reference-count header of the pointee, or `None` if this value
    /// doesn't carry a reference count or holds a null pointer.
    pub fn header(&self) -> Option<NonNull<RefCountHeader>> {
        self.as_ptr().and_then(|ptr| NonNull::new(ptr.cast()))
    }

    /// Returns the reference count of the pointee if this value carries a reference count, or
    /// `-1` otherwise (including for a null pointer payload). This is a read-only query.
    ///
    /// # Safety
    ///
    /// If `self` carries a reference count, its payload must point to a live block starting with
    /// a [RefCountHeader].
    pub unsafe fn ref_count(&self) -> i32 {
        match self.header() {
            Some(header) => header.as_ref().get(),
            None => -1,
        }
    }

    /// Returns `true` if the payload points to a block starting with a reference-count header.
    #[inline(always)]
    pub const fn has_ref_count(&self) -> bool {
        tag_has_ref_count(self.tag())
    }

    /// Returns `true` for integer and float values.
    pub const fn is_number(&self) -> bool {
        self.tag == ValueTag::Int as i64 || tag_is_float64(self.tag())
    }

    pub const fn is_bool(&self) -> bool {
        self.tag == ValueTag::Bool as i64
    }

    pub const fn is_null(&self) -> bool {
        self.tag == ValueTag::Null as i64
    }

    pub const fn is_undefined(&self) -> bool {
        self.tag == ValueTag::Undefined as i64
    }

    pub const fn is_exception(&self) -> bool {
        self.tag == ValueTag::Exception as i64
    }

    pub const fn is_uninitialized(&self) -> bool {
        self.tag == ValueTag::Uninitialized as i64
    }

    pub const fn is_string(&self) -> bool {
        self.tag == ValueTag::String as i64
    }

    pub const fn is_symbol(&self) -> bool {
        self.tag == ValueTag::Symbol as i64
    }

    pub const fn is_object(&self) -> bool {
        self.tag == ValueTag::Object as i64
    }

    pub const fn is_big_int(&self) -> bool {
        self.tag == ValueTag::BigInt as i64
    }

    pub const fn is_big_float(&self) -> bool {
        self.tag == ValueTag::BigFloat as i64
    }

    pub const fn is_big_decimal(&self) -> bool {
        self.tag == ValueTag::BigDecimal as i64
    }

    /// Returns the 8 bytes of the payload as an integer, whatever the tag.
    pub fn payload_bits(&self) -> u64 {
        // Safety: the whole payload is initialized by every constructor.
        unsafe { self.u.bits }
    }

    /// Physical equality: returns `true` if both values have the same tag and the same payload
    /// bits. Two NaNs with the same bits are physically equal, while `0.0` and `-0.0` aren't.
    pub fn phys_eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.payload_bits() == other.payload_bits()
    }
}

/// Returns `true` if both values are integers. Gates the integer-only fast path of arithmetic
/// and comparison operators.
#[inline(always)]
pub const fn both_are_int(a: &JsValue, b: &JsValue) -> bool {
    // `ValueTag::Int` is zero, so the bitwise or is zero iff both tags are.
    (a.tag | b.tag) == 0
}

/// Returns `true` if both values are floats. Symmetric counterpart of [both_are_int] for the
/// float fast path.
#[inline(always)]
pub const fn both_are_float(a: &JsValue, b: &JsValue) -> bool {
    tag_is_float64(a.tag()) & tag_is_float64(b.tag())
}

impl TryFrom<JsValue> for i32 {
    type Error = ValueError;

    fn try_from(value: JsValue) -> Result<Self, Self::Error> {
        value.as_int().ok_or(ValueError::TagMismatch {
            expected: ValueTag::Int,
            found: value.tag(),
        })
    }
}

impl TryFrom<JsValue> for bool {
    type Error = ValueError;

    fn try_from(value: JsValue) -> Result<Self, Self::Error> {
        value.as_bool().ok_or(ValueError::TagMismatch {
            expected: ValueTag::Bool,
            found: value.tag(),
        })
    }
}

impl TryFrom<JsValue> for f64 {
    type Error = ValueError;

    fn try_from(value: JsValue) -> Result<Self, Self::Error> {
        value.as_float64().ok_or(ValueError::TagMismatch {
            expected: ValueTag::Float64,
            found: value.tag(),
        })
    }
}

impl From<bool> for JsValue {
    fn from(value: bool) -> Self {
        JsValue::bool_value(value)
    }
}

impl From<i32> for JsValue {
    fn from(value: i32) -> Self {
        JsValue::int32(value)
    }
}

impl From<f64> for JsValue {
    fn from(value: f64) -> Self {
        JsValue::float64(value)
    }
}

impl fmt::Debug for JsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value_tag() {
            Ok(ValueTag::Int) => write!(f, "JsValue(int: {})", self.get_int()),
            Ok(ValueTag::Bool) => write!(f, "JsValue(bool: {})", self.get_bool()),
            Ok(ValueTag::Float64) => write!(f, "JsValue(float64: {:?})", self.get_float64()),
            Ok(ValueTag::CatchOffset) => write!(f, "JsValue(catch_offset: {})", self.get_int()),
            Ok(tag) if tag.is_heap_backed() => write!(f, "JsValue({tag}: {:p})", self.get_ptr()),
            Ok(tag) => write!(f, "JsValue({tag})"),
            Err(_) => write!(
                f,
                "JsValue(tag: {}, bits: {:#018x})",
                self.tag(),
                self.payload_bits()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockRc;
    use pretty_assertions::assert_eq;
    use std::mem::{align_of, size_of};

    #[test]
    fn fixed_width() {
        assert_eq!(size_of::<JsValue>(), 16);
        assert_eq!(align_of::<JsValue>(), 8);
        assert_eq!(size_of::<ValuePayload>(), 8);
    }

    #[test]
    fn singletons() {
        assert_eq!(JsValue::undefined().tag(), ValueTag::Undefined as i32);
        assert_eq!(JsValue::null().tag(), ValueTag::Null as i32);
        assert_eq!(
            JsValue::uninitialized().tag(),
            ValueTag::Uninitialized as i32
        );
        assert_eq!(JsValue::exception().tag(), ValueTag::Exception as i32);
        assert!(JsValue::bool_true().get_bool());
        assert!(!JsValue::bool_false().get_bool());

        let nan = JsValue::nan();
        assert!(tag_is_float64(nan.tag()));
        assert!(nan.get_float64().is_nan());
        assert_eq!(nan.payload_bits(), FLOAT64_NAN_BITS);
        assert_eq!(float64_nan().to_bits(), FLOAT64_NAN_BITS);
    }

    #[test]
    fn singletons_are_bit_identical() {
        let makers: [fn() -> JsValue; 7] = [
            JsValue::undefined,
            JsValue::null,
            JsValue::uninitialized,
            JsValue::exception,
            JsValue::bool_true,
            JsValue::bool_false,
            JsValue::nan,
        ];

        for make in makers {
            assert!(make().phys_eq(&make()));
        }

        assert!(JsValue::bool_true().phys_eq(&JsValue::bool_value(true)));
        assert!(JsValue::bool_false().phys_eq(&JsValue::bool_value(false)));
        assert!(!JsValue::undefined().phys_eq(&JsValue::null()));
        assert!(!JsValue::bool_true().phys_eq(&JsValue::int32(1)));
    }

    #[test]
    fn small_int_scenario() {
        let v = JsValue::from_int(ValueTag::Int as i32, 42);

        assert_eq!(v.tag(), ValueTag::Int as i32);
        assert_eq!(v.get_int(), 42);
        assert!(!v.has_ref_count());
        assert_eq!(unsafe { v.ref_count() }, -1);
        assert!(v.is_number());
    }

    #[test]
    fn make_int_with_arbitrary_tags() {
        let b = JsValue::from_int(ValueTag::Bool as i32, 1);
        assert!(b.is_bool());
        assert!(b.get_bool());
        assert_eq!(b.get_int(), 1);

        let custom = JsValue::from_int(42, -7);
        assert_eq!(custom.tag(), 42);
        assert_eq!(custom.get_int(), -7);
        assert!(custom.value_tag().is_err());

        let offset = JsValue::catch_offset(12);
        assert_eq!(offset.tag(), ValueTag::CatchOffset as i32);
        assert_eq!(offset.get_int(), 12);
    }

    #[test]
    fn extreme_ints_and_floats() {
        for i in [i32::MIN, -1, 0, 1, i32::MAX] {
            assert_eq!(JsValue::int32(i).get_int(), i);
        }

        for x in [
            0.0,
            -0.0,
            1.5,
            f64::MIN_POSITIVE,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ] {
            assert_eq!(JsValue::float64(x).get_float64().to_bits(), x.to_bits());
        }

        assert!(!JsValue::float64(0.0).phys_eq(&JsValue::float64(-0.0)));
    }

    #[test]
    fn number_normalization() {
        assert!(JsValue::uint32(1).phys_eq(&JsValue::int32(1)));
        let max = JsValue::uint32(i32::MAX as u32);
        assert!(max.phys_eq(&JsValue::int32(i32::MAX)));
        assert_eq!(
            JsValue::uint32(u32::MAX).as_float64(),
            Some(f64::from(u32::MAX))
        );

        assert!(JsValue::int64(-5).phys_eq(&JsValue::int32(-5)));
        let min = JsValue::int64(i64::from(i32::MIN));
        assert!(min.phys_eq(&JsValue::int32(i32::MIN)));
        assert_eq!(
            JsValue::int64(i64::from(i32::MAX) + 1).as_float64(),
            Some(2147483648.0)
        );
    }

    #[test]
    fn both_are_int_requires_identical_int_tags() {
        let three = JsValue::from_int(ValueTag::Int as i32, 3);
        let five = JsValue::from_int(ValueTag::Int as i32, 5);

        assert!(both_are_int(&three, &five));
        assert!(!both_are_int(&three, &JsValue::bool_value(true)));
        assert!(!both_are_int(&JsValue::bool_value(true), &three));
        assert!(!both_are_int(&three, &JsValue::float64(5.0)));
        assert!(!both_are_int(&JsValue::null(), &JsValue::null()));
    }

    #[test]
    fn both_are_float_is_symmetric_and_reflexive() {
        let x = JsValue::float64(1.0);
        let y = JsValue::nan();
        let i = JsValue::int32(1);

        assert!(both_are_float(&x, &x));
        assert!(both_are_float(&x, &y));
        assert!(both_are_float(&y, &x));
        assert!(!both_are_float(&x, &i));
        assert!(!both_are_float(&i, &x));
        assert!(!both_are_float(&i, &i));
    }

    #[test]
    fn checked_accessors() {
        let i = JsValue::int32(7);
        let b = JsValue::bool_true();
        let x = JsValue::float64(2.5);

        assert_eq!(i.as_int(), Some(7));
        assert_eq!(b.as_int(), None);
        assert_eq!(b.as_bool(), Some(true));
        assert_eq!(i.as_bool(), None);
        assert_eq!(x.as_float64(), Some(2.5));
        assert_eq!(i.as_float64(), None);
        assert!(i.as_ptr().is_none());
        assert!(i.as_object().is_none());
        assert!(i.header().is_none());

        assert_eq!(i32::try_from(i), Ok(7));
        assert_eq!(bool::try_from(b), Ok(true));
        assert_eq!(f64::try_from(x), Ok(2.5));
        assert_eq!(
            i32::try_from(x),
            Err(ValueError::TagMismatch {
                expected: ValueTag::Int,
                found: ValueTag::Float64 as i32,
            })
        );
    }

    #[test]
    fn heap_object_scenario() {
        let block = BlockRc::new(String::from("an object"));
        let ptr = block.header_ptr().as_ptr().cast::<c_void>();
        let v = JsValue::from_ptr(ValueTag::Object as i32, ptr);

        assert!(v.has_ref_count());
        assert!(v.is_object());
        assert_eq!(unsafe { v.ref_count() }, 1);
        assert_eq!(v.get_object().cast::<c_void>(), ptr);
        assert_eq!(v.get_ptr(), ptr);
        assert_eq!(v.as_object().map(|o| o.cast::<c_void>()), Some(ptr));

        // The object header and the block header are the same memory.
        let header = unsafe { (*v.get_object()).header() };
        assert_eq!(header.get(), 1);

        let copy = block.clone();
        assert_eq!(unsafe { v.ref_count() }, 2);
        drop(copy);
        assert_eq!(unsafe { v.ref_count() }, 1);
    }

    #[test]
    fn pointer_payloads() {
        const NULL_OBJECT: JsValue =
            JsValue::from_ptr(ValueTag::Object as i32, std::ptr::null_mut());
        assert!(NULL_OBJECT.is_object());
        assert_eq!(NULL_OBJECT.payload_bits(), 0);

        let mut byte = 0u8;
        let ptr = (&mut byte as *mut u8).cast::<c_void>();
        let v = JsValue::from_ptr(ValueTag::String as i32, ptr);
        assert_eq!(v.get_ptr(), ptr);
        if cfg!(target_pointer_width = "64") {
            assert_eq!(v.payload_bits(), ptr as usize as u64);
        }
        assert!(v.phys_eq(&JsValue::from_ptr(ValueTag::String as i32, ptr)));
    }

    #[test]
    fn heap_backed_tags_only() {
        for tag in ValueTag::ALL {
            let v = if tag.is_heap_backed() {
                JsValue::from_ptr(tag as i32, std::ptr::null_mut())
            } else {
                JsValue::from_int(tag as i32, 0)
            };
            assert_eq!(v.has_ref_count(), (tag as i32) < 0, "{tag}");
        }

        // A null pointer never gets dereferenced.
        let null_object = JsValue::from_ptr(ValueTag::Object as i32, std::ptr::null_mut());
        assert!(null_object.header().is_none());
        assert_eq!(unsafe { null_object.ref_count() }, -1);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", JsValue::int32(99)), "JsValue(int: 99)");
        assert_eq!(
            format!("{:?}", JsValue::bool_false()),
            "JsValue(bool: false)"
        );
        assert_eq!(
            format!("{:?}", JsValue::float64(0.5)),
            "JsValue(float64: 0.5)"
        );
        assert_eq!(format!("{:?}", JsValue::null()), "JsValue(null)");
        let unknown = format!("{:?}", JsValue::from_int(100, 1));
        assert!(unknown.contains("tag: 100"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "get_float64 on a value tagged 0")]
    fn wrong_extractor_panics_in_debug() {
        JsValue::int32(1).get_float64();
    }
}
