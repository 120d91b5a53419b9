//! Value tags.
//!
//! The tag of a [crate::value::JsValue] is a small signed integer shared with the embedding
//! engine. Tags are part of the ABI: their numeric values are fixed and are never renumbered.
//! Every tag whose payload is a pointer to a reference-counted block is negative.
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

use crate::error::ValueError;

/// The known value tags.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
///////////
// CAUTION
///////////
// The numeric values are shared with the embedding engine and with the C API. Tags `-6` to `-4`
// are reserved. If you add a tag, update `ValueTag::FIRST`, `TryFrom<i32>` and `ValueTag::ALL`.
pub enum ValueTag {
    BigDecimal = -11,
    BigInt = -10,
    BigFloat = -9,
    Symbol = -8,
    String = -7,
    /// Used internally by the engine.
    Module = -3,
    /// Used internally by the engine.
    FunctionBytecode = -2,
    Object = -1,
    Int = 0,
    Bool = 1,
    Null = 2,
    Undefined = 3,
    Uninitialized = 4,
    CatchOffset = 5,
    Exception = 6,
    Float64 = 7,
}

impl ValueTag {
    /// The lowest tag. All the tags in `FIRST..0` carry a reference count.
    pub const FIRST: i32 = ValueTag::BigDecimal as i32;

    /// Every known tag, in increasing numeric order.
    pub const ALL: [ValueTag; 16] = [
        ValueTag::BigDecimal,
        ValueTag::BigInt,
        ValueTag::BigFloat,
        ValueTag::Symbol,
        ValueTag::String,
        ValueTag::Module,
        ValueTag::FunctionBytecode,
        ValueTag::Object,
        ValueTag::Int,
        ValueTag::Bool,
        ValueTag::Null,
        ValueTag::Undefined,
        ValueTag::Uninitialized,
        ValueTag::CatchOffset,
        ValueTag::Exception,
        ValueTag::Float64,
    ];

    /// Returns `true` if values with this tag point to a reference-counted block.
    pub const fn is_heap_backed(self) -> bool {
        tag_has_ref_count(self as i32)
    }

    /// A short lowercase name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ValueTag::BigDecimal => "big_decimal",
            ValueTag::BigInt => "big_int",
            ValueTag::BigFloat => "big_float",
            ValueTag::Symbol => "symbol",
            ValueTag::String => "string",
            ValueTag::Module => "module",
            ValueTag::FunctionBytecode => "function_bytecode",
            ValueTag::Object => "object",
            ValueTag::Int => "int",
            ValueTag::Bool => "bool",
            ValueTag::Null => "null",
            ValueTag::Undefined => "undefined",
            ValueTag::Uninitialized => "uninitialized",
            ValueTag::CatchOffset => "catch_offset",
            ValueTag::Exception => "exception",
            ValueTag::Float64 => "float64",
        }
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ValueTag> for i32 {
    fn from(tag: ValueTag) -> Self {
        tag as i32
    }
}

impl TryFrom<i32> for ValueTag {
    type Error = ValueError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        // The tag space has a hole (`-6..=-4`), so we can't just bound-check and transmute.
        match value {
            -11 => Ok(ValueTag::BigDecimal),
            -10 => Ok(ValueTag::BigInt),
            -9 => Ok(ValueTag::BigFloat),
            -8 => Ok(ValueTag::Symbol),
            -7 => Ok(ValueTag::String),
            -3 => Ok(ValueTag::Module),
            -2 => Ok(ValueTag::FunctionBytecode),
            -1 => Ok(ValueTag::Object),
            0 => Ok(ValueTag::Int),
            1 => Ok(ValueTag::Bool),
            2 => Ok(ValueTag::Null),
            3 => Ok(ValueTag::Undefined),
            4 => Ok(ValueTag::Uninitialized),
            5 => Ok(ValueTag::CatchOffset),
            6 => Ok(ValueTag::Exception),
            7 => Ok(ValueTag::Float64),
            other => Err(ValueError::UnknownTag(other)),
        }
    }
}

/// Returns `true` if `tag` denotes a floating-point value.
///
/// Floats are always stored inline, so this is exactly the [ValueTag::Float64] tag. Arithmetic
/// fast paths rely on this predicate alone to decide whether a payload is a double.
#[inline(always)]
pub const fn tag_is_float64(tag: i32) -> bool {
    tag == ValueTag::Float64 as i32
}

/// Returns `true` if `tag` denotes a value whose payload points to a block starting with a
/// reference-count header.
///
/// Reference-counted tags are exactly the ones in `ValueTag::FIRST..0`. Seen as unsigned, those
/// are the largest possible values, which makes the check a single comparison.
#[inline(always)]
pub const fn tag_has_ref_count(tag: i32) -> bool {
    (tag as u32) >= (ValueTag::FIRST as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn stable_numbering() {
        assert_eq!(i32::from(ValueTag::BigDecimal), -11);
        assert_eq!(i32::from(ValueTag::String), -7);
        assert_eq!(i32::from(ValueTag::Object), -1);
        assert_eq!(i32::from(ValueTag::Int), 0);
        assert_eq!(i32::from(ValueTag::Exception), 6);
        assert_eq!(i32::from(ValueTag::Float64), 7);
        assert_eq!(ValueTag::FIRST, -11);
    }

    #[test]
    fn try_from_roundtrips_known_tags() {
        for tag in ValueTag::ALL {
            assert_eq!(ValueTag::try_from(i32::from(tag)), Ok(tag));
        }
    }

    #[test]
    fn try_from_rejects_holes_and_out_of_range() {
        for raw in [-12, -6, -5, -4, 8, i32::MIN, i32::MAX] {
            assert_matches!(ValueTag::try_from(raw), Err(ValueError::UnknownTag(t)) if t == raw);
        }
    }

    #[test]
    fn only_float64_is_float() {
        for raw in -64..64 {
            assert_eq!(tag_is_float64(raw), raw == 7, "tag {raw}");
        }
        assert!(!tag_is_float64(i32::MIN));
        assert!(!tag_is_float64(i32::MAX));
    }

    #[test]
    fn ref_counted_tags_are_the_negative_range() {
        for raw in -64..64 {
            assert_eq!(
                tag_has_ref_count(raw),
                (ValueTag::FIRST..0).contains(&raw),
                "tag {raw}"
            );
        }

        for tag in ValueTag::ALL {
            assert_eq!(tag.is_heap_backed(), (tag as i32) < 0, "{tag}");
        }
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&ValueTag::Object).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&ValueTag::Float64).unwrap(), "7");
        assert_eq!(
            serde_json::from_str::<ValueTag>("-7").unwrap(),
            ValueTag::String
        );
        assert!(serde_json::from_str::<ValueTag>("-5").is_err());
    }
}
