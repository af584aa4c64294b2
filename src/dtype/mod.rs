//! Data type system for augrand tensors
//!
//! This module provides the `DType` enum representing all supported element
//! types, along with the `Element` trait connecting them to Rust types.

mod element;

pub use element::Element;

use std::fmt;

/// Data types supported by augrand tensors
///
/// This enum represents the element type of a tensor at runtime.
/// Using an enum (rather than generics) allows runtime type selection,
/// which the operator layer needs: the requested output dtype is an
/// operator argument, not a compile-time parameter.
///
/// # Discriminant Values (Serialization Stability)
///
/// The discriminant values are **stable** for serialization purposes:
/// - Floats: 0-9 (F64=0, F32=1)
/// - Signed ints: 10-19 (I64=10, I32=11)
/// - Unsigned ints: 20-29 (U32=21)
///
/// New types will use reserved ranges. Existing values are NEVER changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point (most common)
    F32 = 1,
    /// 64-bit signed integer
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,
    /// 32-bit unsigned integer
    U32 = 21,
}

impl DType {
    /// Size of one element in bytes
    pub const fn size_in_bytes(self) -> usize {
        match self {
            DType::F64 | DType::I64 => 8,
            DType::F32 | DType::I32 | DType::U32 => 4,
        }
    }

    /// Is this a floating point type?
    pub const fn is_float(self) -> bool {
        matches!(self, DType::F64 | DType::F32)
    }

    /// Is this an integer type (signed or unsigned)?
    pub const fn is_int(self) -> bool {
        !self.is_float()
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::F64 => "f64",
            DType::F32 => "f32",
            DType::I64 => "i64",
            DType::I32 => "i32",
            DType::U32 => "u32",
        };
        write!(f, "{}", name)
    }
}
