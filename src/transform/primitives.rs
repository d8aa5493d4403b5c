// src/transform/primitives.rs
//! Pass-through transformers for the primitive wire types.

use super::Transformer;
use crate::buffer::{Readable, Writable};
use crate::error::Result;

macro_rules! primitive_transformer {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $get:ident, $put:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name;

        impl Transformer<$ty> for $name {
            #[inline]
            fn encode(&self, value: &$ty, dst: &mut dyn Writable) -> Result<()> {
                dst.$put(*value)
            }

            #[inline]
            fn decode(&self, src: &mut dyn Readable) -> Result<$ty> {
                src.$get()
            }
        }
    };
}

primitive_transformer!(
    /// One unsigned byte.
    U8Transformer, u8, get_u8, put_u8
);
primitive_transformer!(
    /// One signed byte.
    I8Transformer, i8, get_i8, put_i8
);
primitive_transformer!(
    /// Big-endian `u16`.
    U16Transformer, u16, get_u16, put_u16
);
primitive_transformer!(
    /// Big-endian `i16`.
    I16Transformer, i16, get_i16, put_i16
);
primitive_transformer!(
    /// Big-endian `u32`.
    U32Transformer, u32, get_u32, put_u32
);
primitive_transformer!(
    /// Big-endian `i32`.
    I32Transformer, i32, get_i32, put_i32
);
primitive_transformer!(
    /// Big-endian `u64`.
    U64Transformer, u64, get_u64, put_u64
);
primitive_transformer!(
    /// Big-endian `i64`.
    I64Transformer, i64, get_i64, put_i64
);
primitive_transformer!(
    /// IEEE-754 `f32`, big-endian.
    F32Transformer, f32, get_f32, put_f32
);
primitive_transformer!(
    /// IEEE-754 `f64`, big-endian.
    F64Transformer, f64, get_f64, put_f64
);
primitive_transformer!(
    /// BMP `char` as one UTF-16 code unit.
    CharTransformer, char, get_char, put_char
);
primitive_transformer!(
    /// `bool` as one byte.
    BoolTransformer, bool, get_bool, put_bool
);

/// Length-prefixed UTF-8 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StringTransformer;

impl Transformer<String> for StringTransformer {
    #[inline]
    fn encode(&self, value: &String, dst: &mut dyn Writable) -> Result<()> {
        dst.put_string(value)
    }

    #[inline]
    fn decode(&self, src: &mut dyn Readable) -> Result<String> {
        src.get_string()
    }
}
