// src/transform/mod.rs
//! Typed codecs layered on the buffer contract.
//!
//! A [`Transformer<T>`] knows how to write one `T` to any [`Writable`] and
//! read it back from any [`Readable`]. Decoding what was encoded yields an
//! equal value and consumes exactly the bytes that were written.
//!
//! ```rust
//! use wirebuf::prelude::*;
//!
//! let ids = CollectionTransformer::new(I32Transformer);
//! let bytes = encode_to_vec(&ids, &vec![3, 1, 4])?;
//! assert_eq!(bytes.len(), 4 + 3 * 4);
//! assert_eq!(decode_from_slice(&ids, &bytes)?, vec![3, 1, 4]);
//! # Ok::<(), wirebuf::BufferError>(())
//! ```

mod collection;
mod primitives;
#[cfg(feature = "serde")]
mod serialized;

pub use collection::CollectionTransformer;
pub use primitives::{
    BoolTransformer, CharTransformer, F32Transformer, F64Transformer, I8Transformer,
    I16Transformer, I32Transformer, I64Transformer, StringTransformer, U8Transformer,
    U16Transformer, U32Transformer, U64Transformer,
};
#[cfg(feature = "serde")]
pub use serialized::SerdeTransformer;

use crate::buffer::{Readable, Writable};
use crate::error::{BufferError, Result};
use crate::queue::ByteQueue;

/// Encoder/decoder pair for values of type `T`.
///
/// Implementations are stateless with respect to the buffers they are handed,
/// so one instance can serve any number of buffers.
pub trait Transformer<T> {
    /// Writes `value` to `dst`.
    fn encode(&self, value: &T, dst: &mut dyn Writable) -> Result<()>;

    /// Reads one value from `src`.
    fn decode(&self, src: &mut dyn Readable) -> Result<T>;
}

impl<T, X: Transformer<T> + ?Sized> Transformer<T> for &X {
    #[inline]
    fn encode(&self, value: &T, dst: &mut dyn Writable) -> Result<()> {
        (**self).encode(value, dst)
    }

    #[inline]
    fn decode(&self, src: &mut dyn Readable) -> Result<T> {
        (**self).decode(src)
    }
}

/// Encodes `value` into a fresh byte vector.
pub fn encode_to_vec<T, X>(transformer: &X, value: &T) -> Result<Vec<u8>>
where
    X: Transformer<T> + ?Sized,
{
    let mut queue = ByteQueue::new();
    transformer.encode(value, &mut queue)?;
    Ok(queue.as_slice().to_vec())
}

/// Decodes one value that must occupy all of `bytes`.
///
/// # Errors
///
/// Whatever the transformer reports, or [`BufferError::InvalidData`] if bytes
/// are left over after the value.
pub fn decode_from_slice<T, X>(transformer: &X, bytes: &[u8]) -> Result<T>
where
    X: Transformer<T> + ?Sized,
{
    let mut queue = ByteQueue::with_capacity(bytes.len());
    queue.put_bytes(bytes)?;
    let value = transformer.decode(&mut queue)?;
    if queue.has_available() {
        return Err(BufferError::InvalidData(format!(
            "{} trailing bytes after decoded value",
            queue.available()
        )));
    }
    Ok(value)
}
