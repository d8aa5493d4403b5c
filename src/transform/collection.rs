// src/transform/collection.rs
//! Count-prefixed sequences.

use super::Transformer;
use crate::buffer::{Readable, Writable};
use crate::error::{BufferError, Result};

/// Encodes a `Vec<T>` as a 4-byte big-endian element count followed by each
/// element through the wrapped transformer.
///
/// Collections nest: `CollectionTransformer::new(CollectionTransformer::new(
/// StringTransformer))` handles `Vec<Vec<String>>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CollectionTransformer<E> {
    element: E,
}

impl<E> CollectionTransformer<E> {
    /// Wraps the transformer used for each element.
    pub const fn new(element: E) -> Self {
        Self { element }
    }

    /// Returns the element transformer.
    pub fn element(&self) -> &E {
        &self.element
    }
}

impl<T, E: Transformer<T>> Transformer<Vec<T>> for CollectionTransformer<E> {
    fn encode(&self, value: &Vec<T>, dst: &mut dyn Writable) -> Result<()> {
        let count = u32::try_from(value.len()).map_err(|_| BufferError::Overflow {
            requested: value.len(),
            limit: u32::MAX as usize,
        })?;
        dst.put_u32(count)?;
        for element in value {
            self.element.encode(element, &mut *dst)?;
        }
        Ok(())
    }

    fn decode(&self, src: &mut dyn Readable) -> Result<Vec<T>> {
        let count = src.get_u32()? as usize;
        // A corrupt count must not drive a huge allocation up front
        let mut out = Vec::with_capacity(count.min(src.available()));
        for _ in 0..count {
            out.push(self.element.decode(src)?);
        }
        Ok(out)
    }
}
