// src/buffer/readable.rs
//! The read side of the buffer contract.

use crate::encoding::WireValue;
use crate::error::{BufferError, Result};
use bytes::BufMut;

/// Decodes one `T` from the front of `reader` without consuming on failure.
///
/// Works for unsized readers, so the provided methods on [`Readable`] and
/// `dyn Readable` callers share it.
#[inline]
fn read_value<T: WireValue, R: Readable + ?Sized>(reader: &mut R) -> Result<T> {
    let mut raw = [0u8; 8];
    let raw = &mut raw[..T::SIZE];
    reader.peek_bytes(0, raw)?;
    let value = T::decode(raw)?;
    reader.skip(T::SIZE)?;
    Ok(value)
}

/// Something primitive values and byte ranges can be consumed from, in the
/// order they were written.
///
/// Implementors provide the five byte-level operations; every typed getter
/// is derived from them. All getters either succeed completely or fail
/// without consuming anything.
///
/// The trait is dyn-compatible: transformers and stream adapters take
/// `&mut dyn Readable`.
pub trait Readable {
    /// Number of bytes that can currently be read.
    fn available(&self) -> usize;

    /// Copies `dst.len()` bytes starting `offset` bytes past the read cursor,
    /// without consuming them.
    ///
    /// # Errors
    ///
    /// [`BufferError::Underflow`] if `offset + dst.len()` exceeds
    /// [`available`](Self::available).
    fn peek_bytes(&self, offset: usize, dst: &mut [u8]) -> Result<()>;

    /// Consumes exactly `dst.len()` bytes into `dst`.
    ///
    /// # Errors
    ///
    /// [`BufferError::Underflow`] if fewer bytes are available.
    fn get_bytes(&mut self, dst: &mut [u8]) -> Result<()>;

    /// Discards `len` bytes.
    ///
    /// # Errors
    ///
    /// [`BufferError::Underflow`] if fewer bytes are available.
    fn skip(&mut self, len: usize) -> Result<()>;

    /// Moves `min(available, sink.remaining_mut())` bytes into `sink` and
    /// returns how many were moved.
    fn transfer_into(&mut self, sink: &mut dyn BufMut) -> Result<usize>;

    /// Returns `true` if at least one byte can be read.
    #[inline]
    fn has_available(&self) -> bool {
        self.available() > 0
    }

    /// Fails with [`BufferError::Underflow`] unless `len` bytes are available.
    #[inline]
    fn ensure_available(&self, len: usize) -> Result<()> {
        let available = self.available();
        if available < len {
            return Err(BufferError::underflow(len, available));
        }
        Ok(())
    }

    /// Reads any [`WireValue`].
    #[inline]
    fn get<T: WireValue>(&mut self) -> Result<T>
    where
        Self: Sized,
    {
        read_value(self)
    }

    /// Reads a single byte.
    #[inline]
    fn get_u8(&mut self) -> Result<u8> {
        read_value(self)
    }

    /// Reads a signed byte.
    #[inline]
    fn get_i8(&mut self) -> Result<i8> {
        read_value(self)
    }

    /// Reads a boolean (0 = false, non-zero = true).
    #[inline]
    fn get_bool(&mut self) -> Result<bool> {
        read_value(self)
    }

    /// Reads a big-endian `u16`.
    #[inline]
    fn get_u16(&mut self) -> Result<u16> {
        read_value(self)
    }

    /// Reads a big-endian `i16`.
    #[inline]
    fn get_i16(&mut self) -> Result<i16> {
        read_value(self)
    }

    /// Reads a 2-byte UTF-16 code unit as a `char`.
    #[inline]
    fn get_char(&mut self) -> Result<char> {
        read_value(self)
    }

    /// Reads a big-endian `u32`.
    #[inline]
    fn get_u32(&mut self) -> Result<u32> {
        read_value(self)
    }

    /// Reads a big-endian `i32`.
    #[inline]
    fn get_i32(&mut self) -> Result<i32> {
        read_value(self)
    }

    /// Reads a big-endian `u64`.
    #[inline]
    fn get_u64(&mut self) -> Result<u64> {
        read_value(self)
    }

    /// Reads a big-endian `i64`.
    #[inline]
    fn get_i64(&mut self) -> Result<i64> {
        read_value(self)
    }

    /// Reads an IEEE-754 `f32` from its big-endian bit pattern.
    #[inline]
    fn get_f32(&mut self) -> Result<f32> {
        read_value(self)
    }

    /// Reads an IEEE-754 `f64` from its big-endian bit pattern.
    #[inline]
    fn get_f64(&mut self) -> Result<f64> {
        read_value(self)
    }

    /// Reads `length` bytes into `dst[offset..offset + length]`.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if the range does not fit `dst`,
    /// otherwise as [`get_bytes`](Self::get_bytes).
    fn get_bytes_range(&mut self, dst: &mut [u8], offset: usize, length: usize) -> Result<()> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= dst.len())
            .ok_or_else(|| {
                BufferError::InvalidArgument(format!(
                    "range {offset}+{length} is outside destination of {} bytes",
                    dst.len()
                ))
            })?;
        self.get_bytes(&mut dst[offset..end])
    }

    /// Reads `len` bytes into a fresh `Vec`.
    fn get_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        // Empty peek reports a wrong-mode reader before the length check
        self.peek_bytes(0, &mut [])?;
        self.ensure_available(len)?;
        let mut out = vec![0u8; len];
        self.get_bytes(&mut out)?;
        Ok(out)
    }

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// The 4-byte length is peeked first, so an under-filled string consumes
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`BufferError::Underflow`] if the prefix or the body is incomplete,
    /// [`BufferError::InvalidData`] if the body is not UTF-8.
    fn get_string(&mut self) -> Result<String> {
        let mut prefix = [0u8; 4];
        self.peek_bytes(0, &mut prefix)?;
        let len = u32::from_be_bytes(prefix) as usize;
        self.ensure_available(prefix.len().saturating_add(len))?;

        let mut body = vec![0u8; len];
        self.peek_bytes(prefix.len(), &mut body)?;
        let s = String::from_utf8(body)
            .map_err(|e| BufferError::InvalidData(format!("string is not UTF-8: {e}")))?;
        self.skip(prefix.len() + len)?;
        Ok(s)
    }
}
