// src/buffer/writable.rs
//! The write side of the buffer contract.

use super::readable::Readable;
use crate::encoding::WireValue;
use crate::error::{BufferError, Result};
use bytes::Buf;

/// Encodes `value` and appends it in one [`Writable::put_bytes`] call, so a
/// failed capacity check leaves the writer untouched.
#[inline]
fn write_value<T: WireValue, W: Writable + ?Sized>(writer: &mut W, value: T) -> Result<()> {
    let mut raw = [0u8; 8];
    let raw = &mut raw[..T::SIZE];
    value.encode(raw)?;
    writer.put_bytes(raw)
}

/// Something primitive values and byte ranges can be appended to.
///
/// Implementors provide the byte-level operations; the typed putters are
/// derived from [`put_bytes`](Self::put_bytes).
pub trait Writable {
    /// Appends `src` verbatim.
    ///
    /// # Errors
    ///
    /// [`BufferError::Overflow`] if the buffer cannot grow enough.
    fn put_bytes(&mut self, src: &[u8]) -> Result<()>;

    /// Appends everything `source` has remaining and returns the count.
    fn absorb_from(&mut self, source: &mut dyn Buf) -> Result<usize>;

    /// Discards all content.
    fn clear(&mut self);

    /// Appends any [`WireValue`].
    #[inline]
    fn put<T: WireValue>(&mut self, value: T) -> Result<()>
    where
        Self: Sized,
    {
        write_value(self, value)
    }

    /// Writes a single byte.
    #[inline]
    fn put_u8(&mut self, val: u8) -> Result<()> {
        write_value(self, val)
    }

    /// Writes a signed byte.
    #[inline]
    fn put_i8(&mut self, val: i8) -> Result<()> {
        write_value(self, val)
    }

    /// Writes a boolean as one byte.
    #[inline]
    fn put_bool(&mut self, val: bool) -> Result<()> {
        write_value(self, val)
    }

    /// Writes a `u16` in big-endian format.
    #[inline]
    fn put_u16(&mut self, val: u16) -> Result<()> {
        write_value(self, val)
    }

    /// Writes an `i16` in big-endian format.
    #[inline]
    fn put_i16(&mut self, val: i16) -> Result<()> {
        write_value(self, val)
    }

    /// Writes a BMP `char` as one big-endian UTF-16 code unit.
    #[inline]
    fn put_char(&mut self, val: char) -> Result<()> {
        write_value(self, val)
    }

    /// Writes a `u32` in big-endian format.
    #[inline]
    fn put_u32(&mut self, val: u32) -> Result<()> {
        write_value(self, val)
    }

    /// Writes an `i32` in big-endian format.
    #[inline]
    fn put_i32(&mut self, val: i32) -> Result<()> {
        write_value(self, val)
    }

    /// Writes a `u64` in big-endian format.
    #[inline]
    fn put_u64(&mut self, val: u64) -> Result<()> {
        write_value(self, val)
    }

    /// Writes an `i64` in big-endian format.
    #[inline]
    fn put_i64(&mut self, val: i64) -> Result<()> {
        write_value(self, val)
    }

    /// Writes the big-endian IEEE-754 bit pattern of an `f32`.
    #[inline]
    fn put_f32(&mut self, val: f32) -> Result<()> {
        write_value(self, val)
    }

    /// Writes the big-endian IEEE-754 bit pattern of an `f64`.
    #[inline]
    fn put_f64(&mut self, val: f64) -> Result<()> {
        write_value(self, val)
    }

    /// Appends `src[offset..offset + length]`.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if the range does not fit `src`.
    fn put_bytes_range(&mut self, src: &[u8], offset: usize, length: usize) -> Result<()> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= src.len())
            .ok_or_else(|| {
                BufferError::InvalidArgument(format!(
                    "range {offset}+{length} is outside source of {} bytes",
                    src.len()
                ))
            })?;
        self.put_bytes(&src[offset..end])
    }

    /// Appends `count` zero bytes.
    fn put_zeroes(&mut self, count: usize) -> Result<()> {
        const ZEROES: [u8; 64] = [0; 64];
        let mut left = count;
        while left > 0 {
            let n = left.min(ZEROES.len());
            self.put_bytes(&ZEROES[..n])?;
            left -= n;
        }
        Ok(())
    }

    /// Writes a string as a 4-byte big-endian byte length followed by its
    /// UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// [`BufferError::Overflow`] if the string is longer than `u32::MAX`
    /// bytes.
    fn put_string(&mut self, s: &str) -> Result<()> {
        let len = u32::try_from(s.len()).map_err(|_| BufferError::Overflow {
            requested: s.len(),
            limit: u32::MAX as usize,
        })?;
        let mut framed = Vec::with_capacity(4 + s.len());
        framed.extend_from_slice(&len.to_be_bytes());
        framed.extend_from_slice(s.as_bytes());
        self.put_bytes(&framed)
    }

    /// Moves every available byte of `source` into this buffer and returns
    /// the count.
    fn put_readable(&mut self, source: &mut dyn Readable) -> Result<usize> {
        const CHUNK: usize = 64;
        let mut chunk = [0u8; CHUNK];
        let mut moved = 0;
        while source.has_available() {
            let n = source.available().min(CHUNK);
            source.peek_bytes(0, &mut chunk[..n])?;
            self.put_bytes(&chunk[..n])?;
            source.skip(n)?;
            moved += n;
        }
        Ok(moved)
    }
}
