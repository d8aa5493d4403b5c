// src/encoding.rs
//! Big-endian encoding primitives.
//!
//! Pure functions that convert fixed-width values to and from byte slices at
//! an offset. Every buffer in this crate goes through [`WireValue`], so the
//! wire format is defined in exactly one place:
//!
//! | Type | Width |
//! |---|---|
//! | `u8`, `i8`, `bool` | 1 |
//! | `u16`, `i16`, `char` | 2 |
//! | `u32`, `i32`, `f32` | 4 |
//! | `u64`, `i64`, `f64` | 8 |
//!
//! `char` travels as a single UTF-16 code unit, so only characters from the
//! Basic Multilingual Plane can be encoded.

use crate::error::{BufferError, Result};

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width value with a big-endian wire representation.
///
/// Sealed: the wire format is closed over the primitive types listed in the
/// module docs.
pub trait WireValue: Copy + sealed::Sealed {
    /// Encoded width in bytes.
    const SIZE: usize;

    /// Writes `self` into the first [`SIZE`](Self::SIZE) bytes of `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] if the value has no wire
    /// representation (a `char` outside the BMP).
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than [`SIZE`](Self::SIZE); callers check
    /// bounds first.
    fn encode(self, dst: &mut [u8]) -> Result<()>;

    /// Reads a value from the first [`SIZE`](Self::SIZE) bytes of `src`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidData`] if the bytes do not form a valid
    /// value (a lone surrogate decoded as `char`).
    ///
    /// # Panics
    ///
    /// Panics if `src` is shorter than [`SIZE`](Self::SIZE).
    fn decode(src: &[u8]) -> Result<Self>;
}

macro_rules! impl_wire_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl WireValue for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn encode(self, dst: &mut [u8]) -> Result<()> {
                    dst[..Self::SIZE].copy_from_slice(&self.to_be_bytes());
                    Ok(())
                }

                #[inline]
                fn decode(src: &[u8]) -> Result<Self> {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&src[..Self::SIZE]);
                    Ok(<$ty>::from_be_bytes(raw))
                }
            }
        )*
    };
}

impl_wire_numeric!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl sealed::Sealed for bool {}

impl WireValue for bool {
    const SIZE: usize = 1;

    #[inline]
    fn encode(self, dst: &mut [u8]) -> Result<()> {
        dst[0] = u8::from(self);
        Ok(())
    }

    #[inline]
    fn decode(src: &[u8]) -> Result<Self> {
        Ok(src[0] != 0)
    }
}

impl sealed::Sealed for char {}

impl WireValue for char {
    const SIZE: usize = 2;

    #[inline]
    fn encode(self, dst: &mut [u8]) -> Result<()> {
        let unit = u16::try_from(u32::from(self)).map_err(|_| {
            BufferError::InvalidArgument(format!(
                "char U+{:04X} does not fit in one UTF-16 code unit",
                u32::from(self)
            ))
        })?;
        unit.encode(dst)
    }

    #[inline]
    fn decode(src: &[u8]) -> Result<Self> {
        let unit = u16::decode(src)?;
        char::from_u32(u32::from(unit)).ok_or_else(|| {
            BufferError::InvalidData(format!("lone surrogate 0x{unit:04X} is not a char"))
        })
    }
}

/// Checks that `offset..offset + len` lies inside a slice of length `bound`.
#[inline]
fn check_range(offset: usize, len: usize, bound: usize) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= bound => Ok(()),
        _ => Err(BufferError::InvalidArgument(format!(
            "range {offset}+{len} is outside 0..{bound}"
        ))),
    }
}

/// Encodes `value` at `offset` in `dst`.
///
/// # Errors
///
/// Returns [`BufferError::InvalidArgument`] if the value does not fit at
/// `offset`.
///
/// # Examples
///
/// ```
/// use wirebuf::encoding::{read_at, write_at};
/// # use wirebuf::BufferError;
///
/// let mut raw = [0u8; 6];
/// write_at(&mut raw, 2, 0xCAFE_BABEu32)?;
/// assert_eq!(raw, [0, 0, 0xCA, 0xFE, 0xBA, 0xBE]);
/// assert_eq!(read_at::<u32>(&raw, 2)?, 0xCAFE_BABE);
/// # Ok::<(), BufferError>(())
/// ```
pub fn write_at<T: WireValue>(dst: &mut [u8], offset: usize, value: T) -> Result<()> {
    check_range(offset, T::SIZE, dst.len())?;
    value.encode(&mut dst[offset..])
}

/// Decodes a `T` at `offset` in `src`.
///
/// # Errors
///
/// Returns [`BufferError::InvalidArgument`] if fewer than `T::SIZE` bytes
/// follow `offset`, or the decoding error of `T`.
pub fn read_at<T: WireValue>(src: &[u8], offset: usize) -> Result<T> {
    check_range(offset, T::SIZE, src.len())?;
    T::decode(&src[offset..])
}

/// Copies `len` bytes from `src[src_offset..]` to `dst[dst_offset..]`.
///
/// # Errors
///
/// Returns [`BufferError::InvalidArgument`] if either range is out of bounds.
pub fn copy_range(
    dst: &mut [u8],
    dst_offset: usize,
    src: &[u8],
    src_offset: usize,
    len: usize,
) -> Result<()> {
    check_range(dst_offset, len, dst.len())?;
    check_range(src_offset, len, src.len())?;
    dst[dst_offset..dst_offset + len].copy_from_slice(&src[src_offset..src_offset + len]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_layout() {
        let mut raw = [0u8; 8];
        write_at(&mut raw, 0, 0x0102_0304_0506_0708u64).unwrap();
        assert_eq!(raw, [1, 2, 3, 4, 5, 6, 7, 8]);

        write_at(&mut raw, 0, -2i16).unwrap();
        assert_eq!(&raw[..2], &[0xFF, 0xFE]);
    }

    #[test]
    fn test_float_bit_patterns() {
        let mut raw = [0u8; 8];
        write_at(&mut raw, 0, 1.0f32).unwrap();
        assert_eq!(&raw[..4], &1.0f32.to_bits().to_be_bytes());

        write_at(&mut raw, 0, -0.5f64).unwrap();
        assert_eq!(raw, (-0.5f64).to_bits().to_be_bytes());
        assert_eq!(read_at::<f64>(&raw, 0).unwrap(), -0.5);
    }

    #[test]
    fn test_nan_survives_bitwise() {
        let mut raw = [0u8; 4];
        let nan = f32::from_bits(0x7FC0_0001);
        write_at(&mut raw, 0, nan).unwrap();
        assert_eq!(read_at::<f32>(&raw, 0).unwrap().to_bits(), 0x7FC0_0001);
    }

    #[test]
    fn test_char_encoding() {
        let mut raw = [0u8; 2];
        write_at(&mut raw, 0, '*').unwrap();
        assert_eq!(raw, [0x00, 0x2A]);

        write_at(&mut raw, 0, 'ß').unwrap();
        assert_eq!(read_at::<char>(&raw, 0).unwrap(), 'ß');
    }

    #[test]
    fn test_char_outside_bmp_rejected() {
        let mut raw = [0u8; 2];
        let result = write_at(&mut raw, 0, '🦀');
        assert!(matches!(result, Err(BufferError::InvalidArgument(_))));
        assert_eq!(raw, [0, 0]);
    }

    #[test]
    fn test_surrogate_rejected() {
        let raw = [0xD8, 0x00];
        assert!(matches!(
            read_at::<char>(&raw, 0),
            Err(BufferError::InvalidData(_))
        ));
    }

    #[test]
    fn test_bool() {
        assert!(read_at::<bool>(&[7], 0).unwrap());
        assert!(!read_at::<bool>(&[0], 0).unwrap());
    }

    #[test]
    fn test_offset_out_of_range() {
        let mut raw = [0u8; 4];
        assert!(write_at(&mut raw, 1, 0u32).is_err());
        assert!(read_at::<u16>(&raw, usize::MAX).is_err());
    }

    #[test]
    fn test_copy_range() {
        let mut dst = [0u8; 5];
        copy_range(&mut dst, 1, b"abcdef", 2, 3).unwrap();
        assert_eq!(&dst, b"\0cde\0");

        assert!(copy_range(&mut dst, 3, b"abcdef", 0, 3).is_err());
        assert!(copy_range(&mut dst, 0, b"ab", 1, 2).is_err());
    }
}
