// src/buffer/view.rs
//! Capability-narrowing views.
//!
//! A [`ReadView`] borrows a buffer and implements only [`Readable`]; a
//! [`WriteView`] implements only [`Writable`]. Handing a consumer a
//! `ReadView<'_, ByteQueue>` makes writing to the queue a compile error on
//! the consumer's side, without copying any bytes.

use super::readable::Readable;
use super::writable::Writable;
use crate::error::Result;
use bytes::{Buf, BufMut};

/// Read-only view over a borrowed buffer.
///
/// # Examples
///
/// ```
/// use wirebuf::prelude::*;
/// # use wirebuf::BufferError;
///
/// fn consume(view: &mut ReadView<'_, ByteQueue>) -> wirebuf::Result<u32> {
///     view.get_u32()
/// }
///
/// let mut queue = ByteQueue::new();
/// queue.put_u32(7)?;
/// assert_eq!(consume(&mut queue.read_view())?, 7);
/// # Ok::<(), BufferError>(())
/// ```
pub struct ReadView<'a, R: Readable + ?Sized> {
    inner: &'a mut R,
}

impl<'a, R: Readable + ?Sized> ReadView<'a, R> {
    /// Wraps `inner`.
    pub fn new(inner: &'a mut R) -> Self {
        Self { inner }
    }
}

impl<R: Readable + ?Sized> Readable for ReadView<'_, R> {
    #[inline]
    fn available(&self) -> usize {
        self.inner.available()
    }

    #[inline]
    fn peek_bytes(&self, offset: usize, dst: &mut [u8]) -> Result<()> {
        self.inner.peek_bytes(offset, dst)
    }

    #[inline]
    fn get_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        self.inner.get_bytes(dst)
    }

    #[inline]
    fn skip(&mut self, len: usize) -> Result<()> {
        self.inner.skip(len)
    }

    #[inline]
    fn transfer_into(&mut self, sink: &mut dyn BufMut) -> Result<usize> {
        self.inner.transfer_into(sink)
    }
}

/// Write-only view over a borrowed buffer.
pub struct WriteView<'a, W: Writable + ?Sized> {
    inner: &'a mut W,
}

impl<'a, W: Writable + ?Sized> WriteView<'a, W> {
    /// Wraps `inner`.
    pub fn new(inner: &'a mut W) -> Self {
        Self { inner }
    }
}

impl<W: Writable + ?Sized> Writable for WriteView<'_, W> {
    #[inline]
    fn put_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.inner.put_bytes(src)
    }

    #[inline]
    fn absorb_from(&mut self, source: &mut dyn Buf) -> Result<usize> {
        self.inner.absorb_from(source)
    }

    #[inline]
    fn clear(&mut self) {
        self.inner.clear()
    }
}
