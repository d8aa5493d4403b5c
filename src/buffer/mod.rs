// src/buffer/mod.rs
//! The readable/writable buffer contract and capability views.
//!
//! [`Readable`] and [`Writable`] agree on one wire format (see
//! [`encoding`](crate::encoding)); any value written through one is read back
//! through the other in the same order.

mod readable;
mod view;
mod writable;

pub use readable::Readable;
pub use view::{ReadView, WriteView};
pub use writable::Writable;

use crate::error::Result;
use bytes::{Buf, BufMut};

impl<R: Readable + ?Sized> Readable for &mut R {
    #[inline]
    fn available(&self) -> usize {
        (**self).available()
    }

    #[inline]
    fn peek_bytes(&self, offset: usize, dst: &mut [u8]) -> Result<()> {
        (**self).peek_bytes(offset, dst)
    }

    #[inline]
    fn get_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        (**self).get_bytes(dst)
    }

    #[inline]
    fn skip(&mut self, len: usize) -> Result<()> {
        (**self).skip(len)
    }

    #[inline]
    fn transfer_into(&mut self, sink: &mut dyn BufMut) -> Result<usize> {
        (**self).transfer_into(sink)
    }
}

impl<W: Writable + ?Sized> Writable for &mut W {
    #[inline]
    fn put_bytes(&mut self, src: &[u8]) -> Result<()> {
        (**self).put_bytes(src)
    }

    #[inline]
    fn absorb_from(&mut self, source: &mut dyn Buf) -> Result<usize> {
        (**self).absorb_from(source)
    }

    #[inline]
    fn clear(&mut self) {
        (**self).clear()
    }
}
