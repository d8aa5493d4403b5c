// src/stream.rs
//! Byte-stream adapters.
//!
//! [`BufferReader`] and [`BufferWriter`] put the [`Readable`]/[`Writable`]
//! contract behind `std::io::Read`/`std::io::Write`, so buffers plug into
//! anything that speaks blocking byte streams. Buffer errors surface as
//! [`io::Error`]s whose inner error is the original [`BufferError`].
//!
//! [`AvailableRead`] describes sources that can say how many bytes they hold
//! without blocking; [`ByteQueue::fill_from_stream`](crate::ByteQueue::fill_from_stream)
//! drains exactly that much.
//!
//! [`BufferError`]: crate::BufferError

use crate::buffer::{Readable, Writable};
use std::collections::VecDeque;
use std::io::{self, BufReader, Cursor, Read, Write};

/// A reader that knows how many bytes it can return without blocking.
pub trait AvailableRead: Read {
    /// Number of bytes the next reads can return without blocking.
    ///
    /// 0 means "nothing ready right now", which is not necessarily EOF.
    fn available(&self) -> io::Result<usize>;
}

impl AvailableRead for &[u8] {
    #[inline]
    fn available(&self) -> io::Result<usize> {
        Ok(self.len())
    }
}

impl<T: AsRef<[u8]>> AvailableRead for Cursor<T> {
    #[inline]
    fn available(&self) -> io::Result<usize> {
        let len = self.get_ref().as_ref().len() as u64;
        Ok(len.saturating_sub(self.position()) as usize)
    }
}

impl AvailableRead for VecDeque<u8> {
    #[inline]
    fn available(&self) -> io::Result<usize> {
        Ok(self.len())
    }
}

impl<R: Read> AvailableRead for BufReader<R> {
    /// Only the bytes already sitting in the internal buffer.
    #[inline]
    fn available(&self) -> io::Result<usize> {
        Ok(self.buffer().len())
    }
}

impl<A: AvailableRead + ?Sized> AvailableRead for &mut A {
    #[inline]
    fn available(&self) -> io::Result<usize> {
        (**self).available()
    }
}

/// `std::io::Read` over a [`Readable`].
///
/// # Examples
///
/// ```
/// use std::io::Read;
/// use wirebuf::prelude::*;
///
/// let mut queue = ByteQueue::new();
/// queue.put_bytes(b"stream me")?;
///
/// let mut text = String::new();
/// BufferReader::new(&mut queue).read_to_string(&mut text)?;
/// assert_eq!(text, "stream me");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct BufferReader<R> {
    inner: R,
}

impl<R: Readable> BufferReader<R> {
    /// Wraps `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Reads one byte, failing with `UnexpectedEof` if none is available.
    ///
    /// # Errors
    ///
    /// The underlying [`BufferError`](crate::BufferError) as an [`io::Error`].
    pub fn read_byte(&mut self) -> io::Result<u8> {
        self.inner.get_u8().map_err(io::Error::from)
    }
}

impl<R> BufferReader<R> {
    /// Gets a reference to the underlying buffer.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Gets a mutable reference to the underlying buffer.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwraps the adapter.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Readable> Read for BufferReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(self.inner.available());
        self.inner.get_bytes(&mut buf[..len])?;
        Ok(len)
    }
}

/// `std::io::Write` over a [`Writable`].
///
/// Every `write` appends the whole slice or fails; `flush` does nothing.
#[derive(Debug)]
pub struct BufferWriter<W> {
    inner: W,
}

impl<W: Writable> BufferWriter<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W> BufferWriter<W> {
    /// Gets a reference to the underlying buffer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Gets a mutable reference to the underlying buffer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwraps the adapter.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Writable> Write for BufferWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.put_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
