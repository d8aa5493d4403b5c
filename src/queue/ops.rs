// src/queue/ops.rs
//! Queue read/write operations and stream interop

use super::core::ByteQueue;
use crate::buffer::{ReadView, Readable, WriteView, Writable};
use crate::error::{BufferError, Result};
use crate::stream::AvailableRead;
use bytes::{Buf, BufMut};
use std::io;
use tracing::trace;

impl Readable for ByteQueue {
    #[inline(always)]
    fn available(&self) -> usize {
        self.write_pos - self.read_pos
    }

    #[inline]
    fn peek_bytes(&self, offset: usize, dst: &mut [u8]) -> Result<()> {
        let wanted = offset.saturating_add(dst.len());
        self.ensure_available(wanted)?;
        let start = self.read_pos + offset;
        dst.copy_from_slice(&self.data[start..start + dst.len()]);
        Ok(())
    }

    #[inline]
    fn get_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        self.peek_bytes(0, dst)?;
        self.consume(dst.len());
        Ok(())
    }

    #[inline]
    fn skip(&mut self, len: usize) -> Result<()> {
        self.ensure_available(len)?;
        self.consume(len);
        Ok(())
    }

    fn transfer_into(&mut self, sink: &mut dyn BufMut) -> Result<usize> {
        let len = self.available().min(sink.remaining_mut());
        sink.put_slice(&self.data[self.read_pos..self.read_pos + len]);
        self.consume(len);
        Ok(len)
    }
}

impl Writable for ByteQueue {
    #[inline]
    fn put_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.ensure_free(src.len())?;
        let start = self.write_pos;
        self.data[start..start + src.len()].copy_from_slice(src);
        self.write_pos += src.len();
        Ok(())
    }

    fn absorb_from(&mut self, source: &mut dyn Buf) -> Result<usize> {
        let len = source.remaining();
        self.ensure_free(len)?;
        let start = self.write_pos;
        source.copy_to_slice(&mut self.data[start..start + len]);
        self.write_pos += len;
        Ok(len)
    }

    #[inline]
    fn clear(&mut self) {
        self.reset();
    }
}

impl ByteQueue {
    /// Drops everything after the first `len` unread bytes.
    ///
    /// Does nothing if no more than `len` bytes are available. Used to cut
    /// trailing garbage after a partial decode.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirebuf::prelude::*;
    /// # use wirebuf::BufferError;
    ///
    /// let mut queue = ByteQueue::new();
    /// queue.put_bytes(b"keep-drop")?;
    /// queue.retain(4);
    /// assert_eq!(queue.as_slice(), b"keep");
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn retain(&mut self, len: usize) {
        if self.available() > len {
            self.write_pos = self.read_pos + len;
            if len == 0 {
                self.reset();
            }
        }
    }

    /// Appends everything `source` can hand over without blocking.
    ///
    /// Asks the source how many bytes are ready, grows by that much, reads
    /// them, and repeats until the source reports nothing ready or a read
    /// returns 0. This is not a read-until-EOF: a slow source that has
    /// nothing buffered ends the fill.
    ///
    /// Returns the number of bytes appended.
    ///
    /// # Errors
    ///
    /// Read errors from `source` (other than `Interrupted`, which is
    /// retried), or growth failures wrapped as [`io::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use wirebuf::prelude::*;
    ///
    /// let mut queue = ByteQueue::new();
    /// let mut source: &[u8] = b"\x00\x00\x00\x2a";
    /// assert_eq!(queue.fill_from_stream(&mut source)?, 4);
    /// assert_eq!(queue.get_u32()?, 42);
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn fill_from_stream<S: AvailableRead + ?Sized>(&mut self, source: &mut S) -> io::Result<usize> {
        let mut total = 0;
        loop {
            let ready = source.available()?;
            if ready == 0 {
                break;
            }
            self.ensure_free(ready)?;
            let start = self.write_pos;
            match source.read(&mut self.data[start..start + ready]) {
                Ok(0) => break,
                Ok(n) => {
                    self.write_pos += n;
                    total += n;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        trace!(bytes = total, available = self.available(), "filled byte queue from stream");
        Ok(total)
    }

    /// Writes all available bytes to `sink` in one call, then clears the
    /// queue.
    ///
    /// Returns the number of bytes written. On error the queue is left as it
    /// was.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirebuf::prelude::*;
    ///
    /// let mut queue = ByteQueue::new();
    /// queue.put_u16(0xBEEF)?;
    ///
    /// let mut out = Vec::new();
    /// assert_eq!(queue.flush_to_stream(&mut out)?, 2);
    /// assert_eq!(out, [0xBE, 0xEF]);
    /// assert!(queue.is_empty());
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn flush_to_stream<W: io::Write + ?Sized>(&mut self, sink: &mut W) -> io::Result<usize> {
        let len = self.available();
        sink.write_all(self.as_slice())?;
        self.reset();
        trace!(bytes = len, "flushed byte queue to stream");
        Ok(len)
    }

    /// Borrows the queue as a read-only [`ReadView`].
    #[inline]
    pub fn read_view(&mut self) -> ReadView<'_, Self> {
        ReadView::new(self)
    }

    /// Borrows the queue as a write-only [`WriteView`].
    #[inline]
    pub fn write_view(&mut self) -> WriteView<'_, Self> {
        WriteView::new(self)
    }

    /// Reads the next `len` bytes as a borrowed slice and consumes them.
    ///
    /// # Errors
    ///
    /// [`BufferError::Underflow`] if fewer than `len` bytes are available.
    pub fn get_bytes_ref(&mut self, len: usize) -> Result<&[u8]> {
        let available = self.available();
        if available < len {
            return Err(BufferError::underflow(len, available));
        }
        let start = self.read_pos;
        self.consume(len);
        Ok(&self.data[start..start + len])
    }
}
