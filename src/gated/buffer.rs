// src/gated/buffer.rs
//! Mode-gated buffer implementation
//!
//! A [`GatedBuffer`] owns one contiguous store and one cursor. It is either
//! being filled ([`Mode::Write`]) or drained ([`Mode::Read`]), never both:
//!
//! ```text
//! Write --set_mode(Read)--> Read --set_mode(Write)--> Write --> ...
//! ```
//!
//! - Entering Read freezes what was written as the readable span and rewinds
//!   the cursor to the start.
//! - Entering Write discards everything, read or not.
//! - After [`lock_mode`](GatedBuffer::lock_mode) every `set_mode` call fails.
//!
//! # Memory Safety
//!
//! Stores replaced by growth, and the final store on drop, are securely
//! zeroed.

use crate::buffer::{ReadView, Readable, WriteView, Writable};
use crate::error::{BufferError, Result};
use crate::queue::{QUEUE_MAX_CAPACITY, grown_capacity};
use bytes::{Buf, BufMut};
use std::fmt;
use tracing::debug;
use zeroize::Zeroize;

/// Direction a [`GatedBuffer`] currently allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Appends are legal
    #[default]
    Write,
    /// Reads are legal
    Read,
}

impl Mode {
    /// The other mode.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Mode::Write => Mode::Read,
            Mode::Read => Mode::Write,
        }
    }
}

/// A growable buffer that must be explicitly switched between filling and
/// draining.
///
/// # Example
///
/// ```rust
/// use wirebuf::prelude::*;
///
/// let mut buf = GatedBuffer::new(16);
/// buf.put_u32(7)?;
/// assert!(buf.get_u32().is_err());
///
/// buf.set_mode(Mode::Read)?;
/// assert_eq!(buf.get_u32()?, 7);
/// assert!(buf.put_u32(8).is_err());
/// # Ok::<(), wirebuf::BufferError>(())
/// ```
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct GatedBuffer {
    /// Backing store; `data.len()` is the capacity
    data: Vec<u8>,
    /// Write frontier in Write mode, read cursor in Read mode
    pos: usize,
    /// End of the readable span (Read mode only)
    limit: usize,
    #[zeroize(skip)]
    mode: Mode,
    mode_locked: bool,
}

impl GatedBuffer {
    /// Creates a buffer in Write mode with `capacity` zeroed bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`QUEUE_MAX_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity <= QUEUE_MAX_CAPACITY,
            "Buffer capacity {} exceeds maximum {}",
            capacity,
            QUEUE_MAX_CAPACITY
        );
        Self {
            data: vec![0; capacity],
            pos: 0,
            limit: 0,
            mode: Mode::Write,
            mode_locked: false,
        }
    }

    /// Returns the current capacity.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the current mode.
    #[inline(always)]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns `true` once [`lock_mode`](Self::lock_mode) has been called.
    #[inline(always)]
    pub fn is_mode_locked(&self) -> bool {
        self.mode_locked
    }

    /// Bytes written in the current phase: the frontier in Write mode, the
    /// readable span in Read mode.
    #[inline]
    pub fn written(&self) -> usize {
        match self.mode {
            Mode::Write => self.pos,
            Mode::Read => self.limit,
        }
    }

    /// Switches to `mode`.
    ///
    /// Write → Read makes the written bytes readable from the start.
    /// Read → Write discards all content.
    ///
    /// # Errors
    ///
    /// - [`BufferError::ModeLocked`] after [`lock_mode`](Self::lock_mode),
    ///   whatever the target.
    /// - [`BufferError::ModeViolation`] if the buffer is already in `mode`.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        if self.mode_locked {
            return Err(BufferError::ModeLocked);
        }
        self.check_mode(mode.flipped())?;
        match mode {
            Mode::Read => {
                self.limit = self.pos;
                self.pos = 0;
            }
            Mode::Write => {
                self.pos = 0;
                self.limit = 0;
            }
        }
        self.mode = mode;
        debug!(?mode, readable = self.limit, "gated buffer mode switched");
        Ok(())
    }

    /// Freezes the current mode; every later [`set_mode`](Self::set_mode)
    /// fails.
    pub fn lock_mode(&mut self) {
        self.mode_locked = true;
        debug!(mode = ?self.mode, "gated buffer mode locked");
    }

    /// Securely zeros the store and empties the buffer. Mode is unchanged.
    pub fn burn(&mut self) {
        self.data.as_mut_slice().zeroize();
        self.pos = 0;
        self.limit = 0;
    }

    /// Borrows the buffer as a read-only [`ReadView`].
    #[inline]
    pub fn read_view(&mut self) -> ReadView<'_, Self> {
        ReadView::new(self)
    }

    /// Borrows the buffer as a write-only [`WriteView`].
    #[inline]
    pub fn write_view(&mut self) -> WriteView<'_, Self> {
        WriteView::new(self)
    }

    #[inline]
    fn check_mode(&self, expected: Mode) -> Result<()> {
        if self.mode != expected {
            return Err(BufferError::ModeViolation {
                expected,
                actual: self.mode,
            });
        }
        Ok(())
    }

    /// Grows the store so `additional` bytes fit after the frontier.
    fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        if self.capacity() - self.pos >= additional {
            return Ok(());
        }
        let needed = self
            .pos
            .checked_add(additional)
            .filter(|&needed| needed <= QUEUE_MAX_CAPACITY)
            .ok_or(BufferError::Overflow {
                requested: self.pos.saturating_add(additional),
                limit: QUEUE_MAX_CAPACITY,
            })?;
        let new_capacity = grown_capacity(self.capacity(), needed, additional, QUEUE_MAX_CAPACITY);

        let mut store = vec![0u8; new_capacity];
        store[..self.pos].copy_from_slice(&self.data[..self.pos]);
        let mut old = std::mem::replace(&mut self.data, store);
        let old_capacity = old.len();
        old.zeroize();
        debug!(old_capacity, new_capacity, additional, "gated buffer grown");
        Ok(())
    }
}

impl Readable for GatedBuffer {
    /// Unread bytes in Read mode; always 0 in Write mode.
    #[inline]
    fn available(&self) -> usize {
        match self.mode {
            Mode::Read => self.limit - self.pos,
            Mode::Write => 0,
        }
    }

    fn peek_bytes(&self, offset: usize, dst: &mut [u8]) -> Result<()> {
        self.check_mode(Mode::Read)?;
        self.ensure_available(offset.saturating_add(dst.len()))?;
        let start = self.pos + offset;
        dst.copy_from_slice(&self.data[start..start + dst.len()]);
        Ok(())
    }

    fn get_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        self.peek_bytes(0, dst)?;
        self.pos += dst.len();
        Ok(())
    }

    fn skip(&mut self, len: usize) -> Result<()> {
        self.check_mode(Mode::Read)?;
        self.ensure_available(len)?;
        self.pos += len;
        Ok(())
    }

    fn transfer_into(&mut self, sink: &mut dyn BufMut) -> Result<usize> {
        self.check_mode(Mode::Read)?;
        let len = self.available().min(sink.remaining_mut());
        sink.put_slice(&self.data[self.pos..self.pos + len]);
        self.pos += len;
        Ok(len)
    }
}

impl Writable for GatedBuffer {
    fn put_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.check_mode(Mode::Write)?;
        self.ensure_capacity(src.len())?;
        self.data[self.pos..self.pos + src.len()].copy_from_slice(src);
        self.pos += src.len();
        Ok(())
    }

    fn absorb_from(&mut self, source: &mut dyn Buf) -> Result<usize> {
        self.check_mode(Mode::Write)?;
        let len = source.remaining();
        self.ensure_capacity(len)?;
        source.copy_to_slice(&mut self.data[self.pos..self.pos + len]);
        self.pos += len;
        Ok(len)
    }

    /// Empties the buffer without changing the mode.
    fn clear(&mut self) {
        self.pos = 0;
        self.limit = 0;
    }
}

impl Default for GatedBuffer {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for GatedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatedBuffer")
            .field("capacity", &self.capacity())
            .field("pos", &self.pos)
            .field("limit", &self.limit)
            .field("mode", &self.mode)
            .field("mode_locked", &self.mode_locked)
            .finish()
    }
}
