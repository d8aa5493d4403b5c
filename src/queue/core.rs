// src/queue/core.rs
//! Core queue structure, configuration and growth.
//!
//! This module provides the [`ByteQueue`] type: one byte store with
//! independent read and write cursors, used as a FIFO. Memory discarded by
//! growth or drop is securely zeroed.

use crate::error::{BufferError, Result};
use std::fmt;
use tracing::{debug, warn};
use zeroize::Zeroize;

/// Largest capacity any queue may reach, whatever its configuration.
pub const QUEUE_MAX_CAPACITY: usize = isize::MAX as usize;

/// Configuration for a [`ByteQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueConfig {
    /// Capacity allocated up front (may be 0)
    pub initial_capacity: usize,
    /// Upper bound on capacity; 0 means unlimited
    pub max_size: usize,
}

impl QueueConfig {
    /// Checks that the initial capacity respects the cap.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] if `initial_capacity` exceeds
    /// a non-zero `max_size`, or [`QUEUE_MAX_CAPACITY`].
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity > QUEUE_MAX_CAPACITY {
            return Err(BufferError::InvalidArgument(format!(
                "initial capacity {} exceeds maximum {}",
                self.initial_capacity, QUEUE_MAX_CAPACITY
            )));
        }
        if self.max_size != 0 && self.initial_capacity > self.max_size {
            return Err(BufferError::InvalidArgument(format!(
                "initial capacity {} exceeds max size {}",
                self.initial_capacity, self.max_size
            )));
        }
        Ok(())
    }
}

/// A growable FIFO byte queue.
///
/// Writes append at the write cursor, reads consume from the read cursor;
/// no mode switch is needed between them. When a write does not fit, the
/// store is replaced by one of `⌊capacity × 1.5⌋ + required` bytes (clamped
/// to the configured max size), unread bytes move to the front, and the old
/// store is zeroed.
///
/// Whenever the queue drains to empty both cursors return to 0, so the whole
/// capacity is free again.
///
/// # Examples
///
/// ```
/// use wirebuf::prelude::*;
/// # use wirebuf::BufferError;
///
/// let mut queue = ByteQueue::new();
/// queue.put_u32(42)?;
/// queue.put_string("hello")?;
///
/// assert_eq!(queue.get_u32()?, 42);
/// assert_eq!(queue.get_string()?, "hello");
/// assert_eq!(queue.available(), 0);
/// # Ok::<(), BufferError>(())
/// ```
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct ByteQueue {
    /// Backing store; `data.len()` is the capacity
    pub(crate) data: Vec<u8>,
    /// Next byte to read
    pub(crate) read_pos: usize,
    /// Next byte to write
    pub(crate) write_pos: usize,
    /// Upper bound on capacity, 0 = unlimited
    pub(crate) max_size: usize,
}

impl ByteQueue {
    /// Creates an empty queue with capacity 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirebuf::ByteQueue;
    ///
    /// let queue = ByteQueue::new();
    /// assert_eq!(queue.capacity(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue with `capacity` zeroed bytes and no size cap.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`QUEUE_MAX_CAPACITY`].
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(QueueConfig {
            initial_capacity: capacity,
            max_size: 0,
        })
    }

    /// Creates a queue from `config`.
    ///
    /// # Panics
    ///
    /// Panics if the config is invalid; see [`QueueConfig::validate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use wirebuf::{ByteQueue, QueueConfig};
    ///
    /// let queue = ByteQueue::with_config(QueueConfig {
    ///     initial_capacity: 16,
    ///     max_size: 1024,
    /// });
    /// assert_eq!(queue.capacity(), 16);
    /// assert_eq!(queue.max_size(), 1024);
    /// ```
    pub fn with_config(config: QueueConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("{err}");
        }
        Self::from_valid_config(config)
    }

    /// Creates a queue from `config`, reporting an invalid config as an error.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`]; see [`QueueConfig::validate`].
    pub fn try_with_config(config: QueueConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: QueueConfig) -> Self {
        Self {
            data: vec![0; config.initial_capacity],
            read_pos: 0,
            write_pos: 0,
            max_size: config.max_size,
        }
    }

    /// Returns the current capacity.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of bytes that can be written before the next growth.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirebuf::prelude::*;
    /// # use wirebuf::BufferError;
    ///
    /// let mut queue = ByteQueue::with_capacity(8);
    /// queue.put_u32(1)?;
    /// assert_eq!(queue.free(), 4);
    ///
    /// queue.get_u32()?;
    /// assert_eq!(queue.free(), 8);
    /// # Ok::<(), BufferError>(())
    /// ```
    #[inline(always)]
    pub fn free(&self) -> usize {
        self.data.len() - self.write_pos
    }

    /// Returns the configured max size (0 = unlimited).
    #[inline(always)]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns `true` if there is nothing to read.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.read_pos == self.write_pos
    }

    /// Returns the unread bytes without consuming them.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirebuf::prelude::*;
    /// # use wirebuf::BufferError;
    ///
    /// let mut queue = ByteQueue::new();
    /// queue.put_bytes(b"abc")?;
    /// queue.get_u8()?;
    /// assert_eq!(queue.as_slice(), b"bc");
    /// # Ok::<(), BufferError>(())
    /// ```
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.read_pos..self.write_pos]
    }

    /// Resets both cursors to 0 without reallocating.
    #[inline]
    pub(crate) fn reset(&mut self) {
        self.read_pos = 0;
        self.write_pos = 0;
    }

    /// Securely zeros the store and resets both cursors.
    ///
    /// Uses compiler-resistant zeroing via the [`zeroize`] crate. Capacity is
    /// kept.
    pub fn burn(&mut self) {
        // Slice zeroize keeps data.len() == capacity; Vec::zeroize would clear it.
        self.data.as_mut_slice().zeroize();
        self.reset();
    }

    /// Effective capacity limit.
    #[inline]
    fn limit(&self) -> usize {
        if self.max_size == 0 {
            QUEUE_MAX_CAPACITY
        } else {
            self.max_size
        }
    }

    /// Advances the read cursor, recycling both cursors once the queue is empty.
    #[inline]
    pub(crate) fn consume(&mut self, len: usize) {
        debug_assert!(self.read_pos + len <= self.write_pos);
        self.read_pos += len;
        if self.read_pos == self.write_pos {
            self.reset();
        }
    }

    /// Makes sure `additional` bytes can be written at the write cursor.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Overflow`] if the new capacity is not
    /// representable or would exceed the configured max size.
    pub(crate) fn ensure_free(&mut self, additional: usize) -> Result<()> {
        if self.free() >= additional {
            return Ok(());
        }

        let limit = self.limit();
        let live = self.write_pos - self.read_pos;
        let needed = live
            .checked_add(additional)
            .filter(|&needed| needed <= limit)
            .ok_or_else(|| {
                warn!(
                    live,
                    additional,
                    limit,
                    "byte queue growth rejected by size limit"
                );
                BufferError::Overflow {
                    requested: live.saturating_add(additional),
                    limit,
                }
            })?;

        let new_capacity = grown_capacity(self.capacity(), needed, additional, limit);

        let mut store = vec![0u8; new_capacity];
        store[..live].copy_from_slice(&self.data[self.read_pos..self.write_pos]);
        let mut old = std::mem::replace(&mut self.data, store);
        let old_capacity = old.len();
        old.zeroize();

        debug!(old_capacity, new_capacity, additional, "byte queue grown");
        self.read_pos = 0;
        self.write_pos = live;
        Ok(())
    }
}

/// Capacity after one growth step: `capacity + capacity / 2 + additional`,
/// clamped to `limit` but never below `needed`.
///
/// Callers have already checked `needed <= limit`.
#[inline]
pub(crate) fn grown_capacity(capacity: usize, needed: usize, additional: usize, limit: usize) -> usize {
    (capacity / 2)
        .checked_add(capacity)
        .and_then(|c| c.checked_add(additional))
        .unwrap_or(usize::MAX)
        .min(limit)
        .max(needed)
}

impl Default for ByteQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ByteQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteQueue")
            .field("capacity", &self.capacity())
            .field("read_pos", &self.read_pos)
            .field("write_pos", &self.write_pos)
            .field("max_size", &self.max_size)
            .finish()
    }
}

impl AsRef<[u8]> for ByteQueue {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
