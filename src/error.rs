// src/error.rs
//! Error types for buffer operations with advanced conversion support
//!
//! Every variant describes a usage fault detected at the call that raised it.
//! Nothing in this crate retries or auto-corrects; the caller aborts the
//! current encode/decode attempt.

use crate::gated::Mode;
use thiserror::Error;

/// Errors that can occur during buffer operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A read requested more bytes than are currently available
    #[error("buffer underflow: requested {requested} bytes, {available} available")]
    Underflow {
        /// Bytes the operation needed
        requested: usize,
        /// Bytes that were readable
        available: usize,
    },
    /// A capacity computation overflowed or hit the configured maximum size
    #[error("buffer overflow: {requested} bytes required, limit is {limit}")]
    Overflow {
        /// Capacity the operation needed
        requested: usize,
        /// Largest capacity the buffer may reach
        limit: usize,
    },
    /// Operation invoked while the buffer was in the wrong mode
    #[error("mode violation: operation requires {expected:?} mode, buffer is in {actual:?} mode")]
    ModeViolation {
        /// Mode the operation requires
        expected: Mode,
        /// Mode the buffer is in
        actual: Mode,
    },
    /// `set_mode` called after the mode was locked
    #[error("mode is locked")]
    ModeLocked,
    /// Absent, negative or out-of-range argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Bytes that do not decode to the requested type
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl BufferError {
    /// Shorthand for an [`Underflow`](Self::Underflow) error.
    #[inline]
    pub(crate) fn underflow(requested: usize, available: usize) -> Self {
        Self::Underflow {
            requested,
            available,
        }
    }

    /// Returns `true` for [`Underflow`](Self::Underflow).
    pub fn is_underflow(&self) -> bool {
        matches!(self, Self::Underflow { .. })
    }
}

// ============================================================================
// ADVANCED ERROR CONVERSION - Makes buffer library compatible with any error type
// ============================================================================

/// Convert BufferError to std::io::Error, keeping it as the source
impl From<BufferError> for std::io::Error {
    fn from(err: BufferError) -> Self {
        use std::io::ErrorKind;
        let kind = match err {
            BufferError::Underflow { .. } => ErrorKind::UnexpectedEof,
            BufferError::Overflow { .. } => ErrorKind::WriteZero,
            BufferError::InvalidArgument(_) => ErrorKind::InvalidInput,
            BufferError::InvalidData(_) => ErrorKind::InvalidData,
            BufferError::ModeViolation { .. } | BufferError::ModeLocked => ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}

/// Allow using ? with anyhow::Error
#[cfg(feature = "anyhow")]
impl From<anyhow::Error> for BufferError {
    fn from(err: anyhow::Error) -> Self {
        BufferError::InvalidData(err.to_string())
    }
}

// ============================================================================
// RESULT TYPE ALIASES
// ============================================================================

/// Result type alias for buffer operations
///
/// Note: When using with other Result types (like anyhow::Result),
/// either qualify the type (`wirebuf::Result<T>`) or use the conversion traits.
pub type Result<T> = std::result::Result<T, BufferError>;

// ============================================================================
// EXTENSION TRAIT FOR EASY CONVERSION
// ============================================================================

/// Extension trait for converting Results between different error types
pub trait ResultExt<T> {
    /// Convert to anyhow::Result
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T>;

    /// Convert to io::Result
    fn into_io(self) -> std::io::Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T> {
        self.map_err(anyhow::Error::from)
    }

    fn into_io(self) -> std::io::Result<T> {
        self.map_err(|e| e.into())
    }
}

// ============================================================================
// HELPER MACROS FOR ERROR HANDLING
// ============================================================================

/// Convenience macro for converting buffer operations to any Result type.
///
/// Requires an explicit target error type as the second argument when the
/// target has several overlapping `From` impls (e.g. `anyhow::Error`).
///
/// # Example
/// ```
/// use wirebuf::prelude::*;
/// use wirebuf::buffer_op;
///
/// fn handler_function() -> std::io::Result<()> {
///     let mut queue = ByteQueue::new();
///     buffer_op!(queue.put_u32(42))?;
///     Ok(())
/// }
/// # handler_function().unwrap();
/// ```
#[macro_export]
macro_rules! buffer_op {
    // Two-arg form: explicit target type (use this with anyhow, Box<dyn Error>, etc.)
    ($expr:expr, $target:ty) => {
        $expr.map_err(|e: $crate::BufferError| -> $target { e.into() })
    };
    // One-arg form: defaults to std::io::Error (unambiguous, no overlapping impls)
    ($expr:expr) => {
        $expr.map_err(|e: $crate::BufferError| -> std::io::Error { e.into() })
    };
}
