// src/lib.rs
//! # Binary Buffer and Wire Codec Library
//!
//! Growable byte buffers with a fixed big-endian wire format, for building
//! message codecs and network protocol plumbing.
//!
//! Features:
//! - One wire format for primitives, BMP chars and length-prefixed UTF-8
//!   strings, shared by every buffer
//! - [`ByteQueue`]: a FIFO that grows on demand and recycles its cursors
//! - [`GatedBuffer`]: explicit Write/Read phases with an optional mode lock
//! - Read-only and write-only views that narrow what a consumer can do
//! - Composable [`Transformer`]s, including nested collections and, with the
//!   `serde` feature, any serde-serializable value
//! - `std::io` adapters and `bytes::{Buf, BufMut}` interop
//! - Secure memory zeroing using `zeroize` on growth and drop
//!
//! ```rust
//! use wirebuf::prelude::*;
//!
//! let mut queue = ByteQueue::new();
//! queue.put_u16(0x2b88)?;
//! queue.put_string("Hello World!")?;
//!
//! assert_eq!(queue.get_u16()?, 0x2b88);
//! assert_eq!(queue.get_string()?, "Hello World!");
//! assert_eq!(queue.available(), 0);
//! # Ok::<(), BufferError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod encoding;
pub mod error;
pub mod gated;
pub mod queue;
pub mod stream;
pub mod transform;

// Re-export main types
pub use buffer::{ReadView, Readable, WriteView, Writable};
pub use encoding::WireValue;
pub use error::{BufferError, Result, ResultExt};
pub use gated::{GatedBuffer, Mode};
pub use queue::{ByteQueue, QUEUE_MAX_CAPACITY, QueueConfig};
pub use stream::{AvailableRead, BufferReader, BufferWriter};
pub use transform::{CollectionTransformer, StringTransformer, Transformer};
#[cfg(feature = "serde")]
pub use transform::SerdeTransformer;

/// Commonly used imports.
pub mod prelude {
    pub use crate::buffer::{ReadView, Readable, WriteView, Writable};
    pub use crate::error::{BufferError, Result, ResultExt};
    pub use crate::gated::{GatedBuffer, Mode};
    pub use crate::queue::{ByteQueue, QueueConfig};
    pub use crate::stream::{AvailableRead, BufferReader, BufferWriter};
    pub use crate::transform::{
        BoolTransformer, CharTransformer, CollectionTransformer, F32Transformer, F64Transformer,
        I8Transformer, I16Transformer, I32Transformer, I64Transformer, StringTransformer,
        Transformer, U8Transformer, U16Transformer, U32Transformer, U64Transformer,
        decode_from_slice, encode_to_vec,
    };

    #[cfg(feature = "serde")]
    pub use crate::transform::SerdeTransformer;
}
