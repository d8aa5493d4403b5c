// src/queue/mod.rs
//! Growable FIFO byte queue.

mod core;
mod ops;

pub use self::core::{ByteQueue, QUEUE_MAX_CAPACITY, QueueConfig};
pub(crate) use self::core::grown_capacity;
