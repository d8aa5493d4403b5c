// src/gated/mod.rs
//! Mode-gated buffer with explicit write/read hand-off.

mod buffer;

pub use buffer::{GatedBuffer, Mode};
