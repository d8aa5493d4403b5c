// src/transform/serialized.rs
//! Transformer for any serde-serializable value.
//!
//! The value travels as a frame: a 4-byte big-endian body length followed by
//! the JSON body. The body is parsed straight out of the buffer through a
//! [`BufferReader`], bounded by the frame length.

use super::Transformer;
use crate::buffer::{Readable, Writable};
use crate::error::{BufferError, Result};
use crate::stream::BufferReader;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::io::Read;
use std::marker::PhantomData;

/// Encodes any `T: Serialize + DeserializeOwned` as a length-prefixed JSON
/// body.
///
/// # Example
///
/// ```rust
/// use wirebuf::prelude::*;
/// use std::collections::BTreeMap;
///
/// let scores = SerdeTransformer::<BTreeMap<String, u32>>::new();
/// let value = BTreeMap::from([("ada".to_string(), 3), ("bob".to_string(), 5)]);
///
/// let bytes = encode_to_vec(&scores, &value)?;
/// assert_eq!(decode_from_slice(&scores, &bytes)?, value);
/// # Ok::<(), BufferError>(())
/// ```
pub struct SerdeTransformer<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeTransformer<T> {
    /// Creates the transformer.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for SerdeTransformer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SerdeTransformer<T> {}

impl<T> Default for SerdeTransformer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeTransformer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeTransformer")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> Transformer<T> for SerdeTransformer<T> {
    /// Serializes the whole frame first, so a value serde rejects leaves
    /// `dst` untouched.
    fn encode(&self, value: &T, dst: &mut dyn Writable) -> Result<()> {
        let mut frame = vec![0u8; 4];
        serde_json::to_writer(&mut frame, value)
            .map_err(|e| BufferError::InvalidArgument(format!("value cannot be serialized: {e}")))?;
        let body_len = frame.len() - 4;
        let prefix = u32::try_from(body_len).map_err(|_| BufferError::Overflow {
            requested: body_len,
            limit: u32::MAX as usize,
        })?;
        frame[..4].copy_from_slice(&prefix.to_be_bytes());
        dst.put_bytes(&frame)
    }

    /// An incomplete frame consumes nothing. A complete but malformed frame
    /// is consumed whole and reported as [`BufferError::InvalidData`], so the
    /// values after it stay readable.
    fn decode(&self, src: &mut dyn Readable) -> Result<T> {
        let mut prefix = [0u8; 4];
        src.peek_bytes(0, &mut prefix)?;
        let body_len = u32::from_be_bytes(prefix) as usize;
        src.ensure_available(prefix.len().saturating_add(body_len))?;
        src.skip(prefix.len())?;

        let before = src.available();
        let parsed = serde_json::from_reader(BufferReader::new(&mut *src).take(body_len as u64));
        let consumed = before - src.available();
        src.skip(body_len - consumed)?;

        parsed.map_err(|e| BufferError::InvalidData(format!("malformed serialized body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gated::{GatedBuffer, Mode};
    use crate::queue::ByteQueue;
    use crate::transform::{decode_from_slice, encode_to_vec};
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Packet {
        id: u64,
        name: String,
        tags: Vec<String>,
        ratio: Option<f64>,
    }

    fn packet() -> Packet {
        Packet {
            id: 0xff000000ff,
            name: "Hello World!".to_string(),
            tags: vec!["a".to_string(), "ß".to_string()],
            ratio: Some(0.5),
        }
    }

    #[test]
    fn test_round_trip() {
        let packets = SerdeTransformer::<Packet>::new();
        let bytes = encode_to_vec(&packets, &packet()).unwrap();

        let body_len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        assert_eq!(body_len, bytes.len() - 4);
        assert_eq!(decode_from_slice(&packets, &bytes).unwrap(), packet());
    }

    #[test]
    fn test_frame_is_bounded_by_prefix() {
        let packets = SerdeTransformer::<Packet>::new();
        let mut queue = ByteQueue::new();
        packets.encode(&packet(), &mut queue).unwrap();
        queue.put_u16(0x2b88).unwrap();

        assert_eq!(packets.decode(&mut queue).unwrap(), packet());
        assert_eq!(queue.get_u16().unwrap(), 0x2b88);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_through_gated_buffer() {
        let numbers = SerdeTransformer::<Vec<i64>>::new();
        let mut buf = GatedBuffer::new(0);
        numbers.encode(&vec![-1, 0, i64::MAX], &mut buf).unwrap();

        assert!(matches!(
            numbers.decode(&mut buf),
            Err(BufferError::ModeViolation { .. })
        ));
        buf.set_mode(Mode::Read).unwrap();
        assert_eq!(numbers.decode(&mut buf).unwrap(), vec![-1, 0, i64::MAX]);
    }

    #[test]
    fn test_truncated_frame_consumes_nothing() {
        let packets = SerdeTransformer::<Packet>::new();
        let bytes = encode_to_vec(&packets, &packet()).unwrap();

        let mut queue = ByteQueue::new();
        queue.put_bytes(&bytes[..bytes.len() - 1]).unwrap();
        assert!(packets.decode(&mut queue).unwrap_err().is_underflow());
        assert_eq!(queue.available(), bytes.len() - 1);
    }

    #[test]
    fn test_malformed_body_skips_frame() {
        let packets = SerdeTransformer::<Packet>::new();
        let mut queue = ByteQueue::new();
        queue.put_u32(3).unwrap();
        queue.put_bytes(b"{x}").unwrap();
        queue.put_u8(9).unwrap();

        let err = packets.decode(&mut queue).unwrap_err();
        assert!(matches!(err, BufferError::InvalidData(_)));
        assert_eq!(queue.get_u8().unwrap(), 9);
    }

    #[test]
    fn test_unserializable_value_writes_nothing() {
        let maps = SerdeTransformer::<HashMap<(i32, i32), i32>>::new();
        let mut queue = ByteQueue::new();
        let err = maps
            .encode(&HashMap::from([((1, 2), 3)]), &mut queue)
            .unwrap_err();
        assert!(matches!(err, BufferError::InvalidArgument(_)));
        assert!(queue.is_empty());
    }
}
