// tests/integration_tests.rs
//! Integration tests for the buffer, codec and stream layers

use proptest::prelude::*;
use std::io::{self, Cursor, Read, Write};
use wirebuf::prelude::*;

#[test]
fn test_data_queue_interleaved_round_trip() {
    // Reads and writes interleave; the queue must stay FIFO throughout
    let mut queue = ByteQueue::new();

    queue.put_i64(0xff000000ff000000u64 as i64).unwrap();
    queue.put_i32(0xf00f).unwrap();
    queue.put_u8(0xe5).unwrap();
    queue.put_i16(0x2b88).unwrap();

    assert_eq!(queue.get_i64().unwrap(), 0xff000000ff000000u64 as i64);
    assert_eq!(queue.get_i32().unwrap(), 0xf00f);
    assert_eq!(queue.available(), 3);

    queue.put_char('*').unwrap();
    assert_eq!(queue.get_u8().unwrap(), 0xe5);
    assert_eq!(queue.get_i16().unwrap(), 0x2b88);
    assert_eq!(queue.available(), 2);

    queue.put_string("Hello World!").unwrap();
    queue.put_f64(42.42424242).unwrap();
    queue.put_f32(21.21212121).unwrap();
    assert_eq!(queue.available(), 2 + (4 + 12) + 8 + 4);

    assert_eq!(queue.get_char().unwrap(), '*');
    assert_eq!(queue.get_string().unwrap(), "Hello World!");
    assert_eq!(queue.get_f64().unwrap(), 42.42424242);
    assert_eq!(queue.get_f32().unwrap(), 21.21212121f32);
    assert_eq!(queue.available(), 0);
}

#[test]
fn test_wire_layout_is_big_endian() {
    let mut queue = ByteQueue::new();
    queue.put_u32(0x01020304).unwrap();
    queue.put_char('é').unwrap();
    queue.put_bool(true).unwrap();
    queue.put_string("ab").unwrap();

    assert_eq!(
        queue.as_slice(),
        &[1, 2, 3, 4, 0x00, 0xe9, 1, 0, 0, 0, 2, b'a', b'b']
    );
}

#[test]
fn test_growth_from_zero_capacity() {
    let mut queue = ByteQueue::with_capacity(0);
    for i in 0..1000u32 {
        queue.put_u32(i).unwrap();
    }
    assert_eq!(queue.available(), 4000);
    assert!(queue.capacity() >= 4000);

    for i in 0..1000u32 {
        assert_eq!(queue.get_u32().unwrap(), i);
    }
}

#[test]
fn test_cursor_recycling_keeps_capacity() {
    let mut queue = ByteQueue::with_capacity(16);
    for round in 0..100u64 {
        queue.put_u64(round).unwrap();
        queue.put_u64(!round).unwrap();
        assert_eq!(queue.get_u64().unwrap(), round);
        assert_eq!(queue.get_u64().unwrap(), !round);
    }
    assert_eq!(queue.capacity(), 16);
}

#[test]
fn test_retain_then_drain() {
    let mut queue = ByteQueue::new();
    queue.put_bytes(b"keep-this-drop-that").unwrap();
    queue.retain(9);
    assert_eq!(queue.get_vec(queue.available()).unwrap(), b"keep-this");
}

#[test]
fn test_underflow_leaves_queue_intact() {
    let mut queue = ByteQueue::new();
    queue.put_u16(0xabcd).unwrap();

    let err = queue.get_u64().unwrap_err();
    assert_eq!(
        err,
        BufferError::Underflow {
            requested: 8,
            available: 2
        }
    );
    assert_eq!(queue.get_u16().unwrap(), 0xabcd);
}

#[test]
fn test_max_size_rejects_growth() {
    let mut queue = ByteQueue::with_config(QueueConfig {
        initial_capacity: 4,
        max_size: 8,
    });
    queue.put_u64(1).unwrap();
    assert!(matches!(
        queue.put_u8(2),
        Err(BufferError::Overflow { limit: 8, .. })
    ));
    assert_eq!(queue.get_u64().unwrap(), 1);
}

#[test]
fn test_gated_mode_discipline() {
    let mut buf = GatedBuffer::new(4);
    assert_eq!(buf.mode(), Mode::Write);
    buf.put_string("gate").unwrap();
    assert!(matches!(
        buf.get_u8(),
        Err(BufferError::ModeViolation {
            expected: Mode::Read,
            actual: Mode::Write
        })
    ));

    buf.set_mode(Mode::Read).unwrap();
    buf.lock_mode();
    assert_eq!(buf.get_string().unwrap(), "gate");
    assert_eq!(buf.set_mode(Mode::Read), Err(BufferError::ModeLocked));
    assert!(buf.put_u8(0).is_err());
}

#[test]
fn test_views_narrow_capabilities() {
    fn produce(sink: &mut WriteView<'_, ByteQueue>) -> wirebuf::Result<()> {
        sink.put_u16(7)?;
        sink.put_string("view")
    }

    fn consume(source: &mut ReadView<'_, ByteQueue>) -> wirebuf::Result<(u16, String)> {
        Ok((source.get_u16()?, source.get_string()?))
    }

    let mut queue = ByteQueue::new();
    produce(&mut queue.write_view()).unwrap();
    assert_eq!(consume(&mut queue.read_view()).unwrap(), (7, "view".to_string()));
}

#[test]
fn test_collection_transformer_through_gated_buffer() {
    let ints = CollectionTransformer::new(I32Transformer);
    let values = vec![10, 20, 30, 40, 50];

    let mut buf = GatedBuffer::new(0);
    ints.encode(&values, &mut buf).unwrap();
    buf.set_mode(Mode::Read).unwrap();
    assert_eq!(ints.decode(&mut buf).unwrap(), values);
    assert_eq!(buf.available(), 0);
}

#[test]
fn test_stream_adapters() {
    let mut queue = ByteQueue::new();
    {
        let mut writer = BufferWriter::new(&mut queue);
        writer.write_all(b"line one\n").unwrap();
        writer.write_all(b"line two\n").unwrap();
    }

    let mut text = String::new();
    BufferReader::new(&mut queue)
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, "line one\nline two\n");
    assert!(queue.is_empty());
}

#[test]
fn test_fill_and_flush() {
    let mut source = Cursor::new(b"\x00\x00\x00\x05hello".to_vec());
    let mut queue = ByteQueue::new();

    assert_eq!(queue.fill_from_stream(&mut source).unwrap(), 9);
    assert_eq!(queue.fill_from_stream(&mut source).unwrap(), 0);
    assert_eq!(queue.get_string().unwrap(), "hello");

    queue.put_bytes(b"out").unwrap();
    let mut sink = Vec::new();
    assert_eq!(queue.flush_to_stream(&mut sink).unwrap(), 3);
    assert_eq!(sink, b"out");
    assert!(queue.is_empty());
}

#[test]
fn test_io_error_wraps_buffer_error() {
    let mut buf = GatedBuffer::new(0);
    let err: io::Error = buf.get_u32().into_io().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::Other);
    assert!(
        err.get_ref()
            .and_then(|e| e.downcast_ref::<BufferError>())
            .is_some()
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_transformer_alongside_primitives() {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Greeting {
        text: String,
        repeat: u8,
    }

    let greetings = SerdeTransformer::<Greeting>::new();
    let mut queue = ByteQueue::new();
    queue.put_i32(0xf00f).unwrap();
    greetings
        .encode(
            &Greeting {
                text: "Hello World!".to_string(),
                repeat: 2,
            },
            &mut queue,
        )
        .unwrap();
    queue.put_char('*').unwrap();

    assert_eq!(queue.get_i32().unwrap(), 0xf00f);
    assert_eq!(
        greetings.decode(&mut queue).unwrap(),
        Greeting {
            text: "Hello World!".to_string(),
            repeat: 2,
        }
    );
    assert_eq!(queue.get_char().unwrap(), '*');
    assert_eq!(queue.available(), 0);
}

proptest! {
    #[test]
    fn prop_primitives_round_trip(
        a in any::<u64>(),
        b in any::<i32>(),
        c in any::<i16>(),
        d in any::<u8>(),
        e in any::<bool>(),
        f in any::<f64>().prop_filter("NaN never compares equal", |v| !v.is_nan()),
    ) {
        let mut queue = ByteQueue::new();
        queue.put_u64(a).unwrap();
        queue.put_i32(b).unwrap();
        queue.put_i16(c).unwrap();
        queue.put_u8(d).unwrap();
        queue.put_bool(e).unwrap();
        queue.put_f64(f).unwrap();

        prop_assert_eq!(queue.get_u64().unwrap(), a);
        prop_assert_eq!(queue.get_i32().unwrap(), b);
        prop_assert_eq!(queue.get_i16().unwrap(), c);
        prop_assert_eq!(queue.get_u8().unwrap(), d);
        prop_assert_eq!(queue.get_bool().unwrap(), e);
        prop_assert_eq!(queue.get_f64().unwrap(), f);
        prop_assert_eq!(queue.available(), 0);
    }

    #[test]
    fn prop_strings_round_trip(s in ".*") {
        let bytes = encode_to_vec(&StringTransformer, &s).unwrap();
        prop_assert_eq!(bytes.len(), 4 + s.len());
        prop_assert_eq!(decode_from_slice(&StringTransformer, &bytes).unwrap(), s);
    }

    #[test]
    fn prop_bmp_chars_round_trip(c in any::<char>().prop_filter("BMP only", |c| (*c as u32) <= 0xFFFF)) {
        let mut queue = ByteQueue::new();
        queue.put_char(c).unwrap();
        prop_assert_eq!(queue.get_char().unwrap(), c);
    }

    #[test]
    fn prop_retain_keeps_prefix(data in proptest::collection::vec(any::<u8>(), 0..256), keep in 0usize..300) {
        let mut queue = ByteQueue::new();
        queue.put_bytes(&data).unwrap();
        queue.retain(keep);

        let expected = &data[..keep.min(data.len())];
        prop_assert_eq!(queue.available(), expected.len());
        prop_assert_eq!(queue.get_vec(expected.len()).unwrap(), expected.to_vec());
    }

    #[test]
    fn prop_chunked_writes_drain_in_order(chunks in proptest::collection::vec(
        proptest::collection::vec(any::<u8>(), 0..64), 0..32)
    ) {
        let mut queue = ByteQueue::with_capacity(0);
        let mut expected = Vec::new();
        for chunk in &chunks {
            queue.put_bytes(chunk).unwrap();
            expected.extend_from_slice(chunk);
            // Interleave partial drains
            if queue.available() > 8 {
                let head = queue.get_vec(8).unwrap();
                prop_assert_eq!(&head[..], &expected[..8]);
                expected.drain(..8);
            }
        }
        prop_assert_eq!(queue.get_vec(queue.available()).unwrap(), expected);
    }
}
