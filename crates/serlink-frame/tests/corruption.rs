//! Corruption and resynchronization scenarios across the full receive path.

use bytes::BytesMut;
use serlink_frame::{encode_packet, Framer, FramerConfig};
use serlink_stream::{MemoryStream, SerialStream};

/// type=0x1234, payload=[1,2,3]; checksum 0x4C 0x54.
const REFERENCE: [u8; 12] = [
    0xAA, 0x12, 0x34, 0x00, 0x03, 0xFF, 0xFC, 0x01, 0x02, 0x03, 0x4C, 0x54,
];

fn wire_for(packet_type: u16, payload: &[u8]) -> Vec<u8> {
    let mut wire = BytesMut::new();
    encode_packet(packet_type, payload, &mut wire).unwrap();
    wire.to_vec()
}

fn feed(framer: &mut Framer, bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| framer.push(b)).count()
}

#[test]
fn single_bit_length_corruption_never_completes_then_resyncs() {
    // Flip each of the 16 bits of the length field in turn, leaving the
    // complement untouched. Every variant must be rejected at header time
    // and a valid packet appended afterwards must still parse.
    for bit in 0..16 {
        let mut corrupted = REFERENCE.to_vec();
        let byte_index = 3 + (1 - bit / 8); // length lives at bytes 3..5, BE
        corrupted[byte_index] ^= 1 << (bit % 8);
        corrupted.extend_from_slice(&REFERENCE);

        let mut framer = Framer::new();
        let completions = feed(&mut framer, &corrupted);

        assert_eq!(completions, 1, "bit {bit}: only the appended packet completes");
        assert_eq!(framer.stats().bad_length, 1, "bit {bit}");
        assert_eq!(framer.packet().unwrap().payload, &[0x01, 0x02, 0x03]);
    }
}

#[test]
fn single_byte_body_corruption_fails_checksum_then_resyncs() {
    // Corrupt each byte of type, payload, and checksum in turn (length and
    // complement are covered by the header check above). XOR with 0x01
    // keeps the delta off 255, which Fletcher-16 cannot see.
    let positions = [1, 2, 7, 8, 9, 10, 11];
    for &index in &positions {
        let mut corrupted = REFERENCE.to_vec();
        corrupted[index] ^= 0x01;
        corrupted.extend_from_slice(&REFERENCE);

        let mut framer = Framer::new();
        let completions = feed(&mut framer, &corrupted);

        assert_eq!(completions, 1, "byte {index}: only the clean packet completes");
        assert_eq!(framer.stats().bad_checksum, 1, "byte {index}");
        assert_eq!(framer.packet().unwrap().packet_type, 0x1234);
    }
}

#[test]
fn preamble_free_noise_never_disturbs_the_next_packet() {
    let noise: Vec<u8> = (0u16..512)
        .map(|i| (i % 256) as u8)
        .filter(|&b| b != 0xAA)
        .collect();

    let mut framer = Framer::new();
    assert_eq!(feed(&mut framer, &noise), 0);
    assert_eq!(feed(&mut framer, &REFERENCE), 1);
    assert_eq!(
        *framer.stats(),
        serlink_frame::FramerStats {
            completed: 1,
            ..Default::default()
        }
    );
}

#[test]
fn stray_preamble_in_noise_costs_one_packet_at_most() {
    // A 0xAA at the end of noise makes the framer swallow the next six
    // bytes as a bogus header. That header fails the complement check, the
    // remainder of the first packet is discarded as noise, and the packet
    // after it parses cleanly.
    let mut stream_bytes = vec![0x00, 0xAA];
    stream_bytes.extend_from_slice(&REFERENCE);
    stream_bytes.extend_from_slice(&REFERENCE);

    let mut framer = Framer::new();
    let completions = feed(&mut framer, &stream_bytes);

    assert_eq!(completions, 1);
    assert_eq!(framer.stats().bad_length, 1);
    assert_eq!(framer.packet().unwrap().packet_type, 0x1234);
}

#[test]
fn oversized_declared_length_is_bounded_and_recoverable() {
    // Consistent header declaring a 0xFFFF-byte payload. Nothing past the
    // header is buffered; the framer just resynchronizes.
    let huge_header = [0xAA, 0x00, 0x01, 0xFF, 0xFF, 0x00, 0x00];

    let mut framer = Framer::new();
    assert_eq!(feed(&mut framer, &huge_header), 0);
    assert_eq!(framer.stats().oversized, 1);

    assert_eq!(feed(&mut framer, &REFERENCE), 1);
    assert_eq!(framer.stats().completed, 1);
}

#[test]
fn corrupted_packet_between_two_valid_packets() {
    let mut stream = MemoryStream::new();
    stream.feed(&wire_for(0x0001, b"first"));
    let mut bad = wire_for(0x0002, b"mangle");
    bad[9] ^= 0x01;
    stream.feed(&bad);
    stream.feed(&wire_for(0x0003, b"third"));

    let mut framer = Framer::with_config(FramerConfig {
        buffer_capacity: 32,
    });

    assert!(framer.drain(&mut stream).unwrap());
    assert_eq!(framer.packet().unwrap().packet_type, 0x0001);

    assert!(framer.drain(&mut stream).unwrap());
    assert_eq!(framer.packet().unwrap().packet_type, 0x0003);
    assert_eq!(framer.packet().unwrap().payload, b"third");

    assert!(!framer.drain(&mut stream).unwrap());
    assert_eq!(framer.stats().bad_checksum, 1);
    assert_eq!(framer.stats().completed, 2);
}

#[test]
fn drain_is_nonblocking_on_trickling_input() {
    // Bytes arriving a few at a time: drain never errors and never claims
    // completion until the packet is whole.
    let mut framer = Framer::new();
    let mut stream = MemoryStream::new();

    let chunks: Vec<&[u8]> = REFERENCE.chunks(3).collect();
    for (i, chunk) in chunks.iter().enumerate() {
        stream.feed(chunk);
        let done = framer.drain(&mut stream).unwrap();
        assert_eq!(done, i == chunks.len() - 1);
        assert_eq!(stream.available().unwrap(), 0);
    }
}
