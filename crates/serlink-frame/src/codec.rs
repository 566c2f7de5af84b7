use bytes::{BufMut, BytesMut};

use crate::checksum::Fletcher16;
use crate::error::{FrameError, Result};

/// Preamble byte marking the start of every packet.
pub const PREAMBLE: u8 = 0xAA;

/// Header: type (2) + length (2) + length complement (2) = 6 bytes.
///
/// The complement field is a redundancy check on the length itself: a bit
/// error in the MSB of an unchecked length would make the receiver wait
/// for an enormous packet that never arrives, stalling all framing until
/// that many bytes have drained. Verifying `length == !complement` right
/// after the header catches that class of corruption immediately.
pub const HEADER_LEN: usize = 6;

/// Fletcher-16 trailer length.
pub const CHECKSUM_LEN: usize = 2;

/// Byte offsets of the header fields (relative to the byte after the
/// preamble; the preamble itself is never buffered).
pub const TYPE_POS: usize = 0;
pub const LENGTH_POS: usize = 2;
pub const LENGTH_COMPLEMENT_POS: usize = 4;

/// Default receive buffer capacity, excluding the preamble byte.
///
/// Sized for short command/telemetry packets on an MCU link; hosts can
/// raise it via [`FramerConfig`](crate::framer::FramerConfig).
pub const DEFAULT_BUFFER_CAPACITY: usize = 20;

/// Largest payload the 2-byte length field can declare.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Build the 6-byte header for a payload of `data_len` bytes.
///
/// All fields big-endian (network byte order).
pub(crate) fn encode_header(packet_type: u16, data_len: u16) -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    header[TYPE_POS..TYPE_POS + 2].copy_from_slice(&packet_type.to_be_bytes());
    header[LENGTH_POS..LENGTH_POS + 2].copy_from_slice(&data_len.to_be_bytes());
    header[LENGTH_COMPLEMENT_POS..LENGTH_COMPLEMENT_POS + 2]
        .copy_from_slice(&(!data_len).to_be_bytes());
    header
}

/// Read a big-endian u16 at `pos`.
pub(crate) fn read_u16_be(buf: &[u8], pos: usize) -> u16 {
    u16::from_be_bytes([buf[pos], buf[pos + 1]])
}

/// Encode a complete wire packet into `dst`.
///
/// Wire format:
/// ```text
/// ┌───────────┬──────────┬──────────┬──────────────┬───────────────┬────────────┐
/// │ Preamble  │ Type     │ Length   │ !Length      │ Payload       │ Checksum   │
/// │ 0xAA (1B) │ (2B BE)  │ (2B BE)  │ (2B BE)      │ (Length bytes)│ (2B)       │
/// └───────────┴──────────┴──────────┴──────────────┴───────────────┴────────────┘
/// ```
/// The checksum covers header and payload, accumulated as two slices of
/// one running Fletcher-16 computation.
pub fn encode_packet(packet_type: u16, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }

    let header = encode_header(packet_type, payload.len() as u16);

    let mut check = Fletcher16::new();
    check.update(&header);
    let mut check = Fletcher16::resume(check.finish());
    check.update(payload);

    dst.reserve(1 + HEADER_LEN + payload.len() + CHECKSUM_LEN);
    dst.put_u8(PREAMBLE);
    dst.put_slice(&header);
    dst.put_slice(payload);
    dst.put_slice(&check.finish());
    Ok(())
}
