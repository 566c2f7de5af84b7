use bytes::BytesMut;
use serlink_stream::SerialStream;
use tracing::trace;

use crate::codec::{encode_packet, CHECKSUM_LEN, HEADER_LEN};
use crate::error::Result;

/// Serialize a payload into a complete wire packet and emit it.
///
/// Stateless: preamble, header, payload, and checksum are built fresh for
/// every call and handed to the sink in wire order. Sink failures surface
/// as [`FrameError::Io`](crate::FrameError::Io).
pub fn write_packet<S: SerialStream>(
    stream: &mut S,
    packet_type: u16,
    payload: &[u8],
) -> Result<()> {
    let mut wire = BytesMut::with_capacity(1 + HEADER_LEN + payload.len() + CHECKSUM_LEN);
    encode_packet(packet_type, payload, &mut wire)?;

    stream.write_all(&wire)?;
    stream.flush()?;

    trace!(packet_type, payload_len = payload.len(), "packet written");
    Ok(())
}
