//! Preamble-synchronized packet framing for unreliable serial links.
//!
//! This is the core of serlink. Every packet on the wire is:
//! - A 1-byte preamble (0xAA) for stream resynchronization
//! - A 6-byte header: type, payload length, and the bitwise complement of
//!   the length (all big-endian)
//! - The payload
//! - A 2-byte Fletcher-16 checksum over header and payload
//!
//! The receive side is a byte-at-a-time state machine with a fixed receive
//! buffer: noise before a preamble is discarded, any integrity failure
//! resets the machine back to preamble search, and a declared length that
//! would overflow the buffer is dropped rather than buffered.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod framer;
pub mod writer;

pub use checksum::{fletcher16, Fletcher16};
pub use codec::{
    encode_packet, CHECKSUM_LEN, DEFAULT_BUFFER_CAPACITY, HEADER_LEN, MAX_PAYLOAD_LEN, PREAMBLE,
};
pub use error::{FrameError, Result};
pub use framer::{Framer, FramerConfig, FramerStats, Packet, MIN_BUFFER_CAPACITY};
pub use writer::write_packet;
