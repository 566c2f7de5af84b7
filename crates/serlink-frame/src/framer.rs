use serlink_stream::SerialStream;
use tracing::{debug, trace};

use crate::checksum::verify_trailer;
use crate::codec::{
    read_u16_be, CHECKSUM_LEN, DEFAULT_BUFFER_CAPACITY, HEADER_LEN, LENGTH_COMPLEMENT_POS,
    LENGTH_POS, PREAMBLE, TYPE_POS,
};
use crate::error::Result;

/// Smallest usable receive buffer: header plus checksum, i.e. room for an
/// empty-payload packet. Smaller configured capacities are clamped up to
/// this, since below it no packet can ever complete.
pub const MIN_BUFFER_CAPACITY: usize = HEADER_LEN + CHECKSUM_LEN;

/// Configuration for the receive-side framer.
#[derive(Debug, Clone)]
pub struct FramerConfig {
    /// Receive buffer capacity in bytes (header + payload + checksum; the
    /// preamble byte is never buffered). Allocated once at construction
    /// and never grown: a packet whose declared length would exceed it is
    /// dropped instead. Values below [`MIN_BUFFER_CAPACITY`] are clamped.
    pub buffer_capacity: usize,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

/// Resynchronization and completion counters.
///
/// The framer's return contract is only "packet complete" or "not yet";
/// integrity failures recover silently. These counters are the optional
/// diagnostic channel on the side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FramerStats {
    /// Headers rejected because `length != !length_complement`.
    pub bad_length: u64,
    /// Headers rejected because the declared packet exceeds the buffer.
    pub oversized: u64,
    /// Fully buffered packets rejected by checksum verification.
    pub bad_checksum: u64,
    /// Packets completed and verified.
    pub completed: u64,
}

/// Borrow view of the most recently verified packet.
///
/// Only available between completion and the next byte pushed into the
/// framer; the next byte reclaims the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet<'a> {
    /// Application-defined packet type from the header.
    pub packet_type: u16,
    /// Payload bytes (header and checksum stripped).
    pub payload: &'a [u8],
}

/// Byte-at-a-time packet framer and verifier.
///
/// Owns a fixed receive buffer and the parsing state for one serial link.
/// Bytes are fed in one at a time ([`push`](Framer::push)) or pulled from
/// a stream ([`read_byte`](Framer::read_byte), [`drain`](Framer::drain));
/// the return value is `true` exactly when a complete, checksum-valid
/// packet has just been assembled. Noise, corrupt headers, oversized
/// declarations, and checksum failures all reset the machine back to
/// preamble search without any externally visible error.
///
/// Not designed for concurrent access; one framer per link, serialized by
/// the caller if shared.
#[derive(Debug)]
pub struct Framer {
    buf: Box<[u8]>,
    pos: usize,
    packet_type: u16,
    packet_len: usize,
    seen_preamble: bool,
    complete: bool,
    stats: FramerStats,
}

impl Framer {
    /// Create a framer with the default buffer capacity.
    pub fn new() -> Self {
        Self::with_config(FramerConfig::default())
    }

    /// Create a framer with explicit configuration.
    pub fn with_config(config: FramerConfig) -> Self {
        let capacity = config.buffer_capacity.max(MIN_BUFFER_CAPACITY);
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            pos: 0,
            packet_type: 0,
            packet_len: 0,
            seen_preamble: false,
            complete: false,
            stats: FramerStats::default(),
        }
    }

    /// Receive buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Consume one byte. Returns `true` iff a verified packet just
    /// completed; inspect it with [`packet`](Framer::packet).
    pub fn push(&mut self, byte: u8) -> bool {
        if self.complete {
            // Previous packet was left inspectable; reclaim the buffer
            // before accepting new bytes.
            self.reset();
        }

        if !self.seen_preamble {
            if byte == PREAMBLE {
                trace!("preamble found");
                self.seen_preamble = true;
            }
            // Anything else is noise between packets; discard and keep
            // searching.
            return false;
        }

        if self.pos >= self.buf.len() {
            // Unreachable given the capacity check at header time, but the
            // buffer write below must never be able to run past the end.
            self.reset();
            return false;
        }
        self.buf[self.pos] = byte;
        self.pos += 1;

        if self.pos == HEADER_LEN {
            let declared = read_u16_be(&self.buf, LENGTH_POS);
            let complement = read_u16_be(&self.buf, LENGTH_COMPLEMENT_POS);
            if declared != !complement {
                self.stats.bad_length += 1;
                debug!(declared, complement, "length complement mismatch, resynchronizing");
                self.reset();
                return false;
            }

            self.packet_len = HEADER_LEN + declared as usize + CHECKSUM_LEN;
            self.packet_type = read_u16_be(&self.buf, TYPE_POS);

            if self.packet_len > self.buf.len() {
                self.stats.oversized += 1;
                debug!(
                    packet_len = self.packet_len,
                    capacity = self.buf.len(),
                    "declared packet exceeds buffer, dropping"
                );
                self.reset();
            }
            return false;
        }

        if self.pos == self.packet_len {
            if !verify_trailer(&self.buf[..self.packet_len]) {
                self.stats.bad_checksum += 1;
                debug!(packet_type = self.packet_type, "checksum mismatch, resynchronizing");
                self.reset();
                return false;
            }

            self.stats.completed += 1;
            trace!(
                packet_type = self.packet_type,
                len = self.packet_len,
                "packet verified"
            );
            self.complete = true;
            return true;
        }

        false
    }

    /// Pull one byte from the stream and consume it.
    ///
    /// Blocks until a byte is available; returns `true` iff a verified
    /// packet just completed.
    pub fn read_byte<S: SerialStream>(&mut self, stream: &mut S) -> Result<bool> {
        let byte = stream.read_byte()?;
        Ok(self.push(byte))
    }

    /// Consume bytes while the stream has any immediately available.
    ///
    /// Stops early on the first verified packet, or returns `false` once
    /// the stream is exhausted. Never blocks waiting for more bytes;
    /// parsing resumes where it left off on the next call.
    pub fn drain<S: SerialStream>(&mut self, stream: &mut S) -> Result<bool> {
        while stream.available()? > 0 {
            if self.read_byte(stream)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The last verified packet, if one is currently held.
    pub fn packet(&self) -> Option<Packet<'_>> {
        if !self.complete {
            return None;
        }
        Some(Packet {
            packet_type: self.packet_type,
            payload: &self.buf[HEADER_LEN..self.packet_len - CHECKSUM_LEN],
        })
    }

    /// Resynchronization and completion counters.
    pub fn stats(&self) -> &FramerStats {
        &self.stats
    }

    /// The single recovery point: back to preamble search, partial state
    /// discarded. Every failure branch funnels through here so the framer
    /// never holds a partial packet across a detected corruption.
    fn reset(&mut self) {
        self.seen_preamble = false;
        self.pos = 0;
        self.packet_len = 0;
        self.complete = false;
    }
}

impl Default for Framer {
    fn default() -> Self {
        Self::new()
    }
}
