use std::collections::VecDeque;
use std::io;

use crate::traits::SerialStream;

/// In-memory loopback stream.
///
/// Writes append to a queue; reads pop from the front of the same queue.
/// Useful for tests and for running the framing layer over a captured
/// byte buffer instead of live hardware.
#[derive(Debug, Default)]
pub struct MemoryStream {
    queue: VecDeque<u8>,
}

impl MemoryStream {
    /// Create an empty loopback stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stream pre-loaded with received bytes.
    pub fn from_bytes(bytes: impl Into<VecDeque<u8>>) -> Self {
        Self {
            queue: bytes.into(),
        }
    }

    /// Push bytes onto the receive side without going through `write_all`.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.queue.extend(bytes);
    }

    /// Drain everything currently queued into a `Vec`.
    pub fn take_all(&mut self) -> Vec<u8> {
        self.queue.drain(..).collect()
    }

    /// Number of queued bytes.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl From<Vec<u8>> for MemoryStream {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl SerialStream for MemoryStream {
    /// Pop the next queued byte.
    ///
    /// A memory stream has nothing to block on, so an empty queue yields
    /// `UnexpectedEof` rather than waiting.
    fn read_byte(&mut self) -> io::Result<u8> {
        self.queue.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "memory stream exhausted")
        })
    }

    fn available(&mut self) -> io::Result<usize> {
        Ok(self.queue.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.queue.extend(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let mut stream = MemoryStream::new();
        stream.write_all(b"abc").unwrap();

        assert_eq!(stream.available().unwrap(), 3);
        assert_eq!(stream.read_byte().unwrap(), b'a');
        assert_eq!(stream.read_byte().unwrap(), b'b');
        assert_eq!(stream.read_byte().unwrap(), b'c');
        assert_eq!(stream.available().unwrap(), 0);
    }

    #[test]
    fn read_on_empty_is_unexpected_eof() {
        let mut stream = MemoryStream::new();
        let err = stream.read_byte().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn feed_and_take_all() {
        let mut stream = MemoryStream::new();
        stream.feed(&[0xAA, 0x01]);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.take_all(), vec![0xAA, 0x01]);
        assert!(stream.is_empty());
    }

    #[test]
    fn from_bytes_preloads_receive_side() {
        let mut stream = MemoryStream::from_bytes(vec![1, 2, 3]);
        assert_eq!(stream.available().unwrap(), 3);
        assert_eq!(stream.read_byte().unwrap(), 1);
    }
}
