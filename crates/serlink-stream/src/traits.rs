use std::io;

/// The byte-level interface a serial link must provide.
///
/// Read and write are blocking; [`available`](SerialStream::available) is
/// the one non-blocking primitive, and it is what lets the framing layer
/// drain a link without ever stalling on a byte that has not arrived.
pub trait SerialStream {
    /// Read exactly one byte, blocking until it arrives.
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Number of bytes that can be read right now without blocking.
    fn available(&mut self) -> io::Result<usize>;

    /// Write the whole buffer, blocking until accepted.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Flush buffered output to the underlying device.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: SerialStream + ?Sized> SerialStream for &mut S {
    fn read_byte(&mut self) -> io::Result<u8> {
        (**self).read_byte()
    }

    fn available(&mut self) -> io::Result<usize> {
        (**self).available()
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        (**self).write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}
