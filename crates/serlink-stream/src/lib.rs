//! Byte stream abstraction for serial links.
//!
//! As seen by the framing layer, a serial link is three primitives: read
//! one byte (blocking), count the bytes readable right now without
//! blocking, and write bytes out. The [`SerialStream`] trait captures
//! exactly that, and everything else in serlink builds on top of it.
//!
//! Two implementations ship here:
//! - [`FdStream`] — a character device opened by path (e.g. `/dev/ttyUSB0`)
//! - [`MemoryStream`] — an in-memory loopback queue for tests and tools

pub mod error;
pub mod mem;
pub mod traits;

#[cfg(unix)]
pub mod fd;

pub use error::{Result, StreamError};
pub use mem::MemoryStream;
pub use traits::SerialStream;

#[cfg(unix)]
pub use fd::FdStream;
