//! Checksummed packet framing for unreliable serial links.
//!
//! serlink turns a raw byte stream into discrete, integrity-checked
//! packets: a preamble byte for resynchronization, a length field guarded
//! by its own bitwise complement, and a Fletcher-16 trailer over header
//! and payload.
//!
//! # Crate Structure
//!
//! - [`stream`] — byte source/sink abstraction (device files, loopback)
//! - [`frame`] — framer state machine, checksum engine, packet writer

/// Re-export stream types.
pub mod stream {
    pub use serlink_stream::*;
}

/// Re-export frame types.
pub mod frame {
    pub use serlink_frame::*;
}
