/// Errors that can occur while framing packets.
///
/// Integrity failures on the receive path (bad length complement, bad
/// checksum, oversized declared length) are deliberately *not* errors:
/// the framer recovers from them silently by resynchronizing on the next
/// preamble. Only stream-level I/O failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload is too large to frame.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred on the underlying serial stream.
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
