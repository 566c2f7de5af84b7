use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StreamError};
use crate::traits::SerialStream;

/// A serial stream backed by a file descriptor.
///
/// Opens a character device by path (e.g. `/dev/ttyUSB0`). Line discipline
/// and baud rate are the platform's concern; this type only moves bytes.
/// `available()` is answered by the kernel via the `FIONREAD` ioctl.
pub struct FdStream {
    file: File,
    path: PathBuf,
}

impl FdStream {
    /// Open a device path for reading and writing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| StreamError::Open {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), "opened serial device");
        Ok(Self { file, path })
    }

    /// The device path this stream was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SerialStream for FdStream {
    fn read_byte(&mut self) -> io::Result<u8> {
        let mut byte = [0u8; 1];
        loop {
            match self.file.read(&mut byte) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "serial device closed",
                    ))
                }
                Ok(_) => return Ok(byte[0]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }

    fn available(&mut self) -> io::Result<usize> {
        let fd = self.file.as_raw_fd();
        let mut count: libc::c_int = 0;

        // SAFETY: `fd` is an open descriptor owned by `self.file`, and
        // `count` is a valid writable pointer for the duration of the call.
        let rc = unsafe { libc::ioctl(fd, libc::FIONREAD, &mut count) };

        if rc == 0 {
            Ok(count.max(0) as usize)
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.file.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl std::fmt::Debug for FdStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FdStream")
            .field("path", &self.path)
            .finish()
    }
}
