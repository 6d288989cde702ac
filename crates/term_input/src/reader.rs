use std::io::{self, Read};
use std::os::unix::io::{AsRawFd, RawFd};

/// Unbuffered reader over a terminal file descriptor.
///
/// `std::io::Stdin` keeps its own buffer, which hides how much input is
/// actually pending; the input loop wants every `read()` to go straight to
/// the descriptor so a non-blocking fd reports `WouldBlock` as soon as it
/// runs dry. The descriptor is borrowed, never closed.
#[derive(Debug, Clone, Copy)]
pub struct TtyReader {
    fd: RawFd,
}

impl TtyReader {
    pub fn stdin() -> Self {
        Self {
            fd: libc::STDIN_FILENO,
        }
    }

    pub fn from_raw_fd(fd: RawFd) -> Self {
        Self { fd }
    }
}

impl AsRawFd for TtyReader {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl Read for TtyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // SAFETY: the pointer and length come from one live `&mut [u8]`.
        let read = unsafe { libc::read(self.fd, buf.as_mut_ptr().cast::<libc::c_void>(), buf.len()) };
        if read < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(read as usize)
    }
}
