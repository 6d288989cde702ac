//! termios and file-status flag handling for the input descriptor.

use std::io;
use std::os::unix::io::RawFd;

use crate::error::TerminalError;

/// Terminal configuration captured before any modification.
///
/// Holds the termios attributes and the descriptor's file-status flags, so
/// restoring also undoes `O_NONBLOCK` on the tty shared with the shell.
#[derive(Clone, Copy)]
pub struct RawModeSnapshot {
    fd: RawFd,
    termios: libc::termios,
    status_flags: libc::c_int,
}

impl RawModeSnapshot {
    /// Read the current attributes of `fd`.
    pub fn capture(fd: RawFd) -> Result<Self, TerminalError> {
        let termios = get_attributes(fd)?;
        let status_flags = get_status_flags(fd).map_err(TerminalError::Query)?;
        Ok(Self {
            fd,
            termios,
            status_flags,
        })
    }

    pub fn fd(&self) -> RawFd {
        self.fd
    }

    /// Put the captured attributes and status flags back.
    pub fn apply(&self) -> Result<(), TerminalError> {
        set_attributes(self.fd, &self.termios)?;
        // SAFETY: F_SETFL takes an int argument; an invalid fd yields -1.
        if unsafe { libc::fcntl(self.fd, libc::F_SETFL, self.status_flags) } == -1 {
            return Err(TerminalError::NonBlocking(io::Error::last_os_error()));
        }
        Ok(())
    }
}

/// Disable canonical input and echo; `VMIN = 1`, `VTIME = 0`.
///
/// Signal generation stays on so Ctrl+C still delivers SIGINT.
pub fn enter_raw_mode(fd: RawFd) -> Result<(), TerminalError> {
    let mut termios = get_attributes(fd)?;
    termios.c_lflag &= !(libc::ICANON | libc::ECHO);
    termios.c_cc[libc::VMIN] = 1;
    termios.c_cc[libc::VTIME] = 0;
    set_attributes(fd, &termios)
}

/// Make reads on `fd` return `WouldBlock` instead of suspending.
pub fn set_nonblocking(fd: RawFd) -> Result<(), TerminalError> {
    let flags = get_status_flags(fd).map_err(TerminalError::NonBlocking)?;
    // SAFETY: F_SETFL takes an int argument; an invalid fd yields -1.
    if unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) } == -1 {
        return Err(TerminalError::NonBlocking(io::Error::last_os_error()));
    }
    Ok(())
}

fn get_attributes(fd: RawFd) -> Result<libc::termios, TerminalError> {
    // SAFETY: termios is plain old data, so all-zero is a valid value, and
    // tcgetattr only writes through the pointer to our local.
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(fd, &mut termios) } != 0 {
        return Err(TerminalError::Query(io::Error::last_os_error()));
    }
    Ok(termios)
}

fn set_attributes(fd: RawFd, termios: &libc::termios) -> Result<(), TerminalError> {
    // SAFETY: `termios` is a valid reference for the duration of the call.
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) } != 0 {
        return Err(TerminalError::Apply(io::Error::last_os_error()));
    }
    Ok(())
}

fn get_status_flags(fd: RawFd) -> io::Result<libc::c_int> {
    // SAFETY: F_GETFL reads no memory; an invalid fd yields -1.
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL, 0) };
    if flags == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(flags)
}
