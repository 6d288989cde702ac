//! Control sequences written when entering and leaving the full-screen mode.

use std::fmt;
use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::ResetColor;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{queue, Command};

/// Enable any-motion mouse tracking (`?1003`) with SGR coordinates (`?1006`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnableMouseReporting;

impl Command for EnableMouseReporting {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[?1003h\x1b[?1006h")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisableMouseReporting;

impl Command for DisableMouseReporting {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[?1003l\x1b[?1006l")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Hide the cursor, clear the screen and start mouse reporting.
///
/// Flushed before returning so the terminal is in reporting mode before the
/// first read.
pub fn initialize_display<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(
        out,
        Hide,
        MoveTo(0, 0),
        Clear(ClearType::FromCursorDown),
        EnableMouseReporting
    )?;
    out.flush()
}

/// Show the cursor, stop mouse reporting, clear and reset attributes.
pub fn restore_display<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(
        out,
        Show,
        DisableMouseReporting,
        MoveTo(0, 0),
        Clear(ClearType::FromCursorDown),
        ResetColor
    )?;
    out.flush()
}
