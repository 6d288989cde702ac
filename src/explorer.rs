//! Minimal consumer of decoded input: a marker on an otherwise empty screen.
//!
//! Arrow keys step the marker (two terminal columns per logical column),
//! a left click moves it to the clicked cell, a right click pauses input
//! until `p` is pressed, and `q` quits.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use term_input::{Direction, InputHandler, InputState};

const QUIT_KEY: u8 = b'q';
const RESUME_KEY: u8 = b'p';

/// Horizontal step of one logical column, in terminal columns.
const COLUMN_WIDTH: u32 = 2;

pub struct Explorer<W: Write> {
    out: W,
    player: (u32, u32),
    status: String,
    dirty: bool,
    shutdown: Arc<AtomicBool>,
    quit_requested: bool,
    render_error: Option<io::Error>,
}

impl<W: Write> Explorer<W> {
    pub fn new(out: W, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            out,
            player: (COLUMN_WIDTH, 2),
            status: String::from("arrows/click to move, right click to pause, q to quit"),
            dirty: true,
            shutdown,
            quit_requested: false,
            render_error: None,
        }
    }

    /// Marker position as `(column, row)`, both 1-based like SGR reports.
    pub fn player(&self) -> (u32, u32) {
        self.player
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the user asked to quit (as opposed to a signal).
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// First rendering failure, if any.
    pub fn take_render_error(&mut self) -> Option<io::Error> {
        self.render_error.take()
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.dirty = true;
    }

    fn render(&mut self) -> io::Result<()> {
        let (x, y) = self.player;
        queue!(
            self.out,
            MoveTo(0, 0),
            Clear(ClearType::All),
            Print(&self.status),
            MoveTo(to_cell(x), to_cell(y)),
            Print('@')
        )?;
        self.out.flush()
    }
}

impl<W: Write> InputHandler for Explorer<W> {
    fn on_mouse_left(&mut self, _input: &mut InputState, x: u32, y: u32) {
        self.player = (x.max(COLUMN_WIDTH), y.max(1));
        self.set_status(format!("moved to ({x}, {y})"));
    }

    fn on_mouse_right(&mut self, input: &mut InputState) {
        input.lock_input();
        self.set_status("paused, press p to resume");
    }

    fn on_arrow_key(&mut self, _input: &mut InputState, direction: Direction) {
        let (x, y) = self.player;
        self.player = match direction {
            Direction::Up => (x, y.saturating_sub(1).max(1)),
            Direction::Down => (x, y.saturating_add(1)),
            Direction::Right => (x.saturating_add(COLUMN_WIDTH), y),
            Direction::Left => (x.saturating_sub(COLUMN_WIDTH).max(COLUMN_WIDTH), y),
        };
        self.dirty = true;
    }

    fn on_printable_char(&mut self, _input: &mut InputState, key: u8) {
        match key {
            QUIT_KEY => {
                self.quit_requested = true;
                self.shutdown.store(true, Ordering::SeqCst);
            }
            b'\r' | b'\n' => self.set_status("enter"),
            _ => self.set_status(format!("key '{}'", char::from(key))),
        }
    }

    fn on_frame_end(&mut self, input: &mut InputState) {
        if input.is_locked() && input.is_key_active(RESUME_KEY) {
            input.release_key(RESUME_KEY);
            input.unlock_input();
            self.set_status("resumed");
        }

        if !self.dirty || self.render_error.is_some() {
            return;
        }
        self.dirty = false;
        if let Err(err) = self.render() {
            tracing::error!(%err, "render failed");
            self.render_error = Some(err);
            self.shutdown.store(true, Ordering::SeqCst);
        }
    }
}

/// 1-based terminal coordinate to crossterm's 0-based cell index.
fn to_cell(coord: u32) -> u16 {
    u16::try_from(coord.saturating_sub(1)).unwrap_or(u16::MAX)
}
