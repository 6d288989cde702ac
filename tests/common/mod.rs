#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Read};

use nadaroth::input::{Direction, InputHandler, InputState};

/// Decoded event as seen by a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Left(u32, u32),
    Right,
    Arrow(u8),
    Char(u8),
}

/// Handler that records every callback in order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    pub frames: usize,
}

impl Recorder {
    pub fn lefts(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, Event::Left(..))).count()
    }
}

impl InputHandler for Recorder {
    fn on_mouse_left(&mut self, _input: &mut InputState, x: u32, y: u32) {
        self.events.push(Event::Left(x, y));
    }

    fn on_mouse_right(&mut self, _input: &mut InputState) {
        self.events.push(Event::Right);
    }

    fn on_arrow_key(&mut self, _input: &mut InputState, direction: Direction) {
        self.events.push(Event::Arrow(direction.as_byte()));
    }

    fn on_printable_char(&mut self, _input: &mut InputState, key: u8) {
        self.events.push(Event::Char(key));
    }

    fn on_frame_end(&mut self, _input: &mut InputState) {
        self.frames += 1;
    }
}

/// Non-blocking byte source replaying a fixed list of reads.
///
/// Each chunk is returned by one `read()` (split if larger than the
/// caller's buffer); once drained every read reports `WouldBlock`.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    chunks: VecDeque<Vec<u8>>,
}

impl ScriptedSource {
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        Self {
            chunks: chunks.into_iter().map(|c| c.as_ref().to_vec()).collect(),
        }
    }

    pub fn is_drained(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl Read for ScriptedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(mut chunk) = self.chunks.pop_front() else {
            return Err(io::ErrorKind::WouldBlock.into());
        };
        if chunk.len() > buf.len() {
            let rest = chunk.split_off(buf.len());
            self.chunks.push_front(rest);
        }
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}
