use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::buffer::{BufferOverflow, ReceiveBuffer};
use crate::classify::{classify, Token, ARROW_KEY_LEN};
use crate::event::Direction;
use crate::keys::KeyStateTable;
use crate::mouse::MouseDecoder;

/// Tuning for [`InputLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Bytes requested per read.
    pub chunk_size: usize,
    /// Sleep between reads when no input is available.
    pub idle_sleep: Duration,
    /// Upper bound on unconsumed input.
    pub buffer_capacity: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            chunk_size: 128,
            idle_sleep: Duration::from_millis(1),
            buffer_capacity: 1024,
        }
    }
}

/// State that handlers may inspect or change while events are dispatched:
/// the input gate and the frame key table.
#[derive(Debug, Clone)]
pub struct InputState {
    keys: KeyStateTable,
    unlocked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: KeyStateTable::new(),
            unlocked: true,
        }
    }

    /// Close the gate. Events decoded from now on are dropped, not queued.
    pub fn lock_input(&mut self) {
        self.unlocked = false;
    }

    pub fn unlock_input(&mut self) {
        self.unlocked = true;
    }

    pub fn is_locked(&self) -> bool {
        !self.unlocked
    }

    /// Whether `key` arrived during the last completed frame.
    pub fn is_key_active(&self, key: u8) -> bool {
        self.keys.is_active(key)
    }

    /// Consume `key` from the last completed frame.
    pub fn release_key(&mut self, key: u8) {
        self.keys.release(key);
    }

    pub fn keys(&self) -> &KeyStateTable {
        &self.keys
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver of decoded events.
///
/// Implemented by the application, which owns its screen and game state.
/// Each method runs synchronously, at most once per decoded event, in the
/// order the events arrived on the wire. None of them run while the gate
/// is locked, except [`on_frame_end`](Self::on_frame_end).
pub trait InputHandler {
    /// Left button pressed at `(x, y)`; `x` is already rounded down to even.
    fn on_mouse_left(&mut self, _input: &mut InputState, _x: u32, _y: u32) {}

    fn on_mouse_right(&mut self, _input: &mut InputState) {}

    fn on_arrow_key(&mut self, _input: &mut InputState, _direction: Direction) {}

    /// Printable ASCII, `\n` or `\r`.
    fn on_printable_char(&mut self, _input: &mut InputState, _key: u8) {}

    /// Called after every processing pass, once the key table has been
    /// published. Runs whether or not the gate is locked.
    fn on_frame_end(&mut self, _input: &mut InputState) {}
}

/// What a single read produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Nothing to read.
    Idle,
    /// The chunk did not fit; all pending input was discarded.
    Overflow(BufferOverflow),
    /// A pass ran and consumed `consumed` bytes from the front of the buffer.
    Processed { consumed: usize },
}

/// Streaming decoder and dispatcher for terminal input.
///
/// Owns everything the decode needs between reads: the receive buffer,
/// mouse latches, key tables and the gate. Separate instances never share
/// state.
pub struct InputLoop {
    config: LoopConfig,
    buffer: ReceiveBuffer,
    mouse: MouseDecoder,
    state: InputState,
    chunk: Vec<u8>,
}

impl InputLoop {
    pub fn new(config: LoopConfig) -> Self {
        Self {
            buffer: ReceiveBuffer::new(config.buffer_capacity),
            mouse: MouseDecoder::new(),
            state: InputState::new(),
            chunk: vec![0; config.chunk_size],
            config,
        }
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    /// Bytes waiting for the rest of their sequence.
    pub fn pending(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn mouse(&self) -> &MouseDecoder {
        &self.mouse
    }

    /// Append freshly read bytes and run one processing pass.
    pub fn feed<H: InputHandler + ?Sized>(&mut self, chunk: &[u8], handler: &mut H) -> ReadOutcome {
        if let Err(overflow) = self.buffer.append(chunk) {
            tracing::warn!(%overflow, "discarding pending input");
            return ReadOutcome::Overflow(overflow);
        }
        let consumed = self.process_pass(handler);
        ReadOutcome::Processed { consumed }
    }

    /// Perform one non-blocking read from `source` and process what arrived.
    ///
    /// "Would block", "interrupted" and end-of-file all count as idle.
    pub fn poll_once<R, H>(&mut self, source: &mut R, handler: &mut H) -> io::Result<ReadOutcome>
    where
        R: Read + ?Sized,
        H: InputHandler + ?Sized,
    {
        let mut chunk = std::mem::take(&mut self.chunk);
        let outcome = match source.read(&mut chunk) {
            Ok(0) => Ok(ReadOutcome::Idle),
            Ok(read) => Ok(self.feed(&chunk[..read], handler)),
            Err(err)
                if matches!(err.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) =>
            {
                Ok(ReadOutcome::Idle)
            }
            Err(err) => Err(err),
        };
        self.chunk = chunk;
        outcome
    }

    /// Read and dispatch until `shutdown` is set.
    ///
    /// Never blocks for longer than one idle sleep, so a flag raised from a
    /// signal handler is observed promptly.
    pub fn run<R, H>(&mut self, source: &mut R, handler: &mut H, shutdown: &AtomicBool) -> io::Result<()>
    where
        R: Read + ?Sized,
        H: InputHandler + ?Sized,
    {
        tracing::debug!(
            chunk_size = self.config.chunk_size,
            buffer_capacity = self.config.buffer_capacity,
            idle_sleep_us = self.config.idle_sleep.as_micros() as u64,
            "input loop started"
        );
        while !shutdown.load(Ordering::Relaxed) {
            if self.poll_once(source, handler)? == ReadOutcome::Idle {
                thread::sleep(self.config.idle_sleep);
            }
        }
        tracing::debug!(pending = self.buffer.len(), "input loop stopped");
        Ok(())
    }

    fn process_pass<H: InputHandler + ?Sized>(&mut self, handler: &mut H) -> usize {
        let Self {
            buffer,
            mouse,
            state,
            ..
        } = self;
        let pending = buffer.as_slice();
        let mut processed = 0;

        while processed < pending.len() {
            let window = &pending[processed..];
            match classify(window) {
                Token::Mouse { len } => {
                    let event = *mouse.decode(&window[..len]);
                    if state.unlocked && event.left_click {
                        tracing::trace!(x = event.target_x, y = event.target_y, "left click");
                        handler.on_mouse_left(state, event.target_x, event.target_y);
                    }
                    if state.unlocked && event.right_click {
                        tracing::trace!("right click");
                        handler.on_mouse_right(state);
                    }
                    processed += len;
                }
                Token::Incomplete => break,
                Token::Arrow(direction) => {
                    if state.unlocked {
                        tracing::trace!(?direction, "arrow key");
                        handler.on_arrow_key(state, direction);
                    }
                    processed += ARROW_KEY_LEN;
                }
                Token::Key(key) => {
                    if state.unlocked {
                        handler.on_printable_char(state, key);
                    }
                    state.keys.mark(key);
                    processed += 1;
                }
                Token::Skip => processed += 1,
            }
        }

        state.keys.end_frame();
        handler.on_frame_end(state);
        buffer.consume(processed);
        processed
    }
}

impl Default for InputLoop {
    fn default() -> Self {
        Self::new(LoopConfig::default())
    }
}
