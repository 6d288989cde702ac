mod buffer;
mod classify;
mod dispatcher;
mod event;
mod keys;
mod mouse;
mod reader;

pub use buffer::{BufferOverflow, ReceiveBuffer};
pub use classify::{classify, is_arrow_key, is_mouse_sequence, mouse_sequence_len, Token, ARROW_KEY_LEN};
pub use dispatcher::{InputHandler, InputLoop, InputState, LoopConfig, ReadOutcome};
pub use event::{Direction, MouseEvent};
pub use keys::KeyStateTable;
pub use mouse::MouseDecoder;
pub use reader::TtyReader;
