/// Arrow key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    /// Map the final byte of `ESC [ X` to a direction.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'A' => Some(Direction::Up),
            b'B' => Some(Direction::Down),
            b'C' => Some(Direction::Right),
            b'D' => Some(Direction::Left),
            _ => None,
        }
    }

    /// The final byte this direction is encoded with on the wire.
    pub fn as_byte(self) -> u8 {
        match self {
            Direction::Up => b'A',
            Direction::Down => b'B',
            Direction::Right => b'C',
            Direction::Left => b'D',
        }
    }
}

/// Result of decoding SGR mouse reports, carried across decode calls.
///
/// `left_just_pressed` / `right_just_pressed` are edge latches that stay set
/// while the button is held. `left_click` / `right_click` are one-shot: reset
/// at the start of every decode and set only on the press transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Column of the last left click, rounded down to an even value.
    pub target_x: u32,
    /// Row of the last left click (1-based, as reported by the terminal).
    pub target_y: u32,
    pub left_just_pressed: bool,
    pub right_just_pressed: bool,
    pub left_click: bool,
    pub right_click: bool,
}

impl MouseEvent {
    pub fn new() -> Self {
        Self {
            target_x: 0,
            // SGR rows start at 1.
            target_y: 1,
            left_just_pressed: false,
            right_just_pressed: false,
            left_click: false,
            right_click: false,
        }
    }

    /// Column and row of the last left click.
    pub fn target(&self) -> (u32, u32) {
        (self.target_x, self.target_y)
    }
}

impl Default for MouseEvent {
    fn default() -> Self {
        Self::new()
    }
}
