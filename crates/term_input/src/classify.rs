//! Classification of the front of the receive buffer.
//!
//! Every function here is pure and looks only at the window it is given.
//! Mouse reports are variable-length and must never be consumed partially,
//! so the classifier distinguishes "complete" from "needs more bytes"
//! before the dispatcher advances.

use crate::event::Direction;

const ESC: u8 = 0x1b;

/// Arrow keys are always `ESC [ X`.
pub const ARROW_KEY_LEN: usize = 3;

/// Offset of the first parameter byte after `ESC [ <`.
const MOUSE_PARAMS_START: usize = 3;

/// What the front of a byte window holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Complete SGR mouse report occupying `len` bytes.
    Mouse { len: usize },
    /// A sequence has started but the rest has not arrived yet.
    Incomplete,
    /// `ESC [ A|B|C|D`.
    Arrow(Direction),
    /// Printable ASCII, `\n` or `\r`.
    Key(u8),
    /// Anything else; drop one byte.
    Skip,
}

/// True iff the window starts with `ESC [ <`.
pub fn is_mouse_sequence(window: &[u8]) -> bool {
    window.len() >= 3 && window[0] == ESC && window[1] == b'[' && window[2] == b'<'
}

/// True iff the window starts with `ESC [` followed by `A`, `B`, `C` or `D`.
pub fn is_arrow_key(window: &[u8]) -> bool {
    window.len() >= 3
        && window[0] == ESC
        && window[1] == b'['
        && Direction::from_byte(window[2]).is_some()
}

/// Length of the mouse report at the front of `window`, terminator included.
///
/// Returns `None` when the parameter run is not followed by `M` or `m`,
/// which means the report must not be consumed yet.
pub fn mouse_sequence_len(window: &[u8]) -> Option<usize> {
    let end = scan_params(window);
    match window.get(end) {
        Some(b'M' | b'm') => Some(end + 1),
        _ => None,
    }
}

/// Classify the item at the front of `window`.
pub fn classify(window: &[u8]) -> Token {
    let Some(&first) = window.first() else {
        return Token::Incomplete;
    };

    if is_mouse_sequence(window) {
        // Without a terminator the report stays pending; a report that can
        // never complete is cleared by the buffer's overflow discard.
        return mouse_sequence_len(window).map_or(Token::Incomplete, |len| Token::Mouse { len });
    }

    if is_arrow_key(window) {
        return Direction::from_byte(window[2]).map_or(Token::Skip, Token::Arrow);
    }

    // Introducer split across reads.
    if window == [ESC] || window == [ESC, b'['] {
        return Token::Incomplete;
    }

    if is_key_byte(first) {
        Token::Key(first)
    } else {
        Token::Skip
    }
}

fn is_key_byte(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7e | b'\n' | b'\r')
}

/// Index of the first byte after the digit/`;` run that follows `ESC [ <`.
fn scan_params(window: &[u8]) -> usize {
    let params = window.get(MOUSE_PARAMS_START..).unwrap_or(&[]);
    MOUSE_PARAMS_START
        + params
            .iter()
            .take_while(|&&b| b.is_ascii_digit() || b == b';')
            .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_start_requires_full_introducer() {
        assert!(is_mouse_sequence(b"\x1b[<"));
        assert!(is_mouse_sequence(b"\x1b[<0;1;1M"));
        assert!(!is_mouse_sequence(b"\x1b["));
        assert!(!is_mouse_sequence(b"\x1b[A"));
        assert!(!is_mouse_sequence(b"[<0;1;1M"));
        assert!(!is_mouse_sequence(b""));
    }

    #[test]
    fn no_window_without_mouse_prefix_is_a_mouse_sequence() {
        for first in 0..=u8::MAX {
            for second in [b'[', b'<', b'A', 0x1b] {
                let window = [first, second, b'<', b'0'];
                let expected = first == 0x1b && second == b'[';
                assert_eq!(is_mouse_sequence(&window), expected);
            }
        }
    }

    #[test]
    fn arrow_detection() {
        assert!(is_arrow_key(b"\x1b[A"));
        assert!(is_arrow_key(b"\x1b[Dxyz"));
        assert!(!is_arrow_key(b"\x1b[E"));
        assert!(!is_arrow_key(b"\x1b["));
    }

    #[test]
    fn mouse_length_includes_terminator() {
        assert_eq!(mouse_sequence_len(b"\x1b[<0;10;5M"), Some(11));
        assert_eq!(mouse_sequence_len(b"\x1b[<0;10;5mabc"), Some(11));
        assert_eq!(mouse_sequence_len(b"\x1b[<0;1"), None);
        assert_eq!(mouse_sequence_len(b"\x1b[<"), None);
    }

    #[test]
    fn classify_partial_mouse_waits() {
        assert_eq!(classify(b"\x1b[<0;1"), Token::Incomplete);
        assert_eq!(classify(b"\x1b[<"), Token::Incomplete);
    }

    #[test]
    fn classify_unterminated_mouse_waits_even_after_foreign_byte() {
        assert_eq!(classify(b"\x1b[<0;1x5M"), Token::Incomplete);
        assert_eq!(classify(b"\x1b[<0;1\x1b[<0;4;4M"), Token::Incomplete);
    }

    #[test]
    fn classify_split_introducer_waits() {
        assert_eq!(classify(b"\x1b"), Token::Incomplete);
        assert_eq!(classify(b"\x1b["), Token::Incomplete);
        assert_eq!(classify(b"\x1bx"), Token::Skip);
    }

    #[test]
    fn classify_keys_and_controls() {
        assert_eq!(classify(b"a"), Token::Key(b'a'));
        assert_eq!(classify(b"\r"), Token::Key(b'\r'));
        assert_eq!(classify(b"\n"), Token::Key(b'\n'));
        assert_eq!(classify(b"~"), Token::Key(b'~'));
        assert_eq!(classify(&[0x7f]), Token::Skip);
        assert_eq!(classify(&[0x09]), Token::Skip);
        assert_eq!(classify(&[0xc3, 0xa9]), Token::Skip);
    }

    #[test]
    fn classify_arrow() {
        assert_eq!(classify(b"\x1b[C"), Token::Arrow(Direction::Right));
    }
}
