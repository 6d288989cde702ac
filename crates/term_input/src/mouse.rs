use crate::event::MouseEvent;

/// Button codes at or above this are wheel / extended buttons.
const WHEEL_BASE: u32 = 64;

const BUTTON_LEFT: u32 = 0;
const BUTTON_RIGHT: u32 = 2;

/// Edge-triggered decoder for SGR mouse reports (`ESC [ < b ; x ; y M|m`).
///
/// Holding a button produces a stream of identical press reports; the
/// decoder turns that into exactly one click per press by latching the
/// button until its release report arrives.
#[derive(Debug, Default)]
pub struct MouseDecoder {
    event: MouseEvent,
}

/// One parsed report, before edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SgrReport {
    button: u32,
    x: u32,
    y: u32,
    press: bool,
}

impl MouseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current decode state.
    pub fn event(&self) -> &MouseEvent {
        &self.event
    }

    /// Decode one complete report and update the latches.
    ///
    /// Clicks from the previous call are always cleared. A report that does
    /// not match the SGR pattern leaves latches and target untouched.
    pub fn decode(&mut self, sequence: &[u8]) -> &MouseEvent {
        self.event.left_click = false;
        self.event.right_click = false;

        let Some(report) = parse_sgr(sequence) else {
            return &self.event;
        };
        if report.button >= WHEEL_BASE {
            return &self.event;
        }

        match report.button & 0x03 {
            BUTTON_LEFT => {
                if report.press && !self.event.left_just_pressed {
                    self.event.left_click = true;
                    self.event.left_just_pressed = true;
                    // One logical column spans two terminal columns.
                    self.event.target_x = (report.x / 2) * 2;
                    self.event.target_y = report.y;
                } else if !report.press {
                    self.event.left_just_pressed = false;
                }
            }
            BUTTON_RIGHT => {
                if report.press && !self.event.right_just_pressed {
                    self.event.right_click = true;
                    self.event.right_just_pressed = true;
                } else if !report.press {
                    self.event.right_just_pressed = false;
                }
            }
            _ => {}
        }

        &self.event
    }
}

/// Parse `ESC [ < button ; x ; y` followed by `M` (press) or `m` (release).
fn parse_sgr(sequence: &[u8]) -> Option<SgrReport> {
    let body = sequence.strip_prefix(b"\x1b[<")?;
    let (&terminator, params) = body.split_last()?;
    let press = match terminator {
        b'M' => true,
        b'm' => false,
        _ => return None,
    };

    let mut fields = params.split(|&b| b == b';');
    let button = parse_number(fields.next()?)?;
    let x = parse_number(fields.next()?)?;
    let y = parse_number(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }

    Some(SgrReport { button, x, y, press })
}

fn parse_number(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    digits.iter().try_fold(0u32, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_press_records_even_target() {
        let mut d = MouseDecoder::new();
        let event = *d.decode(b"\x1b[<0;10;5M");
        assert!(event.left_click);
        assert!(event.left_just_pressed);
        assert_eq!(event.target(), (10, 5));
    }

    #[test]
    fn odd_column_rounds_down() {
        let mut d = MouseDecoder::new();
        assert_eq!(d.decode(b"\x1b[<0;11;5M").target(), (10, 5));
        d.decode(b"\x1b[<0;11;5m");
        assert_eq!(d.decode(b"\x1b[<0;1;7M").target(), (0, 7));
    }

    #[test]
    fn held_left_button_clicks_once() {
        let mut d = MouseDecoder::new();
        assert!(d.decode(b"\x1b[<0;10;5M").left_click);
        assert!(!d.decode(b"\x1b[<0;10;5M").left_click);
        assert!(!d.decode(b"\x1b[<0;12;5M").left_click);
        // Target stays at the original press while held.
        assert_eq!(d.event().target(), (10, 5));
    }

    #[test]
    fn release_rearms_left_button() {
        let mut d = MouseDecoder::new();
        d.decode(b"\x1b[<0;10;5M");
        let released = *d.decode(b"\x1b[<0;10;5m");
        assert!(!released.left_click);
        assert!(!released.left_just_pressed);
        assert!(d.decode(b"\x1b[<0;20;3M").left_click);
        assert_eq!(d.event().target(), (20, 3));
    }

    #[test]
    fn right_button_latches_without_target() {
        let mut d = MouseDecoder::new();
        let event = *d.decode(b"\x1b[<2;30;9M");
        assert!(event.right_click);
        assert!(!event.left_click);
        assert_eq!(event.target(), (0, 1));
        assert!(!d.decode(b"\x1b[<2;30;9M").right_click);
        d.decode(b"\x1b[<2;30;9m");
        assert!(d.decode(b"\x1b[<2;30;9M").right_click);
    }

    #[test]
    fn motion_report_with_left_held_does_not_click_again() {
        let mut d = MouseDecoder::new();
        d.decode(b"\x1b[<0;4;4M");
        // 32 = motion flag, low bits still say "left".
        assert!(!d.decode(b"\x1b[<32;6;4M").left_click);
    }

    #[test]
    fn wheel_and_middle_are_ignored() {
        let mut d = MouseDecoder::new();
        let event = *d.decode(b"\x1b[<64;10;5M");
        assert!(!event.left_click && !event.left_just_pressed);
        let event = *d.decode(b"\x1b[<1;10;5M");
        assert!(!event.left_click && !event.right_click);
        // Plain motion with no button (35) must not clear a held latch.
        d.decode(b"\x1b[<0;2;2M");
        d.decode(b"\x1b[<35;3;2M");
        assert!(d.event().left_just_pressed);
    }

    #[test]
    fn malformed_report_is_noop_but_clears_clicks() {
        let mut d = MouseDecoder::new();
        assert!(d.decode(b"\x1b[<0;10;5M").left_click);
        let event = *d.decode(b"\x1b[<0;10M");
        assert!(!event.left_click);
        assert!(event.left_just_pressed);
        assert_eq!(event.target(), (10, 5));

        let malformed: [&[u8]; 4] = [
            b"\x1b[<;;M",
            b"\x1b[<0;1;2;3M",
            b"\x1b[<0;1;2X",
            b"\x1b[<99999999999;1;1M",
        ];
        for bad in malformed {
            d.decode(bad);
            assert!(d.event().left_just_pressed);
        }
    }
}
