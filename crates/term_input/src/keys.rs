const KEY_COUNT: usize = 256;

/// Double-buffered key table indexed by byte value.
///
/// The dispatcher marks keys in the current table while draining input;
/// [`end_frame`](Self::end_frame) publishes it as the frame snapshot and
/// starts a fresh pass. Readers only ever see the snapshot.
#[derive(Debug, Clone)]
pub struct KeyStateTable {
    current: [bool; KEY_COUNT],
    last_frame: [bool; KEY_COUNT],
}

impl KeyStateTable {
    pub fn new() -> Self {
        Self {
            current: [false; KEY_COUNT],
            last_frame: [false; KEY_COUNT],
        }
    }

    /// Mark `key` as seen during the pass in progress.
    pub fn mark(&mut self, key: u8) {
        self.current[usize::from(key)] = true;
    }

    /// Publish the current pass and clear it.
    pub fn end_frame(&mut self) {
        self.last_frame = self.current;
        self.current = [false; KEY_COUNT];
    }

    /// Whether `key` arrived during the last completed frame.
    pub fn is_active(&self, key: u8) -> bool {
        self.last_frame[usize::from(key)]
    }

    /// Consume `key` from the frame snapshot.
    pub fn release(&mut self, key: u8) {
        self.last_frame[usize::from(key)] = false;
    }
}

impl Default for KeyStateTable {
    fn default() -> Self {
        Self::new()
    }
}
