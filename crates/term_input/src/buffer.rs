use thiserror::Error;

/// Appending a chunk would have pushed the buffer past its capacity.
///
/// By the time this is returned the buffer has already been emptied: a
/// partial escape sequence cannot be resynchronised byte by byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("input buffer overflow: {pending} pending + {incoming} incoming bytes exceed capacity {capacity}")]
pub struct BufferOverflow {
    pub pending: usize,
    pub incoming: usize,
    pub capacity: usize,
}

/// Capacity-bounded byte queue holding input that has not been consumed yet.
#[derive(Debug, Clone)]
pub struct ReceiveBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl ReceiveBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `chunk`, or discard everything on overflow.
    pub fn append(&mut self, chunk: &[u8]) -> Result<(), BufferOverflow> {
        if self.bytes.len() + chunk.len() > self.capacity {
            let overflow = BufferOverflow {
                pending: self.bytes.len(),
                incoming: chunk.len(),
                capacity: self.capacity,
            };
            self.bytes.clear();
            return Err(overflow);
        }
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }

    /// Drop the first `count` bytes and shift the remainder to the front.
    pub fn consume(&mut self, count: usize) {
        let count = count.min(self.bytes.len());
        self.bytes.drain(..count);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
