//! Bounded circular byte FIFO for received data.
//!
//! A thin wrapper over [`heapless::Deque`] fixed at
//! [`RX_FIFO_CAPACITY`](crate::consts::RX_FIFO_CAPACITY) entries. The
//! receiver is the only writer (byte-accepted events plus the terminator
//! reset) and the consumer the only reader; within the single-threaded tick
//! model a push and a pop may both succeed on the same tick.

use heapless::Deque;

use crate::consts::RX_FIFO_CAPACITY;

/// Fixed-capacity FIFO of received bytes.
///
/// `push` never blocks: when the FIFO is full the byte is dropped and
/// `false` is returned. No storage is allocated after construction.
#[derive(Debug, Default)]
pub struct ByteFifo {
    slots: Deque<u8, RX_FIFO_CAPACITY>,
}

impl ByteFifo {
    /// Creates an empty FIFO.
    pub const fn new() -> Self {
        Self { slots: Deque::new() }
    }

    /// Appends `byte` at the tail. Returns `false` (byte dropped) when full.
    pub fn push(&mut self, byte: u8) -> bool {
        self.slots.push_back(byte).is_ok()
    }

    /// Removes and returns the byte at the head, oldest first.
    pub fn pop(&mut self) -> Option<u8> {
        self.slots.pop_front()
    }

    /// The byte currently at the read position, without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.slots.front().copied()
    }

    /// Number of buffered bytes, always in `0..=RX_FIFO_CAPACITY`.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the FIFO holds `RX_FIFO_CAPACITY` bytes.
    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    /// Discards all buffered bytes, read and unread alike.
    ///
    /// Used exclusively by the receiver's terminator event.
    pub fn reset(&mut self) {
        self.slots.clear();
    }
}
