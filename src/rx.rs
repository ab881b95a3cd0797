//! Software UART receiver (8N1).
//!
//! This module provides [`UartRx`], a finite-state machine that recovers
//! framed bytes from a single serial input line. The line is read once per
//! tick through a two-stage synchronizer ([`LineSync`]); a falling edge on
//! the synchronized line arms the start-bit phase, and every subsequent bit
//! is sampled at the center of its bit period ([`BitTicker::at_midpoint`]).
//!
//! Completed bytes are pushed into a bounded FIFO ([`ByteFifo`]). When the
//! FIFO is full a completed byte is silently dropped; the persistent full
//! flag is the only back-pressure signal. A carriage-return or line-feed
//! byte is a *terminator*: it is reported like any other byte, but on the
//! same tick the whole FIFO is reset — including the terminator itself and
//! any unread bytes before it. Callers that need the line's content must
//! therefore drain the FIFO before the terminator lands.
//!
//! Framing errors (stop bit observed low at its center) are non-fatal: the
//! byte is still delivered, the condition is counted in
//! [`UartRx::framing_errors`] and flagged in the returned [`RxEvent`].
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use softline::rx::UartRx;
//!
//! # let rx_pin = Pin::new(&[PinTransaction::get(PinState::High)]);
//! let mut rx: UartRx<Pin> = UartRx::new(rx_pin, 16);
//! let event = rx.tick(); // call once per timer tick
//! assert!(event.byte_ready.is_none());
//! # rx.pin.done();
//! ```
//!
//! ## Timing
//!
//! The divisor (ticks per bit) must be at least 4: the synchronizer and the
//! edge detector together delay the observed edge by two ticks, and that
//! skew has to stay inside the first half of the start bit for the center
//! sample to land correctly.

use embedded_hal::digital::InputPin;

use crate::consts::is_terminator;
use crate::fifo::ByteFifo;
use crate::sync::LineSync;
use crate::ticker::BitTicker;

/// Receiver framing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RxPhase {
    /// Waiting for a falling edge on the synchronized line.
    #[default]
    Idle,
    /// Verifying the start bit; a non-low center sample is a spurious pulse.
    StartBit,
    /// Sampling the 8 data bits, least-significant bit first.
    DataBits,
    /// Waiting out the stop bit; a low center sample is a framing error.
    StopBit,
}

/// What a single receiver tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RxEvent {
    /// The byte completed on this tick, if any.
    pub byte_ready: Option<u8>,
    /// Whether the completed byte was a line terminator (CR/LF).
    ///
    /// The FIFO has already been reset when this is set.
    pub terminator: bool,
    /// Whether the completed byte's stop bit was observed low.
    pub framing_error: bool,
}

/// Tick-driven 8N1 receiver over an `embedded-hal` input pin.
///
/// Owns the input pin, its own bit-rate divider, and the byte FIFO. All
/// state mutation happens inside [`tick()`](UartRx::tick), which must be
/// called once per fixed-rate timer tick.
#[derive(Debug)]
pub struct UartRx<RX: InputPin> {
    /// The serial input pin.
    pub pin: RX,
    sync: LineSync,
    prev_level: bool,
    phase: RxPhase,
    ticker: BitTicker,
    shift: u8,
    bit_index: u8,
    last_byte: u8,
    fifo: ByteFifo,
    spurious: bool,
    stop_low: bool,

    /// Count of bytes successfully framed, including dropped ones.
    pub bytes_received: u32,
    /// Count of completed bytes dropped because the FIFO was full.
    pub overflows: u32,
    /// Count of frames whose stop bit was observed low.
    pub framing_errors: u32,
    /// Count of start-bit pulses that did not survive the center sample.
    pub spurious_starts: u32,
}

impl<RX: InputPin> UartRx<RX> {
    /// Creates a receiver sampling `pin` with `ticks_per_bit` ticks per bit
    /// period.
    ///
    /// `ticks_per_bit` is fixed at construction; see
    /// [`crate::timer::ticks_per_bit`] for deriving it from a baud rate.
    pub fn new(pin: RX, ticks_per_bit: u16) -> Self {
        Self {
            pin,
            sync: LineSync::new(),
            prev_level: true,
            phase: RxPhase::Idle,
            ticker: BitTicker::new(ticks_per_bit),
            shift: 0,
            bit_index: 0,
            last_byte: 0,
            fifo: ByteFifo::new(),
            spurious: false,
            stop_low: false,
            bytes_received: 0,
            overflows: 0,
            framing_errors: 0,
            spurious_starts: 0,
        }
    }

    /// Advances the receiver by one timer tick.
    ///
    /// Reads the line once, runs the framing state machine, and reports any
    /// byte completed on this tick. Must be called at the same fixed rate
    /// as the transmitter on the other end of the line.
    pub fn tick(&mut self) -> RxEvent {
        // A failed pin read is indistinguishable from the idle-high line.
        let raw = self.pin.is_high().unwrap_or(true);
        let level = self.sync.update(raw);
        let falling = self.prev_level && !level;
        self.prev_level = level;

        let mut event = RxEvent::default();
        match self.phase {
            RxPhase::Idle => {
                if falling {
                    self.ticker.reset();
                    self.shift = 0;
                    self.bit_index = 0;
                    self.spurious = false;
                    self.stop_low = false;
                    self.phase = RxPhase::StartBit;
                }
            }
            RxPhase::StartBit => {
                if self.ticker.at_midpoint() && level {
                    self.spurious = true;
                }
                if self.ticker.tick() {
                    if self.spurious {
                        self.spurious_starts += 1;
                        self.phase = RxPhase::Idle;
                    } else {
                        self.phase = RxPhase::DataBits;
                    }
                }
            }
            RxPhase::DataBits => {
                if self.ticker.at_midpoint() && level {
                    self.shift |= 1 << self.bit_index;
                }
                if self.ticker.tick() {
                    if self.bit_index == 7 {
                        self.phase = RxPhase::StopBit;
                    } else {
                        self.bit_index += 1;
                    }
                }
            }
            RxPhase::StopBit => {
                if self.ticker.at_midpoint() && !level {
                    self.stop_low = true;
                }
                if self.ticker.tick() {
                    event = self.complete_byte();
                    self.phase = RxPhase::Idle;
                }
            }
        }
        event
    }

    /// Byte-ready handling at the end of the stop-bit period.
    fn complete_byte(&mut self) -> RxEvent {
        let byte = self.shift;
        self.last_byte = byte;
        self.bytes_received += 1;

        let mut event = RxEvent {
            byte_ready: Some(byte),
            terminator: false,
            framing_error: false,
        };

        if self.stop_low {
            self.framing_errors += 1;
            event.framing_error = true;
            #[cfg(feature = "log")]
            log::warn!("framing error on byte {:#04x}", byte);
        }

        if !self.fifo.push(byte) {
            self.overflows += 1;
            #[cfg(feature = "log")]
            log::debug!("rx fifo full, dropping byte {:#04x}", byte);
        }

        // The terminator clears history, its own push included. Unread
        // bytes are gone with no error signal.
        if is_terminator(byte) {
            event.terminator = true;
            self.fifo.reset();
        }
        event
    }

    /// Pops the oldest buffered byte (the consumer read request).
    pub fn read(&mut self) -> Option<u8> {
        self.fifo.pop()
    }

    /// The byte at the FIFO's read position, without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.fifo.peek()
    }

    /// The most recently framed byte, even if it was dropped or reset away.
    pub fn last_byte(&self) -> u8 {
        self.last_byte
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.fifo.len()
    }

    /// Whether the FIFO is empty.
    pub fn is_empty(&self) -> bool {
        self.fifo.is_empty()
    }

    /// Whether the FIFO is full (further bytes will be dropped).
    pub fn is_full(&self) -> bool {
        self.fifo.is_full()
    }

    /// The current framing phase, for inspection.
    pub fn phase(&self) -> RxPhase {
        self.phase
    }
}
