//! Constants shared across the serial codec and pulse generator.
//!
//! This module defines the framing terminators, receive buffer sizing, and
//! the pulse-period factor tables used by the waveform engine.
//!
//! ## Key Concepts
//!
//! - **Terminators**: carriage return and line feed mark the end of a line;
//!   the receiver resets its FIFO when either arrives.
//! - **FIFO sizing**: the receiver buffers up to [`RX_FIFO_CAPACITY`] bytes;
//!   further bytes are dropped until the consumer catches up.
//! - **Pulse factor tables**: the pulse period in reference ticks is the
//!   product of one entry from each table, giving 16 selectable periods
//!   spanning a 1000:1 frequency range.

/// Carriage return (`'\r'`), one of the two line terminator bytes.
pub const CARRIAGE_RETURN: u8 = 0x0D;

/// Line feed (`'\n'`), one of the two line terminator bytes.
pub const LINE_FEED: u8 = 0x0A;

/// Capacity (in bytes) of the receiver's circular byte FIFO.
///
/// When the FIFO is full, newly completed bytes are silently dropped;
/// the persistent full flag is the only observable signal.
pub const RX_FIFO_CAPACITY: usize = 32;

/// Period scale factors selected by [`wave::PulseConfig::scale`](crate::wave::PulseConfig).
pub const PULSE_SCALE_FACTORS: [u16; 4] = [1, 2, 4, 8];

/// Period range factors selected by [`wave::PulseConfig::range`](crate::wave::PulseConfig).
pub const PULSE_RANGE_FACTORS: [u16; 4] = [1, 5, 25, 125];

/// Longest selectable pulse period, in reference ticks (8 × 125).
pub const PULSE_MAX_PERIOD: u16 = 1_000;

/// Largest accepted duty-cycle value, in percent.
///
/// Duty values above this are clamped at the configuration boundary.
pub const PULSE_DUTY_MAX: u8 = 99;

/// Returns whether `byte` terminates a line (CR or LF).
pub const fn is_terminator(byte: u8) -> bool {
    byte == CARRIAGE_RETURN || byte == LINE_FEED
}
