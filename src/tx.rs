//! Software UART transmitter (8N1).
//!
//! [`UartTx`] serializes one byte at a time onto an `embedded-hal` output
//! pin: start bit (low), 8 data bits least-significant first, stop bit
//! (high), then a mandatory one-bit idle gap before the next byte may
//! begin. The busy flag covers every phase except idle.
//!
//! There is no transmit queue and no mid-frame cancellation: once a byte is
//! latched every framing bit is sent to completion. A start request while
//! busy is rejected with [`SendError::Busy`] — check
//! [`busy()`](UartTx::busy) or wait on [`flush()`](UartTx::flush) first.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use softline::tx::UartTx;
//!
//! # let tx_pin = Pin::new(&[
//! #     PinTransaction::set(PinState::High),
//! #     PinTransaction::set(PinState::Low),
//! # ]);
//! let mut tx: UartTx<Pin> = UartTx::new(tx_pin, 16);
//! tx.send(b'!').unwrap();
//! assert!(tx.busy());
//! # tx.pin.done();
//! ```

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use thiserror::Error;

use crate::ticker::BitTicker;

/// Transmitter framing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxPhase {
    /// Line idle high; ready to accept a byte.
    #[default]
    Idle,
    /// Driving the start bit for one bit period.
    StartBit,
    /// Shifting out the 8 data bits, one per bit period.
    DataBits,
    /// Driving the stop bit for one bit period.
    StopBit,
    /// Mandatory one-bit idle gap between bytes.
    InterByteGap,
}

/// Why a start request was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendError {
    /// A frame is already in flight; wait for busy to deassert.
    #[error("transmitter busy")]
    Busy,
}

/// Tick-driven 8N1 transmitter over an `embedded-hal` output pin.
///
/// Owns the output pin and its own bit-rate divider. All line transitions
/// happen either in [`send()`](UartTx::send) (the start bit) or inside
/// [`tick()`](UartTx::tick), once per bit period.
#[derive(Debug)]
pub struct UartTx<TX: OutputPin> {
    /// The serial output pin.
    pub pin: TX,
    phase: TxPhase,
    ticker: BitTicker,
    shift: u8,
    bits_remaining: u8,

    /// Count of bytes sent to completion, gap included.
    pub bytes_sent: u32,
}

impl<TX: OutputPin> UartTx<TX> {
    /// Creates a transmitter driving `pin` with `ticks_per_bit` ticks per
    /// bit period. The line is driven to its idle-high level immediately.
    pub fn new(pin: TX, ticks_per_bit: u16) -> Self {
        #[allow(unused_mut)]
        let mut pin = pin;
        let _ = pin.set_high(); // idle level
        Self {
            pin,
            phase: TxPhase::Idle,
            ticker: BitTicker::new(ticks_per_bit),
            shift: 0,
            bits_remaining: 0,
            bytes_sent: 0,
        }
    }

    /// Latches `byte` and starts framing it onto the line.
    ///
    /// The start bit is driven immediately; the data, stop, and gap periods
    /// follow under [`tick()`](UartTx::tick). Rejected with
    /// [`SendError::Busy`] while a previous frame is still in flight.
    pub fn send(&mut self, byte: u8) -> Result<(), SendError> {
        if self.phase != TxPhase::Idle {
            return Err(SendError::Busy);
        }
        self.shift = byte;
        self.bits_remaining = 8;
        self.ticker.reset();
        let _ = self.pin.set_low(); // start bit
        self.phase = TxPhase::StartBit;
        Ok(())
    }

    /// Advances the transmitter by one timer tick.
    ///
    /// Line transitions occur only at bit-period boundaries; between them
    /// this is a cheap counter increment.
    pub fn tick(&mut self) {
        if self.phase == TxPhase::Idle {
            return;
        }
        if !self.ticker.tick() {
            return;
        }
        self.phase = match self.phase {
            TxPhase::Idle => TxPhase::Idle,
            TxPhase::StartBit => {
                self.drive_data_bit();
                TxPhase::DataBits
            }
            TxPhase::DataBits => {
                if self.bits_remaining > 0 {
                    self.drive_data_bit();
                    TxPhase::DataBits
                } else {
                    let _ = self.pin.set_high(); // stop bit
                    TxPhase::StopBit
                }
            }
            // line stays high through the stop bit and the gap
            TxPhase::StopBit => TxPhase::InterByteGap,
            TxPhase::InterByteGap => {
                self.bytes_sent += 1;
                TxPhase::Idle
            }
        };
    }

    /// Whether a frame is in flight (every phase except idle).
    pub fn busy(&self) -> bool {
        self.phase != TxPhase::Idle
    }

    /// Completes with `Ok(())` once the line has returned to idle.
    pub fn flush(&self) -> nb::Result<(), Infallible> {
        if self.busy() {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }

    /// The current framing phase, for inspection.
    pub fn phase(&self) -> TxPhase {
        self.phase
    }

    /// Drives the least-significant unsent bit onto the line.
    fn drive_data_bit(&mut self) {
        let high = self.shift & 1 != 0;
        self.shift >>= 1;
        self.bits_remaining -= 1;
        if high {
            let _ = self.pin.set_high();
        } else {
            let _ = self.pin.set_low();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    const TICKS_PER_BIT: u16 = 4;

    fn state(high: bool) -> PinState {
        if high { PinState::High } else { PinState::Low }
    }

    /// Expected pin writes for one frame of `byte`: idle preset, start bit,
    /// 8 data bits LSB-first, stop bit.
    fn frame_expectations(byte: u8) -> Vec<PinTransaction> {
        let mut t = vec![
            PinTransaction::set(PinState::High), // new(): idle preset
            PinTransaction::set(PinState::Low),  // send(): start bit
        ];
        for i in 0..8 {
            t.push(PinTransaction::set(state(byte & (1 << i) != 0)));
        }
        t.push(PinTransaction::set(PinState::High)); // stop bit
        t
    }

    #[test]
    fn frames_a_byte_lsb_first_with_gap() {
        let pin = PinMock::new(&frame_expectations(0xA3));
        let mut tx = UartTx::new(pin, TICKS_PER_BIT);
        tx.send(0xA3).unwrap();

        // start + 8 data + stop + gap = 11 bit periods
        for _ in 0..11 * TICKS_PER_BIT {
            assert!(tx.busy());
            tx.tick();
        }
        assert!(!tx.busy());
        assert_eq!(tx.bytes_sent, 1);
        assert_eq!(tx.phase(), TxPhase::Idle);
        tx.pin.done();
    }

    #[test]
    fn send_while_busy_is_rejected() {
        let pin = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut tx = UartTx::new(pin, TICKS_PER_BIT);
        tx.send(0x01).unwrap();
        assert_eq!(tx.send(0x02), Err(SendError::Busy));
        tx.pin.done();
    }

    #[test]
    fn flush_blocks_until_the_gap_has_elapsed() {
        let pin = PinMock::new(&frame_expectations(0x00));
        let mut tx = UartTx::new(pin, TICKS_PER_BIT);
        tx.send(0x00).unwrap();
        assert_eq!(tx.flush(), Err(nb::Error::WouldBlock));
        for _ in 0..11 * TICKS_PER_BIT {
            tx.tick();
        }
        assert_eq!(tx.flush(), Ok(()));
        tx.pin.done();
    }

    #[test]
    fn idle_ticks_do_not_touch_the_line() {
        let pin = PinMock::new(&[PinTransaction::set(PinState::High)]);
        let mut tx = UartTx::new(pin, TICKS_PER_BIT);
        for _ in 0..100 {
            tx.tick();
        }
        assert!(!tx.busy());
        assert_eq!(tx.bytes_sent, 0);
        tx.pin.done();
    }

    #[test]
    fn back_to_back_sends_are_separated_by_the_gap() {
        let mut expectations = frame_expectations(0x0F);
        expectations.extend(frame_expectations(0xF0).into_iter().skip(1));
        let pin = PinMock::new(&expectations);
        let mut tx = UartTx::new(pin, TICKS_PER_BIT);

        tx.send(0x0F).unwrap();
        let mut ticks = 0;
        while tx.busy() {
            tx.tick();
            ticks += 1;
        }
        assert_eq!(ticks, 11 * TICKS_PER_BIT as usize);

        tx.send(0xF0).unwrap();
        while tx.busy() {
            tx.tick();
        }
        assert_eq!(tx.bytes_sent, 2);
        tx.pin.done();
    }
}
