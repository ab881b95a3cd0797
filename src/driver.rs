//! Combined UART driver: receiver and transmitter under a single tick.
//!
//! [`Uart`] owns a [`UartRx`] and a [`UartTx`] running at the same bit
//! rate and advances both from one `tick()` call. The two engines share no
//! state, so this is purely a convenience wiring — either half can also be
//! used on its own.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use softline::driver::Uart;
//!
//! # let tx_pin = Pin::new(&[
//! #     PinTransaction::set(PinState::High),
//! #     PinTransaction::set(PinState::Low),
//! # ]);
//! # let rx_pin = Pin::new(&[PinTransaction::get(PinState::High)]);
//! let mut uart: Uart<Pin, Pin> = Uart::new(tx_pin, rx_pin, 16);
//! uart.send(b'x').unwrap();
//! let event = uart.tick(); // once per timer tick
//! assert!(event.byte_ready.is_none());
//! # uart.tx.pin.done();
//! # uart.rx.pin.done();
//! ```
//!
//! ## Notes
//!
//! - Only one `Uart` instance should be ticked from a given timer; see
//!   [`crate::timer`] for ISR- and delay-based scheduling helpers.
//! - The receiver and transmitter need not be connected to each other; a
//!   loopback wiring of the two pins is useful for self-test.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin};

use crate::rx::{RxEvent, UartRx};
use crate::tx::{SendError, UartTx};

/// Full-duplex software UART over two `embedded-hal` pins.
#[derive(Debug)]
pub struct Uart<TX: OutputPin, RX: InputPin> {
    /// The transmit half.
    pub tx: UartTx<TX>,
    /// The receive half.
    pub rx: UartRx<RX>,
}

impl<TX: OutputPin, RX: InputPin> Uart<TX, RX> {
    /// Creates both halves with the same `ticks_per_bit` divider.
    ///
    /// The transmit line is driven to idle-high immediately.
    pub fn new(tx_pin: TX, rx_pin: RX, ticks_per_bit: u16) -> Self {
        Self {
            tx: UartTx::new(tx_pin, ticks_per_bit),
            rx: UartRx::new(rx_pin, ticks_per_bit),
        }
    }

    /// Advances both halves by one timer tick.
    ///
    /// The halves share no mutable state; transmit is advanced first so a
    /// loopback wiring observes the line level of the previous tick.
    pub fn tick(&mut self) -> RxEvent {
        self.tx.tick();
        self.rx.tick()
    }

    /// Latches `byte` into the transmitter; `Err(SendError::Busy)` while a
    /// frame is in flight.
    pub fn send(&mut self, byte: u8) -> Result<(), SendError> {
        self.tx.send(byte)
    }

    /// Whether the transmitter is mid-frame.
    pub fn busy(&self) -> bool {
        self.tx.busy()
    }

    /// Completes once the transmit line has returned to idle.
    pub fn flush(&self) -> nb::Result<(), Infallible> {
        self.tx.flush()
    }

    /// Pops the oldest received byte.
    pub fn read(&mut self) -> Option<u8> {
        self.rx.read()
    }

    /// The oldest received byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.rx.peek()
    }
}
