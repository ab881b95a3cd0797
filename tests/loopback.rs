//! Wired loopback tests: the transmitter's output pin and the receiver's
//! input pin share one line, and both halves tick in lock-step.

use core::convert::Infallible;
use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use softline::driver::Uart;
use softline::rx::RxEvent;

const TICKS_PER_BIT: u16 = 8;

/// One shared wire: the writer half drives it, the reader half samples it.
#[derive(Debug, Clone)]
struct Line(Rc<Cell<bool>>);

impl Line {
    fn pair() -> (Line, Line) {
        let wire = Rc::new(Cell::new(true)); // serial idle is high
        (Line(Rc::clone(&wire)), Line(wire))
    }
}

impl ErrorType for Line {
    type Error = Infallible;
}

impl OutputPin for Line {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

impl InputPin for Line {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

fn loopback_uart() -> Uart<Line, Line> {
    let (tx_pin, rx_pin) = Line::pair();
    Uart::new(tx_pin, rx_pin, TICKS_PER_BIT)
}

/// Ticks until the receiver completes a byte; panics if none arrives.
fn pump_until_byte(uart: &mut Uart<Line, Line>) -> RxEvent {
    for _ in 0..32 * TICKS_PER_BIT as usize {
        let event = uart.tick();
        if event.byte_ready.is_some() {
            return event;
        }
    }
    panic!("no byte completed within the tick budget");
}

/// Ticks until the transmitter has fully drained, gap included.
fn pump_until_idle(uart: &mut Uart<Line, Line>) {
    for _ in 0..16 * TICKS_PER_BIT as usize {
        let _ = uart.tick();
        if uart.flush().is_ok() {
            return;
        }
    }
    panic!("transmitter did not drain within the tick budget");
}

#[test]
fn round_trip_preserves_every_byte_value() {
    let mut uart = loopback_uart();
    for value in 0..=255u8 {
        uart.send(value).unwrap();
        let event = pump_until_byte(&mut uart);
        assert_eq!(event.byte_ready, Some(value), "byte {value:#04x} corrupted");
        if event.terminator {
            // CR and LF reset the FIFO on arrival
            assert_eq!(uart.read(), None);
        } else {
            assert_eq!(uart.read(), Some(value));
        }
        pump_until_idle(&mut uart);
    }
    assert_eq!(uart.rx.bytes_received, 256);
    assert_eq!(uart.rx.framing_errors, 0);
    assert_eq!(uart.tx.bytes_sent, 256);
}

#[test]
fn alternating_bit_byte_lands_in_the_fifo() {
    let mut uart = loopback_uart();
    uart.send(0x55).unwrap();
    let event = pump_until_byte(&mut uart);
    assert_eq!(event.byte_ready, Some(0x55));
    assert_eq!(uart.rx.len(), 1);
    assert_eq!(uart.peek(), Some(0x55));
}

#[test]
fn thirty_third_byte_is_dropped_when_the_fifo_is_full() {
    let mut uart = loopback_uart();
    for value in 0x10..0x30u8 {
        uart.send(value).unwrap();
        let _ = pump_until_byte(&mut uart);
        pump_until_idle(&mut uart);
    }
    assert!(uart.rx.is_full());
    assert_eq!(uart.rx.len(), 32);

    uart.send(0x30).unwrap();
    let event = pump_until_byte(&mut uart);
    assert_eq!(event.byte_ready, Some(0x30)); // framed, but not buffered
    assert_eq!(uart.rx.overflows, 1);
    assert_eq!(uart.rx.len(), 32);
    assert_eq!(uart.peek(), Some(0x10)); // contents unchanged
}

#[test]
fn terminator_after_a_full_fifo_leaves_it_empty() {
    let mut uart = loopback_uart();
    for value in 0x10..0x30u8 {
        uart.send(value).unwrap();
        let _ = pump_until_byte(&mut uart);
        pump_until_idle(&mut uart);
    }
    assert!(uart.rx.is_full());

    uart.send(0x0D).unwrap();
    let event = pump_until_byte(&mut uart);
    assert!(event.terminator);
    assert!(uart.rx.is_empty());
    assert_eq!(uart.read(), None);
}
