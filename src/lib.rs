//! # softline
//!
//! A portable, no_std software serial toolkit: a tick-driven UART (8N1)
//! receiver/transmitter pair and a glitch-free periodic pulse generator,
//! all bit-banged over `embedded-hal` digital pins.
//!
//! Everything in this crate advances in lock-step with a single fixed-rate
//! timing source. Call `tick()` on each engine once per timer tick and the
//! engines do the rest:
//! - [`rx::UartRx`] recovers 8N1 frames from an input line, samples each bit
//!   at its center, and buffers completed bytes in a bounded 32-byte FIFO
//!   that resets itself when a line terminator (CR/LF) arrives.
//! - [`tx::UartTx`] serializes bytes onto an output line with start/stop
//!   framing and a mandatory one-bit inter-byte gap, rejecting new requests
//!   while busy.
//! - [`wave::PulseGen`] produces a centered, duty-cycle-programmable pulse
//!   whose frequency and duty can be changed at any tick but only take
//!   effect at a period boundary, so the output never glitches mid-period.
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` and enables `std` in dependencies |
//! | `delay-loop`          | Uses `embedded_hal::delay::DelayNs` for tick scheduling |
//! | `timer-isr` (default) | Uses `critical_section::with` for ISR-driven ticks |
//! | `defmt-0-3`           | Uses `defmt` formatting in dependencies |
//! | `log`                 | Emits diagnostics via the `log` crate |
//!
//! ## Usage
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use softline::driver::Uart;
//!
//! # let tx_pin = Pin::new(&[PinTransaction::set(PinState::High)]);
//! # let rx_pin = Pin::new(&[PinTransaction::get(PinState::High)]);
//! // 16 ticks per bit, e.g. a 153.6 kHz timer tick for 9600 baud
//! let mut uart: Uart<Pin, Pin> = Uart::new(tx_pin, rx_pin, 16);
//! loop {
//!     let event = uart.tick(); // call once per timer tick
//!     if let Some(byte) = event.byte_ready {
//!         // handle `byte`
//!         let _ = byte;
//!     }
//!     # break;
//! }
//! # uart.tx.pin.done();
//! # uart.rx.pin.done();
//! ```
//!
//! Or, drive the loop from a `DelayNs` implementation:
//!
//! ```ignore
//! softline::timer::run_tick_loop(&mut uart, &mut delay, 65);
//! ```
//!
//! ## Timing model
//!
//! The engines never block and never allocate; "waiting" is simply waiting
//! for the next tick. Each engine owns its own divide-by-N tick divider
//! ([`ticker::BitTicker`]), so receiver, transmitter, and pulse generator
//! are independently composable and testable. Within one tick the engines
//! share no mutable state and may be advanced in any order.
//!
//! ## Integration notes
//!
//! - Timing precision is critical; a hardware timer interrupt is the
//!   recommended tick source (see the `timer-isr` feature).
//! - The receiver needs at least 4 ticks per bit so that the two-stage line
//!   synchronizer latency stays inside the first half of the start bit.
//!   16 ticks per bit is a comfortable default.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

pub use heapless;

pub mod consts;
pub mod driver;
pub mod fifo;
pub mod rx;
pub mod sync;
pub mod ticker;
pub mod timer;
pub mod tx;
pub mod wave;
