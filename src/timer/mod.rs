//! Timer and tick-loop utilities for the softline engines.
//!
//! Logic for deriving tick dividers from clock rates and for scheduling the
//! per-tick `tick()` calls. Two approaches are supported: an interrupt
//! service routine using `critical_section::with` (`timer-isr` feature), or
//! a busy-loop delay timer (`delay-loop` feature).
//!
//! Contains helpers for polling- and ISR-based scheduling, including:
//! - `ticks_per_bit` / `const_ticks_per_bit`: divider calculators
//! - `tick_interval_us` / `const_tick_interval_us`: loop-delay calculators
//! - `run_tick_loop`: blocking driver loop for `DelayNs` (feature `delay-loop`)
//! - `global_uart_tick` and `tick_uart_timer!()`: interrupt-based tick
//!   callback wrappers (feature `timer-isr`)
//!
//! Common configurations (timer tick rate = baud × ticks per bit):
//!
//! | Baud   | Ticks/bit | Timer tick rate | Tick interval |
//! |--------|-----------|-----------------|---------------|
//! |   9600 |        16 |      153.6 kHz  |       ~6.5 µs |
//! |   9600 |         8 |       76.8 kHz  |        13 µs  |
//! |  19200 |         8 |      153.6 kHz  |       ~6.5 µs |
//! | 115200 |         4 |      460.8 kHz  |        ~2 µs  |

use libm::round;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg_attr(feature = "delay-loop", allow(unused_imports))]
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg_attr(feature = "timer-isr", allow(unused_imports))]
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

/// Default bit rate when nothing else is configured.
pub const DEFAULT_BAUD: u32 = 9_600;

/// Default receiver oversampling (ticks per bit).
pub const DEFAULT_TICKS_PER_BIT: u16 = 16;

/// 1,000,000 microseconds = 1 second
pub const MICROSECONDS_PER_SECOND: u32 = 1_000_000;

/// Computes the tick divider for a target rate (nearest integer).
///
/// Works for both the serial bit rate (`ticks_per_bit(tick_rate, baud)`)
/// and the pulse generator's reference rate
/// (`ticks_per_bit(tick_rate, reference_hz)`).
///
/// # Arguments
/// - `tick_rate_hz`: fixed timer tick rate in Hz
/// - `target_hz`: target strobe rate in Hz (e.g., the baud rate)
pub fn ticks_per_bit(tick_rate_hz: u32, target_hz: u32) -> u16 {
    round(tick_rate_hz as f64 / target_hz as f64) as u16
}

/// Compile-time variant of [`ticks_per_bit`].
pub const fn const_ticks_per_bit(tick_rate_hz: u32, target_hz: u32) -> u16 {
    ((tick_rate_hz + target_hz / 2) / target_hz) as u16
}

/// Computes the delay between `tick()` calls for a polling loop, in
/// microseconds (nearest integer).
pub fn tick_interval_us(tick_rate_hz: u32) -> u32 {
    round(MICROSECONDS_PER_SECOND as f64 / tick_rate_hz as f64) as u32
}

/// Compile-time variant of [`tick_interval_us`].
pub const fn const_tick_interval_us(tick_rate_hz: u32) -> u32 {
    (MICROSECONDS_PER_SECOND + tick_rate_hz / 2) / tick_rate_hz
}
