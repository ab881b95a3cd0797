use crate::driver::Uart;
use embedded_hal::delay::DelayNs;

/// Runs a blocking loop that repeatedly calls `tick()` on the provided UART.
///
/// This is a simple timing loop for use in environments where interrupts
/// are unavailable or undesired. It drives the UART's timing using a delay
/// provider implementing `embedded_hal::delay::DelayNs`.
///
/// # Arguments
/// - `driver`: A mutable reference to a [`Uart`] instance.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `tick_us`: The delay between tick calls, in microseconds (see
///   [`crate::timer::tick_interval_us`]).
///
/// # Example
/// ```ignore
/// use softline::timer::{run_tick_loop, const_tick_interval_us};
/// let mut uart = Uart::new(tx, rx, 16);
/// run_tick_loop(&mut uart, &mut delay, const_tick_interval_us(153_600));
/// ```
///
/// # Notes
/// - This loop never returns; it is intended for single-purpose polling
///   firmware.
/// - The loop delay does not account for the time `tick()` itself takes, so
///   the effective bit rate runs slightly slow; prefer interrupt-driven
///   ticking where timing matters.
pub fn run_tick_loop<D: DelayNs, TX, RX>(driver: &mut Uart<TX, RX>, delay: &mut D, tick_us: u32)
where
    TX: embedded_hal::digital::OutputPin,
    RX: embedded_hal::digital::InputPin,
{
    loop {
        let _ = driver.tick();
        delay.delay_us(tick_us);
    }
}
