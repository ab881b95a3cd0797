use crate::driver::Uart;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::{InputPin, OutputPin};

/// Used to initialize the global static [`Uart`] for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```ignore
/// use softline::driver::Uart;
/// use core::cell::RefCell;
/// use critical_section::Mutex;
/// use some_hal::{PD1, PD2};
///
/// static UART: Mutex<RefCell<Option<Uart<PD1, PD2>>>> =
///     global_uart_init::<PD1, PD2>();
/// ```
pub const fn global_uart_init<TX: OutputPin, RX: InputPin>()
-> Mutex<RefCell<Option<Uart<TX, RX>>>> {
    Mutex::new(RefCell::new(None))
}

/// Places a freshly constructed [`Uart`] into the global static.
///
/// # Arguments
/// * The global static `Uart`
/// * The tx pin
/// * The rx pin
/// * The number of ticks per bit such that:
///   `timer tick rate / ticks per bit = baud rate`,
///   e.g. a 153.6 kHz timer interrupt and 16 ticks per bit for 9600 baud.
///
/// # Example
/// ```ignore
/// fn main() {
///     global_uart_setup(&UART, tx, rx, 16);
/// }
/// ```
pub fn global_uart_setup<TX: OutputPin, RX: InputPin>(
    global_uart: &'static Mutex<RefCell<Option<Uart<TX, RX>>>>,
    tx: TX,
    rx: RX,
    ticks_per_bit: u16,
) {
    critical_section::with(|cs| {
        let _ = global_uart
            .borrow(cs)
            .replace(Some(Uart::new(tx, rx, ticks_per_bit)));
    });
}

/// Runs the tick at each interrupt.
///
/// # Arguments
/// * The global static `Uart`
///
/// # Example
/// ```ignore
/// #[interrupt]
/// fn TIM2() {
///     global_uart_tick(&UART);
/// }
/// ```
pub fn global_uart_tick<TX: OutputPin, RX: InputPin>(
    global_uart: &'static Mutex<RefCell<Option<Uart<TX, RX>>>>,
) {
    critical_section::with(|cs| {
        if let Some(uart) = global_uart.borrow(cs).borrow_mut().as_mut() {
            let _ = uart.tick();
        }
    });
}
