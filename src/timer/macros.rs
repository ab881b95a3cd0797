/// Declares a static global `UART_DRIVER` instance protected by a
/// `critical_section` mutex.
///
/// This macro creates a `static` singleton suitable for use in
/// interrupt-based environments, where both the main thread and an ISR need
/// to safely access the shared driver state.
///
/// # Arguments
/// - `$tx`: The concrete type of the TX pin (must implement `OutputPin`)
/// - `$rx`: The concrete type of the RX pin (must implement `InputPin`)
///
/// # Example
/// ```ignore
/// init_uart_driver!(MyTxPinType, MyRxPinType);
/// ```
#[macro_export]
macro_rules! init_uart_driver {
    ( $tx:ty, $rx:ty ) => {
        pub static UART_DRIVER: $crate::critical_section::Mutex<
            core::cell::RefCell<Option<$crate::driver::Uart<$tx, $rx>>>,
        > = $crate::critical_section::Mutex::new(core::cell::RefCell::new(None));
    };
}

/// Initializes the global `UART_DRIVER` singleton with a new driver
/// instance.
///
/// Wraps construction of the [`Uart`](crate::driver::Uart) and stores it
/// inside the global declared by [`init_uart_driver!`].
///
/// # Arguments
/// - `$tx`: The TX pin value (must implement `OutputPin`)
/// - `$rx`: The RX pin value (must implement `InputPin`)
/// - `$tpb`: Ticks per bit (e.g., 16 for 9600 baud off a 153.6 kHz timer)
///
/// # Example
/// ```ignore
/// fn main() {
///     setup_uart_driver!(tx, rx, 16);
/// }
/// ```
///
/// # Notes
/// - Must be called inside a critical section-aware context (safe in
///   `main()`).
/// - Requires `init_uart_driver!` to have been used earlier.
#[macro_export]
macro_rules! setup_uart_driver {
    ( $tx:expr, $rx:expr, $tpb:expr ) => {
        $crate::critical_section::with(|cs| {
            UART_DRIVER
                .borrow(cs)
                .replace(Some($crate::driver::Uart::new($tx, $rx, $tpb)));
        });
    };
}

/// Calls `tick()` on the global `UART_DRIVER` if it has been initialized.
///
/// Intended to be invoked from a timer ISR or scheduler to advance the UART
/// state machines at the fixed tick rate.
///
/// # Example
/// ```ignore
/// #[interrupt]
/// fn TIM2() {
///     tick_uart_timer!();
/// }
/// ```
///
/// # Notes
/// - Assumes `UART_DRIVER` was declared with `init_uart_driver!` and
///   initialized via `setup_uart_driver!`.
/// - Safe to call repeatedly — silently does nothing if the driver hasn't
///   been set up yet.
#[macro_export]
macro_rules! tick_uart_timer {
    () => {
        $crate::critical_section::with(|cs| {
            if let Some(driver) = UART_DRIVER.borrow(cs).borrow_mut().as_mut() {
                let _ = driver.tick();
            }
        });
    };
}
