//! Glitch-free periodic pulse generator.
//!
//! [`PulseGen`] produces a digital pulse of configurable period and duty
//! cycle on an `embedded-hal` output pin. Two nested timing layers drive
//! it: a reference ticker at a fixed sub-multiple of the input tick, and a
//! position counter that walks one period of the waveform per reference
//! tick.
//!
//! The period in reference ticks is the product of two factor-table
//! entries, `{1,2,4,8}[scale] * {1,5,25,125}[range]`, giving 16 achievable
//! periods across a 1000:1 range. The pulse is *centered* within its period
//! rather than starting at position 0, and its width rounds up:
//! `width = (period * duty + 99) / 100`.
//!
//! Configuration is double-buffered. [`set_config`](PulseGen::set_config)
//! may be called on every tick; the live value is copied into the active
//! shadow only on the reference tick where the position counter wraps, so
//! the period in progress always completes under the configuration it
//! started with. The output itself is registered — it lags the computed
//! level by one reference tick — so no combinational glitch is ever
//! observable on the pin.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use softline::wave::{PulseConfig, PulseGen};
//!
//! # let out = Pin::new(&[PinTransaction::set(PinState::Low)]);
//! // period 2 * 25 = 50 reference ticks, 40% duty
//! let mut wave: PulseGen<Pin> = PulseGen::new(out, 10, PulseConfig::new(1, 2, 40));
//! let boundary = wave.tick(); // call once per timer tick
//! assert!(!boundary);
//! # wave.pin.done();
//! ```

use embedded_hal::digital::OutputPin;

use crate::consts::{PULSE_DUTY_MAX, PULSE_RANGE_FACTORS, PULSE_SCALE_FACTORS};
use crate::ticker::BitTicker;

/// Pulse frequency and duty-cycle selection.
///
/// Out-of-range values are clamped at this boundary: selectors are masked
/// to `0..=3` and duty saturates at 99. The engine itself never re-checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseConfig {
    /// Scale selector, `0..=3`, choosing a factor from `{1, 2, 4, 8}`.
    pub scale: u8,
    /// Range selector, `0..=3`, choosing a factor from `{1, 5, 25, 125}`.
    pub range: u8,
    /// Duty cycle in percent, `0..=99`.
    pub duty: u8,
}

impl PulseConfig {
    /// Creates a configuration, clamping each field into range.
    pub const fn new(scale: u8, range: u8, duty: u8) -> Self {
        Self {
            scale: scale & 0x3,
            range: range & 0x3,
            duty: if duty > PULSE_DUTY_MAX { PULSE_DUTY_MAX } else { duty },
        }
    }

    /// Period length in reference ticks for this configuration.
    pub const fn period_ticks(&self) -> u16 {
        PULSE_SCALE_FACTORS[self.scale as usize] * PULSE_RANGE_FACTORS[self.range as usize]
    }

    /// Pulse width in reference ticks: `ceil(period * duty / 100)`.
    ///
    /// Duty 0 yields width 0 (output held low for the whole period); high
    /// duty values may round up to fill the entire period.
    pub const fn width_ticks(&self) -> u16 {
        let period = self.period_ticks() as u32;
        ((period * self.duty as u32 + 99) / 100) as u16
    }
}

impl Default for PulseConfig {
    /// Period 1 reference tick, duty 0: output held low.
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Derived per-period constants, recomputed only at period boundaries.
#[derive(Debug, Clone, Copy)]
struct ActivePeriod {
    period: u16,
    width: u16,
    start: u16,
}

impl ActivePeriod {
    fn from_config(config: PulseConfig) -> Self {
        let period = config.period_ticks();
        let width = config.width_ticks();
        Self {
            period,
            width,
            start: (period - width) / 2,
        }
    }

    /// Output level for a position within this period (centered pulse).
    fn level_at(&self, position: u16) -> bool {
        if self.width == 0 {
            return false;
        }
        position >= self.start && position < self.start + self.width
    }
}

/// Tick-driven pulse generator over an `embedded-hal` output pin.
///
/// Independent of the serial engines; driven only by its own reference
/// ticker and configuration inputs.
#[derive(Debug)]
pub struct PulseGen<OUT: OutputPin> {
    /// The pulse output pin.
    pub pin: OUT,
    ticker: BitTicker,
    live: PulseConfig,
    active: ActivePeriod,
    position: u16,
    /// Level computed on the previous reference tick, driven on the next.
    pending: bool,
    driven: bool,
}

impl<OUT: OutputPin> PulseGen<OUT> {
    /// Creates a generator whose reference tick fires once every
    /// `reference_divisor` input ticks, starting from `config`.
    ///
    /// The pin is driven low immediately (the output register resets low).
    pub fn new(pin: OUT, reference_divisor: u16, config: PulseConfig) -> Self {
        #[allow(unused_mut)]
        let mut pin = pin;
        let _ = pin.set_low();
        let config = PulseConfig::new(config.scale, config.range, config.duty);
        Self {
            pin,
            ticker: BitTicker::new(reference_divisor),
            live: config,
            active: ActivePeriod::from_config(config),
            position: 0,
            pending: false,
            driven: false,
        }
    }

    /// Replaces the live configuration, clamping out-of-range fields.
    ///
    /// May be called on every tick. The change is applied atomically at the
    /// next period boundary; the period in progress is never disturbed.
    pub fn set_config(&mut self, config: PulseConfig) {
        self.live = PulseConfig::new(config.scale, config.range, config.duty);
    }

    /// The configuration the current period is running under.
    pub fn active_period_ticks(&self) -> u16 {
        self.active.period
    }

    /// Pulse width of the current period, in reference ticks.
    pub fn active_width_ticks(&self) -> u16 {
        self.active.width
    }

    /// Advances the generator by one input tick.
    ///
    /// Returns `true` on the reference tick where the position counter
    /// wraps (the period boundary), which external logic may use for
    /// synchronization. On that same tick the live configuration becomes
    /// active.
    pub fn tick(&mut self) -> bool {
        if !self.ticker.tick() {
            return false;
        }
        // Registered output: drive what the previous reference tick computed.
        self.drive(self.pending);
        self.pending = self.active.level_at(self.position);

        let boundary = self.position == self.active.period - 1;
        if boundary {
            self.position = 0;
            self.active = ActivePeriod::from_config(self.live);
        } else {
            self.position += 1;
        }
        boundary
    }

    fn drive(&mut self, level: bool) {
        if level == self.driven {
            return;
        }
        if level {
            let _ = self.pin.set_high();
        } else {
            let _ = self.pin.set_low();
        }
        self.driven = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn width_rounds_up_with_integer_arithmetic() {
        // period 125 (scale 1x, range 125x), duty 50 -> ceil(62.5) = 63
        assert_eq!(PulseConfig::new(0, 3, 50).width_ticks(), 63);
        // period 1, duty 0 -> width 0
        assert_eq!(PulseConfig::new(0, 0, 0).width_ticks(), 0);
        // period 8, duty 99 -> (792 + 99) / 100 = 8: the whole period
        assert_eq!(PulseConfig::new(3, 0, 99).width_ticks(), 8);
    }

    #[test]
    fn sixteen_periods_span_a_thousand_to_one_range() {
        assert_eq!(PulseConfig::new(0, 0, 0).period_ticks(), 1);
        assert_eq!(PulseConfig::new(3, 3, 0).period_ticks(), 1000);
        assert_eq!(PulseConfig::new(1, 2, 0).period_ticks(), 50);
        assert_eq!(PulseConfig::new(2, 1, 0).period_ticks(), 20);
    }

    #[test]
    fn out_of_range_fields_are_clamped() {
        let config = PulseConfig::new(7, 5, 130);
        assert_eq!(config.scale, 3);
        assert_eq!(config.range, 1);
        assert_eq!(config.duty, 99);
    }

    #[test]
    fn pulse_is_centered_within_the_period() {
        // period 8, duty 50 -> width 4, high at positions 2..=5
        let active = ActivePeriod::from_config(PulseConfig::new(3, 0, 50));
        let pattern: Vec<bool> = (0..8).map(|p| active.level_at(p)).collect();
        assert_eq!(
            pattern,
            [false, false, true, true, true, true, false, false]
        );
    }

    #[test]
    fn zero_duty_holds_the_line_low() {
        let out = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let mut wave = PulseGen::new(out, 1, PulseConfig::new(3, 0, 0));
        let mut boundaries = 0;
        for _ in 0..32 {
            if wave.tick() {
                boundaries += 1;
            }
        }
        assert_eq!(boundaries, 4);
        wave.pin.done();
    }

    #[test]
    fn emits_the_centered_pattern_with_one_tick_latency() {
        // period 8, duty 50: level high for positions 2..=5, so the pin
        // rises one reference tick later (registered output).
        let out = PinMock::new(&[
            PinTransaction::set(PinState::Low), // new()
            PinTransaction::set(PinState::High), // position 2, driven at tick 4
            PinTransaction::set(PinState::Low), // position 6, driven at tick 8
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut wave = PulseGen::new(out, 1, PulseConfig::new(3, 0, 50));
        let mut boundary_ticks = Vec::new();
        for t in 1..=16 {
            if wave.tick() {
                boundary_ticks.push(t);
            }
        }
        assert_eq!(boundary_ticks, [8, 16]);
        wave.pin.done();
    }

    #[test]
    fn reconfiguration_waits_for_the_period_boundary() {
        // First period: 8 ticks at 50% duty. Mid-period we switch to 99%
        // duty; the in-progress period still goes low on schedule, and only
        // the next period is held high throughout.
        let out = PinMock::new(&[
            PinTransaction::set(PinState::Low),  // new()
            PinTransaction::set(PinState::High), // old pattern rise
            PinTransaction::set(PinState::Low),  // old pattern fall, on schedule
            PinTransaction::set(PinState::High), // new pattern: full-period high
        ]);
        let mut wave = PulseGen::new(out, 1, PulseConfig::new(3, 0, 50));
        for t in 1..=16 {
            if t == 5 {
                wave.set_config(PulseConfig::new(3, 0, 99));
            }
            let boundary = wave.tick();
            assert_eq!(boundary, t % 8 == 0);
        }
        assert_eq!(wave.active_width_ticks(), 8);
        wave.pin.done();
    }

    #[test]
    fn reference_divisor_scales_the_waveform() {
        // divisor 4: each waveform position lasts 4 input ticks
        let out = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let mut wave = PulseGen::new(out, 4, PulseConfig::new(0, 1, 0)); // period 5
        let mut boundaries = Vec::new();
        for t in 1..=40 {
            if wave.tick() {
                boundaries.push(t);
            }
        }
        assert_eq!(boundaries, [20, 40]);
        wave.pin.done();
    }
}
