//! Divide-by-N tick strobe shared by all engines.
//!
//! Each engine owns its own [`BitTicker`] instance: the receiver and
//! transmitter run theirs at the baud rate, the pulse generator at its
//! reference rate. The divisor is computed once from configuration (see
//! [`crate::timer::ticks_per_bit`]) and never adjusted afterwards, so the
//! strobe cannot drift.

/// Derives a lower-frequency strobe from the fixed-rate input tick.
///
/// Counts input ticks up to a divisor and reports `true` exactly once per
/// completed count. The counter always stays strictly below the divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitTicker {
    counter: u16,
    divisor: u16,
}

impl BitTicker {
    /// Creates a ticker that strobes once every `divisor` input ticks.
    ///
    /// A divisor of 0 is treated as 1 (strobe on every tick).
    pub const fn new(divisor: u16) -> Self {
        let divisor = if divisor == 0 { 1 } else { divisor };
        Self { counter: 0, divisor }
    }

    /// Advances the ticker by one input tick.
    ///
    /// Returns `true` on the final tick of each period, at which point the
    /// counter has wrapped back to 0.
    pub fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter == self.divisor {
            self.counter = 0;
            return true;
        }
        false
    }

    /// Whether the counter sits at the arithmetic midpoint of the period.
    ///
    /// The receiver samples the line exactly here, minimizing sensitivity
    /// to baud-rate mismatch of up to half a bit period.
    pub const fn at_midpoint(&self) -> bool {
        self.counter == self.divisor / 2
    }

    /// Snaps the counter back to 0, suppressing the strobe for one period.
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// The configured divisor.
    pub const fn divisor(&self) -> u16 {
        self.divisor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strobes_exactly_once_per_divisor_ticks() {
        let mut ticker = BitTicker::new(4);
        let mut strobes = 0;
        for i in 1..=12 {
            if ticker.tick() {
                strobes += 1;
                assert_eq!(i % 4, 0);
            }
        }
        assert_eq!(strobes, 3);
    }

    #[test]
    fn reset_restarts_the_period() {
        let mut ticker = BitTicker::new(4);
        assert!(!ticker.tick());
        assert!(!ticker.tick());
        ticker.reset();
        assert!(!ticker.tick());
        assert!(!ticker.tick());
        assert!(!ticker.tick());
        assert!(ticker.tick());
    }

    #[test]
    fn midpoint_is_half_the_divisor() {
        let mut ticker = BitTicker::new(8);
        let mut midpoint_at = None;
        for i in 0..8 {
            if ticker.at_midpoint() {
                midpoint_at = Some(i);
            }
            let _ = ticker.tick();
        }
        assert_eq!(midpoint_at, Some(4));
    }

    #[test]
    fn zero_divisor_strobes_every_tick() {
        let mut ticker = BitTicker::new(0);
        assert!(ticker.tick());
        assert!(ticker.tick());
    }
}
