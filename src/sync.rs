//! Two-stage synchronizer for the raw receive line.
//!
//! The receiver never looks at the raw line directly: every sample first
//! passes through two delay stages, so single-tick glitches and metastable
//! reads settle before any framing decision is made.

/// Two-stage delay of the raw input line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSync {
    stage1: bool,
    stage2: bool,
}

impl LineSync {
    /// Creates a synchronizer preloaded to the idle-high line level.
    pub const fn new() -> Self {
        Self {
            stage1: true,
            stage2: true,
        }
    }

    /// Shifts `raw` into the delay chain and returns the synchronized level.
    pub fn update(&mut self, raw: bool) -> bool {
        self.stage2 = self.stage1;
        self.stage1 = raw;
        self.stage2
    }
}

impl Default for LineSync {
    fn default() -> Self {
        Self::new()
    }
}
