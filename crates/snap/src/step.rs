//! Edge quantization granularity.

use serde::{Deserialize, Serialize};

/// Number of equal divisions an edge is split into, always in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Step(u32);

impl Step {
    /// Smallest step count.
    pub const MIN: Self = Self(1);
    /// Largest step count.
    pub const MAX: Self = Self(100);
    /// Step count used when nothing is configured.
    pub const DEFAULT: Self = Self(10);

    /// Clamp `divisions` into range. Zero becomes one.
    pub fn new(divisions: u32) -> Self {
        Self(divisions.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Map a UI slider value, rounding half to even.
    pub fn from_slider(value: f32) -> Self {
        if !value.is_finite() {
            return Self::DEFAULT;
        }
        let rounded = value.round_ties_even();
        if rounded <= Self::MIN.0 as f32 {
            Self::MIN
        } else {
            Self::new(rounded.min(Self::MAX.0 as f32) as u32)
        }
    }

    /// Division count.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for Step {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Step> for u32 {
    fn from(step: Step) -> Self {
        step.0
    }
}
