//! CSS Length values
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

use serde::{Deserialize, Serialize};

/// [§ 4.5 Mixing Percentages and Dimensions](https://www.w3.org/TR/css-values-4/#mixed-percentages)
///
/// A computed `<length-percentage>`. Lengths are already converted to device
/// units; percentages wait for their basis (box size, gradient length, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LengthPercentage {
    /// Absolute length in device units.
    Px(f32),
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    /// "A <percentage> value ... is always relative to another quantity"
    Percent(f32),
}

impl LengthPercentage {
    /// `0px`.
    pub const ZERO: Self = Self::Px(0.0);

    /// `50%`, the center of whatever the basis is.
    pub const CENTER: Self = Self::Percent(50.0);

    /// Resolve against `basis` (the quantity a percentage refers to).
    #[must_use]
    pub fn resolve(self, basis: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => basis * pct / 100.0,
        }
    }
}

impl Default for LengthPercentage {
    fn default() -> Self {
        Self::ZERO
    }
}
