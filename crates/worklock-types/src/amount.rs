//! Amount type for Worklock
//!
//! All values are integers in the host's smallest indivisible unit. There is
//! no fractional arithmetic anywhere in the core: percentage math floors, and
//! splits are computed so the two halves always sum to the whole.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A value in the host's smallest indivisible unit
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Amount(pub u64);

impl Amount {
    /// Create a new amount
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The zero amount
    pub fn zero() -> Self {
        Self(0)
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Saturating addition
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// `floor(value * percent / 100)` with a u128 intermediate, so the
    /// computation cannot overflow for any u64 value and percent <= 100.
    pub fn percent_floor(self, percent: u8) -> Self {
        let scaled = (self.0 as u128) * (percent as u128) / 100;
        Self(scaled as u64)
    }

    /// Split into `(floor(value * percent / 100), remainder)`.
    ///
    /// The two parts always sum to the original amount exactly, which is what
    /// terminal escrow transitions rely on for conservation.
    pub fn split_percent(self, percent: u8) -> (Self, Self) {
        let first = self.percent_floor(percent.min(100));
        let second = Self(self.0 - first.0);
        (first, second)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
