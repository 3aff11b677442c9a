use serde::{Deserialize, Serialize};

/// Integer count of half-credits. All credit arithmetic happens in units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CreditUnits(pub u32);

/// Result of converting a raw credit value, keeping track of whether rounding was needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitConversion {
    pub units: CreditUnits,
    pub exact: bool,
}

impl CreditUnits {
    pub const ZERO: Self = Self(0);

    /// Converts a credit value to half-credit units, rounding to the nearest unit.
    ///
    /// Negative and non-finite values collapse to zero units and are reported as inexact.
    pub fn from_credit(credit: f64) -> UnitConversion {
        if !credit.is_finite() || credit < 0.0 {
            return UnitConversion {
                units: Self::ZERO,
                exact: false,
            };
        }

        let doubled = credit * 2.0;
        let rounded = doubled.round();
        let units = if rounded >= u32::MAX as f64 {
            u32::MAX
        } else {
            rounded as u32
        };

        UnitConversion {
            units: Self(units),
            exact: (doubled - rounded).abs() < 1e-9,
        }
    }

    /// Whole credits expressed as units (`credits * 2`).
    pub const fn from_whole(credits: u32) -> Self {
        Self(credits.saturating_mul(2))
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Display credit, always a multiple of 0.5.
    pub fn to_credit(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl std::ops::Add for CreditUnits {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for CreditUnits {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
