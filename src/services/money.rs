//! Currency amounts in integer centavos.
//!
//! Prices are stored as whole centavos so totals never accumulate float
//! rounding error. Formatting follows the storefront's Brazilian style:
//! `R$ 24,90`.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// An amount of Brazilian reais, in centavos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub u64);

impl Cents {
    pub const ZERO: Self = Self(0);

    /// Build an amount from whole reais and centavos, e.g. `Cents::new(24, 90)`.
    #[must_use]
    pub const fn new(reais: u64, centavos: u64) -> Self {
        Self(reais * 100 + centavos)
    }

    /// Price of `quantity` units at this unit price. Saturates at `u64::MAX`.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    /// Display label with currency symbol and comma decimal separator.
    #[must_use]
    pub fn label(self) -> String {
        format!("R$ {self}")
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
