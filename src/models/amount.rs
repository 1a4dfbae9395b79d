//! Amount type for statement transactions
//!
//! Bank statements carry signed decimal amounts in whatever unit the bank
//! reports (often whole units for currencies without minor units). The value
//! is kept as an `f64` and always rendered in plain decimal form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// A signed decimal transaction amount
///
/// Negative values are outflows, positive values are inflows.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount from a decimal value
    ///
    /// # Examples
    /// ```
    /// use statement_vault::models::Amount;
    /// let amount = Amount::new(-50000.0);
    /// assert!(amount.is_negative());
    /// ```
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Get the raw decimal value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Check if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Check if the amount can be written as a numeric literal
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse an amount from text
    ///
    /// Accepts an optional leading minus sign and thousands separators:
    /// "-50000", "1,250.75", "12.5"
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
        let value: f64 = cleaned
            .parse()
            .map_err(|_| AmountParseError::InvalidFormat(s.to_string()))?;
        if !value.is_finite() {
            return Err(AmountParseError::InvalidFormat(s.to_string()));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Amount {
    /// Plain decimal form: no exponent, no trailing ".0" for whole values
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
