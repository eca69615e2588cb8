//! Money type for representing amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point drift when
//! summing ledgers. On disk an amount is a plain JSON number in whole units
//! (`100`, `12.5`) so preset and budget documents stay readable.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::error::{TallyError, TallyResult};

/// Largest magnitude, in whole units, accepted from text or JSON
pub const MAX_UNITS: i64 = 1_000_000_000_000;

/// Represents an amount stored as cents (hundredths of a unit)
///
/// Arithmetic saturates at the `i64` bounds instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use tally::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// The amount as a floating-point number of units, for export
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Build from a floating-point number of units, rounding to the nearest cent
    ///
    /// Returns `None` for non-finite values and magnitudes above [`MAX_UNITS`].
    pub fn from_f64(units: f64) -> Option<Self> {
        if !units.is_finite() || units.abs() > MAX_UNITS as f64 {
            return None;
        }
        Some(Self((units * 100.0).round() as i64))
    }

    /// Parse an amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "+3", "10", ".5". Digits past the
    /// second decimal place round half away from zero. Magnitudes above
    /// [`MAX_UNITS`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (negative, body) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s.strip_prefix('+').unwrap_or(s))
        };

        if body.is_empty() {
            return Err(invalid());
        }

        let (whole, frac) = match body.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (body, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        // frac is ASCII digits only, so byte offsets are char offsets
        let digit = |i: usize| frac.as_bytes().get(i).map_or(0, |b| i64::from(b - b'0'));
        let round_up = i64::from(digit(2) >= 5);
        let cents = digit(0) * 10 + digit(1) + round_up;

        if units > MAX_UNITS {
            return Err(invalid());
        }
        let total = units * 100 + cents;
        if total > MAX_UNITS * 100 {
            return Err(invalid());
        }

        Ok(Self(if negative { -total } else { total }))
    }
}

/// Parse a user-supplied amount that must be a non-negative number
pub fn parse_non_negative(s: &str) -> TallyResult<Money> {
    let amount = Money::parse(s).map_err(|e| TallyError::invalid_amount(s.trim(), e.to_string()))?;
    if amount.is_negative() {
        return Err(TallyError::invalid_amount(
            s.trim(),
            "amount must not be negative",
        ));
    }
    Ok(amount)
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let text = format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part());
        f.pad(&text)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.units())
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

/// The JSON shapes an amount may take on disk
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Whole(i64),
    Fractional(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawAmount::deserialize(deserializer)? {
            RawAmount::Whole(units) if (-MAX_UNITS..=MAX_UNITS).contains(&units) => {
                Ok(Money(units * 100))
            }
            RawAmount::Whole(units) => {
                Err(de::Error::custom(format!("amount out of range: {}", units)))
            }
            RawAmount::Fractional(units) => Money::from_f64(units)
                .ok_or_else(|| de::Error::custom(format!("amount out of range: {}", units))),
            RawAmount::Text(text) => Money::parse(&text).map_err(de::Error::custom),
        }
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "not a decimal number: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
