//! Money type for representing monetary values.
//!
//! Uses an integer count of minor units (paise, cents) to avoid
//! floating-point drift when totals are recomputed after every cart change.
//! On the wire amounts are plain JSON numbers in major units, the way the
//! web client has always stored them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

/// Minor units per major unit. Every supported currency uses two decimals.
pub const MINOR_PER_MAJOR: i64 = 100;

/// Supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary amount in minor units.
///
/// Arithmetic saturates instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    minor_units: i64,
}

impl Money {
    /// Zero.
    pub const ZERO: Money = Money { minor_units: 0 };

    /// Create a Money value from minor units.
    pub const fn from_minor(minor_units: i64) -> Self {
        Self { minor_units }
    }

    /// Create a Money value from whole major units.
    pub const fn from_major(major: i64) -> Self {
        Self {
            minor_units: major.saturating_mul(MINOR_PER_MAJOR),
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// minor unit.
    ///
    /// ```
    /// use foodie_cart::money::Money;
    /// let price = Money::from_decimal(39.8);
    /// assert_eq!(price.minor_units(), 3980);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        // `as` saturates for out-of-range floats and maps NaN to zero.
        Self::from_minor((amount * MINOR_PER_MAJOR as f64).round() as i64)
    }

    /// Amount in minor units.
    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    /// Convert to a decimal amount in major units.
    pub fn to_decimal(&self) -> f64 {
        self.minor_units as f64 / MINOR_PER_MAJOR as f64
    }

    /// Check if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// Check if the amount is a whole number of major units.
    pub fn is_whole(&self) -> bool {
        self.minor_units % MINOR_PER_MAJOR == 0
    }

    /// Add, saturating at the numeric bounds.
    pub fn saturating_add(self, other: Money) -> Money {
        Money::from_minor(self.minor_units.saturating_add(other.minor_units))
    }

    /// Subtract, saturating at the numeric bounds.
    pub fn saturating_sub(self, other: Money) -> Money {
        Money::from_minor(self.minor_units.saturating_sub(other.minor_units))
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn saturating_mul(self, factor: u32) -> Money {
        Money::from_minor(self.minor_units.saturating_mul(i64::from(factor)))
    }

    /// Calculate a percentage of this amount, rounded to the nearest minor
    /// unit.
    pub fn percentage(&self, percent: f64) -> Money {
        Money::from_minor((self.minor_units as f64 * percent / 100.0).round() as i64)
    }

    /// Calculate a percentage of this amount, rounded once to the nearest
    /// whole major unit (halves away from zero).
    pub fn percentage_in_major(&self, percent: f64) -> Money {
        Money::from_major((self.to_decimal() * percent / 100.0).round() as i64)
    }

    /// Number of whole `unit`s contained in this amount. Zero for
    /// non-positive amounts or units.
    pub fn whole_multiples_of(&self, unit: Money) -> u64 {
        if self.minor_units <= 0 || unit.minor_units <= 0 {
            return 0;
        }
        (self.minor_units / unit.minor_units) as u64
    }

    /// Sum an iterator of Money values.
    pub fn sum(iter: impl IntoIterator<Item = Money>) -> Money {
        iter.into_iter().fold(Money::ZERO, Money::saturating_add)
    }

    /// Format with a currency symbol, dropping the fraction for whole
    /// amounts (e.g., "₹200", "₹39.80").
    pub fn display(&self, currency: Currency) -> String {
        format!("{}{}", currency.symbol(), self.display_amount())
    }

    /// Format without a symbol.
    pub fn display_amount(&self) -> String {
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        let per = MINOR_PER_MAJOR as u64;
        if abs % per == 0 {
            format!("{}{}", sign, abs / per)
        } else {
            format!("{}{}.{:02}", sign, abs / per, abs % per)
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.saturating_add(other)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        self.saturating_sub(other)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money::sum(iter)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_amount())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.minor_units / MINOR_PER_MAJOR)
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("money amount must be finite"));
        }
        Ok(Money::from_decimal(amount))
    }
}
