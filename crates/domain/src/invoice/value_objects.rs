//! Value objects for the invoice domain.

use serde::{Deserialize, Serialize};

/// Number of digits in a CNPJ tax identifier.
pub const TAX_ID_LEN: usize = 14;

/// Numeric tax identifier (CNPJ), exactly 14 ASCII digits.
///
/// No check-digit verification is performed; only the shape is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaxId(String);

impl TaxId {
    /// Parses a tax identifier, returning None unless `value` is exactly
    /// 14 ASCII digits. Punctuation is not stripped.
    pub fn parse(value: &str) -> Option<Self> {
        Self::is_valid(value).then(|| Self(value.to_string()))
    }

    /// Returns true if `value` is exactly 14 ASCII digits.
    pub fn is_valid(value: &str) -> bool {
        value.len() == TAX_ID_LEN && value.bytes().all(|b| b.is_ascii_digit())
    }

    /// Returns the tax identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TaxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Money amount represented in cents to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in cents (e.g., 1000 = R$ 10.00)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a Money amount from a decimal value, rounding to the nearest cent.
    ///
    /// Returns None for NaN, infinities and values too large to hold in cents.
    pub fn from_decimal(value: f64) -> Option<Self> {
        // 2^63: the first magnitude an `as i64` cast would saturate.
        const CENTS_LIMIT: f64 = i64::MAX as f64;

        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() >= CENTS_LIMIT {
            return None;
        }
        Some(Self {
            cents: cents as i64,
        })
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the amount as a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Returns the whole-currency portion.
    pub fn units(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after whole units).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-R$ {}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "R$ {}.{:02}", self.units(), self.cents_part())
        }
    }
}
