//! Monetary amounts in the smallest currency unit.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// An amount of money in cents.
///
/// Stored as an integer so arithmetic stays exact: 25 × $6.99 must be
/// precisely $174.75, never a float approximation. `Display` renders the
/// conventional `dollars.cents` form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Total for `quantity` units priced at `self`.
    ///
    /// Negative quantities clamp to zero; overflow saturates.
    pub fn total(&self, quantity: i64) -> Money {
        let units = u64::try_from(quantity).unwrap_or(0);
        Money(self.0.saturating_mul(units))
    }

    pub fn saturating_add(&self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Parse a decimal dollar amount (`"6.99"`, `"6.9"`, `"6"`).
    ///
    /// At most two fractional digits; anything else is a validation failure
    /// naming the offending input.
    pub fn from_decimal_str(s: &str) -> DomainResult<Money> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::validation("price cannot be empty"));
        }

        let (dollars, fraction) = match s.split_once('.') {
            Some((d, f)) => (d, f),
            None => (s, ""),
        };

        let dollars: u64 = dollars
            .parse()
            .map_err(|_| DomainError::validation(format!("price is not a decimal amount: {s:?}")))?;

        let cents = match fraction.len() {
            0 => 0,
            1 | 2 => {
                let f: u64 = fraction.parse().map_err(|_| {
                    DomainError::validation(format!("price is not a decimal amount: {s:?}"))
                })?;
                if fraction.len() == 1 { f * 10 } else { f }
            }
            _ => {
                return Err(DomainError::validation(format!(
                    "price has more than two decimal places: {s:?}"
                )));
            }
        };

        Ok(Money(dollars.saturating_mul(100).saturating_add(cents)))
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
