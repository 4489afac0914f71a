//! [`Amount`] and [`MinorUnit`] represent monetary values on both sides of the gateway.
//!
//! Callers pass decimal major-unit amounts (`"10.00"`), Billwerk expects integer
//! minor units (`1000`). The conversion is exact and uses the exponent of the
//! request currency.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{Error, Result},
    types::Currency,
};

/// An integer amount in the smallest unit of a currency, e.g. cents for EUR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnit(pub i64);

impl From<i64> for MinorUnit {
    fn from(value: i64) -> Self {
        MinorUnit(value)
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decimal amount in major units as supplied by the caller.
///
/// The value is kept as written and only interpreted once the currency is
/// known, see [`Amount::to_minor_units`].
///
/// ```
/// use billwerk_core::types::{Amount, Currency, MinorUnit};
///
/// let eur: Currency = "EUR".parse().unwrap();
/// assert_eq!(Amount::from("10.00").to_minor_units(&eur).unwrap(), MinorUnit(1000));
/// assert_eq!(Amount::from(25u32).to_minor_units(&eur).unwrap(), MinorUnit(2500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount(String);

impl Amount {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the amount was supplied as an empty string.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Convert to integer minor units of `currency`.
    ///
    /// Trailing zeros beyond the currency exponent are accepted, any other
    /// extra precision is rejected rather than rounded.
    pub fn to_minor_units(&self, currency: &Currency) -> Result<MinorUnit> {
        let raw = self.0.trim();
        let invalid = |reason: &str| Error::InvalidAmount(format!("{raw:?} {reason}"));

        if raw.starts_with('-') {
            return Err(invalid("is negative"));
        }
        let raw_unsigned = raw.strip_prefix('+').unwrap_or(raw);

        let (whole, fraction) = match raw_unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (raw_unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("is not a number"));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("is not a decimal number"));
        }

        let exponent = usize::from(currency.exponent());
        let significant = fraction.trim_end_matches('0');
        if significant.len() > exponent {
            let reason = format!("has more precision than {} allows", currency.code());
            return Err(invalid(reason.as_str()));
        }

        let digits = format!("{whole}{significant:0<exponent$}");
        let value = digits
            .trim_start_matches('0')
            .chars()
            .try_fold(0i64, |acc, c| {
                let digit = i64::from(c.to_digit(10)?);
                acc.checked_mul(10)?.checked_add(digit)
            })
            .ok_or_else(|| invalid("is too large"))?;

        Ok(MinorUnit(value))
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount(value.to_string())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Amount(value)
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Amount(value.to_string())
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(value.to_string())
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minor(amount: &str, currency: &str) -> Result<MinorUnit> {
        Amount::from(amount).to_minor_units(&currency.parse().unwrap())
    }

    #[test]
    fn two_decimal_currencies() {
        assert_eq!(minor("10.00", "EUR").unwrap(), MinorUnit(1000));
        assert_eq!(minor("10", "EUR").unwrap(), MinorUnit(1000));
        assert_eq!(minor("10.5", "EUR").unwrap(), MinorUnit(1050));
        assert_eq!(minor("0.01", "DKK").unwrap(), MinorUnit(1));
        assert_eq!(minor("0", "DKK").unwrap(), MinorUnit(0));
        assert_eq!(minor(".5", "EUR").unwrap(), MinorUnit(50));
        assert_eq!(minor("10.000", "EUR").unwrap(), MinorUnit(1000));
    }

    #[test]
    fn currency_exponent_is_respected() {
        assert_eq!(minor("1000", "JPY").unwrap(), MinorUnit(1000));
        assert_eq!(minor("1.234", "BHD").unwrap(), MinorUnit(1234));
        assert_eq!(minor("1", "BHD").unwrap(), MinorUnit(1000));
        assert!(minor("10.5", "JPY").is_err());
    }

    #[test]
    fn rejects_over_precise_amounts() {
        assert!(matches!(
            minor("10.005", "EUR"),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(minor("-1.00", "EUR").is_err());
        assert!(minor("", "EUR").is_err());
        assert!(minor(".", "EUR").is_err());
        assert!(minor("1e3", "EUR").is_err());
        assert!(minor("1,00", "EUR").is_err());
        assert!(minor("99999999999999999999", "EUR").is_err());
    }
}
