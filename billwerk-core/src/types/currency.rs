//! [`Currency`] represents an ISO 4217 currency and knows its minor unit exponent.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Currencies without a minor unit.
const ZERO_DECIMAL: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "MGA", "PYG", "RWF", "UGX", "VND",
    "VUV", "XAF", "XOF", "XPF",
];

/// Currencies with three decimal places.
const THREE_DECIMAL: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Currencies with four decimal places.
const FOUR_DECIMAL: &[&str] = &["CLF"];

/// An ISO 4217 alphabetic currency code, normalized to upper case.
///
/// ```
/// use billwerk_core::types::Currency;
///
/// let eur: Currency = "eur".parse().unwrap();
/// assert_eq!(eur.code(), "EUR");
/// assert_eq!(eur.exponent(), 2);
///
/// let jpy: Currency = "JPY".parse().unwrap();
/// assert_eq!(jpy.exponent(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(String);

impl Currency {
    /// The three letter code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Number of digits after the decimal point in the major unit.
    pub fn exponent(&self) -> u8 {
        let code = self.0.as_str();
        if ZERO_DECIMAL.contains(&code) {
            0
        } else if THREE_DECIMAL.contains(&code) {
            3
        } else if FOUR_DECIMAL.contains(&code) {
            4
        } else {
            2
        }
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidCurrency(s.to_string()));
        }
        Ok(Currency(code.to_ascii_uppercase()))
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponents_follow_iso_4217() {
        let exponent = |code: &str| code.parse::<Currency>().unwrap().exponent();

        assert_eq!(exponent("EUR"), 2);
        assert_eq!(exponent("DKK"), 2);
        assert_eq!(exponent("JPY"), 0);
        assert_eq!(exponent("KRW"), 0);
        assert_eq!(exponent("BHD"), 3);
        assert_eq!(exponent("KWD"), 3);
        assert_eq!(exponent("CLF"), 4);
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!("EU".parse::<Currency>().is_err());
        assert!("EURO".parse::<Currency>().is_err());
        assert!("E1R".parse::<Currency>().is_err());
        assert!("".parse::<Currency>().is_err());
    }

    #[test]
    fn serializes_as_code() {
        let dkk: Currency = "dkk".parse().unwrap();
        assert_eq!(serde_json::to_value(&dkk).unwrap(), serde_json::json!("DKK"));
    }
}
