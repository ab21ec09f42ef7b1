//! Fixed-point money with two fractional digits.
//!
//! Amounts are held as whole hundredths (cents) and persisted as SQLite
//! `INTEGER`s, matching a `NUMERIC(10,2)` column without float rounding.

use crate::error::{AuctionError, Result};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Largest magnitude representable in `NUMERIC(10,2)`: 99,999,999.99.
pub const MAX_CENTS: i64 = 9_999_999_999;

const MAX_INTEGER_DIGITS: usize = 8;

/// A monetary amount such as a purse balance or a purchase price.
///
/// ```rust
/// use cricket_auction::Money;
///
/// let price: Money = "2.5".parse().unwrap();
/// assert_eq!(price.cents(), 250);
/// assert_eq!(price.to_string(), "2.50");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Build an amount from hundredths, rejecting values outside `NUMERIC(10,2)`.
    pub fn from_cents(cents: i64) -> Result<Self> {
        if cents.unsigned_abs() > MAX_CENTS.unsigned_abs() {
            return Err(AuctionError::InvalidMoney {
                value: cents.to_string(),
            });
        }
        Ok(Self(cents))
    }

    /// Build an amount from whole currency units.
    pub fn from_units(units: i64) -> Result<Self> {
        let cents = units.checked_mul(100).ok_or_else(|| AuctionError::InvalidMoney {
            value: units.to_string(),
        })?;
        Self::from_cents(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0
            .checked_add(other.0)
            .and_then(|cents| Money::from_cents(cents).ok())
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0
            .checked_sub(other.0)
            .and_then(|cents| Money::from_cents(cents).ok())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = AuctionError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AuctionError::InvalidMoney {
            value: s.to_string(),
        };

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }
        if whole.len() > MAX_INTEGER_DIGITS || fraction.len() > 2 {
            return Err(invalid());
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = whole_value * 100 + fraction_value;
        Money::from_cents(if negative { -cents } else { cents })
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let cents = i64::column_result(value)?;
        Money::from_cents(cents).map_err(|_| FromSqlError::OutOfRange(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional_amounts() {
        assert_eq!("100".parse::<Money>().unwrap().cents(), 10_000);
        assert_eq!("100.5".parse::<Money>().unwrap().cents(), 10_050);
        assert_eq!("100.05".parse::<Money>().unwrap().cents(), 10_005);
        assert_eq!(" 2.00 ".parse::<Money>().unwrap().cents(), 200);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!("-3.10".parse::<Money>().unwrap().cents(), -310);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for bad in ["", ".", "abc", "1.234", "1,000", "1.2.3", "+5", "123456789.00", "--1"] {
            assert!(bad.parse::<Money>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_display_always_two_decimals() {
        assert_eq!(Money::from_cents(0).unwrap().to_string(), "0.00");
        assert_eq!(Money::from_cents(5).unwrap().to_string(), "0.05");
        assert_eq!(Money::from_cents(-5).unwrap().to_string(), "-0.05");
        assert_eq!(Money::from_units(100).unwrap().to_string(), "100.00");
    }

    #[test]
    fn test_precision_bounds() {
        assert!(Money::from_cents(MAX_CENTS).is_ok());
        assert!(Money::from_cents(MAX_CENTS + 1).is_err());
        assert!(Money::from_cents(-MAX_CENTS - 1).is_err());
        assert!(Money::from_cents(i64::MIN).is_err());
        assert!(Money::from_cents(i64::MAX).is_err());
        assert!("99999999.99".parse::<Money>().is_ok());
        assert!(Money::from_units(i64::MAX).is_err());
    }

    #[test]
    fn test_checked_arithmetic() {
        let purse = Money::from_units(100).unwrap();
        let price = "2.50".parse::<Money>().unwrap();

        assert_eq!(purse.checked_sub(price).unwrap().to_string(), "97.50");
        assert_eq!(purse.checked_add(price).unwrap().to_string(), "102.50");
        assert!(Money::from_cents(MAX_CENTS)
            .unwrap()
            .checked_add(Money::from_cents(1).unwrap())
            .is_none());
    }

    #[test]
    fn test_serde_as_decimal_string() {
        let amount = "12.30".parse::<Money>().unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"12.30\"");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
        assert!(serde_json::from_str::<Money>("\"12.345\"").is_err());
    }
}
