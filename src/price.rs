use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

/// Fixed-point amount with two fractional digits, held as minor units.
///
/// The store column is `decimal(10,2)`, so the magnitude is capped at
/// `99_999_999.99`. On the wire the value is a JSON number; numeric strings are
/// accepted on input as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("price must be a number")]
    NotANumber,
    #[error("price must be between -99999999.99 and 99999999.99")]
    OutOfRange,
}

impl Price {
    pub const MAX_MINOR_UNITS: i64 = 99_999_999_99;

    pub const ZERO: Price = Price(0);

    pub fn from_minor_units(minor: i64) -> Result<Self, PriceError> {
        if minor.abs() > Self::MAX_MINOR_UNITS {
            return Err(PriceError::OutOfRange);
        }
        Ok(Self(minor))
    }

    /// Rounds half away from zero to two fractional digits.
    ///
    /// The shortest decimal text of `value` is what gets rounded, so `1.005`
    /// becomes `1.01` even though its binary form sits just below.
    pub fn from_major(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotANumber);
        }
        format!("{value}").parse()
    }

    // Rows are only ever written through `Price`, so the column is in range.
    pub(crate) fn from_stored(minor: i64) -> Self {
        Self(minor)
    }

    pub fn minor_units(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    /// Exact decimal parse: `[+-]digits[.digits][e[+-]digits]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, unsigned) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(at) => {
                let exponent: i64 = unsigned[at + 1..]
                    .parse()
                    .map_err(|_| PriceError::NotANumber)?;
                (&unsigned[..at], exponent)
            }
            None => (unsigned, 0),
        };

        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        let empty = int_part.is_empty() && frac_part.is_empty();
        if empty || !is_digits(int_part) || !is_digits(frac_part) {
            return Err(PriceError::NotANumber);
        }

        let digits = format!("{int_part}{frac_part}");
        let significant = digits.trim_start_matches('0');
        // Index in `significant` where the minor-unit integer part ends.
        let point = (int_part.len() as i64 - (digits.len() - significant.len()) as i64)
            .saturating_add(exponent)
            .saturating_add(2);

        let minor = minor_units_of(significant, point)?;
        Self::from_minor_units(if negative { -minor } else { minor })
    }
}

/// Rounds `significant` (digits with the decimal point at `point`) half away
/// from zero to an integer.
fn minor_units_of(significant: &str, point: i64) -> Result<i64, PriceError> {
    if significant.is_empty() || point < 0 {
        return Ok(0);
    }
    // More integer digits than the column can hold.
    if point > 12 {
        return Err(PriceError::OutOfRange);
    }

    let point = point as usize;
    let (whole, rest) = significant.split_at(point.min(significant.len()));
    let mut minor: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| PriceError::OutOfRange)?
    };
    for _ in significant.len()..point {
        minor *= 10;
    }
    if rest.as_bytes().first().is_some_and(|&b| b >= b'5') {
        minor += 1;
    }
    Ok(minor)
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        v.checked_mul(100)
            .ok_or(PriceError::OutOfRange)
            .and_then(Price::from_minor_units)
            .map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(PriceError::OutOfRange))?;
        self.visit_i64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        Price::from_major(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        let from_int: Price = serde_json::from_str("100").unwrap();
        let from_float: Price = serde_json::from_str("100.5").unwrap();
        let from_str: Price = serde_json::from_str("\"3500000.00\"").unwrap();

        assert_eq!(from_int.minor_units(), 10_000);
        assert_eq!(from_float.minor_units(), 10_050);
        assert_eq!(from_str.minor_units(), 350_000_000);
    }

    #[test]
    fn rounds_to_two_fraction_digits() {
        assert_eq!(Price::from_major(0.125).unwrap().minor_units(), 13);
        assert_eq!(Price::from_major(19.999).unwrap().minor_units(), 2000);
    }

    #[test]
    fn half_cents_round_away_from_zero() {
        assert_eq!("1.005".parse::<Price>().unwrap().minor_units(), 101);
        assert_eq!("8.675".parse::<Price>().unwrap().minor_units(), 868);
        assert_eq!("-1.005".parse::<Price>().unwrap().minor_units(), -101);
        assert_eq!("1.0049999".parse::<Price>().unwrap().minor_units(), 100);
        assert_eq!(Price::from_major(1.005).unwrap().minor_units(), 101);

        let from_number: Price = serde_json::from_str("1.005").unwrap();
        let from_string: Price = serde_json::from_str("\"1.005\"").unwrap();
        assert_eq!(from_number.minor_units(), 101);
        assert_eq!(from_string.minor_units(), 101);
    }

    #[test]
    fn parses_decimal_text_forms() {
        let cases = [
            ("0", 0),
            ("007.5", 750),
            (".5", 50),
            ("5.", 500),
            ("+12.34", 1234),
            ("1.5e2", 15_000),
            ("25E-1", 250),
            ("0.004", 0),
            ("0.005", 1),
            ("99999999.99", Price::MAX_MINOR_UNITS),
        ];
        for (text, minor) in cases {
            assert_eq!(text.parse::<Price>().unwrap().minor_units(), minor, "{text}");
        }
        for text in ["", ".", "-", "1.2.3", "1e", "12a", "1,5"] {
            assert_eq!(text.parse::<Price>(), Err(PriceError::NotANumber), "{text:?}");
        }
        assert_eq!("99999999.995".parse::<Price>(), Err(PriceError::OutOfRange));
        assert_eq!("1e20".parse::<Price>(), Err(PriceError::OutOfRange));
    }

    #[test]
    fn rejects_values_wider_than_the_column() {
        assert!(serde_json::from_str::<Price>("100000000").unwrap_err().is_data());
        assert_eq!(Price::from_major(1e8), Err(PriceError::OutOfRange));
        assert!(Price::from_major(99_999_999.99).is_ok());
        assert_eq!("abc".parse::<Price>(), Err(PriceError::NotANumber));
    }

    #[test]
    fn serializes_as_json_number() {
        let price = Price::from_minor_units(350_000_000).unwrap();
        assert_eq!(serde_json::to_value(price).unwrap(), serde_json::json!(3500000.0));
        assert_eq!(price.to_string(), "3500000.00");
        assert_eq!(Price::from_minor_units(-5).unwrap().to_string(), "-0.05");
    }
}
