//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides safe arithmetic operations, percentage helpers and
//! formatting.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
///
/// On the wire an amount is a plain number in currency units (`12.5` is
/// twelve fifty). Deserialization also accepts strings such as `"$12.50"`.
/// Operators saturate at the `i64` range; use [`Money::checked_add`] where
/// overflow must be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use budget_insights::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Largest magnitude accepted from external input (one trillion units)
    pub const MAX_INPUT: Money = Money(100_000_000_000_000);

    /// Create a Money amount from a floating-point unit value.
    ///
    /// The value goes through the same decimal parser as text input, so
    /// `0.125` and `"0.125"` both become 13 cents. Non-finite values and
    /// magnitudes above [`Money::MAX_INPUT`] are rejected.
    pub fn from_units(units: f64) -> Result<Self, MoneyParseError> {
        if !units.is_finite() {
            return Err(MoneyParseError::InvalidFormat(units.to_string()));
        }
        // f64 Display never uses exponent notation
        Self::parse(&units.to_string())
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// The amount in currency units, for display and export
    pub fn as_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// `100 * self / whole`, rounded half-up to two decimals.
    ///
    /// Returns `0.0` when `whole` is zero.
    pub fn percentage_of(&self, whole: Money) -> f64 {
        percentage(self.0, whole.0)
    }

    /// Parse an amount written in currency units
    ///
    /// Accepts "10.50", "-10.50", "$10.50", "10" and ".75". More than two
    /// decimals round half-up to the cent. Magnitudes above
    /// [`Money::MAX_INPUT`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());
        let out_of_range = || MoneyParseError::OutOfRange(s.trim().to_string());
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let (whole, fraction) = rest.split_once('.').unwrap_or((rest, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };

        // Round half-up on the third fraction digit; later digits cannot change it
        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().map_or(false, |d| d >= 5);
        let cents = tenths * 10 + hundredths + i64::from(round_up);

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .filter(|c| *c <= Self::MAX_INPUT.0)
            .ok_or_else(out_of_range)?;
        Ok(Self(if negative { -total } else { total }))
    }

    /// Sum that reports overflow instead of saturating
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Format with a currency symbol, e.g. `-€12.05`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, abs / 100, abs % 100)
    }
}

/// `100 * part / whole` rounded half-up to two decimal places.
///
/// Computed in integer arithmetic so that results such as `12.345` round to
/// `12.35` exactly, independent of binary floating-point representation.
pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let (mut num, mut den) = (part as i128 * 10_000, whole as i128);
    if den < 0 {
        num = -num;
        den = -den;
    }
    // floor(num / den + 1/2), in hundredths of a percent
    let hundredths = (2 * num + den).div_euclid(2 * den);
    hundredths as f64 / 100.0
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_units())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Int(units) => Money::parse(&units.to_string()),
            Raw::Float(units) => Money::from_units(units),
            Raw::Text(s) => Money::parse(&s),
        };
        parsed.map_err(serde::de::Error::custom)
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

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Money amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units_rounds() {
        assert_eq!(Money::from_units(10.5).unwrap().cents(), 1050);
        assert_eq!(Money::from_units(-0.005).unwrap().cents(), -1);
        assert_eq!(Money::from_cents(1050).as_units(), 10.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
        assert_eq!(Money::from_cents(-5).format_with_symbol("€"), "-€0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("1.999").unwrap().cents(), 200);
        assert_eq!(Money::parse("1.994").unwrap().cents(), 199);
        assert_eq!(Money::parse("-0.125").unwrap().cents(), -13);
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("$").is_err());
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 1/8 = 12.5%
        assert_eq!(percentage(1, 8), 12.5);
        // 1/3 = 33.333..%
        assert_eq!(percentage(1, 3), 33.33);
        // 2/3 = 66.666..%
        assert_eq!(percentage(2, 3), 66.67);
        // 12.345% exactly rounds up to 12.35
        assert_eq!(percentage(12_345, 100_000), 12.35);
        // -12.345% rounds toward +inf to -12.34
        assert_eq!(percentage(-12_345, 100_000), -12.34);
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn test_percentage_of() {
        let part = Money::from_cents(2500);
        let whole = Money::from_cents(10000);
        assert_eq!(part.percentage_of(whole), 25.0);
        assert_eq!(part.percentage_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
        assert_eq!(by_ref, total);
    }

    #[test]
    fn test_serialization_uses_units() {
        let m = Money::from_cents(1050);
        assert_eq!(serde_json::to_string(&m).unwrap(), "10.5");

        let from_float: Money = serde_json::from_str("10.5").unwrap();
        let from_int: Money = serde_json::from_str("10").unwrap();
        let from_text: Money = serde_json::from_str("\"$10.50\"").unwrap();
        assert_eq!(from_float, m);
        assert_eq!(from_int.cents(), 1000);
        assert_eq!(from_text, m);
    }

    #[test]
    fn test_float_input_rounds_to_cents() {
        let m: Money = serde_json::from_str("0.1").unwrap();
        assert_eq!(m.cents(), 10);
        let m: Money = serde_json::from_str("19.999").unwrap();
        assert_eq!(m.cents(), 2000);
    }

    #[test]
    fn test_text_and_number_round_alike() {
        for raw in ["0.125", "0.145", "2.675", "19.995", "-0.005"] {
            let from_text: Money = serde_json::from_str(&format!("\"{}\"", raw)).unwrap();
            let from_number: Money = serde_json::from_str(raw).unwrap();
            assert_eq!(from_text, from_number, "amount {}", raw);
        }
        let m: Money = serde_json::from_str("\"0.125\"").unwrap();
        assert_eq!(m.cents(), 13);
    }

    #[test]
    fn test_oversized_amounts_rejected() {
        assert!(serde_json::from_str::<Money>("100000000000000000").is_err());
        assert!(serde_json::from_str::<Money>("\"100000000000000000\"").is_err());
        assert!(serde_json::from_str::<Money>("1e300").is_err());
        assert!(serde_json::from_str::<Money>("99999999999999999999").is_err());
        assert_eq!(
            Money::parse("100000000000000000"),
            Err(MoneyParseError::OutOfRange("100000000000000000".into()))
        );
        assert!(Money::parse("1000000000000").is_ok());
        assert!(Money::parse("1000000000000.01").is_err());
    }

    #[test]
    fn test_non_finite_units_rejected() {
        assert!(Money::from_units(f64::NAN).is_err());
        assert!(Money::from_units(f64::INFINITY).is_err());
        assert!(Money::from_units(-1e20).is_err());
    }

    #[test]
    fn test_arithmetic_never_wraps() {
        let big = Money::from_cents(i64::MAX - 1);
        assert_eq!((big + Money::from_cents(10)).cents(), i64::MAX);
        assert_eq!(big.checked_add(Money::from_cents(10)), None);
        assert_eq!((-Money::from_cents(i64::MIN)).cents(), i64::MAX);
    }
}
