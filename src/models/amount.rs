//! Amount type for representing monetary values
//!
//! Records carry a single implicit currency. Amounts are plain `f64` values
//! summed in input order, so repeated aggregation over the same records is
//! bit-identical. Formatting follows en-US conventions (`$1,234.56`).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount in the session currency
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount from a raw value
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Get the raw value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Total ordering, usable with `sort_by` even when NaN sneaks in
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    /// Parse an amount from user input
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "1,250", "1,250.00"
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        // One sign at most, and only in front
        if cleaned.is_empty() || cleaned.starts_with(['-', '+']) {
            return Err(AmountParseError::InvalidFormat(s.to_string()));
        }

        let value: f64 = cleaned
            .parse()
            .map_err(|_| AmountParseError::InvalidFormat(s.to_string()))?;
        if !value.is_finite() {
            return Err(AmountParseError::InvalidFormat(s.to_string()));
        }

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol and thousands separators
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let fixed = format!("{:.2}", self.0.abs());
        let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let sign = if self.0 < 0.0 && fixed != "0.00" { "-" } else { "" };
        format!("{}{}{}.{}", sign, symbol, group_thousands(whole), frac)
    }
}

/// Insert a comma every three digits from the right
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
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

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(1250.0).to_string(), "$1,250.00");
        assert_eq!(Amount::new(45.67).to_string(), "$45.67");
        assert_eq!(Amount::new(0.0).to_string(), "$0.00");
        assert_eq!(Amount::new(-12.5).to_string(), "-$12.50");
        assert_eq!(Amount::new(1234567.891).to_string(), "$1,234,567.89");
    }

    #[test]
    fn test_tiny_negative_has_no_sign() {
        assert_eq!(Amount::new(-0.001).to_string(), "$0.00");
    }

    #[test]
    fn test_custom_symbol() {
        assert_eq!(Amount::new(999.999).format_with_symbol("€"), "€1,000.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Amount::parse("10.50").unwrap().value(), 10.5);
        assert_eq!(Amount::parse("$10.50").unwrap().value(), 10.5);
        assert_eq!(Amount::parse("-10.50").unwrap().value(), -10.5);
        assert_eq!(Amount::parse("1,250").unwrap().value(), 1250.0);
        assert_eq!(Amount::parse(" 45.67 ").unwrap().value(), 45.67);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse("$").is_err());
        assert!(Amount::parse("abc").is_err());
        assert!(Amount::parse("inf").is_err());
        assert!(Amount::parse("NaN").is_err());
    }

    #[test]
    fn test_parse_rejects_repeated_sign() {
        assert!(Amount::parse("--5").is_err());
        assert!(Amount::parse("-+5").is_err());
        assert!(Amount::parse("$-5").is_err());
        assert!(Amount::parse("+5").is_err());
        assert_eq!(Amount::parse("-$5").unwrap().value(), -5.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Amount::new(1250.0);
        let b = Amount::new(45.67);
        assert_eq!((a - b).value(), 1250.0 - 45.67);
        assert_eq!((a + b).value(), 1250.0 + 45.67);
        assert_eq!((-b).value(), -45.67);
    }

    #[test]
    fn test_sum_in_order() {
        let values = [0.1, 0.2, 0.3];
        let total: Amount = values.iter().map(|v| Amount::new(*v)).sum();
        assert_eq!(total.value(), 0.1 + 0.2 + 0.3);
    }

    #[test]
    fn test_total_cmp() {
        assert_eq!(
            Amount::new(1.0).total_cmp(&Amount::new(2.0)),
            Ordering::Less
        );
        assert_eq!(
            Amount::new(2.0).total_cmp(&Amount::new(2.0)),
            Ordering::Equal
        );
    }
}
