use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;
use tracing::warn;

/// A monetary value: tuition due, amount paid, or the balance between them.
///
/// Wraps `rust_decimal::Decimal` so sums of many small amounts stay exact.
/// Unlike a payment amount it may be negative (overpaid balances, refunds
/// recorded with the wrong sign). Arithmetic saturates at the bounds of
/// `Decimal` instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Reads a course price the way a browser's `parseFloat` would.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"350 €"` reads as 350. Anything without a leading number reads as zero.
/// Numbers beyond the range of `Decimal` saturate to `Decimal::MAX` (or
/// `Decimal::MIN`); exponents too small to represent read as zero.
pub fn parse_price(raw: &str) -> Decimal {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut cursor = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            cursor += 1;
            true
        }
        Some(b'+') => {
            cursor += 1;
            false
        }
        _ => false,
    };

    let int_start = cursor;
    while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
        cursor += 1;
    }
    let integer = &text[int_start..cursor];

    let mut fraction = "";
    if cursor < bytes.len() && bytes[cursor] == b'.' {
        let frac_start = cursor + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if !integer.is_empty() || frac_end > frac_start {
            fraction = &text[frac_start..frac_end];
            cursor = frac_end;
        }
    }

    if integer.is_empty() && fraction.is_empty() {
        return Decimal::ZERO;
    }

    let mut exponent = "";
    if cursor < bytes.len() && matches!(bytes[cursor], b'e' | b'E') {
        let exp_start = cursor + 1;
        let mut exp_end = exp_start;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            exponent = &text[exp_start..exp_end];
        }
    }

    let mut canonical = String::with_capacity(cursor + 8);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(if integer.is_empty() { "0" } else { integer });
    if !fraction.is_empty() {
        canonical.push('.');
        canonical.push_str(fraction);
    }

    let parsed = if exponent.is_empty() {
        Decimal::from_str(&canonical)
    } else {
        canonical.push('e');
        canonical.push_str(exponent);
        Decimal::from_scientific(&canonical)
    };
    parsed.unwrap_or_else(|_| {
        if exponent.starts_with('-') {
            Decimal::ZERO
        } else {
            warn!(price = raw, "Price out of range, saturating");
            if negative { Decimal::MIN } else { Decimal::MAX }
        }
    })
}

/// A numeric field as found in exported records: a JSON number or a string
/// holding one.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RawNumber {
    Text(String),
    Number(serde_json::Number),
}

impl RawNumber {
    pub(crate) fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Quantity read leniently with [`parse_price`]: numbers and numeric strings
/// are accepted, null and non-numeric text read as zero.
pub fn deserialize_lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawNumber>::deserialize(deserializer)?
        .map(|raw| parse_price(&raw.into_text()))
        .unwrap_or(Decimal::ZERO))
}
