//! Money type for representing monetary values.
//!
//! Amounts are integers in the smallest unit of their currency. For the
//! rupiah that unit is the rupiah itself, which is also what the bookstore
//! API sends in `price`, `totalAmount` and `priceAtBuy`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    IDR,
    USD,
    EUR,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "IDR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::IDR => "IDR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "Rp").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::IDR => "Rp",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::IDR | Currency::JPY => 0,
            Currency::USD | Currency::EUR => 2,
        }
    }

    fn group_separator(&self) -> char {
        match self {
            Currency::IDR | Currency::EUR => '.',
            Currency::USD | Currency::JPY => ',',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Currency::IDR | Currency::EUR => ',',
            Currency::USD | Currency::JPY => '.',
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "IDR" => Some(Currency::IDR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s).ok_or_else(|| format!("unsupported currency: {}", s))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Multiply by a quantity, clamping at the numeric bounds.
    pub fn saturating_multiply(&self, quantity: u32) -> Money {
        Money::new(
            self.amount.saturating_mul(i64::from(quantity)),
            self.currency,
        )
    }

    /// Add another amount of the same currency, clamping at the numeric bounds.
    ///
    /// The other amount is taken to be in this value's currency.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::new(self.amount.saturating_add(other.amount), self.currency)
    }

    /// Format as a display string (e.g., "Rp 130.000", "$49.99").
    pub fn display(&self) -> String {
        let symbol = self.currency.symbol();
        let spacer = if symbol.chars().all(char::is_alphabetic) {
            " "
        } else {
            ""
        };
        let sign = if self.amount < 0 { "-" } else { "" };
        format!("{}{}{}{}", sign, symbol, spacer, self.display_amount())
    }

    /// Format the magnitude without symbol or sign (e.g., "130.000").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let magnitude = self.amount.unsigned_abs();

        let mut out = group_digits(magnitude / divisor, self.currency.group_separator());
        if places > 0 {
            out.push(self.currency.decimal_separator());
            out.push_str(&format!(
                "{:0width$}",
                magnitude % divisor,
                width = places as usize
            ));
        }
        out
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Wire form of an amount: the API sends integers, floats or decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Deserialize a minor-unit amount from a JSON number or numeric string.
///
/// Fractional values are rounded to the nearest unit.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawAmount::deserialize(deserializer)? {
        RawAmount::Integer(n) => Ok(n),
        RawAmount::Float(f) if f.is_finite() => Ok(f.round() as i64),
        RawAmount::Float(f) => Err(D::Error::custom(format!("invalid amount: {}", f))),
        RawAmount::Text(s) => {
            let trimmed = s.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(n);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.round() as i64)
                .ok_or_else(|| D::Error::custom(format!("invalid amount: {:?}", s)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(deserialize_with = "deserialize_amount")]
        price: i64,
    }

    #[test]
    fn test_money_display_rupiah() {
        let m = Money::new(130_000, Currency::IDR);
        assert_eq!(m.display(), "Rp 130.000");

        let m = Money::new(999, Currency::IDR);
        assert_eq!(m.display(), "Rp 999");
    }

    #[test]
    fn test_money_display_with_decimals() {
        let m = Money::new(123_456_789, Currency::USD);
        assert_eq!(m.display(), "$1,234,567.89");

        let m = Money::new(5, Currency::EUR);
        assert_eq!(m.display(), "\u{20ac}0,05");
    }

    #[test]
    fn test_money_display_negative() {
        let m = Money::new(-1500, Currency::IDR);
        assert_eq!(m.display(), "-Rp 1.500");
    }

    #[test]
    fn test_money_saturating_add() {
        let a = Money::new(1000, Currency::IDR);
        let b = Money::new(500, Currency::IDR);
        assert_eq!(a.saturating_add(&b), Money::new(1500, Currency::IDR));
        assert_eq!(
            Money::new(i64::MAX, Currency::IDR).saturating_add(&b).amount,
            i64::MAX
        );
    }

    #[test]
    fn test_money_multiply() {
        let m = Money::new(50_000, Currency::IDR);
        assert_eq!(m.saturating_multiply(2).amount, 100_000);
        assert_eq!(
            Money::new(i64::MAX, Currency::IDR).saturating_multiply(2).amount,
            i64::MAX
        );
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("IDR"), Some(Currency::IDR));
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("XYZ"), None);
        assert!("GBP".parse::<Currency>().is_err());
    }

    #[test]
    fn test_deserialize_amount_forms() {
        let p: Priced = serde_json::from_str(r#"{"price": 50000}"#).unwrap();
        assert_eq!(p.price, 50_000);

        let p: Priced = serde_json::from_str(r#"{"price": 49999.6}"#).unwrap();
        assert_eq!(p.price, 50_000);

        let p: Priced = serde_json::from_str(r#"{"price": "30000.00"}"#).unwrap();
        assert_eq!(p.price, 30_000);

        let p: Result<Priced, _> = serde_json::from_str(r#"{"price": "free"}"#);
        assert!(p.is_err());
    }
}
