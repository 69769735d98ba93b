//! Currency glyphs and integer amount formatting for reports.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("JPY")
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "JPY" => "¥".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        _ => code.into(),
    }
}

/// Which sign prefix a report line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    /// `+` for zero and positive values.
    pub fn of(value: i64) -> Self {
        if value >= 0 {
            Sign::Plus
        } else {
            Sign::Minus
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// How amounts are written: currency glyph plus optional digit grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pub symbol: String,
    pub grouping_separator: Option<char>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            symbol: symbol_for(CurrencyCode::default().as_str()),
            grouping_separator: Some(','),
        }
    }
}

impl NumberFormat {
    pub fn new(code: &CurrencyCode, grouping_separator: Option<char>) -> Self {
        Self {
            symbol: symbol_for(code.as_str()),
            grouping_separator,
        }
    }

    /// `¥1,234` for the magnitude of `value`.
    pub fn money(&self, value: i64) -> String {
        format!("{}{}", self.symbol, self.number(value.unsigned_abs()))
    }

    /// `+¥1,234` / `-¥1,234`, sign given explicitly and magnitude taken from `value`.
    pub fn signed_money(&self, sign: Sign, value: i64) -> String {
        format!("{}{}", sign.as_char(), self.money(value))
    }

    /// Sign derived from `value` itself.
    pub fn balance(&self, value: i64) -> String {
        self.signed_money(Sign::of(value), value)
    }

    pub fn number(&self, value: u64) -> String {
        let digits = value.to_string();
        match self.grouping_separator {
            Some(separator) => group_digits(&digits, separator),
            None => digits,
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        let format = NumberFormat::default();
        assert_eq!(format.money(0), "¥0");
        assert_eq!(format.money(999), "¥999");
        assert_eq!(format.money(1_000), "¥1,000");
        assert_eq!(format.money(-1_234_567), "¥1,234,567");
    }

    #[test]
    fn sign_is_never_embedded_in_numeral() {
        let format = NumberFormat::default();
        assert_eq!(format.balance(-700), "-¥700");
        assert_eq!(format.balance(0), "+¥0");
        assert_eq!(format.signed_money(Sign::Minus, 300), "-¥300");
    }

    #[test]
    fn grouping_can_be_disabled() {
        let format = NumberFormat::new(&CurrencyCode::new("usd"), None);
        assert_eq!(format.signed_money(Sign::Plus, 12_500), "+$12500");
    }
}
