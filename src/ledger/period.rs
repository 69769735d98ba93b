//! Month and year buckets, matched by date-string prefix.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use super::transaction::Transaction;

/// Transactions whose date starts with `year_month` (`YYYY-MM`).
///
/// Plain prefix comparison: no calendar parsing happens here.
pub fn by_month<'a>(transactions: &'a [Transaction], year_month: &str) -> Vec<&'a Transaction> {
    by_prefix(transactions, year_month)
}

/// Transactions whose date starts with `year` (`YYYY`).
pub fn by_year<'a>(transactions: &'a [Transaction], year: &str) -> Vec<&'a Transaction> {
    by_prefix(transactions, year)
}

fn by_prefix<'a>(transactions: &'a [Transaction], prefix: &str) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|txn| txn.date().starts_with(prefix))
        .collect()
}

/// The twelve `YYYY-MM` labels of `year`, January first.
pub fn months_of(year: &str) -> Vec<String> {
    (1..=12).map(|month| format!("{year}-{month:02}")).collect()
}

/// A validated period label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Period {
    Month(String),
    Year(String),
}

impl Period {
    /// Parses `YYYY-MM` or `YYYY`.
    pub fn parse(label: &str) -> Result<Self, String> {
        let label = label.trim();
        if !label.is_ascii() {
            return Err(format!("`{label}` is not a YYYY-MM or YYYY period"));
        }
        match label.len() {
            4 if is_year(label) => Ok(Period::Year(label.to_string())),
            7 if is_year(&label[..4]) && &label[4..5] == "-" && is_month(&label[5..]) => {
                Ok(Period::Month(label.to_string()))
            }
            _ => Err(format!("`{label}` is not a YYYY-MM or YYYY period")),
        }
    }

    pub fn month(label: &str) -> Result<Self, String> {
        match Self::parse(label)? {
            period @ Period::Month(_) => Ok(period),
            Period::Year(year) => Err(format!("`{year}` is a year, expected YYYY-MM")),
        }
    }

    pub fn year(label: &str) -> Result<Self, String> {
        match Self::parse(label)? {
            period @ Period::Year(_) => Ok(period),
            Period::Month(month) => Err(format!("`{month}` is a month, expected YYYY")),
        }
    }

    pub fn containing(date: NaiveDate) -> (Self, Self) {
        (
            Period::Month(date.format("%Y-%m").to_string()),
            Period::Year(format!("{:04}", date.year())),
        )
    }

    pub fn label(&self) -> &str {
        match self {
            Period::Month(label) | Period::Year(label) => label,
        }
    }

    pub fn filter<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        by_prefix(transactions, self.label())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn is_year(value: &str) -> bool {
    value.len() == 4 && value.chars().all(|c| c.is_ascii_digit())
}

fn is_month(value: &str) -> bool {
    value.len() == 2
        && value.chars().all(|c| c.is_ascii_digit())
        && matches!(value.parse::<u32>(), Ok(1..=12))
}
