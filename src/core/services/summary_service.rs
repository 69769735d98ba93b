//! Period totals, daily series, and chart axis bounds.
//!
//! Everything here is recomputed from the ledger on each call.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ledger::{by_month, by_year, months_of, normalize, Ledger, Transaction};

/// Income, expense, and balance of a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

impl PeriodTotals {
    fn from_parts(income: i64, expense: i64) -> Self {
        Self {
            income,
            expense,
            balance: income.saturating_sub(expense),
        }
    }
}

/// Month and year totals shown side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub month: PeriodTotals,
    pub year: PeriodTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub income: i64,
    pub expense: i64,
    pub running_balance: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisBounds {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub points: Vec<DailyPoint>,
    /// `None` when there is nothing to plot.
    pub axis: Option<AxisBounds>,
}

/// One non-empty month of a yearly breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBlock<'a> {
    pub label: String,
    pub totals: PeriodTotals,
    pub transactions: Vec<&'a Transaction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearBreakdown<'a> {
    pub year: String,
    pub months: Vec<MonthBlock<'a>>,
    /// Sums of the monthly totals, not a re-aggregation of the raw year.
    pub totals: PeriodTotals,
}

pub struct SummaryService;

impl SummaryService {
    /// Floors the summed income and expense before deriving the balance.
    pub fn totals<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> PeriodTotals {
        let (income, expense) = Self::sums(transactions);
        PeriodTotals::from_parts(normalize(income), normalize(expense))
    }

    /// Plain sums without the final floor, as the on-screen summary shows them.
    pub fn raw_totals<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> PeriodTotals {
        let (income, expense) = Self::sums(transactions);
        PeriodTotals::from_parts(income, expense)
    }

    pub fn month_totals(ledger: &Ledger, year_month: &str) -> PeriodTotals {
        Self::totals(by_month(ledger.transactions(), year_month))
    }

    pub fn overview(ledger: &Ledger, year_month: &str, year: &str) -> Overview {
        Overview {
            month: Self::raw_totals(by_month(ledger.transactions(), year_month)),
            year: Self::raw_totals(by_year(ledger.transactions(), year)),
        }
    }

    /// Splits `year` into its non-empty months, in calendar order.
    pub fn year_breakdown<'a>(ledger: &'a Ledger, year: &str) -> YearBreakdown<'a> {
        let yearly = by_year(ledger.transactions(), year);
        let mut months = Vec::new();
        let mut income: i64 = 0;
        let mut expense: i64 = 0;

        for label in months_of(year) {
            let transactions: Vec<&Transaction> = yearly
                .iter()
                .copied()
                .filter(|txn| txn.date().starts_with(&label))
                .collect();
            if transactions.is_empty() {
                continue;
            }
            let totals = Self::totals(transactions.iter().copied());
            income = income.saturating_add(totals.income);
            expense = expense.saturating_add(totals.expense);
            months.push(MonthBlock {
                label,
                totals,
                transactions,
            });
        }

        YearBreakdown {
            year: year.to_string(),
            months,
            totals: PeriodTotals::from_parts(income, expense),
        }
    }

    /// One point per distinct date, ascending.
    ///
    /// The running balance restarts at zero for every call: it covers only the
    /// transactions passed in.
    pub fn daily_series<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> Vec<DailyPoint> {
        let mut per_date: BTreeMap<&str, (i64, i64, i64)> = BTreeMap::new();
        for txn in transactions {
            let entry = per_date.entry(txn.date()).or_default();
            if txn.is_income() {
                entry.0 = entry.0.saturating_add(txn.amount());
            } else if txn.is_expense() {
                entry.1 = entry.1.saturating_add(txn.amount().saturating_abs());
            }
            entry.2 = entry.2.saturating_add(txn.amount());
        }

        let mut running: i64 = 0;
        per_date
            .into_iter()
            .map(|(date, (income, expense, net))| {
                running = running.saturating_add(net);
                DailyPoint {
                    date: date.to_string(),
                    income,
                    expense,
                    running_balance: running,
                }
            })
            .collect()
    }

    /// Axis range covering balances, incomes, and negated expenses plus 10% headroom.
    pub fn axis_bounds(points: &[DailyPoint]) -> Option<AxisBounds> {
        let highs = points
            .iter()
            .flat_map(|point| [point.running_balance, point.income]);
        let lows = points
            .iter()
            .flat_map(|point| [point.running_balance, point.expense.saturating_neg()]);
        let max_value = highs.max()?;
        let min_value = lows.min()?;
        let padding = max_value.unsigned_abs().max(min_value.unsigned_abs()) as f64 * 0.1;
        Some(AxisBounds {
            min: (min_value as f64 - padding).floor() as i64,
            max: (max_value as f64 + padding).ceil() as i64,
        })
    }

    pub fn chart<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> ChartSeries {
        let points = Self::daily_series(transactions);
        let axis = Self::axis_bounds(&points);
        ChartSeries { points, axis }
    }

    fn sums<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> (i64, i64) {
        transactions
            .into_iter()
            .fold((0, 0), |(income, expense), txn| {
                if txn.is_income() {
                    (income.saturating_add(txn.amount()), expense)
                } else if txn.is_expense() {
                    (income, expense.saturating_add(txn.amount().saturating_abs()))
                } else {
                    (income, expense)
                }
            })
    }
}
