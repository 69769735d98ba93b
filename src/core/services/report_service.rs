//! Plain-text monthly and yearly reports.

use std::path::{Path, PathBuf};

use crate::{
    core::{services::summary_service::PeriodTotals, utils::ensure_dir},
    currency::{NumberFormat, Sign},
    errors::LedgerError,
    ledger::{by_month, normalize, Ledger, Transaction},
    storage::json_backend::write_text_file,
};

use super::{SummaryService, TransactionService};

/// Renders deterministic report text from ledger data.
#[derive(Debug, Clone, Default)]
pub struct ReportService {
    format: NumberFormat,
}

impl ReportService {
    pub fn new(format: NumberFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &NumberFormat {
        &self.format
    }

    pub fn monthly(&self, ledger: &Ledger, year_month: &str) -> String {
        let transactions = by_month(ledger.transactions(), year_month);
        let totals = SummaryService::totals(transactions.iter().copied());

        let mut lines = vec![
            format!("=== {year_month} 収支レポート ==="),
            format!("総収入: {}", self.income(totals.income)),
            format!("総支出: {}", self.expense(totals.expense)),
            format!("残高: {}", self.format.balance(totals.balance)),
            "\n=== 取引詳細 ===".to_string(),
        ];
        lines.extend(self.detail_lines(transactions));
        lines.join("\n")
    }

    /// Year totals first, then one block per non-empty month.
    pub fn yearly(&self, ledger: &Ledger, year: &str) -> String {
        let breakdown = SummaryService::year_breakdown(ledger, year);
        let PeriodTotals {
            income,
            expense,
            balance,
        } = breakdown.totals;

        let mut lines = vec![
            format!("年間総収入: {}", self.income(income)),
            format!("年間総支出: {}", self.expense(expense)),
            format!("年間残高: {}", self.format.balance(balance)),
            String::new(),
            format!("=== {year}年 年間収支レポート ===\n"),
        ];

        for month in breakdown.months {
            lines.push(format!("=== {} ===", month.label));
            lines.push(format!("総収入: {}", self.income(month.totals.income)));
            lines.push(format!("総支出: {}", self.expense(month.totals.expense)));
            lines.push(format!("残高: {}\n", self.format.balance(month.totals.balance)));
            lines.push("取引詳細:".to_string());
            lines.extend(self.detail_lines(month.transactions));
            lines.push(String::new());
        }

        lines.join("\n")
    }

    /// `date<TAB>±¥amount<TAB>store`, with the magnitude floored again.
    pub fn detail_line(&self, txn: &Transaction) -> String {
        let magnitude = normalize(txn.amount().saturating_abs());
        format!(
            "{}\t{}\t{}",
            txn.date(),
            self.format.signed_money(Sign::of(txn.amount()), magnitude),
            txn.store()
        )
    }

    /// Chart tooltip text, e.g. `収入: +¥1,000`.
    pub fn tooltip_label(&self, label: &str, value: i64) -> String {
        format!("{label}: {}", self.format.balance(value))
    }

    pub fn monthly_file_name(year_month: &str) -> String {
        format!("finance-report-{year_month}.txt")
    }

    pub fn yearly_file_name(year: &str) -> String {
        format!("yearly-finance-report-{year}.txt")
    }

    /// Writes UTF-8 report text into `dir` and returns the file path.
    pub fn write_report(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, LedgerError> {
        ensure_dir(dir)?;
        let path = dir.join(file_name);
        write_text_file(&path, contents)?;
        tracing::info!(path = %path.display(), "report written");
        Ok(path)
    }

    fn detail_lines<'a>(&self, transactions: impl IntoIterator<Item = &'a Transaction>) -> Vec<String> {
        TransactionService::sorted_by_date(transactions)
            .into_iter()
            .map(|txn| self.detail_line(txn))
            .collect()
    }

    fn income(&self, value: i64) -> String {
        self.format.signed_money(Sign::Plus, value)
    }

    fn expense(&self, value: i64) -> String {
        self.format.signed_money(Sign::Minus, value)
    }
}
