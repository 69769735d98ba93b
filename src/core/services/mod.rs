pub mod report_service;
pub mod summary_service;
pub mod transaction_service;

pub use report_service::ReportService;
pub use summary_service::{
    AxisBounds, ChartSeries, DailyPoint, MonthBlock, Overview, PeriodTotals, SummaryService,
    YearBreakdown,
};
pub use transaction_service::TransactionService;

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}
