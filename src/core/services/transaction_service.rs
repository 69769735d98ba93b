//! Input checks and ordering helpers for ledger transactions.

use chrono::NaiveDate;

use crate::core::services::{ServiceError, ServiceResult};
use crate::ledger::{within_limit, NewTransaction, Transaction, TransactionPatch, MAX_AMOUNT};

/// Form-level checks the UI performs before handing data to the ledger.
pub struct TransactionService;

impl TransactionService {
    /// Requires an ISO calendar date and a non-negative entered magnitude.
    pub fn validate(candidate: &NewTransaction) -> ServiceResult<()> {
        Self::validate_candidate(candidate)?;
        if candidate.amount < 0 {
            return Err(ServiceError::Invalid(format!(
                "amount must not be negative, got {}",
                candidate.amount
            )));
        }
        Ok(())
    }

    /// Checks for import producers, whose amounts may already carry a sign.
    ///
    /// The kind decides the stored sign either way.
    pub fn validate_candidate(candidate: &NewTransaction) -> ServiceResult<()> {
        Self::validate_date(&candidate.date)?;
        Self::validate_amount(candidate.amount)
    }

    pub fn validate_patch(patch: &TransactionPatch) -> ServiceResult<()> {
        if patch.is_empty() {
            return Err(ServiceError::Invalid("nothing to change".into()));
        }
        if let Some(date) = patch.date.as_deref() {
            Self::validate_date(date)?;
        }
        if let Some(amount) = patch.amount {
            Self::validate_amount(amount)?;
        }
        Ok(())
    }

    pub fn validate_amount(amount: i64) -> ServiceResult<()> {
        if within_limit(amount) {
            Ok(())
        } else {
            Err(ServiceError::Invalid(format!(
                "amount {amount} is outside ±{MAX_AMOUNT}"
            )))
        }
    }

    pub fn validate_date(date: &str) -> ServiceResult<NaiveDate> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .filter(|_| date.len() == 10)
            .ok_or_else(|| ServiceError::Invalid(format!("`{date}` is not a YYYY-MM-DD date")))
    }

    /// Ascending by date string; equal dates keep their relative order.
    pub fn sorted_by_date<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> Vec<&'a Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.into_iter().collect();
        sorted.sort_by(|a, b| a.date().cmp(b.date()));
        sorted
    }
}
