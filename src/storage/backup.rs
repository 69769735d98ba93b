//! Versioned backup documents for whole-ledger export and restore.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    core::utils::ensure_dir,
    errors::LedgerError,
    ledger::{Ledger, Transaction},
};

use super::{json_backend::write_text_file, Result};

/// Format version written into every backup. Carried but not checked on import.
pub const BACKUP_VERSION: &str = "1.0";
const BACKUP_FILE_TIMESTAMP: &str = "%Y%m%d-%H%M%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub version: String,
    pub timestamp: String,
    pub transactions: Vec<Transaction>,
}

impl BackupDocument {
    /// Snapshots the full, unfiltered ledger.
    pub fn export(ledger: &Ledger) -> Self {
        Self::export_at(ledger, Utc::now())
    }

    pub fn export_at(ledger: &Ledger, at: DateTime<Utc>) -> Self {
        Self {
            version: BACKUP_VERSION.to_string(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            transactions: ledger.transactions().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses backup text into the transactions it carries.
    ///
    /// Only the presence of a `transactions` array is validated; records are
    /// decoded leniently and amounts are kept exactly as stored.
    pub fn import(text: &str) -> Result<Vec<Transaction>> {
        let document: Value = serde_json::from_str(text)
            .map_err(|err| LedgerError::UnreadableBackup(err.to_string()))?;
        let records = document
            .get("transactions")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                LedgerError::InvalidBackup("missing `transactions` array".to_string())
            })?;

        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                if !record.is_object() {
                    return Err(LedgerError::InvalidBackup(format!(
                        "transaction #{index} is not an object"
                    )));
                }
                serde_json::from_value(record.clone()).map_err(|err| {
                    LedgerError::InvalidBackup(format!("transaction #{index}: {err}"))
                })
            })
            .collect()
    }
}

/// `finance-backup-YYYYMMDD-HHMMSS.json` in local time.
pub fn backup_file_name(at: DateTime<Local>) -> String {
    format!("finance-backup-{}.json", at.format(BACKUP_FILE_TIMESTAMP))
}

/// Writes `document` into `dir` under a timestamped name and returns the path.
pub fn write_backup_file(document: &BackupDocument, dir: &Path) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(backup_file_name(Local::now()));
    write_text_file(&path, &document.to_json()?)?;
    Ok(path)
}

/// Reads and validates a backup file. Read failures count as unreadable backups.
pub fn read_backup_file(path: &Path) -> Result<Vec<Transaction>> {
    let text = fs::read_to_string(path)
        .map_err(|err| LedgerError::UnreadableBackup(format!("{}: {err}", path.display())))?;
    BackupDocument::import(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::NewTransaction;
    use chrono::TimeZone;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add(NewTransaction::expense("2024-01-05", "Cafe", 250));
        ledger.add(NewTransaction::income("2024-01-20", "", 1_050));
        ledger
    }

    #[test]
    fn export_carries_fixed_version_and_all_transactions() {
        let ledger = sample_ledger();
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap();
        let document = BackupDocument::export_at(&ledger, at);
        assert_eq!(document.version, "1.0");
        assert_eq!(document.timestamp, "2024-02-01T09:30:00.000Z");
        assert_eq!(document.transactions.len(), 2);
    }

    #[test]
    fn export_json_is_indented() {
        let json = BackupDocument::export(&sample_ledger()).to_json().unwrap();
        assert!(json.starts_with("{\n  \"version\": \"1.0\""));
        assert!(json.contains("\"type\": \"expense\""));
    }

    #[test]
    fn import_restores_exported_transactions() {
        let ledger = sample_ledger();
        let json = BackupDocument::export(&ledger).to_json().unwrap();
        let restored = BackupDocument::import(&json).unwrap();
        assert_eq!(restored, ledger.transactions());
    }

    #[test]
    fn import_rejects_missing_or_non_array_transactions() {
        for text in [r#"{"version":"1.0"}"#, r#"{"transactions":{}}"#, "[]"] {
            let err = BackupDocument::import(text).expect_err("invalid backup");
            assert!(matches!(err, LedgerError::InvalidBackup(_)), "{text}: {err:?}");
        }
    }

    #[test]
    fn import_reports_unparseable_text() {
        let err = BackupDocument::import("not json").expect_err("unparseable");
        assert!(matches!(err, LedgerError::UnreadableBackup(_)));
        assert_eq!(err.user_message(), "バックアップファイルの読み込みに失敗しました");
    }

    #[test]
    fn import_keeps_amounts_and_ignores_version() {
        let text = r#"{"version":"9.9","transactions":[
            {"id":"x1","date":"2024-05-01","store":"Shop","amount":-250,"type":"expense"}
        ]}"#;
        let restored = BackupDocument::import(text).unwrap();
        assert_eq!(restored[0].amount(), -250);
        assert_eq!(restored[0].id().as_str(), "x1");
    }

    #[test]
    fn import_fills_missing_fields_with_defaults() {
        let restored = BackupDocument::import(r#"{"transactions":[{"amount":500}]}"#).unwrap();
        assert_eq!(restored[0].date(), "");
        assert_eq!(restored[0].store(), "");
        assert!(!restored[0].id().as_str().is_empty());
    }

    #[test]
    fn import_treats_null_fields_as_missing() {
        let text = r#"{"transactions":[
            {"id":"n1","date":"2024-05-01","store":null,"amount":null,"type":"expense"}
        ]}"#;
        let restored = BackupDocument::import(text).unwrap();
        assert_eq!(restored[0].amount(), 0);
        assert_eq!(restored[0].store(), "");
        assert_eq!(restored[0].id().as_str(), "n1");
    }

    #[test]
    fn backup_file_name_embeds_local_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(backup_file_name(at), "finance-backup-20240304-050607.json");
    }
}
