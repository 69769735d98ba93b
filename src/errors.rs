use thiserror::Error;

/// Message shown when a backup lacks a `transactions` array.
pub const INVALID_BACKUP_MESSAGE: &str = "無効なバックアップファイルです";
/// Message shown when a backup cannot be read or parsed.
pub const UNREADABLE_BACKUP_MESSAGE: &str = "バックアップファイルの読み込みに失敗しました";

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid backup: {0}")]
    InvalidBackup(String),
    #[error("Unreadable backup: {0}")]
    UnreadableBackup(String),
    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl LedgerError {
    /// Text suitable for showing to the user as-is.
    pub fn user_message(&self) -> String {
        match self {
            LedgerError::InvalidBackup(_) => INVALID_BACKUP_MESSAGE.to_string(),
            LedgerError::UnreadableBackup(_) => UNREADABLE_BACKUP_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Persistence failures leave the in-memory ledger authoritative and may be retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LedgerError::Persistence(_) | LedgerError::Io(_))
    }
}
