mod common;

use common::{reopen, sample_entries, setup_file_ledger, temp_base};
use kakeibo_core::{
    errors::{LedgerError, INVALID_BACKUP_MESSAGE, UNREADABLE_BACKUP_MESSAGE},
    storage::backup::{read_backup_file, write_backup_file},
    storage::BACKUP_VERSION,
};
use regex::Regex;
use std::fs;

#[test]
fn backup_file_restores_identical_ledger() {
    let (mut source, _) = setup_file_ledger();
    source.add_many(sample_entries()).unwrap();

    let dir = temp_base();
    let path = write_backup_file(&source.export_backup(), &dir).unwrap();
    let name = path.file_name().unwrap().to_str().unwrap();
    let pattern = Regex::new(r"^finance-backup-\d{8}-\d{6}\.json$").unwrap();
    assert!(pattern.is_match(name), "{name}");

    let text = fs::read_to_string(&path).unwrap();
    let document: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(document["version"], BACKUP_VERSION);
    assert!(document["timestamp"].as_str().unwrap().ends_with('Z'));

    let (mut target, target_base) = setup_file_ledger();
    let restored = target.restore_backup(&text).unwrap();
    assert_eq!(restored, 3);
    assert_eq!(target.load_all(), source.load_all());
    assert_eq!(reopen(&target_base).load_all(), source.load_all());
}

#[test]
fn restore_overwrites_instead_of_merging() {
    let (mut manager, _) = setup_file_ledger();
    manager.add_many(sample_entries()).unwrap();

    let backup = r#"{"version":"0.9","timestamp":"x","transactions":[
        {"id":"a","date":"2023-05-01","store":"Market","amount":-250,"type":"expense"}
    ]}"#;
    manager.restore_backup(backup).unwrap();

    let transactions = manager.load_all();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].id().as_str(), "a");
    assert_eq!(transactions[0].amount(), -250);
}

#[test]
fn empty_transaction_list_clears_ledger() {
    let (mut manager, _) = setup_file_ledger();
    manager.add_many(sample_entries()).unwrap();
    assert_eq!(manager.restore_backup(r#"{"transactions":[]}"#).unwrap(), 0);
    assert!(manager.ledger().is_empty());
}

#[test]
fn broken_files_map_to_user_messages() {
    let dir = temp_base();
    let missing = read_backup_file(&dir.join("absent.json")).unwrap_err();
    assert!(matches!(missing, LedgerError::UnreadableBackup(_)));
    assert_eq!(missing.user_message(), UNREADABLE_BACKUP_MESSAGE);

    let no_array = dir.join("no-array.json");
    fs::write(&no_array, r#"{"version":"1.0","transactions":{}}"#).unwrap();
    let invalid = read_backup_file(&no_array).unwrap_err();
    assert!(matches!(invalid, LedgerError::InvalidBackup(_)));
    assert_eq!(invalid.user_message(), INVALID_BACKUP_MESSAGE);

    let mistyped = dir.join("mistyped.json");
    fs::write(&mistyped, r#"{"transactions":[{"amount":"abc"}]}"#).unwrap();
    assert!(matches!(
        read_backup_file(&mistyped).unwrap_err(),
        LedgerError::InvalidBackup(_)
    ));

    let garbage = dir.join("garbage.json");
    fs::write(&garbage, "not json").unwrap();
    assert!(matches!(
        read_backup_file(&garbage).unwrap_err(),
        LedgerError::UnreadableBackup(_)
    ));
}
