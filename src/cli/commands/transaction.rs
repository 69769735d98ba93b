use std::{fs, path::Path};

use crate::cli::commands::{require_args, CommandDefinition};
use crate::cli::core::{take_flag, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::core::services::TransactionService;
use crate::ledger::{
    NewTransaction, Period, Transaction, TransactionId, TransactionKind, TransactionPatch,
};

const ADD_USAGE: &str = "add <YYYY-MM-DD> <income|expense> <amount> [store...]";
const EDIT_USAGE: &str =
    "edit <id> [--date YYYY-MM-DD] [--store NAME] [--amount N] [--type income|expense]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandDefinition::new("edit", "Change fields of a transaction", EDIT_USAGE, cmd_edit),
        CommandDefinition::new("delete", "Remove a transaction", "delete <id>", cmd_delete),
        CommandDefinition::new(
            "list",
            "List transactions by date",
            "list [YYYY-MM|YYYY]",
            cmd_list,
        ),
        CommandDefinition::new(
            "ingest",
            "Add transactions from a JSON array file",
            "ingest <file>",
            cmd_ingest,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 3, ADD_USAGE)?;
    let candidate = NewTransaction::new(
        args[0],
        args[3..].join(" "),
        parse_amount(args[2])?,
        parse_kind(args[1])?,
    );
    TransactionService::validate(&candidate)?;

    let id = context.ledger_manager.add(candidate)?;
    let stored = context.ledger_manager.ledger().transaction(&id);
    if let Some(txn) = stored {
        io::print_success(format!(
            "Transaction added: {id} {}",
            context.reports.detail_line(txn)
        ));
    }
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, EDIT_USAGE)?;
    let mut rest: Vec<&str> = args[1..].to_vec();
    let id = TransactionId::from(args[0]);
    let mut patch = TransactionPatch {
        date: take_flag(&mut rest, "--date")?.map(str::to_string),
        store: take_flag(&mut rest, "--store")?.map(str::to_string),
        amount: take_flag(&mut rest, "--amount")?.map(parse_amount).transpose()?,
        kind: take_flag(&mut rest, "--type")?.map(parse_kind).transpose()?,
    };
    if let Some(extra) = rest.first() {
        return Err(CommandError::InvalidArguments(format!(
            "unexpected argument `{extra}`; usage: {EDIT_USAGE}"
        )));
    }
    // --amount is a magnitude, like the add command; the type decides the sign.
    if let Some(amount) = patch.amount {
        if amount < 0 {
            return Err(CommandError::InvalidArguments(format!(
                "amount must not be negative, got {amount}; use --type to change direction"
            )));
        }
        if patch.kind.is_none() {
            patch.kind = context.ledger_manager.ledger().transaction(&id).map(Transaction::kind);
        }
    }
    TransactionService::validate_patch(&patch)?;

    if context.ledger_manager.edit(&id, patch)? {
        io::print_success(format!("Transaction updated: {id}"));
    } else {
        io::print_warning(format!("No transaction with id `{id}`."));
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "delete <id>")?;
    let id = TransactionId::from(args[0]);
    if context.ledger_manager.delete(&id)? {
        io::print_success(format!("Transaction deleted: {id}"));
    } else {
        io::print_warning(format!("No transaction with id `{id}`."));
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let ledger = context.ledger_manager.ledger();
    let (title, selected): (String, Vec<&Transaction>) = match args.first() {
        Some(label) => {
            let period = Period::parse(label).map_err(CommandError::InvalidArguments)?;
            (
                format!("Transactions {period}"),
                period.filter(ledger.transactions()),
            )
        }
        None => ("Transactions".into(), ledger.transactions().iter().collect()),
    };

    output_section(title);
    if selected.is_empty() {
        io::print_info("No transactions.");
        return Ok(());
    }
    for txn in TransactionService::sorted_by_date(selected) {
        println!("{}\t{}", txn.id(), context.reports.detail_line(txn));
    }
    Ok(())
}

fn cmd_ingest(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "ingest <file>")?;
    let candidates = read_candidates(Path::new(args[0]))?;
    for candidate in &candidates {
        TransactionService::validate_candidate(candidate)?;
    }
    let ids = context.ledger_manager.add_many(candidates)?;
    io::print_success(format!("Ingested {} transactions.", ids.len()));
    Ok(())
}

/// Parses a JSON array of `{date, store, amount, type}` objects.
fn read_candidates(path: &Path) -> Result<Vec<NewTransaction>, CommandError> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|err| {
        CommandError::InvalidArguments(format!("{}: {err}", path.display()))
    })
}

fn parse_amount(value: &str) -> Result<i64, CommandError> {
    value
        .replace(',', "")
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{value}` is not a whole amount")))
}

fn parse_kind(value: &str) -> Result<TransactionKind, CommandError> {
    value.parse().map_err(CommandError::InvalidArguments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::script_context;
    use tempfile::TempDir;

    #[test]
    fn add_rejects_bad_input_without_touching_ledger() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(temp.path());
        assert!(cmd_add(&mut context, &["2024-13-01", "expense", "100"]).is_err());
        assert!(cmd_add(&mut context, &["2024-01-01", "gift", "100"]).is_err());
        assert!(cmd_add(&mut context, &["2024-01-01", "expense", "-100"]).is_err());
        assert!(cmd_add(&mut context, &["2024-01-01", "expense"]).is_err());
        assert!(context.ledger_manager.ledger().is_empty());
    }

    #[test]
    fn add_joins_store_words_and_rounds() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(temp.path());
        cmd_add(&mut context, &["2024-01-05", "expense", "1,250", "Corner", "Cafe"]).unwrap();
        let txn = &context.ledger_manager.ledger().transactions()[0];
        assert_eq!(txn.store(), "Corner Cafe");
        assert_eq!(txn.amount(), -1_300);
    }

    #[test]
    fn edit_applies_flags() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(temp.path());
        cmd_add(&mut context, &["2024-01-05", "expense", "300", "Cafe"]).unwrap();
        let id = context.ledger_manager.ledger().transactions()[0].id().to_string();
        let id = id.as_str();

        cmd_edit(&mut context, &[id, "--type", "income", "--store", "Refund"]).unwrap();
        let txn = &context.ledger_manager.ledger().transactions()[0];
        assert_eq!(txn.amount(), 300);
        assert_eq!(txn.store(), "Refund");

        assert!(cmd_edit(&mut context, &[id]).is_err());
        assert!(cmd_edit(&mut context, &[id, "--bogus"]).is_err());
        let txn = &context.ledger_manager.ledger().transactions()[0];
        assert_eq!(txn.id().as_str(), id);
    }

    #[test]
    fn edit_amount_keeps_stored_direction() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(temp.path());
        cmd_add(&mut context, &["2024-01-05", "expense", "300", "Cafe"]).unwrap();
        let id = context.ledger_manager.ledger().transactions()[0].id().to_string();
        let id = id.as_str();

        cmd_edit(&mut context, &[id, "--amount", "500"]).unwrap();
        let txn = &context.ledger_manager.ledger().transactions()[0];
        assert_eq!(txn.amount(), -500);
        assert_eq!(txn.kind(), TransactionKind::Expense);

        assert!(cmd_edit(&mut context, &[id, "--amount", "-700"]).is_err());
        assert_eq!(context.ledger_manager.ledger().transactions()[0].amount(), -500);

        cmd_edit(&mut context, &[id, "--amount", "1,250", "--type", "income"]).unwrap();
        assert_eq!(context.ledger_manager.ledger().transactions()[0].amount(), 1_200);
    }

    #[test]
    fn add_rejects_amounts_beyond_the_limit() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(temp.path());
        let huge = ["2024-01-05", "expense", "9223372036854775807", "Big"];
        assert!(cmd_add(&mut context, &huge).is_err());
        assert!(cmd_add(&mut context, &["2024-01-05", "income", "1000000000000000001"]).is_err());
        assert!(context.ledger_manager.ledger().is_empty());
    }

    #[test]
    fn ingest_accepts_pre_signed_amounts() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(temp.path());
        let file = temp.path().join("signed.json");
        fs::write(
            &file,
            r#"[{"date":"2024-01-05","store":"Cafe","amount":-250,"type":"expense"},
                {"date":"2024-01-25","store":"Pay","amount":-1050,"type":"income"}]"#,
        )
        .unwrap();
        cmd_ingest(&mut context, &[file.to_str().unwrap()]).unwrap();
        let amounts: Vec<i64> = context
            .ledger_manager
            .ledger()
            .transactions()
            .iter()
            .map(Transaction::amount)
            .collect();
        assert_eq!(amounts, vec![-300, 1_000]);
    }

    #[test]
    fn ingest_is_all_or_nothing() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(temp.path());
        let file = temp.path().join("batch.json");
        fs::write(
            &file,
            r#"[{"date":"2024-01-05","store":"Cafe","amount":250,"type":"expense"},
                {"date":"bad","amount":100,"type":"income"}]"#,
        )
        .unwrap();
        assert!(cmd_ingest(&mut context, &[file.to_str().unwrap()]).is_err());
        assert!(context.ledger_manager.ledger().is_empty());

        fs::write(
            &file,
            r#"[{"date":"2024-01-05","store":"Cafe","amount":250,"type":"expense"},
                {"date":"2024-01-20","amount":1050,"type":"income"}]"#,
        )
        .unwrap();
        cmd_ingest(&mut context, &[file.to_str().unwrap()]).unwrap();
        assert_eq!(context.ledger_manager.ledger().len(), 2);
    }
}
