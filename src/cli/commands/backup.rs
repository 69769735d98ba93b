use std::path::Path;

use crate::cli::commands::{require_args, CommandDefinition};
use crate::cli::core::{take_switch, CommandResult, ShellContext};
use crate::cli::io;
use crate::storage::backup::{read_backup_file, write_backup_file};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "backup",
            "Export all transactions to a backup file",
            "backup",
            cmd_backup,
        ),
        CommandDefinition::new(
            "restore",
            "Replace all transactions with a backup file",
            "restore <file> [--yes]",
            cmd_restore,
        ),
    ]
}

fn cmd_backup(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let document = context.ledger_manager.export_backup();
    let path = write_backup_file(&document, &context.config.output_dir())?;
    tracing::info!(path = %path.display(), "backup written");
    io::print_success(format!(
        "Backup saved to {} ({} transactions)",
        path.display(),
        document.transactions.len()
    ));
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut args = args.to_vec();
    let preapproved = take_switch(&mut args, "--yes");
    require_args(&args, 1, "restore <file> [--yes]")?;

    // rejected files never reach the confirmation prompt
    let transactions = read_backup_file(Path::new(args[0]))?;
    let count = transactions.len();

    let prompt = format!(
        "Replace all {} transactions with {count} from the backup?",
        context.ledger_manager.ledger().len()
    );
    if !context.confirm(&prompt, preapproved)? {
        io::print_info("Restore cancelled.");
        return Ok(());
    }

    context.ledger_manager.replace_all(transactions)?;
    io::print_success(format!("Restored {count} transactions."));
    Ok(())
}
