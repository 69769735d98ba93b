use crate::cli::commands::{require_args, CommandDefinition};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::core::services::ReportService;

const CONFIG_USAGE: &str = "config | config set <key> <value>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "Show or change settings",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().copied() {
        None => {
            show_config(context);
            Ok(())
        }
        Some("set") => {
            require_args(&args[1..], 2, CONFIG_USAGE)?;
            let mut updated = context.config.clone();
            updated
                .set(args[1], &args[2..].join(" "))
                .map_err(CommandError::InvalidArguments)?;
            context.config_manager.save(&updated)?;
            context.reports = ReportService::new(updated.number_format());
            context.config = updated;
            io::print_success(format!("Setting `{}` saved.", args[1]));
            if args[1] == "storage_key" {
                io::print_info("The new storage key is used from the next start.");
            }
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}`; usage: {CONFIG_USAGE}"
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output_section("Settings");
    io::print_info(format!("  currency           : {}", config.currency));
    io::print_info(format!(
        "  grouping_separator : {}",
        config
            .grouping_separator
            .map(String::from)
            .unwrap_or_else(|| "none".into())
    ));
    io::print_info(format!("  storage_key        : {}", config.storage_key));
    io::print_info(format!(
        "  report_dir         : {}",
        config.output_dir().display()
    ));
    io::print_info(format!(
        "  file               : {}",
        context.config_manager.path().display()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::script_context;
    use crate::ledger::NewTransaction;
    use tempfile::TempDir;

    #[test]
    fn set_saves_and_reformats_reports() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(temp.path());
        context
            .ledger_manager
            .add(NewTransaction::income("2024-01-20", "Salary", 12_000))
            .unwrap();

        cmd_config(&mut context, &["set", "grouping_separator", "none"]).unwrap();
        let txn = &context.ledger_manager.ledger().transactions()[0];
        assert!(context.reports.detail_line(txn).contains("+¥12000"));
        assert_eq!(context.config_manager.load().unwrap().grouping_separator, None);

        cmd_config(&mut context, &[]).unwrap();
    }

    #[test]
    fn bad_settings_leave_config_untouched() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(temp.path());
        let before = context.config.clone();
        assert!(cmd_config(&mut context, &["set", "theme", "dark"]).is_err());
        assert!(cmd_config(&mut context, &["set", "currency"]).is_err());
        assert!(cmd_config(&mut context, &["reset"]).is_err());
        assert_eq!(context.config, before);
        assert!(!context.config_manager.path().exists());
    }
}
