//! Shell context, dispatch, and CLI error types.

use std::io;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    core::{
        ledger_manager::LedgerManager,
        services::{ReportService, ServiceError},
    },
    errors::LedgerError,
    storage::JsonFileStore,
};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::io as cli_io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures that end the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Command failed: {0}")]
    Command(String),
}

/// Failures of a single command; reported and then the shell carries on.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(err) => CommandError::Ledger(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger_manager: LedgerManager,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub reports: ReportService,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let store = JsonFileStore::new(config_manager.data_dir())?;
        let ledger_manager = LedgerManager::open(Box::new(store), config.storage_key.clone())?;
        tracing::info!(
            transactions = ledger_manager.ledger().len(),
            path = %config_manager.path().display(),
            "shell started"
        );

        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            ledger_manager,
            reports: ReportService::new(config.number_format()),
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        format!("kakeibo({})> ", self.ledger_manager.ledger().len())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|definition| definition.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    /// Asks before a destructive step. Script mode never prompts.
    pub(crate) fn confirm(&self, prompt: &str, preapproved: bool) -> Result<bool, CommandError> {
        if preapproved {
            return Ok(true);
        }
        match self.mode {
            CliMode::Script => Err(CommandError::InvalidArguments(
                "confirmation required; pass --yes in script mode".into(),
            )),
            CliMode::Interactive => cli_io::confirm_action(&self.theme, prompt, false),
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_info("Use `help <command>` for usage details.");
            }
            CommandError::Ledger(err) => {
                cli_io::print_error(err.user_message());
                if matches!(err, LedgerError::Persistence(_)) {
                    cli_io::print_warning("The change is kept in memory but was not saved.");
                }
            }
            other => cli_io::print_error(other),
        }
        Ok(())
    }
}

/// Splits `--flag value` pairs off an argument list.
pub(crate) fn take_flag<'a>(
    args: &mut Vec<&'a str>,
    flag: &str,
) -> Result<Option<&'a str>, CommandError> {
    let Some(index) = args.iter().position(|arg| *arg == flag) else {
        return Ok(None);
    };
    if index + 1 >= args.len() {
        return Err(CommandError::InvalidArguments(format!("{flag} needs a value")));
    }
    let value = args.remove(index + 1);
    args.remove(index);
    Ok(Some(value))
}

/// Removes a bare switch such as `--yes`, reporting whether it was present.
pub(crate) fn take_switch(args: &mut Vec<&str>, switch: &str) -> bool {
    let before = args.len();
    args.retain(|arg| *arg != switch);
    args.len() != before
}

#[cfg(test)]
pub(crate) fn script_context(base: &std::path::Path) -> ShellContext {
    let manager = ConfigManager::with_base_dir(base.to_path_buf()).expect("config manager");
    ShellContext::with_config_manager(CliMode::Script, manager).expect("shell context")
}
