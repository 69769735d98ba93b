pub mod commands;
pub mod core;
pub mod help;
pub mod io;
pub mod output;
pub mod shell;

pub use core::{CliError, CliMode, CommandError, ShellContext};
pub use shell::run_cli;
