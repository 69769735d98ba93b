use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        ledger_manager::DEFAULT_STORAGE_KEY,
        utils::{ensure_dir, PathResolver},
    },
    currency::{CurrencyCode, NumberFormat},
    errors::LedgerError,
    storage::json_backend::write_text_file,
};

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: [&str; 4] = ["currency", "grouping_separator", "storage_key", "report_dir"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency: String,
    pub grouping_separator: Option<char>,
    pub storage_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "JPY".into(),
            grouping_separator: Some(','),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            report_dir: None,
        }
    }
}

impl Config {
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::new(&CurrencyCode::new(self.currency.clone()), self.grouping_separator)
    }

    /// Directory for report and backup files; the working directory when unset.
    pub fn output_dir(&self) -> PathBuf {
        self.report_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Updates one setting from its textual form. `none` clears optional values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = value.trim();
        match key {
            "currency" => {
                if value.is_empty() {
                    return Err("currency must not be empty".into());
                }
                self.currency = value.to_uppercase();
            }
            "grouping_separator" => {
                let mut chars = value.chars();
                self.grouping_separator = match (chars.next(), chars.next()) {
                    _ if value.eq_ignore_ascii_case("none") => None,
                    (Some(separator), None) => Some(separator),
                    _ => return Err(format!("`{value}` is not a single character or `none`")),
                };
            }
            "storage_key" => {
                if value.is_empty() {
                    return Err("storage_key must not be empty".into());
                }
                self.storage_key = value.to_string();
            }
            "report_dir" => {
                self.report_dir = if value.eq_ignore_ascii_case("none") || value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => {
                return Err(format!(
                    "unknown setting `{other}`; expected one of {}",
                    CONFIG_KEYS.join(", ")
                ))
            }
        }
        Ok(())
    }
}

/// Loads and saves `config/config.json` under the application directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_text_file(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the key-value store files.
    pub fn data_dir(&self) -> PathBuf {
        PathResolver::data_dir_in(&self.base)
    }
}
