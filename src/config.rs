//! Intake configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::policy::{DEFAULT_MAX_BYTES, SPREADSHEET_EXTENSIONS, normalize_extension};

pub const DEFAULT_RESET_SIGNAL: &str = "excel-uploaded";

const MAX_BYTES_VAR: &str = "INTAKE_MAX_BYTES";
const EXTENSIONS_VAR: &str = "INTAKE_ALLOWED_EXTENSIONS";
const RESET_SIGNAL_VAR: &str = "INTAKE_RESET_SIGNAL";
const THEME_FILE_VAR: &str = "INTAKE_THEME_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    pub max_bytes: u64,
    /// Lowercased, dot-prefixed extensions.
    pub allowed_extensions: Vec<String>,
    pub reset_signal: String,
    /// Where the theme preference is persisted, if anywhere.
    pub theme_file: Option<PathBuf>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            allowed_extensions: SPREADSHEET_EXTENSIONS.iter().map(|ext| (*ext).to_owned()).collect(),
            reset_signal: DEFAULT_RESET_SIGNAL.to_owned(),
            theme_file: None,
        }
    }
}

impl IntakeConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `INTAKE_MAX_BYTES`: default 5 MiB
    /// - `INTAKE_ALLOWED_EXTENSIONS`: comma list, default `.xls,.xlsx`
    /// - `INTAKE_RESET_SIGNAL`: default `excel-uploaded`
    /// - `INTAKE_THEME_FILE`: theme preference file, unset by default
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a non-numeric size or an extension list
    /// with no usable entries.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_bytes = match lookup(MAX_BYTES_VAR) {
            Some(raw) => parse_u64(MAX_BYTES_VAR, &raw)?,
            None => defaults.max_bytes,
        };
        let allowed_extensions = match lookup(EXTENSIONS_VAR) {
            Some(raw) => parse_extensions(EXTENSIONS_VAR, &raw)?,
            None => defaults.allowed_extensions,
        };
        let reset_signal = lookup(RESET_SIGNAL_VAR)
            .map(|raw| raw.trim().to_owned())
            .filter(|signal| !signal.is_empty())
            .unwrap_or(defaults.reset_signal);
        let theme_file = lookup(THEME_FILE_VAR).filter(|raw| !raw.trim().is_empty()).map(PathBuf::from);

        Ok(Self { max_bytes, allowed_extensions, reset_signal, theme_file })
    }
}

fn parse_u64(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidNumber { var, value: raw.to_owned() })
}

fn parse_extensions(var: &'static str, raw: &str) -> Result<Vec<String>, ConfigError> {
    let extensions: Vec<String> = raw.split(',').filter_map(normalize_extension).collect();
    if extensions.is_empty() {
        return Err(ConfigError::EmptyExtensions { var });
    }
    Ok(extensions)
}
