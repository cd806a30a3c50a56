//! Error types for intake validation, configuration, and theme persistence.

use crate::size::format_size;

/// A user-input validation failure, rendered inline next to the drop zone.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    /// The file name does not end in one of the allowed extensions.
    #[error("Please select a supported file ({})", join_extensions(.allowed))]
    UnsupportedFormat {
        /// Extension of the rejected file, if it had one.
        found: Option<String>,
        /// Allowed extensions, lowercased with a leading dot.
        allowed: Vec<String>,
    },
    /// The file is larger than the configured maximum.
    #[error("File exceeds {} limit (your file: {})", human(.limit), human(.actual))]
    SizeExceeded { limit: u64, actual: u64 },
}

/// Invalid environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must list at least one extension")]
    EmptyExtensions { var: &'static str },
}

/// Failure reading or writing the persisted theme preference.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("theme preference I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("theme preference file is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("global theme store is already installed")]
    AlreadyInstalled,
    #[error("global theme store has not been installed")]
    NotInstalled,
    #[error("global theme store is already borrowed")]
    Busy,
}

fn human(bytes: &u64) -> String {
    format_size(*bytes)
}

/// `[".xls", ".xlsx"] -> ".xls or .xlsx"`, `[a, b, c] -> "a, b or c"`.
fn join_extensions(allowed: &[String]) -> String {
    match allowed.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_lists_extensions() {
        let err = IntakeError::UnsupportedFormat {
            found: Some(".pdf".to_owned()),
            allowed: vec![".xls".to_owned(), ".xlsx".to_owned()],
        };
        assert_eq!(err.to_string(), "Please select a supported file (.xls or .xlsx)");
    }

    #[test]
    fn size_exceeded_embeds_human_sizes() {
        let err = IntakeError::SizeExceeded { limit: 5 * 1024 * 1024, actual: 6 * 1024 * 1024 };
        assert_eq!(err.to_string(), "File exceeds 5 MB limit (your file: 6 MB)");
    }

    #[test]
    fn join_extensions_handles_lengths() {
        assert_eq!(join_extensions(&[]), "");
        assert_eq!(join_extensions(&[".csv".to_owned()]), ".csv");
        let three = [".a".to_owned(), ".b".to_owned(), ".c".to_owned()];
        assert_eq!(join_extensions(&three), ".a, .b or .c");
    }
}
