//! Validation policies deciding whether a dropped or picked file is taken.
//!
//! DESIGN
//! ======
//! The two upload widgets disagree on how to treat a wrong file: the
//! document widget explains the rejection, the image widget ignores the
//! selection without comment. `Verdict::Ignore` keeps that asymmetry explicit
//! instead of folding it into an error nobody renders.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use crate::error::IntakeError;
use crate::file::SourceFile;

/// Default upload limit shared by both widgets: 5 MiB.
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Extensions accepted by the spreadsheet widget.
pub const SPREADSHEET_EXTENSIONS: [&str; 2] = [".xls", ".xlsx"];

/// Outcome of evaluating one file against a policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Take the file. `preview` requests an inline preview derivation.
    Accept { preview: bool },
    /// Refuse the file and surface the error.
    Reject(IntakeError),
    /// Drop the selection silently; existing state is left untouched.
    Ignore,
}

/// A synchronous, total decision over a candidate file.
pub trait IntakePolicy {
    fn evaluate(&self, file: &SourceFile) -> Verdict;
}

/// Extension-and-size gate used for structured documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentPolicy {
    allowed_extensions: Vec<String>,
    max_bytes: u64,
}

impl DocumentPolicy {
    /// Build a policy from extensions in any case, with or without the leading dot.
    #[must_use]
    pub fn new<I, S>(extensions: I, max_bytes: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_extensions = extensions.into_iter().filter_map(|ext| normalize_extension(ext.as_ref())).collect();
        Self { allowed_extensions, max_bytes }
    }

    /// `.xls`/`.xlsx` up to 5 MiB.
    #[must_use]
    pub fn spreadsheet() -> Self {
        Self::new(SPREADSHEET_EXTENSIONS, DEFAULT_MAX_BYTES)
    }

    #[must_use]
    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    fn has_allowed_extension(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.allowed_extensions.iter().any(|ext| lowered.ends_with(ext.as_str()))
    }
}

impl IntakePolicy for DocumentPolicy {
    fn evaluate(&self, file: &SourceFile) -> Verdict {
        if !self.has_allowed_extension(&file.name) {
            return Verdict::Reject(IntakeError::UnsupportedFormat {
                found: file.extension(),
                allowed: self.allowed_extensions.clone(),
            });
        }
        if file.size > self.max_bytes {
            return Verdict::Reject(IntakeError::SizeExceeded { limit: self.max_bytes, actual: file.size });
        }
        Verdict::Accept { preview: false }
    }
}

/// MIME-prefix gate used for image uploads such as avatars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePolicy {
    mime_prefix: String,
    max_bytes: Option<u64>,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self { mime_prefix: "image/".to_owned(), max_bytes: None }
    }
}

impl ImagePolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also reject images above `max_bytes`. Without this the size check is
    /// left to whoever receives the submission.
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }
}

impl IntakePolicy for ImagePolicy {
    fn evaluate(&self, file: &SourceFile) -> Verdict {
        if !file.mime.starts_with(&self.mime_prefix) {
            return Verdict::Ignore;
        }
        if let Some(limit) = self.max_bytes {
            if file.size > limit {
                return Verdict::Reject(IntakeError::SizeExceeded { limit, actual: file.size });
            }
        }
        Verdict::Accept { preview: true }
    }
}

/// `"XLSX" -> ".xlsx"`, `".Xls" -> ".xls"`, blank -> `None`.
pub(crate) fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_lowercase()))
}
