//! The file handle an intake widget receives from a drop or a file picker.

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;

use std::sync::Arc;

/// Raw file bytes plus the metadata the browser reports alongside them.
///
/// Cloning shares the underlying bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    /// File name as reported by the picker, including the extension.
    pub name: String,
    /// MIME type as reported by the picker; empty when unknown.
    pub mime: String,
    /// Size in bytes. Equals `bytes.len()` unless built with [`SourceFile::metadata_only`].
    pub size: u64,
    bytes: Arc<[u8]>,
}

impl SourceFile {
    /// Build a file from its full contents.
    #[must_use]
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self { name: name.into(), mime: mime.into(), size: bytes.len() as u64, bytes }
    }

    /// Build a file whose contents are not available, only its reported size.
    #[must_use]
    pub fn metadata_only(name: impl Into<String>, mime: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), mime: mime.into(), size, bytes: Arc::from(Vec::<u8>::new()) }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercased extension including the leading dot, e.g. `".xlsx"`.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(format!(".{}", ext.to_ascii_lowercase()))
    }
}
