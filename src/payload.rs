//! The file staged for transmission when the surrounding form submits.
//!
//! Mirrors the hidden `<input type="file">` the widgets keep in sync: at
//! most one file, replaced wholesale on every accept.

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;

use crate::file::SourceFile;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionPayload {
    field: String,
    file: Option<SourceFile>,
}

impl SubmissionPayload {
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into(), file: None }
    }

    /// Form field name the file is submitted under.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Replace whatever was staged with `file`.
    pub fn stage(&mut self, file: SourceFile) {
        self.file = Some(file);
    }

    pub fn clear(&mut self) {
        self.file = None;
    }

    #[must_use]
    pub fn file(&self) -> Option<&SourceFile> {
        self.file.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file.is_none()
    }

    /// Hand the staged file to the transport, leaving the payload empty.
    pub fn take(&mut self) -> Option<(String, SourceFile)> {
        self.file.take().map(|file| (self.field.clone(), file))
    }
}
