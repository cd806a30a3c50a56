//! Inline image previews derived from file bytes.
//!
//! Derivation runs after a file is accepted and never blocks submission.
//! Each job carries a [`PreviewTicket`] naming the candidate it was started
//! for, so a result that arrives after the user picked another file can be
//! recognized and dropped.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use std::task::Poll;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::candidate::CandidateId;
use crate::file::SourceFile;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Binds a preview derivation to the candidate that requested it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewTicket {
    pub candidate: CandidateId,
}

/// A finished derivation, ready to be applied to the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewReady {
    pub ticket: PreviewTicket,
    pub data_uri: String,
}

/// A pending derivation handed out by the controller on accept.
#[derive(Clone, Debug)]
pub struct PreviewJob {
    pub ticket: PreviewTicket,
    file: SourceFile,
}

impl PreviewJob {
    #[must_use]
    pub fn new(ticket: PreviewTicket, file: SourceFile) -> Self {
        Self { ticket, file }
    }

    /// Derive the preview. Yields once before encoding so the accept path
    /// always finishes first.
    pub async fn run(self) -> PreviewReady {
        yield_once().await;
        PreviewReady { ticket: self.ticket, data_uri: derive_data_uri(&self.file) }
    }
}

/// Encode file bytes as a `data:` URI using the reported MIME type.
#[must_use]
pub fn derive_data_uri(file: &SourceFile) -> String {
    let mime = if file.mime.is_empty() { FALLBACK_MIME } else { file.mime.as_str() };
    format!("data:{mime};base64,{}", STANDARD.encode(file.bytes()))
}

async fn yield_once() {
    let mut yielded = false;
    futures::future::poll_fn(|cx| {
        if yielded {
            return Poll::Ready(());
        }
        yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    })
    .await;
}
