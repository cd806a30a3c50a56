//! File intake controller shared by the spreadsheet and avatar upload widgets.
//!
//! SYSTEM CONTEXT
//! ==============
//! A view layer forwards drag, drop, and picker events here and renders
//! drop-zone highlighting, the selected file, an inline error, and a busy
//! state from [`IntakeView`]. The controller keeps the submission payload in
//! step with the selection so the surrounding form always transmits exactly
//! the accepted file.
//!
//! DESIGN
//! ======
//! Every public handler applies all of its writes before observers are told
//! about any of them, so a view never sees a new candidate paired with a
//! stale error or payload.
//!
//! Error retention differs by operation: `clear_selection` keeps the error
//! on screen (a rejected file clears the selection but its message must stay
//! visible), while `reset` wipes both and is what a successful submission
//! or the external reset signal performs.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use serde::Serialize;

use crate::candidate::{CandidateView, UploadCandidate};
use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::file::SourceFile;
use crate::observe::{Field, Observers, SubscriptionId};
use crate::payload::SubmissionPayload;
use crate::policy::{DocumentPolicy, ImagePolicy, IntakePolicy, Verdict};
use crate::preview::{PreviewJob, PreviewReady, PreviewTicket};

/// Form field the spreadsheet widget submits under.
pub const SPREADSHEET_FIELD: &str = "file";
/// Form field the avatar widget submits under.
pub const AVATAR_FIELD: &str = "avatar";
/// Broadcast emitted after an avatar upload completes.
pub const AVATAR_RESET_SIGNAL: &str = "avatar-updated";

/// The rendered-state contract: everything a view reads, nothing more.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IntakeView {
    pub is_dragging: bool,
    pub candidate: Option<CandidateView>,
    pub validation_error: Option<String>,
    pub is_submitting: bool,
}

pub struct FileIntakeController<P> {
    policy: P,
    is_dragging: bool,
    candidate: Option<UploadCandidate>,
    validation_error: Option<IntakeError>,
    is_submitting: bool,
    payload: SubmissionPayload,
    reset_signal: Option<String>,
    observers: Observers<Field, IntakeView>,
    written: Vec<Field>,
}

impl<P: std::fmt::Debug> std::fmt::Debug for FileIntakeController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileIntakeController")
            .field("policy", &self.policy)
            .field("is_dragging", &self.is_dragging)
            .field("candidate", &self.candidate.as_ref().map(|c| &c.display_name))
            .field("validation_error", &self.validation_error)
            .field("is_submitting", &self.is_submitting)
            .field("reset_signal", &self.reset_signal)
            .finish_non_exhaustive()
    }
}

impl FileIntakeController<DocumentPolicy> {
    /// Spreadsheet widget configured from `config`.
    #[must_use]
    pub fn spreadsheet(config: &IntakeConfig) -> Self {
        let policy = DocumentPolicy::new(&config.allowed_extensions, config.max_bytes);
        Self::new(policy, SubmissionPayload::new(SPREADSHEET_FIELD)).with_reset_signal(config.reset_signal.clone())
    }
}

impl FileIntakeController<ImagePolicy> {
    /// Avatar widget: any `image/*` file, with a preview.
    #[must_use]
    pub fn avatar() -> Self {
        Self::new(ImagePolicy::new(), SubmissionPayload::new(AVATAR_FIELD)).with_reset_signal(AVATAR_RESET_SIGNAL)
    }
}

impl<P: IntakePolicy> FileIntakeController<P> {
    #[must_use]
    pub fn new(policy: P, payload: SubmissionPayload) -> Self {
        Self {
            policy,
            is_dragging: false,
            candidate: None,
            validation_error: None,
            is_submitting: false,
            payload,
            reset_signal: None,
            observers: Observers::new(),
            written: Vec::new(),
        }
    }

    /// Name of the application broadcast that clears this intake.
    #[must_use]
    pub fn with_reset_signal(mut self, signal: impl Into<String>) -> Self {
        self.reset_signal = Some(signal.into());
        self
    }

    // --- Observation ---

    pub fn subscribe(&mut self, field: Field, callback: impl FnMut(&IntakeView) + 'static) -> SubscriptionId {
        self.observers.subscribe(field, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // --- Drag feedback ---

    pub fn on_drag_enter(&mut self) {
        self.set_dragging(true);
        self.flush();
    }

    pub fn on_drag_leave(&mut self) {
        self.set_dragging(false);
        self.flush();
    }

    // --- Selection ---

    /// Handle files dropped on the zone. Only the first file is considered.
    pub fn on_drop(&mut self, files: Vec<SourceFile>) -> Option<PreviewJob> {
        self.set_dragging(false);
        let job = files.into_iter().next().and_then(|file| self.accept(file));
        self.flush();
        job
    }

    /// Handle files chosen with the picker. Only the first file is considered.
    pub fn on_manual_select(&mut self, files: Vec<SourceFile>) -> Option<PreviewJob> {
        let job = files.into_iter().next().and_then(|file| self.accept(file));
        self.flush();
        job
    }

    /// Validate `file` and, if accepted, make it the candidate.
    ///
    /// Returns the preview derivation to run when the policy asks for one.
    pub fn on_file_accepted(&mut self, file: SourceFile) -> Option<PreviewJob> {
        let job = self.accept(file);
        self.flush();
        job
    }

    /// Drop the candidate and the staged file. The error, if any, stays.
    pub fn clear_selection(&mut self) {
        self.clear_candidate();
        self.flush();
    }

    pub fn clear_error(&mut self) {
        self.set_error(None);
        self.flush();
    }

    /// Clear the selection and the error.
    pub fn reset(&mut self) {
        self.clear_candidate();
        self.set_error(None);
        self.flush();
    }

    // --- External lifecycle ---

    pub fn on_submission_start(&mut self) {
        self.is_submitting = true;
        self.written.push(Field::IsSubmitting);
        self.flush();
    }

    /// Finish a submission; a successful one leaves the intake empty.
    pub fn on_submission_end(&mut self, success: bool) {
        self.is_submitting = false;
        self.written.push(Field::IsSubmitting);
        if success {
            self.clear_candidate();
            self.set_error(None);
        }
        self.flush();
    }

    /// Handle an application broadcast. Returns whether it reset this intake.
    pub fn on_signal(&mut self, signal: &str) -> bool {
        if self.reset_signal.as_deref() != Some(signal) {
            return false;
        }
        tracing::debug!(%signal, "intake reset by signal");
        self.reset();
        true
    }

    /// Apply a finished preview if it still belongs to the active candidate.
    ///
    /// Returns `false` when the result was discarded as stale.
    pub fn complete_preview(&mut self, ready: PreviewReady) -> bool {
        let Some(candidate) = self.candidate.as_mut().filter(|c| c.id == ready.ticket.candidate) else {
            tracing::debug!(candidate = ?ready.ticket.candidate, "discarding stale preview");
            return false;
        };
        candidate.preview = Some(ready.data_uri);
        self.written.push(Field::Preview);
        self.flush();
        true
    }

    // --- Queries ---

    #[must_use]
    pub fn view(&self) -> IntakeView {
        IntakeView {
            is_dragging: self.is_dragging,
            candidate: self.candidate.as_ref().map(CandidateView::from),
            validation_error: self.validation_error.as_ref().map(ToString::to_string),
            is_submitting: self.is_submitting,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    #[must_use]
    pub fn candidate(&self) -> Option<&UploadCandidate> {
        self.candidate.as_ref()
    }

    #[must_use]
    pub fn validation_error(&self) -> Option<&IntakeError> {
        self.validation_error.as_ref()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    #[must_use]
    pub fn payload(&self) -> &SubmissionPayload {
        &self.payload
    }

    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    #[must_use]
    pub fn reset_signal(&self) -> Option<&str> {
        self.reset_signal.as_deref()
    }

    // --- Internals (write without notifying) ---

    fn accept(&mut self, file: SourceFile) -> Option<PreviewJob> {
        match self.policy.evaluate(&file) {
            Verdict::Accept { preview } => {
                tracing::debug!(name = %file.name, size = file.size, "file accepted");
                let candidate = UploadCandidate::from_file(file.clone());
                let job = preview.then(|| PreviewJob::new(PreviewTicket { candidate: candidate.id }, file.clone()));
                self.payload.stage(file);
                self.candidate = Some(candidate);
                self.written.push(Field::Candidate);
                self.set_error(None);
                job
            }
            Verdict::Reject(error) => {
                tracing::debug!(name = %file.name, %error, "file rejected");
                self.clear_candidate();
                self.set_error(Some(error));
                self.set_dragging(false);
                None
            }
            Verdict::Ignore => {
                tracing::debug!(name = %file.name, mime = %file.mime, "file ignored");
                None
            }
        }
    }

    fn clear_candidate(&mut self) {
        self.candidate = None;
        self.payload.clear();
        self.written.push(Field::Candidate);
    }

    fn set_error(&mut self, error: Option<IntakeError>) {
        self.validation_error = error;
        self.written.push(Field::ValidationError);
    }

    fn set_dragging(&mut self, dragging: bool) {
        self.is_dragging = dragging;
        self.written.push(Field::IsDragging);
    }

    fn flush(&mut self) {
        if self.written.is_empty() {
            return;
        }
        let written = std::mem::take(&mut self.written);
        if self.observers.is_empty() {
            return;
        }
        let view = self.view();
        self.observers.notify(&written, &view);
    }
}
