//! Single-threaded event loop in front of a [`FileIntakeController`].
//!
//! DESIGN
//! ======
//! Each external event enqueues exactly one handler invocation; handlers
//! run to completion, in arrival order, before the next one starts. Preview
//! derivations are the only suspension point: they are polled alongside the
//! queue and their results re-enter it as [`IntakeEvent::PreviewReady`], so
//! a late preview is ordered against every event that preceded it.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use std::collections::VecDeque;

use futures::StreamExt;
use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::FuturesUnordered;

use crate::controller::FileIntakeController;
use crate::file::SourceFile;
use crate::policy::IntakePolicy;
use crate::preview::{PreviewJob, PreviewReady};

/// Everything that can happen to an intake from the outside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntakeEvent {
    DragEnter,
    DragLeave,
    Drop(Vec<SourceFile>),
    ManualSelect(Vec<SourceFile>),
    ClearSelection,
    ClearError,
    SubmissionBegin,
    SubmissionEnd { success: bool },
    /// Application-level broadcast, e.g. `"excel-uploaded"`.
    Signal(String),
    PreviewReady(PreviewReady),
}

pub struct EventLoop<P> {
    controller: FileIntakeController<P>,
    queue: VecDeque<IntakeEvent>,
    previews: FuturesUnordered<LocalBoxFuture<'static, PreviewReady>>,
}

impl<P: IntakePolicy> EventLoop<P> {
    #[must_use]
    pub fn new(controller: FileIntakeController<P>) -> Self {
        Self { controller, queue: VecDeque::new(), previews: FuturesUnordered::new() }
    }

    #[must_use]
    pub fn controller(&self) -> &FileIntakeController<P> {
        &self.controller
    }

    /// Mutable access for registering observers. Events should still go
    /// through [`EventLoop::dispatch`].
    pub fn controller_mut(&mut self) -> &mut FileIntakeController<P> {
        &mut self.controller
    }

    #[must_use]
    pub fn into_controller(self) -> FileIntakeController<P> {
        self.controller
    }

    pub fn dispatch(&mut self, event: IntakeEvent) {
        self.queue.push_back(event);
    }

    pub fn broadcast(&mut self, signal: impl Into<String>) {
        self.dispatch(IntakeEvent::Signal(signal.into()));
    }

    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn pending_previews(&self) -> usize {
        self.previews.len()
    }

    /// Run queued handlers until the queue is empty. In-flight previews are
    /// left running. Returns the number of handlers run.
    pub fn run_until_stalled(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.queue.pop_front() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Run queued handlers and wait for every in-flight preview, feeding
    /// each result back through the queue. Returns the number of handlers run.
    pub async fn run_until_idle(&mut self) -> usize {
        let mut handled = self.run_until_stalled();
        while let Some(ready) = self.previews.next().await {
            self.dispatch(IntakeEvent::PreviewReady(ready));
            handled += self.run_until_stalled();
        }
        handled
    }

    fn handle(&mut self, event: IntakeEvent) {
        let job = match event {
            IntakeEvent::DragEnter => {
                self.controller.on_drag_enter();
                None
            }
            IntakeEvent::DragLeave => {
                self.controller.on_drag_leave();
                None
            }
            IntakeEvent::Drop(files) => self.controller.on_drop(files),
            IntakeEvent::ManualSelect(files) => self.controller.on_manual_select(files),
            IntakeEvent::ClearSelection => {
                self.controller.clear_selection();
                None
            }
            IntakeEvent::ClearError => {
                self.controller.clear_error();
                None
            }
            IntakeEvent::SubmissionBegin => {
                self.controller.on_submission_start();
                None
            }
            IntakeEvent::SubmissionEnd { success } => {
                self.controller.on_submission_end(success);
                None
            }
            IntakeEvent::Signal(signal) => {
                self.controller.on_signal(&signal);
                None
            }
            IntakeEvent::PreviewReady(ready) => {
                self.controller.complete_preview(ready);
                None
            }
        };
        if let Some(job) = job {
            self.spawn_preview(job);
        }
    }

    fn spawn_preview(&mut self, job: PreviewJob) {
        self.previews.push(job.run().boxed_local());
    }
}
