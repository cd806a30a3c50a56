//! Explicit "watch a field" registrations.
//!
//! State holders own an [`Observers`] registry and call
//! [`Observers::notify`] once a handler has finished writing, passing every
//! field it wrote. Callbacks run synchronously, in subscription order, and
//! see the fully updated state.

#[cfg(test)]
#[path = "observe_test.rs"]
mod observe_test;

/// Observable fields of the file intake controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    IsDragging,
    Candidate,
    Preview,
    ValidationError,
    IsSubmitting,
}

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<S> = Box<dyn FnMut(&S)>;

struct Subscription<F, S> {
    id: SubscriptionId,
    field: F,
    callback: Callback<S>,
}

/// Registry of per-field callbacks over a state snapshot type `S`.
pub struct Observers<F, S> {
    next_id: u64,
    subscriptions: Vec<Subscription<F, S>>,
}

impl<F, S> Default for Observers<F, S> {
    fn default() -> Self {
        Self { next_id: 0, subscriptions: Vec::new() }
    }
}

impl<F, S> std::fmt::Debug for Observers<F, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers").field("subscriptions", &self.subscriptions.len()).finish()
    }
}

impl<F: Copy + PartialEq, S> Observers<F, S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, field: F, callback: impl FnMut(&S) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, field, callback: Box::new(callback) });
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id != id);
        self.subscriptions.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Invoke callbacks for each written field. A callback watching a field
    /// written twice is invoked twice.
    pub fn notify(&mut self, written: &[F], state: &S) {
        for field in written {
            for sub in self.subscriptions.iter_mut().filter(|sub| sub.field == *field) {
                (sub.callback)(state);
            }
        }
    }
}
