//! Subject - typed change notification
//!
//! A `Subject` keeps a registration-ordered list of observers without owning
//! them. Entities whose state changes embed one and implement [`Observable`].
//!
//! Each notification round works on a snapshot of the observer list taken
//! before the first callback runs, so observers may subscribe or unsubscribe
//! (themselves or others) from inside `update`; the change applies from the
//! next round on. The list is guarded by an internal lock that is never held
//! while observers run.

use crate::port::Observer;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::trace;

/// Registry of observers interested in changes of `S`
///
/// `A` is the type of the optional change description.
pub struct Subject<S: ?Sized, A: ?Sized = S> {
    observers: Mutex<Vec<Weak<dyn Observer<S, A>>>>,
}

impl<S: ?Sized, A: ?Sized> Subject<S, A> {
    pub fn new() -> Self {
        Self {
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Register `observer` for future notifications (no-op if already registered)
    pub fn subscribe(&self, observer: &Arc<dyn Observer<S, A>>) {
        let candidate = Arc::downgrade(observer);
        let mut observers = self.observers.lock();
        observers.retain(|o| o.strong_count() > 0);

        if observers.iter().any(|o| Weak::ptr_eq(o, &candidate)) {
            trace!(observers = observers.len(), "Observer already subscribed");
            return;
        }
        observers.push(candidate);
        trace!(observers = observers.len(), "Observer subscribed");
    }

    /// Remove `observer` if present; no-op otherwise
    pub fn unsubscribe(&self, observer: &Arc<dyn Observer<S, A>>) {
        let target = Arc::downgrade(observer);
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|o| o.strong_count() > 0 && !Weak::ptr_eq(o, &target));
        trace!(
            removed = before - observers.len(),
            observers = observers.len(),
            "Observer unsubscribed"
        );
    }

    /// Drop every registration
    pub fn unsubscribe_all(&self) {
        self.observers.lock().clear();
    }

    pub fn is_subscribed(&self, observer: &Arc<dyn Observer<S, A>>) -> bool {
        let target = Arc::downgrade(observer);
        self.observers
            .lock()
            .iter()
            .any(|o| o.strong_count() > 0 && Weak::ptr_eq(o, &target))
    }

    /// Number of registered observers that are still alive
    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }

    /// Synchronously call `update` on every live observer, in registration order
    pub fn notify(&self, subject: &S, arg: Option<&A>) {
        let snapshot: Vec<Arc<dyn Observer<S, A>>> = {
            let mut observers = self.observers.lock();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };

        trace!(observers = snapshot.len(), "Notifying observers");
        for observer in snapshot {
            observer.update(subject, arg);
        }
    }
}

impl<S: ?Sized, A: ?Sized> Default for Subject<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized, A: ?Sized> std::fmt::Debug for Subject<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subject")
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Entity that exposes an embedded [`Subject`]
pub trait Observable<A: ?Sized = Self> {
    fn subject(&self) -> &Subject<Self, A>;

    fn subscribe(&self, observer: &Arc<dyn Observer<Self, A>>) {
        self.subject().subscribe(observer);
    }

    fn unsubscribe(&self, observer: &Arc<dyn Observer<Self, A>>) {
        self.subject().unsubscribe(observer);
    }

    /// Notify observers that `self` changed
    fn notify_observers(&self, arg: Option<&A>) {
        self.subject().notify(self, arg);
    }
}
