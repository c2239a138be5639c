//! Payload-less change notification across views.
//!
//! Whichever service mutates transaction data signals the hub; subscribed
//! consumers reload from storage and re-render on their own.

use std::sync::Mutex;

type Listener = Box<dyn Fn() + Send + Sync>;

/// Fan-out hub for the "transaction data changed" signal.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Mutex<Vec<Listener>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener invoked on every change notification.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.lock_listeners().push(Box::new(listener));
    }

    /// Signals that transaction data changed. Carries no payload.
    pub fn data_changed(&self) {
        let listeners = self.lock_listeners();
        for listener in listeners.iter() {
            listener();
        }
    }

    // A listener that panicked poisons the mutex but leaves the vec intact,
    // so recover the guard instead of propagating the poison.
    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, Vec<Listener>> {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn every_subscriber_sees_every_signal() {
        let notifier = ChangeNotifier::new();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..2 {
            let hits = Arc::clone(&hits);
            notifier.subscribe(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }
        notifier.data_changed();
        notifier.data_changed();
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn keeps_notifying_after_a_listener_panics() {
        use std::panic::{catch_unwind, AssertUnwindSafe};
        use std::sync::atomic::AtomicBool;

        let notifier = ChangeNotifier::new();
        let armed = Arc::new(AtomicBool::new(true));
        {
            let armed = Arc::clone(&armed);
            notifier.subscribe(move || {
                if armed.swap(false, Ordering::SeqCst) {
                    panic!("listener failed once");
                }
            });
        }
        let hits = Arc::new(AtomicUsize::new(0));
        {
            let hits = Arc::clone(&hits);
            notifier.subscribe(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        let first = catch_unwind(AssertUnwindSafe(|| notifier.data_changed()));
        assert!(first.is_err());

        // The poisoned lock is recovered; later signals still fan out.
        notifier.data_changed();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
