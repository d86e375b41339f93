//! "State changed" broadcasting from a [`Game`] to its observers.

use crate::grid::Game;
use std::fmt;
use std::sync::Arc;

/// Observer of a [`Game`].
///
/// Called synchronously after every mutation has been fully applied. The
/// signal carries no payload; listeners re-read whatever they need from the
/// game they are handed.
pub trait Listener: Send + Sync {
    fn state_changed(&self, game: &Game);
}

impl<F> Listener for F
where
    F: Fn(&Game) + Send + Sync,
{
    fn state_changed(&self, game: &Game) {
        self(game)
    }
}

/// The set of listeners subscribed to one game.
///
/// A listener is identified by its `Arc` allocation: subscribing the same
/// `Arc` twice keeps a single subscription.
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<Arc<dyn Listener>>,
}

fn same_listener(a: &Arc<dyn Listener>, b: &Arc<dyn Listener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the listener was already subscribed.
    pub fn subscribe(&mut self, listener: Arc<dyn Listener>) -> bool {
        if self.listeners.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Returns `false` if the listener was not subscribed.
    pub fn unsubscribe(&mut self, listener: &Arc<dyn Listener>) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !same_listener(l, listener));
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn notify_all(&self, game: &Game) {
        for listener in &self.listeners {
            listener.state_changed(game);
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting() -> (Arc<AtomicUsize>, Arc<dyn Listener>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let listener: Arc<dyn Listener> = Arc::new(move |_: &Game| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (count, listener)
    }

    #[test]
    fn duplicate_subscription_notifies_once() {
        let game = Game::default();
        let (count, listener) = counting();
        let mut notifier = Notifier::new();
        assert!(notifier.subscribe(Arc::clone(&listener)));
        assert!(!notifier.subscribe(Arc::clone(&listener)));
        notifier.notify_all(&game);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribing_a_stranger_is_a_no_op() {
        let game = Game::default();
        let (count, listener) = counting();
        let (_, stranger) = counting();
        let mut notifier = Notifier::new();
        notifier.subscribe(Arc::clone(&listener));
        assert!(!notifier.unsubscribe(&stranger));
        assert_eq!(notifier.len(), 1);
        assert!(notifier.unsubscribe(&listener));
        notifier.notify_all(&game);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(notifier.is_empty());
    }
}
