//! Observable single-writer state container.

use tokio::sync::watch;

/// Holds one value and notifies subscribers whenever it changes.
///
/// Writes go through [`Store::set`] or [`Store::update`]; readers either take
/// a snapshot with [`Store::get`] or follow changes through a
/// [`watch::Receiver`] from [`Store::subscribe`].
#[derive(Debug)]
pub struct Store<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Store<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replaces the value, returning the previous one.
    pub fn set(&self, value: T) -> T {
        self.tx.send_replace(value)
    }

    /// Mutates the value in place and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
