//! Ordered registry of change callbacks.
//!
//! Delivery is synchronous and follows registration order. Callbacks receive a
//! shared borrow of the notified value, so they can observe but never mutate
//! the owner while it is dispatching.

use std::fmt;

/// Handle returned by `subscribe`; pass it back to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

pub struct Listeners<T: ?Sized> {
    next_id: u64,
    entries: Vec<(ListenerId, Callback<T>)>,
}

impl<T: ?Sized> Listeners<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` when the handle was already removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, value: &T) {
        for (_, callback) in &mut self.entries {
            callback(value);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ?Sized> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}
