use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// Single-threaded event source. Listeners run synchronously inside `emit`.
pub struct Emitter<T> {
    listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T: 'static> Emitter<T> {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            let listener: Listener<T> = Rc::new(listener);
            listeners.entries.push((id, listener));
            id
        };

        let listeners = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners
                    .borrow_mut()
                    .entries
                    .retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    pub fn emit(&self, event: &T) {
        // Listeners may subscribe or unsubscribe while we iterate.
        let snapshot = self.listeners.borrow().entries.clone();
        for (id, listener) in snapshot {
            let still_subscribed = self
                .listeners
                .borrow()
                .entries
                .iter()
                .any(|(entry_id, _)| *entry_id == id);
            if still_subscribed {
                listener(event);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.borrow().entries.len())
            .finish()
    }
}

/// Releases some resource exactly once. Further calls are no-ops.
pub trait Disposable {
    fn dispose(&mut self);
}

/// Handle to a live listener. Dropping it unsubscribes, like a gpui `Subscription`.
#[must_use = "dropping a subscription unsubscribes the listener"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.unsubscribe.is_none()
    }

    /// Keeps the listener alive for the lifetime of the emitter.
    pub fn detach(mut self) {
        self.unsubscribe.take();
    }
}

impl Disposable for Subscription {
    fn dispose(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Runs a teardown closure on dispose.
pub struct OnDispose {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl OnDispose {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }
}

impl Disposable for OnDispose {
    fn dispose(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

/// Owning teardown list. Every entry is released once, in registration order.
#[derive(Default)]
pub struct DisposableStore {
    entries: Vec<Box<dyn Disposable>>,
    disposed: bool,
}

impl DisposableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mut disposable: impl Disposable + 'static) {
        if self.disposed {
            disposable.dispose();
            return;
        }
        self.entries.push(Box::new(disposable));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Disposable for DisposableStore {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for mut entry in self.entries.drain(..) {
            entry.dispose();
        }
    }
}

impl Drop for DisposableStore {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for DisposableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposableStore")
            .field("entries", &self.entries.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}
