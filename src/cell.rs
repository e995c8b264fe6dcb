use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A single-threaded observable value cell.
///
/// Cloning produces another handle to the same cell: all clones share one
/// value and one subscriber list. Subscribers run synchronously on the
/// writer's stack, in registration order, every time the value is replaced.
pub struct ObservableCell<T: 'static> {
    inner: Rc<CellInner<T>>,
}

struct CellInner<T: 'static> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Subscriber<T>>>,
    next_id: Cell<u64>,
}

struct Subscriber<T: 'static> {
    id: u64,
    notify: Rc<dyn Fn(&T)>,
}

impl<T: 'static> ObservableCell<T> {
    pub fn new(value: T) -> Self {
        ObservableCell {
            inner: Rc::new(CellInner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.value.borrow().clone()
    }

    /// Runs `f` over the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.notify();
    }

    /// Mutates the value in place, then notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.inner.value.borrow_mut());
        self.notify();
    }

    /// Registers `notify` to run after every `set`/`update` with the new
    /// value, until the returned guard is dropped.
    ///
    /// Callbacks may read the cell and may add or drop subscriptions; a
    /// subscription added during a notification first fires on the next
    /// one. Writing back into the cell from a callback is not supported.
    pub fn subscribe(&self, notify: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.subscribers.borrow_mut().push(Subscriber {
            id,
            notify: Rc::new(notify),
        });

        let weak = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.subscribers.borrow_mut().retain(|s| s.id != id);
                }
            })),
        }
    }

    fn notify(&self) {
        // Callbacks may add or drop subscriptions, so they must not run
        // under the list borrow.
        let snapshot: Vec<_> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|subscriber| Rc::clone(&subscriber.notify))
            .collect();

        let value = self.inner.value.borrow();
        for notify in snapshot {
            (*notify)(&value);
        }
    }
}

impl<T: 'static> Clone for ObservableCell<T> {
    fn clone(&self) -> Self {
        ObservableCell {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Keeps a cell subscription registered; dropping it unregisters the
/// callback. Outliving the cell is fine, the guard just becomes inert.
#[must_use = "dropping a Subscription unregisters its callback immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Leaves the callback registered for as long as the cell lives.
    pub fn forget(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
