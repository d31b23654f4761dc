
use std::{rc::Rc, cell::{Cell, RefCell}, fmt};


// identity of an attached listener, assigned by the observable at attach time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);


// change notification target, invoked with (source, old, new) on each change
pub trait ChangeListener<T> {
    fn changed(&mut self, source: &Source<T>, old_value: &T, new_value: &T);
}


// adapter so plain closures can be attached via attach_fn
struct FnListener<F>(F);

impl<T, F: FnMut(&Source<T>, &T, &T)> ChangeListener<T> for FnListener<F> {
    fn changed(&mut self, source: &Source<T>, old_value: &T, new_value: &T) {
        (self.0)(source, old_value, new_value)
    }
}


struct Entry<T> {
    id: ListenerId,
    listener: Rc<RefCell<dyn ChangeListener<T>>>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self { Self { id: self.id, listener: self.listener.clone() } }
}


// value container notifying attached listeners on change,
// clones of the handle share the same value and listener list
pub struct Value<T> {
    inner: Rc<Inner<T>>,
}

struct Inner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<Entry<T>>>,
    next_id: Cell<u64>,
}

impl<T> Clone for Value<T> {
    fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value").field("value", &self.inner.value.borrow()).finish()
    }
}

impl<T> Value<T> {

    pub fn new(value: T) -> Self {
        Self { inner: Rc::new(Inner {
            value: RefCell::new(value),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        })}
    }

    pub fn get(&self) -> T where T: Clone {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.inner.value.borrow())
    }

    pub fn attach(&self, listener: impl ChangeListener<T> + 'static) -> ListenerId {

        let id = ListenerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);

        self.inner.listeners.borrow_mut().push(Entry {
            id, listener: Rc::new(RefCell::new(listener)),
        });

        log::trace!("attached listener {id:?}");
        id
    }

    pub fn attach_fn(&self, listener: impl FnMut(&Source<T>, &T, &T) + 'static) -> ListenerId {
        self.attach(FnListener(listener))
    }

    // idempotent, safe to call from within a notification callback
    pub fn detach(&self, id: ListenerId) -> bool {

        let mut listeners = self.inner.listeners.borrow_mut();

        if let Some(i) = listeners.iter().position(|entry| entry.id == id) {
            listeners.remove(i);
            log::trace!("detached listener {id:?}");
            true
        }
        else { false }
    }

    pub fn is_attached(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow().iter().any(|entry| entry.id == id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn set(&self, value: T) where T: Clone {
        let old_value = std::mem::replace(&mut *self.inner.value.borrow_mut(), value.clone());
        self.notify(&old_value, &value);
    }

    // notifies only when the new value differs from the current one
    pub fn set_distinct(&self, value: T) where T: Clone + PartialEq {
        if *self.inner.value.borrow() == value { return }
        self.set(value);
    }

    pub fn update(&self, update: impl FnOnce(&T) -> T) where T: Clone {
        let value = update(&self.inner.value.borrow());
        self.set(value);
    }

    pub(crate) fn source(&self, id: ListenerId) -> Source<'_, T> {
        Source { value: self, id }
    }

    fn notify(&self, old_value: &T, new_value: &T) {

        // snapshot, so listeners may detach themselves or others mid-dispatch
        let snapshot = self.inner.listeners.borrow().clone();

        for Entry { id, listener } in snapshot {

            // detached earlier in this same dispatch, no longer receives the change
            if !self.is_attached(id) { continue }

            match listener.try_borrow_mut() {
                Ok(mut listener) => listener.changed(&self.source(id), old_value, new_value),
                // the listener re-entered notification from its own callback
                Err(_) => log::warn!("skipped re-entrant notification of listener {id:?}"),
            }
        }
    }
}


// handed to listeners on each invocation, wraps the observable
// together with the invoked listener's own identity
pub struct Source<'a, T> {
    value: &'a Value<T>,
    id: ListenerId,
}

impl<'a, T> Source<'a, T> {

    pub fn observable(&self) -> &'a Value<T> { self.value }

    pub fn id(&self) -> ListenerId { self.id }

    pub fn get(&self) -> T where T: Clone { self.value.get() }

    // detaches the invoked listener itself
    pub fn detach(&self) -> bool { self.value.detach(self.id) }

    pub fn is_attached(&self) -> bool { self.value.is_attached(self.id) }
}
