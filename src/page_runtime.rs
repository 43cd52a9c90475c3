use std::cell::{Cell, RefCell};

use gloo::events::EventListener;

thread_local! {
    static ATTACHED: Cell<bool> = Cell::new(false);
    static LISTENERS: RefCell<Vec<EventListener>> = RefCell::new(Vec::new());
}

/// Returns `true` when the page controllers were already attached.
pub(crate) fn mark_attached() -> bool {
    ATTACHED.with(|flag| {
        if flag.get() {
            true
        } else {
            flag.set(true);
            false
        }
    })
}

pub(crate) fn keep_listener(listener: EventListener) {
    LISTENERS.with(|listeners| {
        listeners.borrow_mut().push(listener);
    });
}

#[cfg(test)]
pub(crate) fn listener_count() -> usize {
    LISTENERS.with(|listeners| listeners.borrow().len())
}
