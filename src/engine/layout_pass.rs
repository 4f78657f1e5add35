//! Layout Pass - one-shot callbacks for "after the next layout pass".
//!
//! Some attributes (relations to siblings) can only be resolved once the
//! container has laid out its children. They register a callback here; the
//! host calls [`dispatch_layout_pass`] when a layout pass completes.
//!
//! Every callback fires at most once. The pending set is drained before any
//! callback runs, so a callback that registers another one schedules it for
//! the following pass. Releasing a widget drops its pending callbacks.

use std::cell::RefCell;

use tracing::trace;

use super::registry::is_allocated;

struct PendingCallback {
    view: usize,
    callback: Box<dyn FnOnce()>,
}

thread_local! {
    /// Callbacks waiting for the next layout pass, in registration order.
    static PENDING: RefCell<Vec<PendingCallback>> = RefCell::new(Vec::new());
}

/// Run `callback` after the next layout pass, unless `view` is released first.
pub fn on_next_layout(view: usize, callback: impl FnOnce() + 'static) {
    PENDING.with(|pending| {
        pending.borrow_mut().push(PendingCallback {
            view,
            callback: Box::new(callback),
        });
    });
}

/// Fire every pending callback. Returns how many ran.
pub fn dispatch_layout_pass() -> usize {
    let drained = PENDING.with(|pending| std::mem::take(&mut *pending.borrow_mut()));
    let mut fired = 0;
    for PendingCallback { view, callback } in drained {
        if !is_allocated(view) {
            trace!(view, "skipping layout callback of released widget");
            continue;
        }
        callback();
        fired += 1;
    }
    fired
}

/// Drop pending callbacks of `view`.
pub fn cancel_layout_callbacks(view: usize) {
    PENDING.with(|pending| pending.borrow_mut().retain(|p| p.view != view));
}

/// Number of callbacks waiting for the next pass.
pub fn pending_layout_callbacks() -> usize {
    PENDING.with(|pending| pending.borrow().len())
}

pub(crate) fn reset_layout_pass() {
    PENDING.with(|pending| pending.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, release_index, reset_engine};
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_engine();
    }

    #[test]
    fn test_fires_once() {
        setup();
        let view = allocate_index();
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        on_next_layout(view, move || count_clone.set(count_clone.get() + 1));

        assert_eq!(pending_layout_callbacks(), 1);
        assert_eq!(dispatch_layout_pass(), 1);
        assert_eq!(dispatch_layout_pass(), 0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_reentrant_registration_waits_for_next_pass() {
        setup();
        let view = allocate_index();
        let fired = Rc::new(Cell::new(0));
        let fired_clone = fired.clone();
        on_next_layout(view, move || {
            let inner = fired_clone.clone();
            on_next_layout(view, move || inner.set(inner.get() + 10));
            fired_clone.set(fired_clone.get() + 1);
        });

        assert_eq!(dispatch_layout_pass(), 1);
        assert_eq!(fired.get(), 1);
        assert_eq!(dispatch_layout_pass(), 1);
        assert_eq!(fired.get(), 11);
    }

    #[test]
    fn test_release_cancels() {
        setup();
        let keep = allocate_index();
        let view = allocate_index();
        on_next_layout(view, || panic!("released widget must not fire"));
        release_index(view);

        assert_eq!(pending_layout_callbacks(), 0);
        assert_eq!(dispatch_layout_pass(), 0);
        assert!(crate::engine::is_allocated(keep));
    }
}
