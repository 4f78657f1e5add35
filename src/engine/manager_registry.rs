//! Manager Registry - index → Manager.
//!
//! Every inflated widget has exactly one [`Manager`]. It is registered right
//! after the widget is created (before any attribute is applied) and dropped
//! by `release_index()`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::manager::Manager;

thread_local! {
    /// Map widget index → Manager
    static MANAGERS: RefCell<HashMap<usize, Rc<Manager>>> = RefCell::new(HashMap::new());
}

/// Attach `manager` to widget `index`, replacing any earlier one.
pub fn set_manager(index: usize, manager: Rc<Manager>) {
    let previous = MANAGERS.with(|managers| managers.borrow_mut().insert(index, manager));
    drop(previous);
}

/// Manager of widget `index`, if it was inflated.
pub fn get_manager(index: usize) -> Option<Rc<Manager>> {
    MANAGERS.with(|managers| managers.borrow().get(&index).cloned())
}

pub(crate) fn remove_manager(index: usize) -> Option<Rc<Manager>> {
    MANAGERS.with(|managers| managers.borrow_mut().remove(&index))
}

/// Number of live managers.
pub fn manager_count() -> usize {
    MANAGERS.with(|managers| managers.borrow().len())
}

pub(crate) fn reset_managers() {
    let managers = MANAGERS.with(|managers| std::mem::take(&mut *managers.borrow_mut()));
    drop(managers);
}
