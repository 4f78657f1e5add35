//! Widget Registry - Index allocation and the widget tree.
//!
//! Manages the lifecycle of widget indices:
//! - Free index pool for O(1) reuse
//! - Allocated set (a released index is never "live")
//! - Ordered children per container
//! - Destroy callbacks
//!
//! Releasing a widget releases its whole subtree, detaches it from its
//! parent, drops its manager and cancels its pending layout callbacks.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use tracing::trace;

use super::arrays::{self, constraint, core};
use super::{layout_pass, manager_registry};

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Set of currently allocated indices.
    static ALLOCATED_INDICES: RefCell<BTreeSet<usize>> = RefCell::new(BTreeSet::new());

    /// Pool of freed indices for reuse.
    static FREE_INDICES: RefCell<Vec<usize>> = RefCell::new(Vec::new());

    /// Next index to allocate if pool is empty.
    static NEXT_INDEX: RefCell<usize> = const { RefCell::new(0) };

    /// Destroy callbacks registered per index.
    static DESTROY_CALLBACKS: RefCell<HashMap<usize, Vec<Box<dyn FnOnce()>>>> = RefCell::new(HashMap::new());
}

// =============================================================================
// Index Allocation
// =============================================================================

/// Allocate an index for a new widget.
pub fn allocate_index() -> usize {
    // Reuse free index or allocate new
    let index = FREE_INDICES.with(|free| free.borrow_mut().pop()).unwrap_or_else(|| {
        NEXT_INDEX.with(|next| {
            let mut next = next.borrow_mut();
            let index = *next;
            *next += 1;
            index
        })
    });

    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().insert(index);
    });

    // Ensure arrays have capacity for this index
    arrays::ensure_all_capacity(index);

    index
}

/// Release an index back to the pool.
///
/// Also recursively releases all children!
pub fn release_index(index: usize) {
    if !is_allocated(index) {
        return;
    }

    // Children first, last to first
    for child in core::get_children(index).into_iter().rev() {
        release_index(child);
    }

    detach_from_parent(index);
    layout_pass::cancel_layout_callbacks(index);

    // Run destroy callbacks before cleanup
    run_destroy_callbacks(index);

    // Dropped outside any engine borrow
    let manager = manager_registry::remove_manager(index);
    drop(manager);

    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().remove(&index);
    });

    // Clear all array values at this index
    arrays::clear_all_at_index(index);

    // Return to pool for reuse
    FREE_INDICES.with(|free| {
        free.borrow_mut().push(index);
    });
    trace!(index, "released widget");

    // AUTO-CLEANUP: When all widgets are released, reset all arrays to free memory
    let is_empty = ALLOCATED_INDICES.with(|set| set.borrow().is_empty());
    if is_empty {
        arrays::reset_all_arrays();
        FREE_INDICES.with(|free| {
            free.borrow_mut().clear();
        });
        NEXT_INDEX.with(|next| {
            *next.borrow_mut() = 0;
        });
    }
}

// =============================================================================
// Tree
// =============================================================================

/// Append `child` to the children of `parent`, moving it from its previous
/// parent if it had one.
pub fn add_child(parent: usize, child: usize) {
    detach_from_parent(child);
    core::set_parent_index(child, Some(parent));
    core::push_child(parent, child);
}

/// Remove and release the child at `position`. Returns the released index.
pub fn remove_child_at(parent: usize, position: usize) -> Option<usize> {
    let child = core::get_child_at(parent, position)?;
    release_index(child);
    Some(child)
}

/// Detach `child` from its parent without releasing it.
pub fn detach_from_parent(child: usize) {
    let Some(parent) = core::get_parent_index(child) else {
        return;
    };
    core::remove_child(parent, child);
    core::set_parent_index(child, None);
    constraint::update_constraint_set(parent, |set| set.forget(child));
}

pub fn child_count(parent: usize) -> usize {
    core::get_child_count(parent)
}

pub fn child_at(parent: usize, position: usize) -> Option<usize> {
    core::get_child_at(parent, position)
}

pub fn children(parent: usize) -> Vec<usize> {
    core::get_children(parent)
}

pub fn parent_of(index: usize) -> Option<usize> {
    core::get_parent_index(index)
}

// =============================================================================
// Ids
// =============================================================================

pub fn assign_id(index: usize, id: impl Into<String>) {
    core::set_view_id(index, Some(id.into()));
}

pub fn get_id(index: usize) -> Option<String> {
    core::get_view_id(index)
}

/// Depth-first search of the subtree rooted at `root`, root included.
/// The first widget in tree order wins.
pub fn find_view_by_id(root: usize, id: &str) -> Option<usize> {
    if !is_allocated(root) {
        return None;
    }
    if core::get_view_id(root).as_deref() == Some(id) {
        return Some(root);
    }
    core::get_children(root)
        .into_iter()
        .find_map(|child| find_view_by_id(child, id))
}

// =============================================================================
// Destroy Callbacks
// =============================================================================

/// Register a callback to run when the widget at `index` is released.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    DESTROY_CALLBACKS.with(|callbacks| {
        callbacks
            .borrow_mut()
            .entry(index)
            .or_default()
            .push(Box::new(callback));
    });
}

/// Run and clear destroy callbacks for an index.
fn run_destroy_callbacks(index: usize) {
    let callbacks = DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().remove(&index));
    if let Some(callbacks) = callbacks {
        for callback in callbacks {
            callback();
        }
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Get all currently allocated indices, ascending.
pub fn get_allocated_indices() -> Vec<usize> {
    ALLOCATED_INDICES.with(|set| set.borrow().iter().copied().collect())
}

/// Check if an index is currently allocated.
pub fn is_allocated(index: usize) -> bool {
    ALLOCATED_INDICES.with(|set| set.borrow().contains(&index))
}

/// Get the current capacity (highest index that would be allocated next).
pub fn get_capacity() -> usize {
    NEXT_INDEX.with(|next| *next.borrow())
}

/// Get the count of currently allocated widgets.
pub fn get_allocated_count() -> usize {
    ALLOCATED_INDICES.with(|set| set.borrow().len())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all engine state: registry, arrays, managers and layout callbacks.
pub fn reset_engine() {
    ALLOCATED_INDICES.with(|set| set.borrow_mut().clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().clear());
    manager_registry::reset_managers();
    layout_pass::reset_layout_pass();
    arrays::reset_all_arrays();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_engine();
    }

    #[test]
    fn test_allocate_index() {
        setup();

        let idx1 = allocate_index();
        let idx2 = allocate_index();
        let idx3 = allocate_index();

        assert_eq!((idx1, idx2, idx3), (0, 1, 2));
        assert!(is_allocated(2));
        assert!(!is_allocated(3));
        assert_eq!(get_allocated_count(), 3);
    }

    #[test]
    fn test_release_and_reuse() {
        setup();

        let idx1 = allocate_index();
        let idx2 = allocate_index();

        release_index(idx1);
        assert!(!is_allocated(idx1));
        assert!(is_allocated(idx2));

        // Should reuse the freed index
        let idx3 = allocate_index();
        assert_eq!(idx3, idx1);
    }

    #[test]
    fn test_release_is_recursive_and_detaches() {
        setup();

        let root = allocate_index();
        let group = allocate_index();
        let leaf = allocate_index();
        add_child(root, group);
        add_child(group, leaf);

        release_index(group);
        assert!(!is_allocated(group));
        assert!(!is_allocated(leaf));
        assert_eq!(child_count(root), 0);
        assert!(is_allocated(root));
    }

    #[test]
    fn test_children_keep_order() {
        setup();

        let parent = allocate_index();
        let a = allocate_index();
        let b = allocate_index();
        let c = allocate_index();
        for child in [a, b, c] {
            add_child(parent, child);
        }

        assert_eq!(children(parent), vec![a, b, c]);
        assert_eq!(remove_child_at(parent, 1), Some(b));
        assert_eq!(children(parent), vec![a, c]);
        assert_eq!(child_at(parent, 1), Some(c));
        assert_eq!(parent_of(c), Some(parent));
        assert_eq!(remove_child_at(parent, 5), None);
    }

    #[test]
    fn test_add_child_moves_between_parents() {
        setup();

        let first = allocate_index();
        let second = allocate_index();
        let child = allocate_index();
        add_child(first, child);
        add_child(second, child);

        assert_eq!(child_count(first), 0);
        assert_eq!(children(second), vec![child]);
    }

    #[test]
    fn test_find_view_by_id_first_in_tree_order() {
        setup();

        let root = allocate_index();
        let row1 = allocate_index();
        let row2 = allocate_index();
        add_child(root, row1);
        add_child(root, row2);
        assign_id(row1, "title");
        assign_id(row2, "title");

        assert_eq!(find_view_by_id(root, "title"), Some(row1));
        assert_eq!(find_view_by_id(row2, "title"), Some(row2));
        assert_eq!(find_view_by_id(root, "missing"), None);
        assert_eq!(get_id(row1).as_deref(), Some("title"));
    }

    #[test]
    fn test_destroy_callback() {
        setup();

        let called = Rc::new(Cell::new(false));
        let called_clone = called.clone();

        let idx = allocate_index();
        on_destroy(idx, move || {
            called_clone.set(true);
        });

        assert!(!called.get());
        release_index(idx);
        assert!(called.get());
    }

    #[test]
    fn test_release_last_widget_resets_capacity() {
        setup();

        let a = allocate_index();
        let b = allocate_index();
        release_index(a);
        assert_eq!(get_capacity(), 2);
        release_index(b);
        assert_eq!(get_capacity(), 0);
    }
}
