//! Parallel Arrays - widget state.
//!
//! All widget state lives in these parallel arrays. Each array index
//! corresponds to one widget allocated by the registry. Processors write
//! through the `set_*` functions; hosts and tests read through `get_*`.
//!
//! # Array Categories
//!
//! - **core**: type name, capabilities, parent, children, id, visibility
//! - **visual**: background, alpha, elevation
//! - **layout**: size, padding, margin, gravity, weight, orientation
//! - **text**: text content, colors, typeface, compound drawables
//! - **group**: container clipping and event flags
//! - **list**: list widget setup and adapter
//! - **constraint**: constraint set of a constraint container

use std::cell::RefCell;

/// One property across all widgets.
///
/// Reads past the end return the default; writes grow the array.
pub struct PropertyArray<T: Clone> {
    default: T,
    values: RefCell<Vec<T>>,
}

impl<T: Clone> PropertyArray<T> {
    pub fn new(default: T) -> Self {
        Self {
            default,
            values: RefCell::new(Vec::new()),
        }
    }

    pub fn get(&self, index: usize) -> T {
        self.values
            .borrow()
            .get(index)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }

    pub fn set(&self, index: usize, value: T) {
        self.ensure(index);
        self.values.borrow_mut()[index] = value;
    }

    /// Read in place without cloning.
    pub fn read<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> R {
        let values = self.values.borrow();
        f(values.get(index).unwrap_or(&self.default))
    }

    /// Mutate in place. `f` must not touch this array.
    pub fn update<R>(&self, index: usize, f: impl FnOnce(&mut T) -> R) -> R {
        self.ensure(index);
        f(&mut self.values.borrow_mut()[index])
    }

    pub fn ensure(&self, index: usize) {
        let mut values = self.values.borrow_mut();
        if values.len() <= index {
            values.resize(index + 1, self.default.clone());
        }
    }

    pub fn clear(&self, index: usize) {
        if let Some(slot) = self.values.borrow_mut().get_mut(index) {
            *slot = self.default.clone();
        }
    }

    pub fn clear_all(&self) {
        self.values.borrow_mut().clear();
    }
}

/// Declare a category's thread-local arrays along with its
/// `ensure_capacity`/`clear_at_index`/`reset` and one getter/setter pair
/// per array.
macro_rules! property_arrays {
    ($(
        $(#[$doc:meta])*
        $name:ident: $ty:ty = $default:expr => $get:ident, $set:ident;
    )*) => {
        thread_local! {
            $(
                $(#[$doc])*
                static $name: $crate::engine::arrays::PropertyArray<$ty> =
                    $crate::engine::arrays::PropertyArray::new($default);
            )*
        }

        /// Ensure arrays have capacity for the given index.
        pub fn ensure_capacity(index: usize) {
            $( $name.with(|arr| arr.ensure(index)); )*
        }

        /// Reset values at index to their defaults.
        pub fn clear_at_index(index: usize) {
            $( $name.with(|arr| arr.clear(index)); )*
        }

        /// Reset all arrays.
        pub fn reset() {
            $( $name.with(|arr| arr.clear_all()); )*
        }

        $(
            pub fn $get(index: usize) -> $ty {
                $name.with(|arr| arr.get(index))
            }

            pub fn $set(index: usize, value: $ty) {
                $name.with(|arr| arr.set(index, value));
            }
        )*
    };
}

pub mod constraint;
pub mod core;
pub mod group;
pub mod layout;
pub mod list;
pub mod text;
pub mod visual;

use self::constraint as constraint_arrays;
use self::core as core_arrays;
use self::group as group_arrays;
use self::layout as layout_arrays;
use self::list as list_arrays;
use self::text as text_arrays;
use self::visual as visual_arrays;

/// Ensure all arrays have capacity for the given index.
///
/// Called by registry when allocating.
pub fn ensure_all_capacity(index: usize) {
    core_arrays::ensure_capacity(index);
    visual_arrays::ensure_capacity(index);
    layout_arrays::ensure_capacity(index);
    text_arrays::ensure_capacity(index);
    group_arrays::ensure_capacity(index);
    list_arrays::ensure_capacity(index);
    constraint_arrays::ensure_capacity(index);
}

/// Clear all array values at an index.
///
/// Called by registry when releasing.
pub fn clear_all_at_index(index: usize) {
    core_arrays::clear_at_index(index);
    visual_arrays::clear_at_index(index);
    layout_arrays::clear_at_index(index);
    text_arrays::clear_at_index(index);
    group_arrays::clear_at_index(index);
    list_arrays::clear_at_index(index);
    constraint_arrays::clear_at_index(index);
}

/// Reset all parallel arrays to release memory.
///
/// Called automatically when the last widget is released.
pub fn reset_all_arrays() {
    core_arrays::reset();
    visual_arrays::reset();
    layout_arrays::reset();
    text_arrays::reset();
    group_arrays::reset();
    list_arrays::reset();
    constraint_arrays::reset();
}
