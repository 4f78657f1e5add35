//! List Arrays
//!
//! State of list widgets:
//! - overScrollMode
//! - layoutManager / listOrientation: applied together once setup completes
//! - adapter: item source, None when the provider declined
//! - listSetup: co-attributes collected so far

use std::rc::Rc;

use crate::adapter::ListAdapter;
use crate::types::{LayoutManagerKind, OverScrollMode, Orientation};

/// Co-attributes a list needs before it can build its layout manager.
///
/// Each of `layoutManager`, `orientation` and `itemCount` records its part
/// here; nothing is applied until all three are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListSetup {
    pub layout_manager: Option<LayoutManagerKind>,
    pub orientation: Option<Orientation>,
    pub item_count: Option<usize>,
}

impl ListSetup {
    /// All three parts, once every one has arrived.
    pub fn complete(&self) -> Option<(LayoutManagerKind, Orientation, usize)> {
        Some((self.layout_manager?, self.orientation?, self.item_count?))
    }
}

property_arrays! {
    OVER_SCROLL_MODE: OverScrollMode = OverScrollMode::IfContentScrolls
        => get_over_scroll_mode, set_over_scroll_mode;

    LAYOUT_MANAGER: Option<LayoutManagerKind> = None => get_layout_manager, set_layout_manager;

    LIST_ORIENTATION: Orientation = Orientation::Vertical => get_list_orientation, set_list_orientation;

    ADAPTER: Option<Rc<dyn ListAdapter>> = None => get_adapter, set_adapter;

    LIST_SETUP: ListSetup = ListSetup::default() => get_list_setup, set_list_setup;
}

/// Record part of the setup and return the updated state.
pub fn update_list_setup(index: usize, f: impl FnOnce(&mut ListSetup)) -> ListSetup {
    LIST_SETUP.with(|arr| {
        arr.update(index, |setup| {
            f(setup);
            *setup
        })
    })
}
