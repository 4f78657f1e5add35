//! List adapters.
//!
//! A list widget does not inflate its items through `children`. Once its
//! layout manager, orientation and item count are known it asks the
//! registered [`AdapterProvider`] for a [`ListAdapter`]; the host then pulls
//! item widgets from the adapter as it scrolls.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::Result;
use crate::inflater::InflateContext;
use crate::value::{Layout, ObjectValue};

/// Supplies the adapter of a list widget.
pub trait AdapterProvider {
    /// `None` leaves the list without an adapter.
    fn provide_adapter(&self, context: &Rc<InflateContext>, item_count: usize) -> Option<Rc<dyn ListAdapter>>;
}

/// Source of a list's item widgets.
pub trait ListAdapter {
    fn item_count(&self) -> usize;

    /// Inflate the next item. Items are detached; the host attaches them.
    fn create_item(&self) -> Result<usize>;
}

/// Inflates every item from one template, each bound to the next data index.
pub struct LayoutListAdapter {
    context: Rc<InflateContext>,
    layout: Rc<Layout>,
    data: ObjectValue,
    total_items: usize,
    next_index: Cell<usize>,
}

impl LayoutListAdapter {
    pub fn new(context: Rc<InflateContext>, layout: Rc<Layout>, data: ObjectValue, total_items: usize) -> Self {
        Self {
            context,
            layout,
            data,
            total_items,
            next_index: Cell::new(0),
        }
    }
}

impl ListAdapter for LayoutListAdapter {
    fn item_count(&self) -> usize {
        self.total_items
    }

    fn create_item(&self) -> Result<usize> {
        let index = self.next_index.get();
        let item = self.context.inflate_detached(&self.layout, &self.data, Some(index))?;
        self.next_index.set(index + 1);
        Ok(item)
    }
}

/// Provider handing every list a [`LayoutListAdapter`] over one template and
/// one data object.
pub struct LayoutAdapterProvider {
    layout: Rc<Layout>,
    data: ObjectValue,
}

impl LayoutAdapterProvider {
    pub fn new(layout: Rc<Layout>, data: ObjectValue) -> Self {
        Self { layout, data }
    }
}

impl AdapterProvider for LayoutAdapterProvider {
    fn provide_adapter(&self, context: &Rc<InflateContext>, item_count: usize) -> Option<Rc<dyn ListAdapter>> {
        Some(Rc::new(LayoutListAdapter::new(
            context.clone(),
            self.layout.clone(),
            self.data.clone(),
            item_count,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::engine::{self, arrays::text};
    use crate::parser::ParserRegistry;

    fn setup() -> Rc<InflateContext> {
        engine::reset_engine();
        InflateContext::builder(ParserRegistry::with_defaults().unwrap()).build()
    }

    #[test]
    fn test_items_bind_increasing_indices() {
        let context = setup();
        let layout = context
            .compile_layout(&json!({"type": "TextView", "text": "@{rows[$index]}"}))
            .unwrap();
        let data = ObjectValue::from(json!({"rows": ["a", "b", "c"]}));
        let adapter = LayoutListAdapter::new(context, layout, data, 3);

        let first = adapter.create_item().unwrap();
        let second = adapter.create_item().unwrap();
        assert_eq!(adapter.item_count(), 3);
        assert_eq!(text::get_text(first), "a");
        assert_eq!(text::get_text(second), "b");
        assert_eq!(engine::parent_of(second), None);
        assert_eq!(engine::get_manager(second).unwrap().index(), Some(1));
    }
}
