//! RecyclerView - a list container fed by an adapter.
//!
//! `layoutManager`, `orientation` and `itemCount` only make sense together:
//! each records its part in the widget's list setup, and whichever arrives
//! last applies the layout manager and asks the provider for an adapter.

use std::rc::Rc;

use tracing::{debug, warn};

use super::ViewTypeParser;
use crate::adapter::AdapterProvider;
use crate::engine::arrays::list::{self, ListSetup};
use crate::processor::{NumberProcessor, ProcessorMap, StringProcessor, Target};
use crate::types::{Capabilities, LayoutManagerKind, Orientation, OverScrollMode};

pub struct RecyclerViewParser {
    provider: Option<Rc<dyn AdapterProvider>>,
}

impl RecyclerViewParser {
    pub fn new(provider: Option<Rc<dyn AdapterProvider>>) -> Self {
        Self { provider }
    }
}

/// Record one part of the setup; apply everything once all parts are known.
fn record(target: &Target<'_>, provider: Option<&Rc<dyn AdapterProvider>>, part: impl FnOnce(&mut ListSetup)) {
    let setup = list::update_list_setup(target.view, part);
    let Some((layout_manager, orientation, item_count)) = setup.complete() else {
        return;
    };
    list::set_layout_manager(target.view, Some(layout_manager));
    list::set_list_orientation(target.view, orientation);

    let adapter = provider.and_then(|provider| provider.provide_adapter(target.context, item_count));
    debug!(
        view = target.view,
        item_count,
        adapter = adapter.is_some(),
        "list setup complete"
    );
    list::set_adapter(target.view, adapter);
}

impl ViewTypeParser for RecyclerViewParser {
    fn type_name(&self) -> &str {
        "RecyclerView"
    }

    fn parent_type(&self) -> Option<&str> {
        Some("ViewGroup")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::LIST
    }

    fn add_attribute_processors(&self, processors: &mut ProcessorMap) {
        processors.add(
            "overScrollMode",
            StringProcessor::new(|view, mode| list::set_over_scroll_mode(view, OverScrollMode::parse(mode))),
        );

        let provider = self.provider.clone();
        processors.add(
            "layoutManager",
            StringProcessor::try_new(move |target, name| {
                match LayoutManagerKind::parse(name) {
                    Some(kind) => record(target, provider.as_ref(), |setup| setup.layout_manager = Some(kind)),
                    None => warn!(view = target.view, layout_manager = name, "unknown layout manager"),
                }
                Ok(())
            }),
        );

        let provider = self.provider.clone();
        processors.add(
            "orientation",
            StringProcessor::try_new(move |target, value| {
                let orientation = Orientation::parse(value);
                record(target, provider.as_ref(), |setup| setup.orientation = Some(orientation));
                Ok(())
            }),
        );

        let provider = self.provider.clone();
        processors.add(
            "itemCount",
            NumberProcessor::try_new(move |target, count| {
                let count = count.max(0.0) as usize;
                record(target, provider.as_ref(), |setup| setup.item_count = Some(count));
                Ok(())
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::adapter::LayoutAdapterProvider;
    use crate::engine::{self, arrays::text};
    use crate::inflater::InflateContext;
    use crate::parser::{ListModule, ParserRegistry, RegistryBuilder};
    use crate::value::{Layout, ObjectValue};

    fn setup(registry: ParserRegistry) -> Rc<InflateContext> {
        engine::reset_engine();
        InflateContext::builder(registry).build()
    }

    fn list_layout(context: &Rc<InflateContext>, item_count: serde_json::Value) -> Rc<Layout> {
        context
            .compile_layout(&json!({
                "type": "RecyclerView",
                "layoutManager": "LinearLayoutManager",
                "overScrollMode": "never",
                "orientation": "horizontal",
                "itemCount": item_count
            }))
            .unwrap()
    }

    #[test]
    fn test_complete_setup_consults_provider() {
        let item = Rc::new(Layout::new("TextView"));
        let module = ListModule::new(LayoutAdapterProvider::new(item, ObjectValue::new()));
        let registry = RegistryBuilder::new()
            .with_defaults()
            .register_module(&module)
            .build()
            .unwrap();
        let context = setup(registry);

        let layout = list_layout(&context, json!(4));
        let view = context.inflate(&layout, &ObjectValue::new(), None, None).unwrap();

        assert_eq!(list::get_layout_manager(view), Some(LayoutManagerKind::Linear));
        assert_eq!(list::get_list_orientation(view), Orientation::Horizontal);
        assert_eq!(list::get_over_scroll_mode(view), OverScrollMode::Never);
        let adapter = list::get_adapter(view).unwrap();
        assert_eq!(adapter.item_count(), 4);
        let first = adapter.create_item().unwrap();
        assert_eq!(text::get_text(first), "");
    }

    #[test]
    fn test_partial_setup_applies_nothing() {
        let context = setup(ParserRegistry::with_defaults().unwrap());
        let layout = context
            .compile_layout(&json!({"type": "RecyclerView", "layoutManager": "LinearLayoutManager"}))
            .unwrap();
        let view = context.inflate(&layout, &ObjectValue::new(), None, None).unwrap();
        assert_eq!(list::get_layout_manager(view), None);
        assert!(list::get_adapter(view).is_none());
    }

    #[test]
    fn test_without_provider_list_has_no_adapter() {
        let context = setup(ParserRegistry::with_defaults().unwrap());
        let layout = list_layout(&context, json!("@{count}"));
        let view = context
            .inflate(&layout, &ObjectValue::from(json!({"count": 2})), None, None)
            .unwrap();
        assert_eq!(list::get_layout_manager(view), Some(LayoutManagerKind::Linear));
        assert!(list::get_adapter(view).is_none());
    }
}
