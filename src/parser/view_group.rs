//! ViewGroup - the base container type.

use std::rc::Rc;

use super::container::{ChildrenProcessor, inflate_static_children};
use super::{ViewType, ViewTypeParser, parse_attribute};
use crate::engine::{self, arrays::group};
use crate::error::Result;
use crate::inflater::InflateContext;
use crate::manager::{DataContext, Manager};
use crate::processor::{BooleanProcessor, ProcessorMap, StringProcessor, Target};
use crate::types::{Capabilities, LayoutMode};
use crate::value::{Layout, Value};

pub struct ViewGroupParser;

impl ViewTypeParser for ViewGroupParser {
    fn type_name(&self) -> &str {
        "ViewGroup"
    }

    fn parent_type(&self) -> Option<&str> {
        Some("View")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONTAINER
    }

    fn create_manager(
        &self,
        context: &Rc<InflateContext>,
        caller: ViewType,
        view: usize,
        layout: &Rc<Layout>,
        data_context: &DataContext,
    ) -> Option<Manager> {
        Some(Manager::group(
            context.clone(),
            caller,
            view,
            layout.clone(),
            data_context.clone(),
        ))
    }

    fn add_attribute_processors(&self, processors: &mut ProcessorMap) {
        processors.add("clipChildren", BooleanProcessor::new(group::set_clip_children));
        processors.add("clipToPadding", BooleanProcessor::new(group::set_clip_to_padding));
        processors.add("splitMotionEvents", BooleanProcessor::new(group::set_split_motion_events));
        processors.add(
            "layoutMode",
            StringProcessor::try_new(|target, value| {
                let mode = parse_attribute(target, value, LayoutMode::parse)?;
                group::set_layout_mode(target.view, mode);
                Ok(())
            }),
        );
        processors.add("children", ChildrenProcessor);
    }

    fn handle_children(&self, target: &Target<'_>, children: &Value) -> Result<bool> {
        inflate_static_children(target, children)?;
        Ok(true)
    }

    fn add_view(&self, parent: usize, child: usize) -> bool {
        engine::add_child(parent, child);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use crate::engine::{self, arrays::core, arrays::text};
    use crate::error::InflateError;
    use crate::inflater::InflateContext;
    use crate::parser::ParserRegistry;
    use crate::value::{ObjectValue, ValueKind};

    fn setup() -> Rc<InflateContext> {
        engine::reset_engine();
        InflateContext::builder(ParserRegistry::with_defaults().unwrap()).build()
    }

    #[test]
    fn test_static_children_inflate_in_order() {
        let context = setup();
        let layout = context
            .compile_layout(&json!({
                "type": "LinearLayout",
                "children": [
                    {"type": "TextView", "text": "@{first}"},
                    {"type": "TextView", "text": "@{second}"}
                ]
            }))
            .unwrap();
        let data = ObjectValue::from(json!({"first": "a", "second": "b"}));
        let root = context.inflate(&layout, &data, None, None).unwrap();

        let children = engine::children(root);
        assert_eq!(children.len(), 2);
        assert_eq!(text::get_text(children[0]), "a");
        assert_eq!(text::get_text(children[1]), "b");
        assert_eq!(core::get_parent_index(children[1]), Some(root));
    }

    #[test]
    fn test_static_children_follow_container_update() {
        let context = setup();
        let layout = context
            .compile_layout(&json!({
                "type": "ViewGroup",
                "children": [{"type": "TextView", "text": "@{title}"}]
            }))
            .unwrap();
        let root = context
            .inflate(&layout, &ObjectValue::from(json!({"title": "before"})), None, None)
            .unwrap();

        let manager = engine::get_manager(root).unwrap();
        assert!(!manager.has_data_bound_children());
        manager.update(Some(&ObjectValue::from(json!({"title": "after"})))).unwrap();
        assert_eq!(text::get_text(engine::child_at(root, 0).unwrap()), "after");
    }

    #[test]
    fn test_non_layout_child_is_rejected_before_inflating() {
        let context = setup();
        let layout = context
            .compile_layout(&json!({
                "type": "ViewGroup",
                "children": [{"type": "View"}, "not a layout"]
            }))
            .unwrap();
        let err = context.inflate(&layout, &ObjectValue::new(), None, None).unwrap_err();
        assert!(matches!(
            err,
            InflateError::InvalidChildType { index: 1, variant: ValueKind::Primitive }
        ));
        assert_eq!(engine::get_allocated_count(), 0);
    }
}
