//! Inflater - layouts in, live widgets out.
//!
//! [`InflateContext`] bundles everything inflation reads: the parser registry,
//! the resource provider and the configuration. It is shared by `Rc` with
//! every manager it creates, so `update` long after inflation still sees the
//! same registry and resources.
//!
//! # Inflation
//!
//! ```text
//! layout ──► parser.create_view ──► type + capabilities recorded
//!                                   │
//!                                   ▼
//!            DataContext (data + index + layout scope) ──► Manager
//!                                   │
//!                                   ▼
//!            attributes applied in declaration order, bindings tracked
//! ```
//!
//! A failure at any step releases the widget, and with it every child
//! already attached, before the error is returned.

use std::rc::Rc;

use tracing::{trace, warn};

use crate::config::{InflateConfig, UnknownAttributePolicy};
use crate::engine::{self, arrays::core};
use crate::error::{InflateError, Result};
use crate::manager::{BoundAttribute, DataContext};
use crate::parser::{ParserRegistry, ViewType};
use crate::processor::Target;
use crate::resource::{NoResources, ResourceProvider};
use crate::value::{Attribute, Binding, Layout, ObjectValue, Value, parse_literal};

/// Key selecting the view type of a layout node.
const TYPE_KEY: &str = "type";
/// Key of a layout node's scoped data.
const DATA_KEY: &str = "data";
/// Sole key of a nested binding object.
const NESTED_BINDING_KEY: &str = "@";

pub struct InflateContext {
    registry: ParserRegistry,
    resources: Box<dyn ResourceProvider>,
    config: InflateConfig,
}

pub struct InflateContextBuilder {
    registry: ParserRegistry,
    resources: Box<dyn ResourceProvider>,
    config: InflateConfig,
}

impl InflateContextBuilder {
    pub fn resources(mut self, resources: impl ResourceProvider + 'static) -> Self {
        self.resources = Box::new(resources);
        self
    }

    pub fn config(mut self, config: InflateConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Rc<InflateContext> {
        Rc::new(InflateContext {
            registry: self.registry,
            resources: self.resources,
            config: self.config,
        })
    }
}

impl InflateContext {
    /// Start from `registry`, no resources and the default configuration.
    pub fn builder(registry: ParserRegistry) -> InflateContextBuilder {
        InflateContextBuilder {
            registry,
            resources: Box::new(NoResources),
            config: InflateConfig::default(),
        }
    }

    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    pub fn resources(&self) -> &dyn ResourceProvider {
        self.resources.as_ref()
    }

    pub fn config(&self) -> &InflateConfig {
        &self.config
    }

    // =========================================================================
    // Inflation
    // =========================================================================

    /// Inflate `layout` against `data`.
    ///
    /// `parent` is a hint for the widget factory; attaching the result is the
    /// caller's job. `data_index` is the position within an enclosing
    /// repeated collection.
    pub fn inflate(
        self: &Rc<Self>,
        layout: &Rc<Layout>,
        data: &ObjectValue,
        parent: Option<usize>,
        data_index: Option<usize>,
    ) -> Result<usize> {
        let view_type = self
            .registry
            .view_type(&layout.view_type)
            .ok_or_else(|| InflateError::UnknownViewType(layout.view_type.clone()))?;
        let view = self
            .registry
            .parser(view_type)
            .create_view(self, layout, data, parent, data_index)?;

        match self.bind(view_type, view, layout, data, data_index) {
            Ok(()) => Ok(view),
            Err(err) => {
                engine::release_index(view);
                Err(err)
            }
        }
    }

    /// Inflate a widget that has no parent, such as a list item.
    pub fn inflate_detached(
        self: &Rc<Self>,
        layout: &Rc<Layout>,
        data: &ObjectValue,
        data_index: Option<usize>,
    ) -> Result<usize> {
        self.inflate(layout, data, None, data_index)
    }

    fn bind(
        self: &Rc<Self>,
        view_type: ViewType,
        view: usize,
        layout: &Rc<Layout>,
        data: &ObjectValue,
        data_index: Option<usize>,
    ) -> Result<()> {
        core::set_view_type(view, layout.view_type.clone());
        core::set_capabilities(view, self.registry.capabilities(view_type));

        let data_context = DataContext::create(data, layout.data.as_ref(), data_index);
        let manager = Rc::new(
            self.registry
                .create_manager(self, view_type, view, layout, data_context),
        );
        engine::set_manager(view, manager.clone());

        if let Some(extras) = &layout.extras {
            for (name, _) in extras.iter() {
                self.unknown_attribute(view_type, name)?;
            }
        }

        for Attribute { id, value } in &layout.attributes {
            let (Some(processor), Some(name)) = (
                self.registry.processor(view_type, *id),
                self.registry.attribute_name(*id),
            ) else {
                self.unknown_attribute(view_type, &format!("#{}", id.index()))?;
                continue;
            };
            if value.is_binding() {
                manager.track_binding(BoundAttribute {
                    name: name.clone(),
                    value: value.clone(),
                    processor: processor.clone(),
                });
            }
            processor.process(&Target::new(view, name, self), value)?;
        }

        trace!(
            view,
            view_type = %layout.view_type,
            attributes = layout.attributes.len(),
            "inflated"
        );
        Ok(())
    }

    fn unknown_attribute(&self, view_type: ViewType, attribute: &str) -> Result<()> {
        match self.config.unknown_attribute {
            UnknownAttributePolicy::Ignore => Ok(()),
            UnknownAttributePolicy::Log => {
                warn!(view_type = self.registry.type_name(view_type), attribute, "unknown attribute");
                Ok(())
            }
            UnknownAttributePolicy::Error => Err(InflateError::UnknownAttribute {
                view_type: self.registry.type_name(view_type).to_string(),
                attribute: attribute.to_string(),
            }),
        }
    }

    // =========================================================================
    // Compilation
    // =========================================================================

    /// Compile a JSON layout node.
    ///
    /// Attribute names are resolved through the node type's parent chain and
    /// each value is compiled once by its processor. Keys no type in the chain
    /// knows are kept in `extras`.
    pub fn compile_layout(&self, json: &serde_json::Value) -> Result<Rc<Layout>> {
        match json {
            serde_json::Value::Object(node) => self.compile_node(node).map(Rc::new),
            other => Err(InflateError::TypeMismatch {
                attribute: "layout".to_string(),
                expected: "an object",
                found: Value::from(other.clone()).kind(),
            }),
        }
    }

    pub fn compile_layout_str(&self, json: &str) -> Result<Rc<Layout>> {
        self.compile_layout(&serde_json::from_str(json)?)
    }

    fn compile_node(&self, node: &serde_json::Map<String, serde_json::Value>) -> Result<Layout> {
        let type_name = node
            .get(TYPE_KEY)
            .and_then(serde_json::Value::as_str)
            .ok_or(InflateError::MissingRequiredField {
                attribute: "layout".to_string(),
                field: TYPE_KEY,
            })?;
        let view_type = self
            .registry
            .view_type(type_name)
            .ok_or_else(|| InflateError::UnknownViewType(type_name.to_string()))?;

        let mut layout = Layout::new(type_name);
        let mut extras = ObjectValue::new();
        for (key, json) in node {
            match key.as_str() {
                TYPE_KEY => {}
                DATA_KEY => match json {
                    serde_json::Value::Object(scope) => layout.data = Some(self.compile_object(scope)?),
                    other => {
                        return Err(InflateError::TypeMismatch {
                            attribute: DATA_KEY.to_string(),
                            expected: "an object",
                            found: Value::from(other.clone()).kind(),
                        });
                    }
                },
                _ => match self.registry.resolve(view_type, key) {
                    Some((id, processor)) => {
                        if layout.attributes.is_empty() {
                            layout.first_literal = json.as_str().map(str::to_string);
                        }
                        let value = processor.compile(self.compile_value(json)?, self);
                        layout.attributes.push(Attribute { id, value });
                    }
                    None => {
                        extras.insert(key.as_str(), Value::from(json.clone()));
                    }
                },
            }
        }
        if !extras.is_empty() {
            layout.extras = Some(extras);
        }
        Ok(layout)
    }

    fn compile_value(&self, json: &serde_json::Value) -> Result<Value> {
        match json {
            serde_json::Value::String(literal) => parse_literal(literal),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| self.compile_value(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::from),
            serde_json::Value::Object(node) if node.contains_key(TYPE_KEY) => {
                self.compile_node(node).map(|layout| Value::Layout(Rc::new(layout)))
            }
            serde_json::Value::Object(node) => match node.get(NESTED_BINDING_KEY) {
                Some(serde_json::Value::Object(config)) if node.len() == 1 => {
                    Ok(Value::from(Binding::Nested(self.compile_object(config)?)))
                }
                _ => self.compile_object(node).map(Value::Object),
            },
            other => Ok(Value::from(other.clone())),
        }
    }

    fn compile_object(&self, node: &serde_json::Map<String, serde_json::Value>) -> Result<ObjectValue> {
        let mut object = ObjectValue::new();
        for (key, json) in node {
            object.insert(key.as_str(), self.compile_value(json)?);
        }
        Ok(object)
    }
}

impl std::fmt::Debug for InflateContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InflateContext")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::engine::arrays::{core, layout, visual};
    use crate::types::{Drawable, Edges, MATCH_PARENT, Rgba, Visibility};

    fn setup() -> Rc<InflateContext> {
        engine::reset_engine();
        InflateContext::builder(ParserRegistry::with_defaults().unwrap()).build()
    }

    fn setup_with(config: InflateConfig) -> Rc<InflateContext> {
        engine::reset_engine();
        InflateContext::builder(ParserRegistry::with_defaults().unwrap())
            .config(config)
            .build()
    }

    #[test]
    fn test_compile_resolves_inherited_attributes() {
        let context = setup();
        let layout = context
            .compile_layout(&json!({
                "type": "LinearLayout",
                "background": "#ff0000",
                "orientation": "vertical",
                "flavour": "mint"
            }))
            .unwrap();

        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[0].value, Value::Drawable(Drawable::Color(Rgba::RED)));
        assert_eq!(layout.extras.as_ref().and_then(|e| e.get("flavour")), Some(&Value::from("mint")));
    }

    #[test]
    fn test_compile_rejects_unknown_type() {
        let context = setup();
        let err = context.compile_layout(&json!({"type": "Carousel"})).unwrap_err();
        assert!(matches!(err, InflateError::UnknownViewType(name) if name == "Carousel"));

        let err = context.compile_layout(&json!({"text": "hi"})).unwrap_err();
        assert!(matches!(err, InflateError::MissingRequiredField { field: "type", .. }));
    }

    #[test]
    fn test_compile_nested_binding() {
        let context = setup();
        let layout = context
            .compile_layout(&json!({
                "type": "ViewGroup",
                "children": {"@": {"collection": "@{rows}", "layout": {"type": "View"}}}
            }))
            .unwrap();
        let binding = layout.attributes[0].value.as_binding().unwrap();
        let config = binding.nested().unwrap();
        assert!(config.get("collection").unwrap().is_binding());
        assert!(config.get("layout").unwrap().is_layout());
    }

    #[test]
    fn test_inflate_applies_view_attributes() {
        let context = setup();
        let layout = context
            .compile_layout(&json!({
                "type": "View",
                "id": "banner",
                "visibility": "gone",
                "layout_width": "match_parent",
                "padding": "4dp",
                "paddingTop": 10,
                "alpha": "@{opacity}"
            }))
            .unwrap();
        let view = context
            .inflate(&layout, &ObjectValue::from(json!({"opacity": 0.5})), None, None)
            .unwrap();

        assert_eq!(engine::get_id(view).as_deref(), Some("banner"));
        assert_eq!(core::get_visibility(view), Visibility::Gone);
        assert_eq!(core::get_view_type(view), "View");
        assert_eq!(layout::get_width(view), MATCH_PARENT);
        assert_eq!(
            layout::get_padding(view),
            Edges { left: 4.0, top: 10.0, right: 4.0, bottom: 4.0 }
        );
        assert_eq!(visual::get_alpha(view), 0.5);

        let manager = engine::get_manager(view).unwrap();
        assert_eq!(manager.bound_attributes().len(), 1);
        assert_eq!(&*manager.bound_attributes()[0].name, "alpha");
    }

    #[test]
    fn test_scope_data_reaches_bindings() {
        let context = setup();
        let layout = context
            .compile_layout(&json!({
                "type": "TextView",
                "data": {"name": "@{user.name}"},
                "text": "@{name}"
            }))
            .unwrap();
        let view = context
            .inflate(&layout, &ObjectValue::from(json!({"user": {"name": "Ada"}})), None, None)
            .unwrap();
        assert_eq!(crate::engine::arrays::text::get_text(view), "Ada");
    }

    #[test]
    fn test_unknown_attribute_policy_error() {
        let context = setup_with(InflateConfig::default().with_unknown_attribute(UnknownAttributePolicy::Error));
        let layout = context.compile_layout(&json!({"type": "View", "flavour": "mint"})).unwrap();
        let err = context.inflate(&layout, &ObjectValue::new(), None, None).unwrap_err();
        assert!(matches!(err, InflateError::UnknownAttribute { .. }));
        assert_eq!(engine::get_allocated_count(), 0);
    }

    #[test]
    fn test_failed_inflation_releases_widget() {
        let context = setup();
        let layout = context
            .compile_layout(&json!({"type": "TextView", "textColor": "blurple"}))
            .unwrap();
        let err = context.inflate(&layout, &ObjectValue::new(), None, None).unwrap_err();
        assert!(matches!(err, InflateError::InvalidValue { .. }));
        assert_eq!(engine::get_allocated_count(), 0);
        assert_eq!(engine::manager_count(), 0);
    }
}
