//! Attribute processors.
//!
//! A processor turns one attribute value into one widget mutation. The
//! default [`AttributeProcessor::process`] dispatches on the value variant:
//!
//! ```text
//! Binding            → handle_binding            (evaluate, then handle_value)
//! Resource           → handle_resource           (resolve, then handle_value)
//! AttributeResource  → handle_attribute_resource (resolve, then handle_value)
//! StyleResource      → handle_style_resource     (resolve, then handle_value)
//! anything else      → handle_value
//! ```
//!
//! Processors are built once per view type when the registry is built and
//! shared by every widget of that type. They hold no per-widget state;
//! attributes that must be combined (a list's layout manager, a text
//! widget's typeface) keep their shared state in the engine arrays of the
//! widget.

mod color;
mod constraint;
mod dimension;
mod gravity;
mod primitive;

pub use color::{ColorProcessor, DrawableProcessor};
pub use constraint::{
    ConstraintProcessor, ConstraintRelation, PARENT_REFERENCE, set_constraint_on_layout_added,
    set_horizontal_bias, set_vertical_bias,
};
pub use dimension::DimensionProcessor;
pub use gravity::GravityProcessor;
pub use primitive::{BooleanProcessor, NumberProcessor, StringProcessor};

use std::rc::Rc;

use tracing::{trace, warn};

use crate::config::DisplayMetrics;
use crate::engine;
use crate::error::Result;
use crate::inflater::InflateContext;
use crate::manager::Manager;
use crate::value::{AttributeResource, Binding, ObjectValue, Resource, StyleResource, Value};

/// The widget and attribute a processor is applied to.
pub struct Target<'a> {
    pub view: usize,
    pub attribute: &'a str,
    pub context: &'a Rc<InflateContext>,
}

impl<'a> Target<'a> {
    pub fn new(view: usize, attribute: &'a str, context: &'a Rc<InflateContext>) -> Self {
        Self {
            view,
            attribute,
            context,
        }
    }

    pub fn manager(&self) -> Option<Rc<Manager>> {
        engine::get_manager(self.view)
    }

    /// Evaluate against the widget's current data context.
    pub fn evaluate(&self, binding: &Binding) -> Value {
        match self.manager() {
            Some(manager) => manager.data_context().evaluate(binding),
            None => binding.evaluate(&ObjectValue::new(), None),
        }
    }

    pub fn metrics(&self) -> &DisplayMetrics {
        &self.context.config().display
    }
}

pub trait AttributeProcessor {
    /// Apply a literal (or an already evaluated/resolved) value.
    fn handle_value(&self, target: &Target<'_>, value: &Value) -> Result<()>;

    fn process(&self, target: &Target<'_>, value: &Value) -> Result<()> {
        trace!(view = target.view, attribute = target.attribute, %value, "apply");
        match value {
            Value::Binding(binding) => self.handle_binding(target, binding),
            Value::Resource(resource) => self.handle_resource(target, resource),
            Value::AttributeResource(attribute) => self.handle_attribute_resource(target, attribute),
            Value::StyleResource(style) => self.handle_style_resource(target, style),
            other => self.handle_value(target, other),
        }
    }

    fn handle_binding(&self, target: &Target<'_>, binding: &Binding) -> Result<()> {
        let value = target.evaluate(binding);
        self.handle_value(target, &value)
    }

    fn handle_resource(&self, target: &Target<'_>, resource: &Resource) -> Result<()> {
        match resource.resolve(target.context.resources()) {
            Some(value) => self.handle_value(target, &value),
            None => {
                warn!(attribute = target.attribute, %resource, "unresolved resource");
                Ok(())
            }
        }
    }

    fn handle_attribute_resource(&self, target: &Target<'_>, attribute: &AttributeResource) -> Result<()> {
        match attribute.resolve(target.context.resources()) {
            Some(value) => self.handle_value(target, &value),
            None => {
                warn!(attribute = target.attribute, %attribute, "unresolved theme attribute");
                Ok(())
            }
        }
    }

    fn handle_style_resource(&self, target: &Target<'_>, style: &StyleResource) -> Result<()> {
        match style.resolve(target.context.resources()) {
            Some(value) => self.handle_value(target, &value),
            None => {
                warn!(attribute = target.attribute, %style, "unresolved style attribute");
                Ok(())
            }
        }
    }

    /// Fold a literal into a cheaper form once, when a layout is compiled.
    ///
    /// Must be idempotent and must not touch any widget.
    fn compile(&self, value: Value, _context: &InflateContext) -> Value {
        value
    }
}

/// Processors a view type declares, by attribute name.
#[derive(Default)]
pub struct ProcessorMap {
    entries: Vec<(String, Rc<dyn AttributeProcessor>)>,
}

impl ProcessorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `processor` for `name`. A later registration of the same
    /// name replaces the earlier one.
    pub fn add(&mut self, name: &str, processor: impl AttributeProcessor + 'static) {
        self.add_shared(name, Rc::new(processor));
    }

    pub fn add_shared(&mut self, name: &str, processor: Rc<dyn AttributeProcessor>) {
        match self.entries.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = processor,
            None => self.entries.push((name.to_string(), processor)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub(crate) fn into_entries(self) -> Vec<(String, Rc<dyn AttributeProcessor>)> {
        self.entries
    }
}
