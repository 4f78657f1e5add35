//! Children - static child lists and data-bound reconciliation.
//!
//! `children` takes one of two shapes:
//!
//! ```text
//! static      "children": [ {layout}, {layout}, ... ]
//! data-bound  "children": { "@": { "collection": "@{orders}", "layout": {layout} } }
//! ```
//!
//! Static children are inflated once with the container's data and then
//! updated in place by the container's manager. Data-bound children are
//! reconciled against the collection every time the binding is applied:
//!
//! 1. children past the new length are released, last first
//! 2. children below both lengths are updated in place, position for position
//! 3. missing children are inflated from the template with their index and
//!    appended
//!
//! Children are matched by position only; nothing is reordered.

use tracing::debug;

use crate::engine;
use crate::error::{InflateError, Result};
use crate::parser::ViewType;
use crate::processor::{AttributeProcessor, Target};
use crate::value::{AttributeResource, Binding, Resource, StyleResource, Value, ValueKind};

/// Keys of a data-bound children configuration.
const COLLECTION: &str = "collection";
const LAYOUT: &str = "layout";

/// Processor of the `children` attribute.
pub struct ChildrenProcessor;

impl AttributeProcessor for ChildrenProcessor {
    fn handle_value(&self, target: &Target<'_>, value: &Value) -> Result<()> {
        let Some(manager) = target.manager() else {
            return Err(InflateError::unsupported(target.attribute, "children without a manager"));
        };
        if target.context.registry().handle_children(manager.view_type(), target, value)? {
            Ok(())
        } else {
            Err(InflateError::unsupported(target.attribute, "children"))
        }
    }

    fn handle_binding(&self, target: &Target<'_>, binding: &Binding) -> Result<()> {
        reconcile_children(target, binding)
    }

    fn handle_resource(&self, target: &Target<'_>, _resource: &Resource) -> Result<()> {
        Err(InflateError::invalid_type(target.attribute, ValueKind::Resource))
    }

    fn handle_attribute_resource(&self, target: &Target<'_>, _attribute: &AttributeResource) -> Result<()> {
        Err(InflateError::invalid_type(target.attribute, ValueKind::AttributeResource))
    }

    fn handle_style_resource(&self, target: &Target<'_>, _style: &StyleResource) -> Result<()> {
        Err(InflateError::invalid_type(target.attribute, ValueKind::StyleResource))
    }
}

/// Inflate a static child list into `view`.
///
/// Every element is checked before anything is inflated, so a bad element
/// leaves the container untouched.
pub(crate) fn inflate_static_children(target: &Target<'_>, children: &Value) -> Result<()> {
    let elements = match children {
        Value::Null => return Ok(()),
        Value::Array(elements) => elements,
        other => return Err(InflateError::invalid_type(target.attribute, other.kind())),
    };
    let layouts = elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            element.as_layout().ok_or(InflateError::InvalidChildType {
                index,
                variant: element.kind(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let Some(manager) = target.manager() else {
        return Err(InflateError::unsupported(target.attribute, "children without a manager"));
    };
    let data = manager.data();
    let index = manager.index();
    for layout in layouts {
        let child = target.context.inflate(layout, &data, Some(target.view), index)?;
        attach(target, manager.view_type(), child)?;
    }
    debug!(view = target.view, count = elements.len(), "static children inflated");
    Ok(())
}

/// Reconcile the children of a container against a data-bound collection.
pub fn reconcile_children(target: &Target<'_>, binding: &Binding) -> Result<()> {
    let Some(config) = binding.nested() else {
        return Err(InflateError::invalid_type(target.attribute, ValueKind::Binding));
    };
    let Some(manager) = target.manager() else {
        return Err(InflateError::unsupported(target.attribute, "children without a manager"));
    };
    manager.set_has_data_bound_children();

    let template = config.get(LAYOUT).and_then(Value::as_layout);
    let (Some(collection), Some(template)) = (config.get(COLLECTION), template) else {
        let field = if config.contains_key(COLLECTION) { LAYOUT } else { COLLECTION };
        return Err(InflateError::MissingRequiredField {
            attribute: target.attribute.to_string(),
            field,
        });
    };

    let data = manager.data();
    let collection = match collection {
        Value::Binding(binding) => manager.data_context().evaluate(binding),
        other => other.clone(),
    };
    if collection.is_null() {
        debug!(view = target.view, "null collection, children left as they are");
        return Ok(());
    }
    let length = collection.expect_array(COLLECTION)?.len();

    let current = engine::child_count(target.view);
    for position in (length..current).rev() {
        engine::remove_child_at(target.view, position);
    }

    let reused = current.min(length);
    for position in 0..reused {
        let child = engine::child_at(target.view, position);
        if let Some(child_manager) = child.and_then(engine::get_manager) {
            child_manager.update(Some(&data))?;
        }
    }

    for position in reused..length {
        let child = target.context.inflate(template, &data, Some(target.view), Some(position))?;
        attach(target, manager.view_type(), child)?;
    }

    debug!(
        view = target.view,
        removed = current.saturating_sub(length),
        updated = reused,
        inflated = length.saturating_sub(current),
        "children reconciled"
    );
    Ok(())
}

/// Add `child` through the container's type chain, releasing it when no type
/// accepts it.
fn attach(target: &Target<'_>, container_type: ViewType, child: usize) -> Result<()> {
    if target.context.registry().add_view(container_type, target.view, child) {
        Ok(())
    } else {
        engine::release_index(child);
        Err(InflateError::unsupported(target.attribute, "adding child views"))
    }
}
