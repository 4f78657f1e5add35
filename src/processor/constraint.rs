//! Constraint processor - relations resolved after the next layout pass.
//!
//! `layout_constraintLeft_toRightOf: "avatar"` cannot be applied when the
//! attribute is processed: the sibling named "avatar" may not exist yet and
//! the widget is not attached to its container. The processor registers a
//! one-shot layout callback instead. When it fires:
//!
//! 1. the widget's parent must be a constraint container, otherwise the
//!    relation is dropped (the widget moved or was detached)
//! 2. `"parent"` targets the container; any other name targets the first
//!    child whose first declared attribute value equals it, falling back to
//!    the container when none does
//! 3. the relation is written to the container's constraint set

use tracing::debug;

use super::{AttributeProcessor, Target};
use crate::engine::arrays::constraint::{self, ConstraintTarget};
use crate::engine::arrays::core;
use crate::engine::{self, on_next_layout};
use crate::error::{InflateError, Result};
use crate::types::{Capabilities, Side};
use crate::value::{AttributeResource, Resource, StyleResource, Value};

/// Reserved reference naming the container itself.
pub const PARENT_REFERENCE: &str = "parent";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintRelation {
    Connect { start_side: Side, end_side: Side },
    HorizontalBias,
    VerticalBias,
}

pub struct ConstraintProcessor {
    relation: ConstraintRelation,
}

impl ConstraintProcessor {
    pub fn connect(start_side: Side, end_side: Side) -> Self {
        Self {
            relation: ConstraintRelation::Connect { start_side, end_side },
        }
    }

    pub fn horizontal_bias() -> Self {
        Self {
            relation: ConstraintRelation::HorizontalBias,
        }
    }

    pub fn vertical_bias() -> Self {
        Self {
            relation: ConstraintRelation::VerticalBias,
        }
    }

    pub fn relation(&self) -> ConstraintRelation {
        self.relation
    }

    fn bias(target: &Target<'_>, value: &Value) -> Result<f32> {
        value
            .as_primitive()
            .and_then(|primitive| primitive.as_f64())
            .map(|bias| bias as f32)
            .ok_or_else(|| InflateError::invalid_value(target.attribute, value))
    }
}

impl AttributeProcessor for ConstraintProcessor {
    fn handle_value(&self, target: &Target<'_>, value: &Value) -> Result<()> {
        match value {
            Value::Null => Ok(()),
            Value::Primitive(_) => {
                match self.relation {
                    ConstraintRelation::Connect { start_side, end_side } => {
                        set_constraint_on_layout_added(target.view, value.to_string(), start_side, end_side)
                    }
                    ConstraintRelation::HorizontalBias => {
                        set_horizontal_bias(target.view, Self::bias(target, value)?)
                    }
                    ConstraintRelation::VerticalBias => {
                        set_vertical_bias(target.view, Self::bias(target, value)?)
                    }
                }
                Ok(())
            }
            other => Err(InflateError::invalid_type(target.attribute, other.kind())),
        }
    }

    fn handle_resource(&self, target: &Target<'_>, _resource: &Resource) -> Result<()> {
        Err(InflateError::unsupported(target.attribute, "resource constraint references"))
    }

    fn handle_attribute_resource(&self, target: &Target<'_>, _attribute: &AttributeResource) -> Result<()> {
        Err(InflateError::unsupported(target.attribute, "theme constraint references"))
    }

    fn handle_style_resource(&self, target: &Target<'_>, _style: &StyleResource) -> Result<()> {
        Err(InflateError::unsupported(target.attribute, "style constraint references"))
    }
}

// =============================================================================
// Deferred application
// =============================================================================

/// Parent of `view`, if it is still a constraint container.
fn constraint_parent(view: usize) -> Option<usize> {
    let parent = engine::parent_of(view)?;
    core::has_capability(parent, Capabilities::CONSTRAINTS).then_some(parent)
}

/// First child of `container` whose first declared attribute was authored as
/// `reference`.
fn find_sibling(container: usize, reference: &str) -> Option<usize> {
    engine::children(container).into_iter().find(|&child| {
        engine::get_manager(child).is_some_and(|manager| manager.layout().is_named(reference))
    })
}

/// Connect `start_side` of `view` to `end_side` of `reference` after the
/// next layout pass.
pub fn set_constraint_on_layout_added(view: usize, reference: String, start_side: Side, end_side: Side) {
    on_next_layout(view, move || {
        let Some(container) = constraint_parent(view) else {
            debug!(view, reference = %reference, "constraint dropped: parent is not a constraint container");
            return;
        };
        let target = if reference == PARENT_REFERENCE {
            ConstraintTarget::Parent
        } else {
            find_sibling(container, &reference)
                .map(ConstraintTarget::View)
                .unwrap_or(ConstraintTarget::Parent)
        };
        constraint::update_constraint_set(container, |set| {
            set.connect(view, start_side, target, end_side)
        });
    });
}

pub fn set_horizontal_bias(view: usize, bias: f32) {
    on_next_layout(view, move || {
        match constraint_parent(view) {
            Some(container) => {
                constraint::update_constraint_set(container, |set| set.set_horizontal_bias(view, bias))
            }
            None => debug!(view, "horizontal bias dropped: parent is not a constraint container"),
        }
    });
}

pub fn set_vertical_bias(view: usize, bias: f32) {
    on_next_layout(view, move || {
        match constraint_parent(view) {
            Some(container) => {
                constraint::update_constraint_set(container, |set| set.set_vertical_bias(view, bias))
            }
            None => debug!(view, "vertical bias dropped: parent is not a constraint container"),
        }
    });
}
