//! Managers - per-widget runtime state.
//!
//! A [`Manager`] ties one live widget to the [`Layout`] it was inflated from
//! and the [`DataContext`] its bindings read. `update` is the only way data
//! reaches a widget after inflation:
//!
//! 1. the data context is replaced (scoped entries re-evaluated)
//! 2. every attribute whose value is a binding is applied again
//! 3. containers pass their data on to their static children; containers
//!    with data-bound children reconcile instead, through the `children`
//!    binding re-applied in step 2

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::trace;

use crate::engine;
use crate::error::Result;
use crate::inflater::InflateContext;
use crate::parser::ViewType;
use crate::processor::{AttributeProcessor, Target};
use crate::value::{Binding, Layout, ObjectValue, Value};

// =============================================================================
// Data Context
// =============================================================================

/// The data one widget and its subtree can see.
///
/// `index` is the position within an enclosing repeated collection, `None`
/// outside of one. A layout with its own `data` scope overlays those entries
/// (bindings evaluated against the incoming data) on the incoming data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataContext {
    data: ObjectValue,
    index: Option<usize>,
    scope: Option<ObjectValue>,
}

impl DataContext {
    pub fn new(data: ObjectValue, index: Option<usize>) -> Self {
        Self {
            data,
            index,
            scope: None,
        }
    }

    /// Context for a widget inflated with `data` at `index`.
    pub fn create(data: &ObjectValue, scope: Option<&ObjectValue>, index: Option<usize>) -> Self {
        let mut context = Self {
            data: data.clone(),
            index,
            scope: scope.cloned(),
        };
        if let Some(scope) = scope {
            context.data = overlay(data, scope, index);
        }
        context
    }

    /// Same index and scope, new incoming data.
    pub fn with_data(&self, data: &ObjectValue) -> Self {
        Self::create(data, self.scope.as_ref(), self.index)
    }

    pub fn data(&self) -> &ObjectValue {
        &self.data
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn has_own_scope(&self) -> bool {
        self.scope.is_some()
    }

    pub fn evaluate(&self, binding: &Binding) -> Value {
        binding.evaluate(&self.data, self.index)
    }
}

fn overlay(data: &ObjectValue, scope: &ObjectValue, index: Option<usize>) -> ObjectValue {
    let mut merged = data.clone();
    for (key, value) in scope.iter() {
        let value = match value {
            Value::Binding(binding) => binding.evaluate(data, index),
            other => other.clone(),
        };
        merged.insert(key, value);
    }
    merged
}

// =============================================================================
// Manager
// =============================================================================

/// An attribute whose value is a binding, re-applied on every update.
#[derive(Clone)]
pub struct BoundAttribute {
    pub name: Rc<str>,
    pub value: Value,
    pub processor: Rc<dyn AttributeProcessor>,
}

/// Extra state of container managers.
#[derive(Debug, Default)]
struct GroupState {
    has_data_bound_children: Cell<bool>,
}

pub struct Manager {
    context: Rc<InflateContext>,
    view_type: ViewType,
    view: usize,
    layout: Rc<Layout>,
    data_context: RefCell<DataContext>,
    bound_attributes: RefCell<Vec<BoundAttribute>>,
    group: Option<GroupState>,
}

impl Manager {
    pub fn new(
        context: Rc<InflateContext>,
        view_type: ViewType,
        view: usize,
        layout: Rc<Layout>,
        data_context: DataContext,
    ) -> Self {
        Self {
            context,
            view_type,
            view,
            layout,
            data_context: RefCell::new(data_context),
            bound_attributes: RefCell::new(Vec::new()),
            group: None,
        }
    }

    /// Manager of a container: `update` also reaches the children.
    pub fn group(
        context: Rc<InflateContext>,
        view_type: ViewType,
        view: usize,
        layout: Rc<Layout>,
        data_context: DataContext,
    ) -> Self {
        Self {
            group: Some(GroupState::default()),
            ..Self::new(context, view_type, view, layout, data_context)
        }
    }

    pub fn context(&self) -> &Rc<InflateContext> {
        &self.context
    }

    /// The concrete type the widget was inflated as.
    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    pub fn view(&self) -> usize {
        self.view
    }

    pub fn layout(&self) -> &Rc<Layout> {
        &self.layout
    }

    pub fn data_context(&self) -> DataContext {
        self.data_context.borrow().clone()
    }

    pub fn data(&self) -> ObjectValue {
        self.data_context.borrow().data.clone()
    }

    pub fn index(&self) -> Option<usize> {
        self.data_context.borrow().index
    }

    pub fn is_group(&self) -> bool {
        self.group.is_some()
    }

    pub fn has_data_bound_children(&self) -> bool {
        self.group
            .as_ref()
            .is_some_and(|group| group.has_data_bound_children.get())
    }

    /// Children of this container are driven by a collection binding.
    pub fn set_has_data_bound_children(&self) {
        if let Some(group) = &self.group {
            group.has_data_bound_children.set(true);
        }
    }

    pub fn bound_attributes(&self) -> Vec<BoundAttribute> {
        self.bound_attributes.borrow().clone()
    }

    pub(crate) fn track_binding(&self, bound: BoundAttribute) {
        self.bound_attributes.borrow_mut().push(bound);
    }

    /// Search this widget's subtree for an id.
    pub fn find_view_by_id(&self, id: &str) -> Option<usize> {
        engine::find_view_by_id(self.view, id)
    }

    /// Push new data into this widget and its subtree. `None` re-applies the
    /// bindings against the current data.
    ///
    /// The whole subtree is updated before this returns; the first error
    /// stops the update and is returned.
    pub fn update(&self, data: Option<&ObjectValue>) -> Result<()> {
        if let Some(data) = data {
            let replaced = self.data_context.borrow().with_data(data);
            *self.data_context.borrow_mut() = replaced;
        }
        trace!(view = self.view, bindings = self.bound_attributes.borrow().len(), "update");

        for bound in self.bound_attributes() {
            let target = Target::new(self.view, &bound.name, &self.context);
            bound.processor.process(&target, &bound.value)?;
        }

        if self.group.is_some() && !self.has_data_bound_children() {
            self.update_children()?;
        }
        Ok(())
    }

    fn update_children(&self) -> Result<()> {
        let data = self.data();
        for child in engine::children(self.view) {
            if let Some(manager) = engine::get_manager(child) {
                manager.update(Some(&data))?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("view", &self.view)
            .field("view_type", &self.layout.view_type)
            .field("data_context", &self.data_context.borrow())
            .field("bound_attributes", &self.bound_attributes.borrow().len())
            .field("group", &self.group)
            .finish()
    }
}
