//! View type parsers.
//!
//! A [`ViewTypeParser`] is the registry entry of one widget type: its name,
//! the parent type it inherits attribute processors from, a widget factory,
//! a manager factory and the processors for the attributes it declares
//! itself. Container types also take part in building the child list.
//!
//! Inheritance is an explicit parent-pointer chain kept by the
//! [`ParserRegistry`]; every "does this type handle X" question walks it from
//! the concrete type upward and stops at the first answer:
//!
//! ```text
//! RecyclerView → ViewGroup → View
//!      │             │         └─ id, background, layout_width, ...
//!      │             └─ children, clipChildren, ...
//!      └─ layoutManager, orientation, itemCount, overScrollMode
//! ```

mod constraint_layout;
mod container;
mod linear_layout;
mod module;
mod recycler_view;
mod registry;
mod text_view;
mod view;
mod view_group;

pub use constraint_layout::ConstraintLayoutParser;
pub use container::{ChildrenProcessor, reconcile_children};
pub use linear_layout::LinearLayoutParser;
pub use module::{ListModule, Module};
pub use recycler_view::RecyclerViewParser;
pub use registry::{ParserRegistry, RegistryBuilder, ViewType};
pub use text_view::TextViewParser;
pub use view::ViewParser;
pub use view_group::ViewGroupParser;

use std::rc::Rc;

use crate::engine;
use crate::error::{InflateError, Result};
use crate::inflater::InflateContext;
use crate::manager::{DataContext, Manager};
use crate::processor::{ProcessorMap, Target};
use crate::types::Capabilities;
use crate::value::{Layout, ObjectValue, Value};

pub trait ViewTypeParser {
    /// Unique type name layouts refer to.
    fn type_name(&self) -> &str;

    /// Type whose processors this one inherits.
    fn parent_type(&self) -> Option<&str> {
        None
    }

    /// Capabilities added on top of the parent type's.
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    /// Create the widget. The inflater records its type and capabilities.
    fn create_view(
        &self,
        _context: &Rc<InflateContext>,
        _layout: &Layout,
        _data: &ObjectValue,
        _parent: Option<usize>,
        _data_index: Option<usize>,
    ) -> Result<usize> {
        Ok(engine::allocate_index())
    }

    /// Build the widget's manager. `None` defers to the parent type; when no
    /// type in the chain builds one, a plain [`Manager`] is used.
    ///
    /// `caller` is the concrete type being inflated.
    fn create_manager(
        &self,
        _context: &Rc<InflateContext>,
        _caller: ViewType,
        _view: usize,
        _layout: &Rc<Layout>,
        _data_context: &DataContext,
    ) -> Option<Manager> {
        None
    }

    /// Declare the processors of this type's own attributes. Called once,
    /// when the registry is built.
    fn add_attribute_processors(&self, processors: &mut ProcessorMap);

    /// Build the static children of `target.view`. Returns false when this
    /// type does not handle children.
    fn handle_children(&self, _target: &Target<'_>, _children: &Value) -> Result<bool> {
        Ok(false)
    }

    /// Attach `child` to `parent`. Returns false when this type cannot hold
    /// children.
    fn add_view(&self, _parent: usize, _child: usize) -> bool {
        false
    }
}

/// Parse a string attribute into an enum-like type. An empty string (a
/// binding that evaluated to Null) yields `None`; anything unparseable is an
/// [`InflateError::InvalidValue`].
pub(crate) fn parse_attribute<T>(
    target: &Target<'_>,
    value: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>> {
    if value.is_empty() {
        return Ok(None);
    }
    parse(value)
        .map(Some)
        .ok_or_else(|| InflateError::invalid_value(target.attribute, value))
}
