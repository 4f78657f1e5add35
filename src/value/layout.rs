//! Layout nodes.
//!
//! A [`Layout`] is immutable once compiled and shared by `Rc`: the template of
//! a data-bound collection is one `Rc<Layout>` reused for every row.

use super::{ObjectValue, Value};

/// Interned attribute name. Ids are assigned by the parser registry, so an id
/// is only meaningful together with the registry that compiled the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeId(pub(crate) u32);

impl AttributeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One declared attribute, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub id: AttributeId,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub view_type: String,
    pub attributes: Vec<Attribute>,
    /// Scope entries overlaid on the incoming data for this widget's subtree.
    pub data: Option<ObjectValue>,
    /// Keys no parser in the type chain recognized.
    pub extras: Option<ObjectValue>,
    /// Authored text of the first declared attribute, when it was a string.
    /// Compilation may rewrite the value itself (`#f00` becomes a color).
    pub first_literal: Option<String>,
}

impl Layout {
    pub fn new(view_type: impl Into<String>) -> Self {
        Self {
            view_type: view_type.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, id: AttributeId, value: impl Into<Value>) -> Self {
        self.attributes.push(Attribute {
            id,
            value: value.into(),
        });
        self
    }

    pub fn with_data(mut self, data: ObjectValue) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_extras(mut self, extras: ObjectValue) -> Self {
        self.extras = Some(extras);
        self
    }

    pub fn attribute(&self, id: AttributeId) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|attribute| attribute.id == id)
            .map(|attribute| &attribute.value)
    }

    /// Value of the first declared attribute. Constraint relations name
    /// siblings by it.
    pub fn first_attribute_value(&self) -> Option<&Value> {
        self.attributes.first().map(|attribute| &attribute.value)
    }

    /// Whether `reference` names this layout: the authored text of the first
    /// attribute if known, otherwise its value as displayed.
    pub fn is_named(&self, reference: &str) -> bool {
        match &self.first_literal {
            Some(literal) => literal == reference,
            None => self
                .first_attribute_value()
                .is_some_and(|value| value.to_string() == reference),
        }
    }
}
