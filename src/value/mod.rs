//! Value model - everything an attribute or a data context can hold.
//!
//! A [`Value`] is exactly one of:
//! - literals: `Null`, [`Primitive`] (string, number, bool)
//! - structures: `Array`, [`ObjectValue`]
//! - deferred: [`Binding`] (evaluated against a data context), [`Resource`],
//!   [`AttributeResource`], [`StyleResource`]
//! - [`Layout`] nodes (children and list templates)
//! - compiled literals: `Color`, `Dimension`, `Drawable`, produced once by a
//!   processor's `compile` so repeated inflations skip string parsing
//!
//! Arrays and objects are reference counted, so pushing the same data into
//! every row of a collection clones pointers, not trees.

mod binding;
mod json;
mod layout;
mod object;
mod resource;

pub use binding::{Binding, DataBinding};
pub use json::parse_literal;
pub use layout::{Attribute, AttributeId, Layout};
pub use object::ObjectValue;
pub use resource::{AttributeResource, Resource, StyleResource};

use std::fmt;
use std::rc::Rc;

use crate::error::{InflateError, Result};
use crate::types::{Dimension, Drawable, Rgba};

// =============================================================================
// Primitive
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    String(Rc<str>),
    Number(f64),
    Bool(bool),
}

impl Primitive {
    /// Numeric view: numbers as-is, numeric strings parsed, bools as 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => s.trim().parse().ok(),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }

    /// Boolean view: bools as-is, `"true"`/`"false"`, non-zero numbers.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::String(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Self::Number(n) => Some(*n != 0.0),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            // Integral numbers print without a trailing ".0"
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

// =============================================================================
// Value Kind
// =============================================================================

/// Variant tag of a [`Value`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Primitive,
    Array,
    Object,
    Binding,
    Resource,
    AttributeResource,
    StyleResource,
    Layout,
    Color,
    Dimension,
    Drawable,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Primitive => "primitive",
            Self::Array => "array",
            Self::Object => "object",
            Self::Binding => "binding",
            Self::Resource => "resource",
            Self::AttributeResource => "attribute resource",
            Self::StyleResource => "style resource",
            Self::Layout => "layout",
            Self::Color => "color",
            Self::Dimension => "dimension",
            Self::Drawable => "drawable",
        })
    }
}

// =============================================================================
// Value
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Primitive(Primitive),
    Array(Rc<[Value]>),
    Object(ObjectValue),
    Binding(Rc<Binding>),
    Resource(Resource),
    AttributeResource(AttributeResource),
    StyleResource(StyleResource),
    Layout(Rc<Layout>),
    Color(Rgba),
    Dimension(Dimension),
    Drawable(Drawable),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Primitive(_) => ValueKind::Primitive,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Binding(_) => ValueKind::Binding,
            Self::Resource(_) => ValueKind::Resource,
            Self::AttributeResource(_) => ValueKind::AttributeResource,
            Self::StyleResource(_) => ValueKind::StyleResource,
            Self::Layout(_) => ValueKind::Layout,
            Self::Color(_) => ValueKind::Color,
            Self::Dimension(_) => ValueKind::Dimension,
            Self::Drawable(_) => ValueKind::Drawable,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_layout(&self) -> bool {
        matches!(self, Self::Layout(_))
    }

    pub fn is_binding(&self) -> bool {
        matches!(self, Self::Binding(_))
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_binding(&self) -> Option<&Rc<Binding>> {
        match self {
            Self::Binding(binding) => Some(binding),
            _ => None,
        }
    }

    pub fn as_layout(&self) -> Option<&Rc<Layout>> {
        match self {
            Self::Layout(layout) => Some(layout),
            _ => None,
        }
    }

    /// Like [`as_array`](Self::as_array), but a wrong variant is a
    /// [`InflateError::TypeMismatch`] naming `attribute`.
    pub fn expect_array(&self, attribute: &str) -> Result<&[Value]> {
        self.as_array().ok_or_else(|| self.mismatch(attribute, "an array"))
    }

    pub fn expect_object(&self, attribute: &str) -> Result<&ObjectValue> {
        self.as_object().ok_or_else(|| self.mismatch(attribute, "an object"))
    }

    pub fn expect_layout(&self, attribute: &str) -> Result<&Rc<Layout>> {
        self.as_layout().ok_or_else(|| self.mismatch(attribute, "a layout"))
    }

    pub fn expect_binding(&self, attribute: &str) -> Result<&Rc<Binding>> {
        self.as_binding().ok_or_else(|| self.mismatch(attribute, "a binding"))
    }

    fn mismatch(&self, attribute: &str, expected: &'static str) -> InflateError {
        InflateError::TypeMismatch {
            attribute: attribute.to_string(),
            expected,
            found: self.kind(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Primitive(p) => fmt::Display::fmt(p, f),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
            Self::Object(object) => write!(f, "{{{} entries}}", object.len()),
            Self::Binding(binding) => fmt::Display::fmt(binding, f),
            Self::Resource(resource) => fmt::Display::fmt(resource, f),
            Self::AttributeResource(attr) => fmt::Display::fmt(attr, f),
            Self::StyleResource(style) => fmt::Display::fmt(style, f),
            Self::Layout(layout) => write!(f, "<{}>", layout.view_type),
            Self::Color(c) => write!(f, "#{:08x}", c.to_argb_int()),
            Self::Dimension(d) => write!(f, "{d:?}"),
            Self::Drawable(d) => write!(f, "{d:?}"),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Primitive(Primitive::String(value.into()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Primitive(Primitive::String(value.into()))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Primitive(Primitive::Number(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Primitive(Primitive::Number(value as f64))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Primitive(Primitive::Number(value as f64))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Primitive(Primitive::Bool(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items.into())
    }
}

impl From<ObjectValue> for Value {
    fn from(object: ObjectValue) -> Self {
        Self::Object(object)
    }
}

impl From<Rc<Layout>> for Value {
    fn from(layout: Rc<Layout>) -> Self {
        Self::Layout(layout)
    }
}

impl From<Binding> for Value {
    fn from(binding: Binding) -> Self {
        Self::Binding(Rc::new(binding))
    }
}
