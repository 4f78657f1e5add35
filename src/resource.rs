//! Resource lookup.
//!
//! Processors resolve `@color/..`, `@dimen/..`, `@drawable/..`, `@string/..`,
//! `?attr/..` and `?Style:attr` references through a [`ResourceProvider`].
//! Hosts with their own resource system implement the trait; everyone else
//! loads a [`ResourceTable`] from JSON.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;
use crate::types::{Dimension, Drawable, Rgba};
use crate::value::{Value, parse_literal};

pub trait ResourceProvider {
    fn color(&self, name: &str) -> Option<Rgba>;
    fn dimension(&self, name: &str) -> Option<Dimension>;
    fn drawable(&self, name: &str) -> Option<Drawable>;
    fn string(&self, name: &str) -> Option<String>;

    /// Theme attribute. The result is processed like a literal of the
    /// attribute it was referenced from.
    fn attribute(&self, name: &str) -> Option<Value>;

    fn style_attribute(&self, style: &str, attribute: &str) -> Option<Value>;
}

/// Provider that knows nothing. Every reference is unresolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourceProvider for NoResources {
    fn color(&self, _name: &str) -> Option<Rgba> {
        None
    }

    fn dimension(&self, _name: &str) -> Option<Dimension> {
        None
    }

    fn drawable(&self, _name: &str) -> Option<Drawable> {
        None
    }

    fn string(&self, _name: &str) -> Option<String> {
        None
    }

    fn attribute(&self, _name: &str) -> Option<Value> {
        None
    }

    fn style_attribute(&self, _style: &str, _attribute: &str) -> Option<Value> {
        None
    }
}

/// Named resources, deserializable from JSON:
///
/// ```json
/// {
///   "colors": {"accent": "#ff4081"},
///   "dimensions": {"gutter": "16dp"},
///   "drawables": {"divider": {"color": "#cccccc"}},
///   "strings": {"title": "Orders"},
///   "attributes": {"textColorPrimary": "@color/accent"},
///   "styles": {"Card": {"elevation": "4dp"}}
/// }
/// ```
///
/// Theme and style entries are literals; they may themselves reference
/// resources.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResourceTable {
    pub colors: HashMap<String, Rgba>,
    pub dimensions: HashMap<String, Dimension>,
    pub drawables: HashMap<String, Drawable>,
    pub strings: HashMap<String, String>,
    pub attributes: HashMap<String, String>,
    pub styles: HashMap<String, HashMap<String, String>>,
}

impl ResourceTable {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve a theme/style literal, following at most one resource hop.
    fn literal(&self, raw: &str) -> Option<Value> {
        let value = parse_literal(raw).ok()?;
        match &value {
            Value::Resource(resource) => resource.resolve(self),
            Value::Binding(_) | Value::AttributeResource(_) | Value::StyleResource(_) => None,
            _ => Some(value),
        }
    }
}

impl ResourceProvider for ResourceTable {
    fn color(&self, name: &str) -> Option<Rgba> {
        self.colors.get(name).copied()
    }

    fn dimension(&self, name: &str) -> Option<Dimension> {
        self.dimensions.get(name).copied()
    }

    fn drawable(&self, name: &str) -> Option<Drawable> {
        self.drawables
            .get(name)
            .cloned()
            .or_else(|| self.color(name).map(Drawable::Color))
    }

    fn string(&self, name: &str) -> Option<String> {
        self.strings.get(name).cloned()
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).and_then(|raw| self.literal(raw))
    }

    fn style_attribute(&self, style: &str, attribute: &str) -> Option<Value> {
        self.styles
            .get(style)
            .and_then(|entries| entries.get(attribute))
            .and_then(|raw| self.literal(raw))
    }
}
