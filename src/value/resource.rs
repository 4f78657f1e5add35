//! References to host resources, resolved through a [`ResourceProvider`].
//!
//! ```text
//! @color/accent      Resource::Color
//! @dimen/gutter      Resource::Dimension
//! @drawable/icon     Resource::Drawable
//! @string/title      Resource::String
//! ?attr/textColor    AttributeResource (theme attribute)
//! ?Card:elevation    StyleResource (attribute of a named style)
//! ```

use std::fmt;

use super::Value;
use crate::resource::ResourceProvider;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    Color(String),
    Dimension(String),
    Drawable(String),
    String(String),
}

impl Resource {
    pub fn parse(literal: &str) -> Option<Self> {
        let (kind, name) = literal.strip_prefix('@')?.split_once('/')?;
        if name.is_empty() {
            return None;
        }
        let name = name.to_string();
        match kind {
            "color" => Some(Self::Color(name)),
            "dimen" => Some(Self::Dimension(name)),
            "drawable" => Some(Self::Drawable(name)),
            "string" => Some(Self::String(name)),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Color(name) | Self::Dimension(name) | Self::Drawable(name) | Self::String(name) => {
                name
            }
        }
    }

    pub fn resolve(&self, provider: &dyn ResourceProvider) -> Option<Value> {
        match self {
            Self::Color(name) => provider.color(name).map(Value::Color),
            Self::Dimension(name) => provider.dimension(name).map(Value::Dimension),
            Self::Drawable(name) => provider.drawable(name).map(Value::Drawable),
            Self::String(name) => provider.string(name).map(Value::from),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Color(_) => "color",
            Self::Dimension(_) => "dimen",
            Self::Drawable(_) => "drawable",
            Self::String(_) => "string",
        };
        write!(f, "@{kind}/{}", self.name())
    }
}

/// A theme attribute, `?attr/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeResource {
    pub name: String,
}

impl AttributeResource {
    pub fn parse(literal: &str) -> Option<Self> {
        let name = literal.strip_prefix("?attr/")?;
        (!name.is_empty()).then(|| Self { name: name.to_string() })
    }

    pub fn resolve(&self, provider: &dyn ResourceProvider) -> Option<Value> {
        provider.attribute(&self.name)
    }
}

impl fmt::Display for AttributeResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?attr/{}", self.name)
    }
}

/// An attribute looked up on a named style, `?Style:attribute`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleResource {
    pub style: String,
    pub attribute: String,
}

impl StyleResource {
    pub fn parse(literal: &str) -> Option<Self> {
        let (style, attribute) = literal.strip_prefix('?')?.split_once(':')?;
        if style.is_empty() || attribute.is_empty() || style.contains('/') {
            return None;
        }
        Some(Self {
            style: style.to_string(),
            attribute: attribute.to_string(),
        })
    }

    pub fn resolve(&self, provider: &dyn ResourceProvider) -> Option<Value> {
        provider.style_attribute(&self.style, &self.attribute)
    }
}

impl fmt::Display for StyleResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}:{}", self.style, self.attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource_prefixes() {
        assert_eq!(Resource::parse("@color/accent"), Some(Resource::Color("accent".into())));
        assert_eq!(Resource::parse("@dimen/gutter"), Some(Resource::Dimension("gutter".into())));
        assert_eq!(Resource::parse("@drawable/icon"), Some(Resource::Drawable("icon".into())));
        assert_eq!(Resource::parse("@string/title"), Some(Resource::String("title".into())));
        assert_eq!(Resource::parse("@layout/row"), None);
        assert_eq!(Resource::parse("@color/"), None);
        assert_eq!(Resource::parse("color/accent"), None);
    }

    #[test]
    fn test_parse_theme_and_style() {
        assert_eq!(
            AttributeResource::parse("?attr/textColor"),
            Some(AttributeResource { name: "textColor".into() })
        );
        assert_eq!(
            StyleResource::parse("?Card:elevation"),
            Some(StyleResource { style: "Card".into(), attribute: "elevation".into() })
        );
        assert_eq!(StyleResource::parse("?attr/textColor"), None);
        assert_eq!(StyleResource::parse("?Card:"), None);
    }

    #[test]
    fn test_display_round_trips_source() {
        for literal in ["@color/accent", "@dimen/gutter"] {
            assert_eq!(Resource::parse(literal).unwrap().to_string(), literal);
        }
        assert_eq!(AttributeResource::parse("?attr/x").unwrap().to_string(), "?attr/x");
        assert_eq!(StyleResource::parse("?A:b").unwrap().to_string(), "?A:b");
    }
}
