//! Inflation errors.
//!
//! Every error here means the server-supplied layout or data is malformed for
//! the attribute or container it reached. They are raised at the point of
//! attribute application or reconciliation and surface to the caller of
//! `inflate`/`update`, which decides whether to log and drop the subtree.

use thiserror::Error;

use crate::value::ValueKind;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, InflateError>;

#[derive(Debug, Error)]
pub enum InflateError {
    /// The value variant cannot be handled by the processor registered for
    /// this attribute (e.g. `children` supplied as a resource).
    #[error("attribute '{attribute}' cannot take a {variant} value")]
    InvalidAttributeType { attribute: String, variant: ValueKind },

    /// A static `children` array contained something other than a layout.
    #[error("element {index} of 'children' must be a layout, found {variant}")]
    InvalidChildType { index: usize, variant: ValueKind },

    /// A data-bound children configuration lacks `collection` or `layout`.
    #[error("'{field}' is mandatory for attribute '{attribute}'")]
    MissingRequiredField { attribute: String, field: &'static str },

    /// An evaluated value had the wrong shape (e.g. a collection that is
    /// neither Null nor an Array).
    #[error("'{attribute}' must evaluate to {expected}, found {found}")]
    TypeMismatch {
        attribute: String,
        expected: &'static str,
        found: ValueKind,
    },

    /// The widget or processor lacks the capability the attribute needs.
    #[error("attribute '{attribute}' requires unsupported capability: {capability}")]
    UnsupportedCapability { attribute: String, capability: String },

    /// A literal of an acceptable variant that does not parse for the
    /// processor's kind (e.g. `textColor: "blurple"`).
    #[error("invalid value {value:?} for attribute '{attribute}'")]
    InvalidValue { attribute: String, value: String },

    #[error("invalid binding '{expression}': {reason}")]
    InvalidBinding { expression: String, reason: String },

    #[error("no parser registered for view type '{0}'")]
    UnknownViewType(String),

    /// Raised only under [`UnknownAttributePolicy::Error`](crate::config::UnknownAttributePolicy).
    #[error("view type '{view_type}' has no processor for attribute '{attribute}'")]
    UnknownAttribute { view_type: String, attribute: String },

    #[error("invalid parser registry: {0}")]
    InvalidRegistry(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl InflateError {
    pub(crate) fn invalid_type(attribute: &str, variant: ValueKind) -> Self {
        Self::InvalidAttributeType {
            attribute: attribute.to_string(),
            variant,
        }
    }

    pub(crate) fn invalid_value(attribute: &str, value: impl ToString) -> Self {
        Self::InvalidValue {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn unsupported(attribute: &str, capability: impl Into<String>) -> Self {
        Self::UnsupportedCapability {
            attribute: attribute.to_string(),
            capability: capability.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_attribute_and_variant() {
        let err = InflateError::invalid_type("children", ValueKind::Resource);
        assert_eq!(err.to_string(), "attribute 'children' cannot take a resource value");

        let err = InflateError::MissingRequiredField {
            attribute: "children".into(),
            field: "layout",
        };
        assert_eq!(err.to_string(), "'layout' is mandatory for attribute 'children'");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: InflateError = parse.unwrap_err().into();
        assert!(matches!(err, InflateError::Json(_)));
    }
}
