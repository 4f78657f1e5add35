//! JSON conversion.
//!
//! Data is taken verbatim: a string in a data object is always a string.
//! Layout attribute literals go through [`parse_literal`], which recognizes
//! binding and resource syntax.

use super::{AttributeResource, Binding, ObjectValue, Primitive, Resource, StyleResource, Value};
use crate::error::{InflateError, Result};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Primitive(Primitive::Bool(b)),
            serde_json::Value::Number(n) => n.as_f64().map(Self::from).unwrap_or_default(),
            serde_json::Value::String(s) => Self::from(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(map.into_iter().collect()),
        }
    }
}

impl From<serde_json::Value> for ObjectValue {
    /// Non-object JSON yields an empty object.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => Self::new(),
        }
    }
}

impl ObjectValue {
    /// Parse a JSON document that must be an object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        match Value::from(serde_json::from_str::<serde_json::Value>(json)?) {
            Value::Object(object) => Ok(object),
            other => Err(InflateError::TypeMismatch {
                attribute: "data".to_string(),
                expected: "an object",
                found: other.kind(),
            }),
        }
    }
}

/// Classify a layout attribute string.
///
/// `@{..}` is a binding (malformed ones fail), `@color/..` and friends are
/// resources, `?attr/..` and `?Style:attr` are theme lookups. Anything else,
/// including unknown `@kind/` prefixes, stays a plain string.
pub fn parse_literal(literal: &str) -> Result<Value> {
    if Binding::is_binding_literal(literal) {
        return Binding::parse(literal).map(Value::from);
    }
    if let Some(resource) = Resource::parse(literal) {
        return Ok(Value::Resource(resource));
    }
    if let Some(attribute) = AttributeResource::parse(literal) {
        return Ok(Value::AttributeResource(attribute));
    }
    if let Some(style) = StyleResource::parse(literal) {
        return Ok(Value::StyleResource(style));
    }
    Ok(Value::from(literal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;
    use serde_json::json;

    #[test]
    fn test_json_data_is_verbatim() {
        let value = Value::from(json!({"name": "@{not.a.binding}", "n": 2, "ok": true, "none": null}));
        let object = value.as_object().unwrap();
        assert_eq!(object.get("name"), Some(&Value::from("@{not.a.binding}")));
        assert_eq!(object.get("n"), Some(&Value::from(2_i64)));
        assert_eq!(object.get("ok"), Some(&Value::from(true)));
        assert_eq!(object.get("none"), Some(&Value::Null));
    }

    #[test]
    fn test_object_from_json_str() {
        let object = ObjectValue::from_json_str(r#"{"rows": [1, 2]}"#).unwrap();
        assert_eq!(object.get("rows").and_then(Value::as_array).map(<[Value]>::len), Some(2));

        let err = ObjectValue::from_json_str("[1]").unwrap_err();
        assert!(matches!(err, InflateError::TypeMismatch { found: ValueKind::Array, .. }));
        assert!(matches!(ObjectValue::from_json_str("{"), Err(InflateError::Json(_))));
    }

    #[test]
    fn test_parse_literal_classifies() {
        assert_eq!(parse_literal("@{user.name}").unwrap().kind(), ValueKind::Binding);
        assert_eq!(parse_literal("@color/accent").unwrap().kind(), ValueKind::Resource);
        assert_eq!(parse_literal("?attr/tint").unwrap().kind(), ValueKind::AttributeResource);
        assert_eq!(parse_literal("?Card:radius").unwrap().kind(), ValueKind::StyleResource);
        assert_eq!(parse_literal("@layout/row").unwrap(), Value::from("@layout/row"));
        assert_eq!(parse_literal("hello").unwrap(), Value::from("hello"));
        assert!(parse_literal("@{a..b}").is_err());
    }
}
