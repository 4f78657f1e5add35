//! Bindings - values computed from a data context at apply/update time.
//!
//! Two forms:
//! - [`Binding::Data`]: `@{path}` where path is dot-separated keys with
//!   `[n]` or `[$index]` subscripts, e.g. `@{orders[$index].total}`.
//!   `@{$index}` alone yields the data index itself.
//! - [`Binding::Nested`]: an object whose entries may themselves be bindings,
//!   written `{"@": {...}}`. Used for configuration such as data-bound
//!   `children`.
//!
//! A path that walks off the data (missing key, index out of range, wrong
//! shape) evaluates to `Null` rather than failing.

use std::fmt;
use std::rc::Rc;

use super::{ObjectValue, Value};
use crate::error::{InflateError, Result};

const INDEX_TOKEN: &str = "$index";

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Data(DataBinding),
    Nested(ObjectValue),
}

impl Binding {
    /// Does this literal use binding syntax?
    pub fn is_binding_literal(literal: &str) -> bool {
        literal.len() > 3 && literal.starts_with("@{") && literal.ends_with('}')
    }

    pub fn parse(literal: &str) -> Result<Self> {
        DataBinding::parse(literal).map(Self::Data)
    }

    pub fn evaluate(&self, data: &ObjectValue, index: Option<usize>) -> Value {
        match self {
            Self::Data(binding) => binding.evaluate(data, index),
            Self::Nested(object) => Value::Object(
                object
                    .iter()
                    .map(|(key, value)| {
                        let resolved = match value {
                            Value::Binding(inner) => inner.evaluate(data, index),
                            other => other.clone(),
                        };
                        (key.to_string(), resolved)
                    })
                    .collect(),
            ),
        }
    }

    /// The unevaluated configuration of a nested binding.
    pub fn nested(&self) -> Option<&ObjectValue> {
        match self {
            Self::Nested(object) => Some(object),
            Self::Data(_) => None,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(binding) => f.write_str(&binding.source),
            Self::Nested(object) => write!(f, "{{\"@\": {object:?}}}"),
        }
    }
}

// =============================================================================
// Data Binding
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Key(String),
    Index(usize),
    /// `[$index]` subscript.
    DataIndex,
    /// Bare `$index`; only valid as the whole expression.
    IndexValue,
}

/// A parsed `@{path}` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct DataBinding {
    source: Rc<str>,
    path: Vec<Segment>,
}

impl DataBinding {
    pub fn parse(literal: &str) -> Result<Self> {
        let fail = |reason: &str| InflateError::InvalidBinding {
            expression: literal.to_string(),
            reason: reason.to_string(),
        };

        if !Binding::is_binding_literal(literal) {
            return Err(fail("expected '@{...}'"));
        }
        let expression = literal[2..literal.len() - 1].trim();
        if expression == INDEX_TOKEN {
            return Ok(Self {
                source: literal.into(),
                path: vec![Segment::IndexValue],
            });
        }

        let mut path = Vec::new();
        let mut key = String::new();
        let mut chars = expression.chars().peekable();
        // Set after ']' so "a[0].b" does not demand a key before the dot.
        let mut after_subscript = false;

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if key.is_empty() && !after_subscript {
                        return Err(fail("empty path segment"));
                    }
                    if !key.is_empty() {
                        path.push(Segment::Key(std::mem::take(&mut key)));
                    }
                    after_subscript = false;
                    if chars.peek().is_none() {
                        return Err(fail("trailing '.'"));
                    }
                }
                '[' => {
                    if !key.is_empty() {
                        path.push(Segment::Key(std::mem::take(&mut key)));
                    } else if path.is_empty() {
                        return Err(fail("subscript without a key"));
                    }
                    let mut subscript = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(c) => subscript.push(c),
                            None => return Err(fail("unclosed '['")),
                        }
                    }
                    let subscript = subscript.trim();
                    if subscript == INDEX_TOKEN {
                        path.push(Segment::DataIndex);
                    } else {
                        let index = subscript
                            .parse()
                            .map_err(|_| fail("subscript must be a number or $index"))?;
                        path.push(Segment::Index(index));
                    }
                    after_subscript = true;
                }
                ']' => return Err(fail("unexpected ']'")),
                c if c.is_whitespace() => return Err(fail("whitespace in path")),
                c => {
                    if after_subscript {
                        return Err(fail("expected '.' or '[' after subscript"));
                    }
                    key.push(c);
                }
            }
        }
        if !key.is_empty() {
            path.push(Segment::Key(key));
        }
        if path.is_empty() {
            return Err(fail("empty expression"));
        }

        Ok(Self {
            source: literal.into(),
            path,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn evaluate(&self, data: &ObjectValue, index: Option<usize>) -> Value {
        let mut current = Value::Object(data.clone());
        for segment in &self.path {
            current = match segment {
                Segment::IndexValue => index.map(Value::from).unwrap_or_default(),
                Segment::Key(key) => current
                    .as_object()
                    .and_then(|object| object.get(key))
                    .cloned()
                    .unwrap_or_default(),
                Segment::Index(i) => element(&current, Some(*i)),
                Segment::DataIndex => element(&current, index),
            };
            if current.is_null() {
                break;
            }
        }
        current
    }
}

fn element(value: &Value, index: Option<usize>) -> Value {
    match (value.as_array(), index) {
        (Some(items), Some(i)) => items.get(i).cloned().unwrap_or_default(),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> ObjectValue {
        match Value::from(json!({
            "user": {"name": "ada", "tags": ["a", "b"]},
            "rows": [{"title": "first"}, {"title": "second"}]
        })) {
            Value::Object(object) => object,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_is_binding_literal() {
        assert!(Binding::is_binding_literal("@{a}"));
        assert!(!Binding::is_binding_literal("@{}"));
        assert!(!Binding::is_binding_literal("hello"));
        assert!(!Binding::is_binding_literal("@color/red"));
    }

    #[test]
    fn test_evaluate_key_path() {
        let binding = Binding::parse("@{user.name}").unwrap();
        assert_eq!(binding.evaluate(&data(), None), Value::from("ada"));
    }

    #[test]
    fn test_evaluate_subscripts() {
        let fixed = Binding::parse("@{user.tags[1]}").unwrap();
        assert_eq!(fixed.evaluate(&data(), None), Value::from("b"));

        let by_index = Binding::parse("@{rows[$index].title}").unwrap();
        assert_eq!(by_index.evaluate(&data(), Some(1)), Value::from("second"));
        assert_eq!(by_index.evaluate(&data(), None), Value::Null);
    }

    #[test]
    fn test_evaluate_index_value() {
        let binding = Binding::parse("@{$index}").unwrap();
        assert_eq!(binding.evaluate(&data(), Some(4)), Value::from(4_usize));
        assert_eq!(binding.evaluate(&data(), None), Value::Null);
    }

    #[test]
    fn test_missing_path_is_null() {
        let binding = Binding::parse("@{user.address.city}").unwrap();
        assert_eq!(binding.evaluate(&data(), None), Value::Null);
        let binding = Binding::parse("@{rows[9].title}").unwrap();
        assert_eq!(binding.evaluate(&data(), None), Value::Null);
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["@{a..b}", "@{a[}", "@{a[x]}", "@{a.}", "@{[0]}", "@{a b}", "@{a]}", "plain"] {
            assert!(
                matches!(Binding::parse(bad), Err(InflateError::InvalidBinding { .. })),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_nested_evaluates_inner_bindings() {
        let mut config = ObjectValue::new();
        config.insert("title", Binding::parse("@{user.name}").unwrap());
        config.insert("fixed", 3_i64);
        let nested = Binding::Nested(config);

        let evaluated = nested.evaluate(&data(), None);
        let object = evaluated.as_object().unwrap();
        assert_eq!(object.get("title"), Some(&Value::from("ada")));
        assert_eq!(object.get("fixed"), Some(&Value::from(3_i64)));
        assert!(nested.nested().is_some());
    }

    #[test]
    fn test_display_is_source() {
        let binding = Binding::parse("@{user.name}").unwrap();
        assert_eq!(binding.to_string(), "@{user.name}");
    }
}
