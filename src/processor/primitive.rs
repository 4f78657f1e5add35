//! String, number and boolean processors.
//!
//! A binding that evaluates to Null clears string attributes (sets "") and
//! leaves number and boolean attributes untouched.

use tracing::trace;

use super::{AttributeProcessor, Target};
use crate::error::{InflateError, Result};
use crate::value::Value;

// =============================================================================
// String
// =============================================================================

pub struct StringProcessor {
    set: Box<dyn Fn(&Target<'_>, &str) -> Result<()>>,
}

impl StringProcessor {
    pub fn new(set: impl Fn(usize, &str) + 'static) -> Self {
        Self::try_new(move |target, value| {
            set(target.view, value);
            Ok(())
        })
    }

    /// For setters that validate or need the inflation context.
    pub fn try_new(set: impl Fn(&Target<'_>, &str) -> Result<()> + 'static) -> Self {
        Self { set: Box::new(set) }
    }
}

impl AttributeProcessor for StringProcessor {
    fn handle_value(&self, target: &Target<'_>, value: &Value) -> Result<()> {
        match value {
            Value::Null => (self.set)(target, ""),
            Value::Primitive(primitive) => (self.set)(target, &primitive.to_string()),
            other => Err(InflateError::invalid_type(target.attribute, other.kind())),
        }
    }
}

// =============================================================================
// Number
// =============================================================================

pub struct NumberProcessor {
    set: Box<dyn Fn(&Target<'_>, f64) -> Result<()>>,
}

impl NumberProcessor {
    pub fn new(set: impl Fn(usize, f64) + 'static) -> Self {
        Self::try_new(move |target, value| {
            set(target.view, value);
            Ok(())
        })
    }

    pub fn try_new(set: impl Fn(&Target<'_>, f64) -> Result<()> + 'static) -> Self {
        Self { set: Box::new(set) }
    }
}

impl AttributeProcessor for NumberProcessor {
    fn handle_value(&self, target: &Target<'_>, value: &Value) -> Result<()> {
        match value {
            Value::Null => {
                trace!(attribute = target.attribute, "null number skipped");
                Ok(())
            }
            Value::Primitive(primitive) => {
                let number = primitive
                    .as_f64()
                    .ok_or_else(|| InflateError::invalid_value(target.attribute, primitive))?;
                (self.set)(target, number)
            }
            other => Err(InflateError::invalid_type(target.attribute, other.kind())),
        }
    }
}

// =============================================================================
// Boolean
// =============================================================================

pub struct BooleanProcessor {
    set: Box<dyn Fn(&Target<'_>, bool) -> Result<()>>,
}

impl BooleanProcessor {
    pub fn new(set: impl Fn(usize, bool) + 'static) -> Self {
        Self {
            set: Box::new(move |target, value| {
                set(target.view, value);
                Ok(())
            }),
        }
    }
}

impl AttributeProcessor for BooleanProcessor {
    fn handle_value(&self, target: &Target<'_>, value: &Value) -> Result<()> {
        match value {
            Value::Null => {
                trace!(attribute = target.attribute, "null boolean skipped");
                Ok(())
            }
            Value::Primitive(primitive) => {
                let flag = primitive
                    .as_bool()
                    .ok_or_else(|| InflateError::invalid_value(target.attribute, primitive))?;
                (self.set)(target, flag)
            }
            other => Err(InflateError::invalid_type(target.attribute, other.kind())),
        }
    }
}
