//! Dimension processor.
//!
//! Accepts `"16dp"`, `"12sp"`, `"4px"`, bare numbers (pixels),
//! `"match_parent"` and `"wrap_content"`, and hands the setter pixels.
//! String literals are compiled to [`Value::Dimension`] once.

use tracing::trace;

use super::{AttributeProcessor, Target};
use crate::error::{InflateError, Result};
use crate::inflater::InflateContext;
use crate::types::Dimension;
use crate::value::{Primitive, Value};

pub struct DimensionProcessor {
    set: Box<dyn Fn(usize, f32)>,
}

impl DimensionProcessor {
    pub fn new(set: impl Fn(usize, f32) + 'static) -> Self {
        Self { set: Box::new(set) }
    }

    fn dimension(target: &Target<'_>, value: &Value) -> Result<Option<Dimension>> {
        match value {
            Value::Null => Ok(None),
            Value::Dimension(dimension) => Ok(Some(*dimension)),
            Value::Primitive(Primitive::Number(n)) => Ok(Some(Dimension::from(*n as f32))),
            Value::Primitive(primitive) => Dimension::parse(&primitive.to_string())
                .map(Some)
                .ok_or_else(|| InflateError::invalid_value(target.attribute, primitive)),
            other => Err(InflateError::invalid_type(target.attribute, other.kind())),
        }
    }
}

impl AttributeProcessor for DimensionProcessor {
    fn handle_value(&self, target: &Target<'_>, value: &Value) -> Result<()> {
        match Self::dimension(target, value)? {
            Some(dimension) => {
                (self.set)(target.view, dimension.to_px(target.metrics()));
                Ok(())
            }
            None => {
                trace!(attribute = target.attribute, "null dimension skipped");
                Ok(())
            }
        }
    }

    fn compile(&self, value: Value, _context: &InflateContext) -> Value {
        match &value {
            Value::Primitive(Primitive::String(literal)) => {
                Dimension::parse(literal).map(Value::Dimension).unwrap_or(value)
            }
            _ => value,
        }
    }
}
