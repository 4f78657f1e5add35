//! Gravity processor.
//!
//! `"center_vertical|end"` style literals compile to the numeric flag value,
//! so repeated inflations skip parsing.

use tracing::trace;

use super::{AttributeProcessor, Target};
use crate::error::{InflateError, Result};
use crate::inflater::InflateContext;
use crate::types::Gravity;
use crate::value::{Primitive, Value};

pub struct GravityProcessor {
    set: Box<dyn Fn(usize, Gravity)>,
}

impl GravityProcessor {
    pub fn new(set: impl Fn(usize, Gravity) + 'static) -> Self {
        Self { set: Box::new(set) }
    }
}

impl AttributeProcessor for GravityProcessor {
    fn handle_value(&self, target: &Target<'_>, value: &Value) -> Result<()> {
        let gravity = match value {
            Value::Null => {
                trace!(attribute = target.attribute, "null gravity skipped");
                return Ok(());
            }
            Value::Primitive(Primitive::Number(bits)) => Gravity::from_bits_truncate(*bits as u32),
            Value::Primitive(primitive) => Gravity::parse(&primitive.to_string())
                .ok_or_else(|| InflateError::invalid_value(target.attribute, primitive))?,
            other => return Err(InflateError::invalid_type(target.attribute, other.kind())),
        };
        (self.set)(target.view, gravity);
        Ok(())
    }

    fn compile(&self, value: Value, _context: &InflateContext) -> Value {
        match &value {
            Value::Primitive(Primitive::String(literal)) => Gravity::parse(literal)
                .map(|gravity| Value::from(gravity.bits() as f64))
                .unwrap_or(value),
            _ => value,
        }
    }
}
