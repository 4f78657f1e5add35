//! Color and drawable processors.
//!
//! Colors accept `#RGB`, `#ARGB`, `#RRGGBB`, `#AARRGGBB`, named colors and
//! ARGB integers. Drawables accept anything a color accepts plus
//! `http(s)://` image urls. Both compile string literals once.

use tracing::trace;

use super::{AttributeProcessor, Target};
use crate::error::{InflateError, Result};
use crate::inflater::InflateContext;
use crate::types::{Drawable, Rgba};
use crate::value::{Primitive, Value};

pub struct ColorProcessor {
    set: Box<dyn Fn(usize, Rgba)>,
}

impl ColorProcessor {
    pub fn new(set: impl Fn(usize, Rgba) + 'static) -> Self {
        Self { set: Box::new(set) }
    }
}

impl AttributeProcessor for ColorProcessor {
    fn handle_value(&self, target: &Target<'_>, value: &Value) -> Result<()> {
        let color = match value {
            Value::Null => {
                trace!(attribute = target.attribute, "null color skipped");
                return Ok(());
            }
            Value::Color(color) => *color,
            Value::Primitive(Primitive::Number(n)) => Rgba::from_argb_int(*n as u32),
            Value::Primitive(primitive) => Rgba::parse(&primitive.to_string())
                .ok_or_else(|| InflateError::invalid_value(target.attribute, primitive))?,
            other => return Err(InflateError::invalid_type(target.attribute, other.kind())),
        };
        (self.set)(target.view, color);
        Ok(())
    }

    fn compile(&self, value: Value, _context: &InflateContext) -> Value {
        match &value {
            Value::Primitive(Primitive::String(literal)) => {
                Rgba::parse(literal).map(Value::Color).unwrap_or(value)
            }
            _ => value,
        }
    }
}

pub struct DrawableProcessor {
    set: Box<dyn Fn(usize, Drawable)>,
}

impl DrawableProcessor {
    pub fn new(set: impl Fn(usize, Drawable) + 'static) -> Self {
        Self { set: Box::new(set) }
    }
}

impl AttributeProcessor for DrawableProcessor {
    fn handle_value(&self, target: &Target<'_>, value: &Value) -> Result<()> {
        let drawable = match value {
            Value::Null => {
                trace!(attribute = target.attribute, "null drawable skipped");
                return Ok(());
            }
            Value::Drawable(drawable) => drawable.clone(),
            Value::Color(color) => Drawable::Color(*color),
            Value::Primitive(primitive) => Drawable::parse(&primitive.to_string())
                .ok_or_else(|| InflateError::invalid_value(target.attribute, primitive))?,
            other => return Err(InflateError::invalid_type(target.attribute, other.kind())),
        };
        (self.set)(target.view, drawable);
        Ok(())
    }

    fn compile(&self, value: Value, _context: &InflateContext) -> Value {
        match &value {
            Value::Primitive(Primitive::String(literal)) => {
                Drawable::parse(literal).map(Value::Drawable).unwrap_or(value)
            }
            _ => value,
        }
    }
}
