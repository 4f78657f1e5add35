//! LinearLayout - children stacked along one orientation.

use super::ViewTypeParser;
use crate::engine::arrays::layout;
use crate::processor::{GravityProcessor, NumberProcessor, ProcessorMap, StringProcessor};
use crate::types::{Capabilities, Orientation};

pub struct LinearLayoutParser;

impl ViewTypeParser for LinearLayoutParser {
    fn type_name(&self) -> &str {
        "LinearLayout"
    }

    fn parent_type(&self) -> Option<&str> {
        Some("ViewGroup")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::LINEAR
    }

    fn add_attribute_processors(&self, processors: &mut ProcessorMap) {
        processors.add(
            "orientation",
            StringProcessor::new(|view, value| layout::set_orientation(view, Orientation::parse(value))),
        );
        processors.add("gravity", GravityProcessor::new(layout::set_gravity));
        processors.add(
            "weightSum",
            NumberProcessor::new(|view, sum| layout::set_weight_sum(view, Some(sum as f32))),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use crate::engine::{self, arrays::layout};
    use crate::inflater::InflateContext;
    use crate::parser::ParserRegistry;
    use crate::types::{Gravity, Orientation};
    use crate::value::ObjectValue;

    fn setup() -> Rc<InflateContext> {
        engine::reset_engine();
        InflateContext::builder(ParserRegistry::with_defaults().unwrap()).build()
    }

    #[test]
    fn test_linear_attributes() {
        let context = setup();
        let template = context
            .compile_layout(&json!({
                "type": "LinearLayout",
                "orientation": "vertical",
                "gravity": "center_vertical|end",
                "weightSum": 3
            }))
            .unwrap();
        let view = context.inflate(&template, &ObjectValue::new(), None, None).unwrap();

        assert_eq!(layout::get_orientation(view), Orientation::Vertical);
        assert_eq!(layout::get_gravity(view), Gravity::CENTER_VERTICAL | Gravity::END);
        assert_eq!(layout::get_weight_sum(view), Some(3.0));
    }
}
