//! ConstraintLayout - children positioned by the constraint set.
//!
//! Declares no attributes of its own. Its children's `layout_constraint*`
//! attributes (declared on View) write into this container's constraint set
//! after each layout pass.

use super::ViewTypeParser;
use crate::processor::ProcessorMap;
use crate::types::Capabilities;

pub struct ConstraintLayoutParser;

impl ViewTypeParser for ConstraintLayoutParser {
    fn type_name(&self) -> &str {
        "ConstraintLayout"
    }

    fn parent_type(&self) -> Option<&str> {
        Some("ViewGroup")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::CONSTRAINTS
    }

    fn add_attribute_processors(&self, _processors: &mut ProcessorMap) {}
}
