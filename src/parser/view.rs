//! View - the root of every type chain.
//!
//! Identity, visibility, background, sizing, padding, margins and the
//! constraint relations a widget declares towards its siblings.

use super::{ViewTypeParser, parse_attribute};
use crate::engine::arrays::{core, layout, visual};
use crate::engine;
use crate::processor::{
    BooleanProcessor, ConstraintProcessor, DimensionProcessor, DrawableProcessor, GravityProcessor,
    NumberProcessor, ProcessorMap, StringProcessor,
};
use crate::types::{Edges, Side, Visibility};

/// Constraint attribute suffixes and the sides they connect.
const CONSTRAINTS: [(&str, Side, Side); 13] = [
    ("Left_toLeftOf", Side::Left, Side::Left),
    ("Left_toRightOf", Side::Left, Side::Right),
    ("Right_toLeftOf", Side::Right, Side::Left),
    ("Right_toRightOf", Side::Right, Side::Right),
    ("Top_toTopOf", Side::Top, Side::Top),
    ("Top_toBottomOf", Side::Top, Side::Bottom),
    ("Bottom_toTopOf", Side::Bottom, Side::Top),
    ("Bottom_toBottomOf", Side::Bottom, Side::Bottom),
    ("Baseline_toBaselineOf", Side::Baseline, Side::Baseline),
    ("Start_toStartOf", Side::Start, Side::Start),
    ("Start_toEndOf", Side::Start, Side::End),
    ("End_toStartOf", Side::End, Side::Start),
    ("End_toEndOf", Side::End, Side::End),
];

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

pub struct ViewParser;

impl ViewTypeParser for ViewParser {
    fn type_name(&self) -> &str {
        "View"
    }

    fn add_attribute_processors(&self, processors: &mut ProcessorMap) {
        processors.add(
            "id",
            StringProcessor::new(|view, id| {
                if !id.is_empty() {
                    engine::assign_id(view, id);
                }
            }),
        );
        processors.add(
            "visibility",
            StringProcessor::try_new(|target, value| {
                if let Some(visibility) = parse_attribute(target, value, Visibility::parse)? {
                    core::set_visibility(target.view, visibility);
                }
                Ok(())
            }),
        );
        processors.add("enabled", BooleanProcessor::new(core::set_enabled));
        processors.add("tag", StringProcessor::new(|view, tag| core::set_tag(view, optional(tag))));
        processors.add(
            "contentDescription",
            StringProcessor::new(|view, text| core::set_content_description(view, optional(text))),
        );

        // Visual
        processors.add(
            "background",
            DrawableProcessor::new(|view, drawable| visual::set_background(view, Some(drawable))),
        );
        processors.add("alpha", NumberProcessor::new(|view, alpha| visual::set_alpha(view, alpha as f32)));
        processors.add("elevation", DimensionProcessor::new(visual::set_elevation));

        // Size
        processors.add("layout_width", DimensionProcessor::new(layout::set_width));
        processors.add("layout_height", DimensionProcessor::new(layout::set_height));
        processors.add("minWidth", DimensionProcessor::new(layout::set_min_width));
        processors.add("minHeight", DimensionProcessor::new(layout::set_min_height));
        processors.add("layout_gravity", GravityProcessor::new(layout::set_layout_gravity));
        processors.add(
            "layout_weight",
            NumberProcessor::new(|view, weight| layout::set_weight(view, weight as f32)),
        );

        // Padding
        processors.add("padding", DimensionProcessor::new(|view, px| layout::set_padding(view, Edges::all(px))));
        processors.add("paddingLeft", DimensionProcessor::new(|view, px| layout::update_padding(view, |e| e.left = px)));
        processors.add("paddingTop", DimensionProcessor::new(|view, px| layout::update_padding(view, |e| e.top = px)));
        processors.add("paddingRight", DimensionProcessor::new(|view, px| layout::update_padding(view, |e| e.right = px)));
        processors.add("paddingBottom", DimensionProcessor::new(|view, px| layout::update_padding(view, |e| e.bottom = px)));

        // Margin
        processors.add("layout_margin", DimensionProcessor::new(|view, px| layout::set_margin(view, Edges::all(px))));
        processors.add("layout_marginLeft", DimensionProcessor::new(|view, px| layout::update_margin(view, |e| e.left = px)));
        processors.add("layout_marginTop", DimensionProcessor::new(|view, px| layout::update_margin(view, |e| e.top = px)));
        processors.add("layout_marginRight", DimensionProcessor::new(|view, px| layout::update_margin(view, |e| e.right = px)));
        processors.add("layout_marginBottom", DimensionProcessor::new(|view, px| layout::update_margin(view, |e| e.bottom = px)));

        // Constraints, applied after the next layout pass
        for (suffix, start_side, end_side) in CONSTRAINTS {
            processors.add(
                &format!("layout_constraint{suffix}"),
                ConstraintProcessor::connect(start_side, end_side),
            );
        }
        processors.add("layout_constraintHorizontal_bias", ConstraintProcessor::horizontal_bias());
        processors.add("layout_constraintVertical_bias", ConstraintProcessor::vertical_bias());
    }
}
