//! Layout Arrays
//!
//! Layout parameters as resolved pixel values. Nothing here measures or
//! places widgets; the host's layout engine reads these.
//!
//! - width/height: pixels, or `MATCH_PARENT` / `WRAP_CONTENT`
//! - padding (own content inset), margin (offset within the parent)
//! - layoutGravity / weight: placement within a linear parent
//! - gravity / orientation / weightSum: how a container places children

use crate::types::{Edges, Gravity, Orientation, WRAP_CONTENT};

property_arrays! {
    WIDTH: f32 = WRAP_CONTENT => get_width, set_width;

    HEIGHT: f32 = WRAP_CONTENT => get_height, set_height;

    MIN_WIDTH: f32 = 0.0 => get_min_width, set_min_width;

    MIN_HEIGHT: f32 = 0.0 => get_min_height, set_min_height;

    PADDING: Edges = Edges::default() => get_padding, set_padding;

    MARGIN: Edges = Edges::default() => get_margin, set_margin;

    LAYOUT_GRAVITY: Gravity = Gravity::NONE => get_layout_gravity, set_layout_gravity;

    WEIGHT: f32 = 0.0 => get_weight, set_weight;

    /// Content gravity (text inside a text widget, children inside a linear one).
    GRAVITY: Gravity = Gravity::NONE => get_gravity, set_gravity;

    ORIENTATION: Orientation = Orientation::Horizontal => get_orientation, set_orientation;

    /// None means the sum of the children's weights.
    WEIGHT_SUM: Option<f32> = None => get_weight_sum, set_weight_sum;
}

/// Change one or more padding edges, keeping the rest.
pub fn update_padding(index: usize, f: impl FnOnce(&mut Edges)) {
    PADDING.with(|arr| arr.update(index, f));
}

/// Change one or more margin edges, keeping the rest.
pub fn update_margin(index: usize, f: impl FnOnce(&mut Edges)) {
    MARGIN.with(|arr| arr.update(index, f));
}
