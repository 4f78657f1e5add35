//! Group Arrays - container flags.

use crate::types::LayoutMode;

property_arrays! {
    CLIP_CHILDREN: bool = true => get_clip_children, set_clip_children;

    CLIP_TO_PADDING: bool = true => get_clip_to_padding, set_clip_to_padding;

    /// None until `layoutMode` is set.
    LAYOUT_MODE: Option<LayoutMode> = None => get_layout_mode, set_layout_mode;

    SPLIT_MOTION_EVENTS: bool = false => get_split_motion_events, set_split_motion_events;
}
