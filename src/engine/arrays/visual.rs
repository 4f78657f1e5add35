//! Visual Arrays
//!
//! Painting properties that do not affect layout:
//! - background: color or image drawable
//! - alpha: 0.0 (transparent) to 1.0 (opaque)
//! - elevation: z offset in pixels

use crate::types::Drawable;

property_arrays! {
    BACKGROUND: Option<Drawable> = None => get_background, set_background;

    ALPHA: f32 = 1.0 => get_alpha, set_alpha;

    ELEVATION: f32 = 0.0 => get_elevation, set_elevation;
}
