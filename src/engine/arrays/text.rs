//! Text Arrays
//!
//! Text-related properties:
//! - text / isHtml / hint: content as authored (markup is not interpreted)
//! - textSize: pixels, None for the host default
//! - colors: text, hint, link, highlight
//! - compound drawables: left, top, right, bottom
//! - line and paint flags: maxLines, ellipsize, singleLine, allCaps, strike
//! - fontFamily / textStyle: declared parts of the typeface
//! - typeface: the combined result

use crate::types::{Drawable, Ellipsize, Rgba, TextStyle, Typeface};

/// Compound drawable slots, in `[left, top, right, bottom]` order.
pub type CompoundDrawables = [Option<Drawable>; 4];

property_arrays! {
    TEXT: String = String::new() => get_text, set_text;

    /// Set when `text` came from the `html` attribute.
    IS_HTML: bool = false => get_is_html, set_is_html;

    HINT: String = String::new() => get_hint, set_hint;

    TEXT_SIZE: Option<f32> = None => get_text_size, set_text_size;

    TEXT_COLOR: Option<Rgba> = None => get_text_color, set_text_color;

    HINT_COLOR: Option<Rgba> = None => get_hint_color, set_hint_color;

    LINK_COLOR: Option<Rgba> = None => get_link_color, set_link_color;

    HIGHLIGHT_COLOR: Option<Rgba> = None => get_highlight_color, set_highlight_color;

    COMPOUND_DRAWABLES: CompoundDrawables = [None, None, None, None]
        => get_compound_drawables, set_compound_drawables;

    DRAWABLE_PADDING: f32 = 0.0 => get_drawable_padding, set_drawable_padding;

    MAX_LINES: Option<u32> = None => get_max_lines, set_max_lines;

    ELLIPSIZE: Option<Ellipsize> = None => get_ellipsize, set_ellipsize;

    STRIKE_THROUGH: bool = false => get_strike_through, set_strike_through;

    SINGLE_LINE: bool = false => get_single_line, set_single_line;

    ALL_CAPS: bool = false => get_all_caps, set_all_caps;

    INCLUDE_FONT_PADDING: bool = true => get_include_font_padding, set_include_font_padding;

    FONT_FAMILY: Option<String> = None => get_font_family, set_font_family;

    TEXT_STYLE: Option<TextStyle> = None => get_text_style, set_text_style;

    TYPEFACE: Option<Typeface> = None => get_typeface, set_typeface;
}

/// Set one compound drawable slot (0 = left .. 3 = bottom), keeping the others.
pub fn set_compound_drawable(index: usize, slot: usize, drawable: Drawable) {
    COMPOUND_DRAWABLES.with(|arr| {
        arr.update(index, |drawables| {
            if let Some(entry) = drawables.get_mut(slot) {
                *entry = Some(drawable);
            }
        })
    });
}

/// Recompute the typeface from the declared family and style.
///
/// Nothing happens until at least one of them is declared.
pub fn refresh_typeface(index: usize) {
    let family = get_font_family(index);
    let style = get_text_style(index);
    if family.is_none() && style.is_none() {
        return;
    }
    set_typeface(
        index,
        Some(Typeface {
            family,
            style: style.unwrap_or(TextStyle::NORMAL),
        }),
    );
}
