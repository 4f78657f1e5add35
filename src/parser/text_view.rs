//! TextView - text content, text colors, typeface and compound drawables.

use super::{ViewTypeParser, parse_attribute};
use crate::engine::arrays::{layout, text};
use crate::processor::{
    BooleanProcessor, ColorProcessor, DimensionProcessor, DrawableProcessor, GravityProcessor,
    NumberProcessor, ProcessorMap, StringProcessor,
};
use crate::types::{Capabilities, Ellipsize, TextStyle};

/// Compound drawable attributes, in slot order.
const DRAWABLES: [&str; 4] = ["drawableLeft", "drawableTop", "drawableRight", "drawableBottom"];

pub struct TextViewParser;

impl ViewTypeParser for TextViewParser {
    fn type_name(&self) -> &str {
        "TextView"
    }

    fn parent_type(&self) -> Option<&str> {
        Some("View")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::TEXT
    }

    fn add_attribute_processors(&self, processors: &mut ProcessorMap) {
        processors.add("text", StringProcessor::new(|view, value| text::set_text(view, value.to_string())));
        processors.add(
            "html",
            StringProcessor::new(|view, value| {
                text::set_text(view, value.to_string());
                text::set_is_html(view, true);
            }),
        );
        processors.add(
            "prefix",
            StringProcessor::new(|view, prefix| {
                let current = text::get_text(view);
                text::set_text(view, format!("{prefix}{current}"));
            }),
        );
        processors.add(
            "suffix",
            StringProcessor::new(|view, suffix| {
                let current = text::get_text(view);
                text::set_text(view, format!("{current}{suffix}"));
            }),
        );
        processors.add("hint", StringProcessor::new(|view, value| text::set_hint(view, value.to_string())));
        processors.add("textSize", DimensionProcessor::new(|view, px| text::set_text_size(view, Some(px))));
        processors.add("gravity", GravityProcessor::new(layout::set_gravity));

        // Colors
        processors.add("textColor", ColorProcessor::new(|view, color| text::set_text_color(view, Some(color))));
        processors.add("textColorHint", ColorProcessor::new(|view, color| text::set_hint_color(view, Some(color))));
        processors.add("textColorLink", ColorProcessor::new(|view, color| text::set_link_color(view, Some(color))));
        processors.add(
            "textColorHighLight",
            ColorProcessor::new(|view, color| text::set_highlight_color(view, Some(color))),
        );

        // Compound drawables
        for (slot, name) in DRAWABLES.into_iter().enumerate() {
            processors.add(
                name,
                DrawableProcessor::new(move |view, drawable| text::set_compound_drawable(view, slot, drawable)),
            );
        }
        processors.add("drawablePadding", DimensionProcessor::new(text::set_drawable_padding));

        // Line handling
        processors.add(
            "maxLines",
            NumberProcessor::new(|view, lines| text::set_max_lines(view, Some(lines.max(0.0) as u32))),
        );
        processors.add(
            "ellipsize",
            StringProcessor::try_new(|target, value| {
                let ellipsize = parse_attribute(target, value, Ellipsize::parse)?;
                text::set_ellipsize(target.view, ellipsize);
                Ok(())
            }),
        );
        processors.add("singleLine", BooleanProcessor::new(text::set_single_line));
        processors.add("textAllCaps", BooleanProcessor::new(text::set_all_caps));
        processors.add("includeFontPadding", BooleanProcessor::new(text::set_include_font_padding));
        processors.add(
            "paintFlags",
            StringProcessor::new(|view, flags| {
                if flags == "strike" {
                    text::set_strike_through(view, true);
                }
            }),
        );

        // Typeface: family and style combine, whichever arrives second wins
        processors.add(
            "fontFamily",
            StringProcessor::new(|view, family| {
                text::set_font_family(view, (!family.is_empty()).then(|| family.to_string()));
                text::refresh_typeface(view);
            }),
        );
        processors.add(
            "textStyle",
            StringProcessor::new(|view, style| {
                text::set_text_style(view, Some(TextStyle::parse(style)));
                text::refresh_typeface(view);
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use crate::engine::{self, arrays::text};
    use crate::inflater::InflateContext;
    use crate::parser::ParserRegistry;
    use crate::types::{Drawable, Rgba, TextStyle, Typeface};
    use crate::value::ObjectValue;

    fn setup() -> Rc<InflateContext> {
        engine::reset_engine();
        InflateContext::builder(ParserRegistry::with_defaults().unwrap()).build()
    }

    fn inflate(context: &Rc<InflateContext>, layout: serde_json::Value) -> usize {
        let layout = context.compile_layout(&layout).unwrap();
        context.inflate(&layout, &ObjectValue::new(), None, None).unwrap()
    }

    #[test]
    fn test_prefix_and_suffix_wrap_text() {
        let context = setup();
        let view = inflate(
            &context,
            json!({"type": "TextView", "text": "42", "prefix": "$", "suffix": " total"}),
        );
        assert_eq!(text::get_text(view), "$42 total");
    }

    #[test]
    fn test_typeface_combines_family_and_style() {
        let context = setup();
        let view = inflate(
            &context,
            json!({"type": "TextView", "textStyle": "bold|italic", "fontFamily": "serif"}),
        );
        assert_eq!(
            text::get_typeface(view),
            Some(Typeface {
                family: Some("serif".into()),
                style: TextStyle::BOLD | TextStyle::ITALIC,
            })
        );
    }

    #[test]
    fn test_compound_drawables_keep_their_slots() {
        let context = setup();
        let view = inflate(
            &context,
            json!({"type": "TextView", "drawableRight": "#ff0000", "drawableTop": "https://cdn/icon.png"}),
        );
        let drawables = text::get_compound_drawables(view);
        assert_eq!(drawables[0], None);
        assert_eq!(drawables[1], Some(Drawable::Url("https://cdn/icon.png".into())));
        assert_eq!(drawables[2], Some(Drawable::Color(Rgba::RED)));
        assert_eq!(drawables[3], None);
    }

    #[test]
    fn test_html_and_strike_flags() {
        let context = setup();
        let view = inflate(
            &context,
            json!({"type": "TextView", "html": "<b>hi</b>", "paintFlags": "strike", "maxLines": "2"}),
        );
        assert_eq!(text::get_text(view), "<b>hi</b>");
        assert!(text::get_is_html(view));
        assert!(text::get_strike_through(view));
        assert_eq!(text::get_max_lines(view), Some(2));
    }
}
