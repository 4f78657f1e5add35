//! Core types for spark-inflate.
//!
//! These are the typed forms attribute processors hand to the widget store.
//! Everything a layout can express as a string literal has a parser here.

use serde::Deserialize;

use crate::config::DisplayMetrics;

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Alpha 255 = fully opaque, 0 = fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    // Standard colors
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Create from a packed 0xRRGGBB integer (alpha = 255).
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Create from a packed 0xAARRGGBB integer.
    pub const fn from_argb_int(argb: u32) -> Self {
        Self::new(
            ((argb >> 16) & 0xFF) as u8,
            ((argb >> 8) & 0xFF) as u8,
            (argb & 0xFF) as u8,
            ((argb >> 24) & 0xFF) as u8,
        )
    }

    /// Pack into 0xAARRGGBB.
    pub const fn to_argb_int(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Check if color is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Parse hex color string (#RGB, #ARGB, #RRGGBB, #AARRGGBB).
    ///
    /// Alpha leads, as in server layouts written for Android hosts.
    ///
    /// # Examples
    ///
    /// ```
    /// use spark_inflate::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba::rgb(255, 0, 0)));
    /// assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::WHITE));
    /// assert_eq!(Rgba::from_hex("#80ff0000"), Some(Rgba::new(255, 0, 0, 128)));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        fn doubled(s: &[u8], i: usize) -> Option<u8> {
            let d = hex_digit(s[i])?;
            Some((d << 4) | d)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => Some(Self::rgb(
                doubled(bytes, 0)?,
                doubled(bytes, 1)?,
                doubled(bytes, 2)?,
            )),
            4 => Some(Self::new(
                doubled(bytes, 1)?,
                doubled(bytes, 2)?,
                doubled(bytes, 3)?,
                doubled(bytes, 0)?,
            )),
            6 => Some(Self::rgb(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
            )),
            8 => Some(Self::new(
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
                hex_byte(bytes, 6)?,
                hex_byte(bytes, 0)?,
            )),
            _ => None,
        }
    }

    /// Parse any supported color literal: hex or a named color.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if input.starts_with('#') {
            return Self::from_hex(input);
        }

        match input.to_ascii_lowercase().as_str() {
            "transparent" => Some(Self::TRANSPARENT),
            "black" => Some(Self::BLACK),
            "white" => Some(Self::WHITE),
            "red" => Some(Self::RED),
            "green" => Some(Self::GREEN),
            "blue" => Some(Self::BLUE),
            "yellow" => Some(Self::YELLOW),
            "cyan" => Some(Self::CYAN),
            "magenta" => Some(Self::MAGENTA),
            "gray" | "grey" => Some(Self::GRAY),
            _ => None,
        }
    }
}

// =============================================================================
// Dimension - Lengths with units plus the two layout sentinels
// =============================================================================

/// Pixel value reported for `match_parent`.
pub const MATCH_PARENT: f32 = -1.0;
/// Pixel value reported for `wrap_content`.
pub const WRAP_CONTENT: f32 = -2.0;

/// Unit of a [`Dimension::Length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Px,
    Dp,
    Sp,
    Pt,
    In,
    Mm,
}

/// A length as written in a layout: `"16dp"`, `"12sp"`, `"4"`, `"match_parent"`.
///
/// # Examples
///
/// ```
/// use spark_inflate::types::{Dimension, Unit};
///
/// assert_eq!(Dimension::parse("16dp"), Some(Dimension::Length(16.0, Unit::Dp)));
/// assert_eq!(Dimension::parse("match_parent"), Some(Dimension::MatchParent));
/// assert_eq!(Dimension::parse("7"), Some(Dimension::Length(7.0, Unit::Px)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    MatchParent,
    WrapContent,
    Length(f32, Unit),
}

impl Default for Dimension {
    fn default() -> Self {
        Self::WrapContent
    }
}

impl Dimension {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        match input {
            "match_parent" | "fill_parent" => return Some(Self::MatchParent),
            "wrap_content" => return Some(Self::WrapContent),
            _ => {}
        }

        let split = input
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(input.len());
        let (number, suffix) = input.split_at(split);
        let value: f32 = number.trim().parse().ok()?;
        let unit = match suffix {
            "" | "px" => Unit::Px,
            "dp" | "dip" => Unit::Dp,
            "sp" => Unit::Sp,
            "pt" => Unit::Pt,
            "in" => Unit::In,
            "mm" => Unit::Mm,
            _ => return None,
        };
        Some(Self::Length(value, unit))
    }

    /// Resolve to pixels. The sentinels map to [`MATCH_PARENT`] and [`WRAP_CONTENT`].
    pub fn to_px(self, metrics: &DisplayMetrics) -> f32 {
        match self {
            Self::MatchParent => MATCH_PARENT,
            Self::WrapContent => WRAP_CONTENT,
            Self::Length(value, unit) => match unit {
                Unit::Px => value,
                Unit::Dp => value * metrics.density,
                Unit::Sp => value * metrics.scaled_density,
                Unit::Pt => value * metrics.density * 160.0 / 72.0,
                Unit::In => value * metrics.density * 160.0,
                Unit::Mm => value * metrics.density * 160.0 / 25.4,
            },
        }
    }
}

impl From<f32> for Dimension {
    fn from(px: f32) -> Self {
        Self::Length(px, Unit::Px)
    }
}

/// Four-sided spacing in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Edges {
    pub const fn all(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

// =============================================================================
// Gravity (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Placement of content within its bounds.
    ///
    /// Combine with bitwise OR: `Gravity::TOP | Gravity::CENTER_HORIZONTAL`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Gravity: u32 {
        const NONE = 0;
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const TOP = 1 << 2;
        const BOTTOM = 1 << 3;
        const CENTER_HORIZONTAL = 1 << 4;
        const CENTER_VERTICAL = 1 << 5;
        const START = 1 << 6;
        const END = 1 << 7;
        const FILL_HORIZONTAL = 1 << 8;
        const FILL_VERTICAL = 1 << 9;
        const CENTER = Self::CENTER_HORIZONTAL.bits() | Self::CENTER_VERTICAL.bits();
        const FILL = Self::FILL_HORIZONTAL.bits() | Self::FILL_VERTICAL.bits();
    }
}

impl Gravity {
    /// Parse a `|`-separated list such as `"center_vertical|end"`.
    pub fn parse(input: &str) -> Option<Self> {
        let mut gravity = Self::NONE;
        for part in input.split('|') {
            gravity |= match part.trim() {
                "left" => Self::LEFT,
                "right" => Self::RIGHT,
                "top" => Self::TOP,
                "bottom" => Self::BOTTOM,
                "center" => Self::CENTER,
                "center_horizontal" => Self::CENTER_HORIZONTAL,
                "center_vertical" => Self::CENTER_VERTICAL,
                "start" => Self::START,
                "end" => Self::END,
                "fill" => Self::FILL,
                "fill_horizontal" => Self::FILL_HORIZONTAL,
                "fill_vertical" => Self::FILL_VERTICAL,
                _ => return None,
            };
        }
        Some(gravity)
    }
}

// =============================================================================
// Text Style (bitflags)
// =============================================================================

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct TextStyle: u8 {
        const NORMAL = 0;
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
    }
}

impl TextStyle {
    /// Parse `"bold"`, `"italic"`, `"bold|italic"` or `"normal"`.
    /// Unknown parts are ignored.
    pub fn parse(input: &str) -> Self {
        input.split('|').fold(Self::NORMAL, |style, part| match part.trim() {
            "bold" => style | Self::BOLD,
            "italic" => style | Self::ITALIC,
            _ => style,
        })
    }
}

/// Resolved font selection for a text widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Typeface {
    pub family: Option<String>,
    pub style: TextStyle,
}

// =============================================================================
// Widget Capabilities (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// What a widget instance can do. Granted by the parser that created it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Capabilities: u8 {
        const NONE = 0;
        /// Holds child widgets.
        const CONTAINER = 1 << 0;
        /// Displays text.
        const TEXT = 1 << 1;
        /// Stacks children along an orientation.
        const LINEAR = 1 << 2;
        /// Positions children through a constraint set.
        const CONSTRAINTS = 1 << 3;
        /// Presents items through an adapter.
        const LIST = 1 << 4;
    }
}

// =============================================================================
// Enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Invisible,
    Gone,
}

impl Visibility {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "visible" => Some(Self::Visible),
            "invisible" => Some(Self::Invisible),
            "gone" => Some(Self::Gone),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    /// Anything but `"horizontal"` is vertical.
    pub fn parse(input: &str) -> Self {
        if input.trim() == "horizontal" {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ellipsize {
    Start,
    Middle,
    End,
    Marquee,
}

impl Ellipsize {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "start" => Some(Self::Start),
            "middle" => Some(Self::Middle),
            "end" => Some(Self::End),
            "marquee" => Some(Self::Marquee),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverScrollMode {
    Always,
    #[default]
    IfContentScrolls,
    Never,
}

impl OverScrollMode {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "never" => Self::Never,
            "always" => Self::Always,
            _ => Self::IfContentScrolls,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    ClipBounds,
    OpticalBounds,
}

impl LayoutMode {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "clipBounds" => Some(Self::ClipBounds),
            "opticalBounds" => Some(Self::OpticalBounds),
            _ => None,
        }
    }
}

/// Item arrangement strategy of a list widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutManagerKind {
    Linear,
}

impl LayoutManagerKind {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "androidx.recyclerview.widget.LinearLayoutManager" | "LinearLayoutManager" => {
                Some(Self::Linear)
            }
            _ => None,
        }
    }
}

/// Edge of a widget used by constraint relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    Baseline,
    Start,
    End,
}

// =============================================================================
// Drawable
// =============================================================================

/// Something a widget can paint as a background or compound image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Drawable {
    Color(Rgba),
    Url(String),
}

impl Drawable {
    /// Color literals become [`Drawable::Color`]; `http(s)://` becomes [`Drawable::Url`].
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.starts_with("http://") || input.starts_with("https://") {
            return Some(Self::Url(input.to_string()));
        }
        Rgba::parse(input).map(Self::Color)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid color {raw:?}")))
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid dimension {raw:?}")))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_from_hex_rrggbb() {
        assert_eq!(Rgba::from_hex("#00ff00"), Some(Rgba::GREEN));
        assert_eq!(Rgba::from_hex("0000ff"), Some(Rgba::BLUE));
    }

    #[test]
    fn test_rgba_from_hex_alpha_leads() {
        assert_eq!(Rgba::from_hex("#80ff0000"), Some(Rgba::new(255, 0, 0, 128)));
        assert_eq!(Rgba::from_hex("#8f00"), Some(Rgba::new(255, 0, 0, 0x88)));
    }

    #[test]
    fn test_rgba_from_hex_invalid() {
        assert!(Rgba::from_hex("#12345").is_none());
        assert!(Rgba::from_hex("#zzzzzz").is_none());
    }

    #[test]
    fn test_rgba_parse_named() {
        assert_eq!(Rgba::parse("Red"), Some(Rgba::RED));
        assert_eq!(Rgba::parse("transparent"), Some(Rgba::TRANSPARENT));
        assert!(Rgba::parse("blurple").is_none());
    }

    #[test]
    fn test_rgba_argb_round_trip() {
        let color = Rgba::new(1, 2, 3, 4);
        assert_eq!(Rgba::from_argb_int(color.to_argb_int()), color);
    }

    #[test]
    fn test_dimension_parse_units() {
        assert_eq!(Dimension::parse("12sp"), Some(Dimension::Length(12.0, Unit::Sp)));
        assert_eq!(Dimension::parse("1.5dip"), Some(Dimension::Length(1.5, Unit::Dp)));
        assert_eq!(Dimension::parse("wrap_content"), Some(Dimension::WrapContent));
        assert_eq!(Dimension::parse("fill_parent"), Some(Dimension::MatchParent));
        assert!(Dimension::parse("12furlongs").is_none());
        assert!(Dimension::parse("dp").is_none());
    }

    #[test]
    fn test_dimension_to_px() {
        let metrics = DisplayMetrics {
            density: 2.0,
            scaled_density: 3.0,
        };
        assert_eq!(Dimension::Length(10.0, Unit::Dp).to_px(&metrics), 20.0);
        assert_eq!(Dimension::Length(10.0, Unit::Sp).to_px(&metrics), 30.0);
        assert_eq!(Dimension::Length(10.0, Unit::Px).to_px(&metrics), 10.0);
        assert_eq!(Dimension::MatchParent.to_px(&metrics), MATCH_PARENT);
        assert_eq!(Dimension::WrapContent.to_px(&metrics), WRAP_CONTENT);
    }

    #[test]
    fn test_gravity_parse() {
        assert_eq!(Gravity::parse("center"), Some(Gravity::CENTER));
        assert_eq!(
            Gravity::parse("top|center_horizontal"),
            Some(Gravity::TOP | Gravity::CENTER_HORIZONTAL)
        );
        assert!(Gravity::parse("sideways").is_none());
    }

    #[test]
    fn test_text_style_parse() {
        assert_eq!(TextStyle::parse("bold|italic"), TextStyle::BOLD | TextStyle::ITALIC);
        assert_eq!(TextStyle::parse("normal"), TextStyle::NORMAL);
    }

    #[test]
    fn test_orientation_defaults_vertical() {
        assert_eq!(Orientation::parse("horizontal"), Orientation::Horizontal);
        assert_eq!(Orientation::parse("diagonal"), Orientation::Vertical);
    }

    #[test]
    fn test_drawable_parse() {
        assert_eq!(Drawable::parse("#fff"), Some(Drawable::Color(Rgba::WHITE)));
        assert_eq!(
            Drawable::parse("https://cdn/x.png"),
            Some(Drawable::Url("https://cdn/x.png".into()))
        );
        assert!(Drawable::parse("nope").is_none());
    }

    #[test]
    fn test_deserialize_color_and_dimension() {
        let color: Rgba = serde_json::from_str("\"#000\"").unwrap();
        assert_eq!(color, Rgba::BLACK);
        let dim: Dimension = serde_json::from_str("\"8dp\"").unwrap();
        assert_eq!(dim, Dimension::Length(8.0, Unit::Dp));
        assert!(serde_json::from_str::<Rgba>("\"nope\"").is_err());
    }
}
