use crate::foundation::core::Rgba8;

/// Drop shadow drawn as an offset copy of the shape.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shadow {
    /// Shadow color.
    pub color: Rgba8,
    /// Horizontal offset in pixels.
    pub offset_x: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
}

/// Stroke around a component's box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Border {
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f64,
    /// Corner radius; `0` draws square corners.
    #[serde(default)]
    pub corner_radius: f64,
}

/// Glyph outline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Outline {
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f64,
}

/// Decoration shared by every component kind. Everything is optional.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoxStyle {
    /// Fill behind the content.
    pub background: Option<Rgba8>,
    /// Stroke around the bounds.
    pub border: Option<Border>,
    /// Shadow under background and border.
    pub shadow: Option<Shadow>,
}

/// Text paint layers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Glyph fill.
    pub fill: Rgba8,
    /// Optional glyph outline, drawn under the fill.
    pub outline: Option<Outline>,
    /// Optional shadow, drawn first.
    pub shadow: Option<Shadow>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            fill: Rgba8::opaque(255, 255, 255),
            outline: None,
            shadow: None,
        }
    }
}
