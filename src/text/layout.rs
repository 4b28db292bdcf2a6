use crate::foundation::core::Rect;

/// Horizontal alignment of each line inside the padded box.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Vertical alignment of the text block inside the padded box.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    /// Top edge.
    #[default]
    Top,
    /// Centered.
    Center,
    /// Bottom edge.
    Bottom,
}

/// Insets between a component's bounds and its text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Padding {
    /// Left inset.
    pub left: f64,
    /// Top inset.
    pub top: f64,
    /// Right inset.
    pub right: f64,
    /// Bottom inset.
    pub bottom: f64,
}

impl Padding {
    /// Same inset on every side.
    pub const fn uniform(v: f64) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    /// Shrink `bounds` by this padding. Returns `None` when nothing is left to draw into.
    pub fn inset(&self, bounds: Rect) -> Option<Rect> {
        let r = Rect::new(
            bounds.x0 + self.left,
            bounds.y0 + self.top,
            bounds.x1 - self.right,
            bounds.y1 - self.bottom,
        );
        (r.width() > 0.0 && r.height() > 0.0).then_some(r)
    }
}

/// Offset of a line of width `line_width` inside `available` width.
pub fn horizontal_offset(align: HorizontalAlign, available: f64, line_width: f64) -> f64 {
    match align {
        HorizontalAlign::Left => 0.0,
        HorizontalAlign::Center => (available - line_width) / 2.0,
        HorizontalAlign::Right => available - line_width,
    }
}

/// Offset of a block of height `text_height` inside `available` height.
pub fn vertical_offset(align: VerticalAlign, available: f64, text_height: f64) -> f64 {
    match align {
        VerticalAlign::Top => 0.0,
        VerticalAlign::Center => (available - text_height) / 2.0,
        VerticalAlign::Bottom => available - text_height,
    }
}

/// Collapse every newline convention to `'\n'` before measurement.
///
/// Handles `\r\n`, lone `\r`, NEL (U+0085), LINE SEPARATOR (U+2028) and PARAGRAPH SEPARATOR
/// (U+2029).
pub fn normalize_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\u{85}' | '\u{2028}' | '\u{2029}' => out.push('\n'),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
