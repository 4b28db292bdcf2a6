use std::fmt::Write as _;

use chrono::NaiveDateTime;
use chrono::format::StrftimeItems;

use crate::foundation::core::Rect;
use crate::foundation::error::{RenderError, RenderResult};
use crate::slide::resources::{FontHandle, ImageHandle, LiveFrame};
use crate::slide::style::{BoxStyle, TextStyle};
use crate::text::fit::FitPolicy;
use crate::text::layout::{HorizontalAlign, Padding, VerticalAlign};

/// Slide-unique component id, assigned by [`crate::Slide::add`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct ComponentId(pub u64);

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One visual element of a slide.
#[derive(Clone, Debug)]
pub struct SlideComponent {
    id: ComponentId,
    /// Position and size in canvas pixels.
    pub bounds: Rect,
    /// Hidden components are neither drawn nor grouped.
    pub visible: bool,
    /// Box decoration.
    pub style: BoxStyle,
    /// Content.
    pub kind: ComponentKind,
}

impl SlideComponent {
    /// Visible component with no box decoration. The id is assigned when it is added to a
    /// slide.
    pub fn new(bounds: Rect, kind: ComponentKind) -> Self {
        Self {
            id: ComponentId::default(),
            bounds,
            visible: true,
            style: BoxStyle::default(),
            kind,
        }
    }

    /// Replace the box style.
    pub fn with_style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    /// Id within the owning slide.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ComponentId) {
        self.id = id;
    }

    /// Whether this component changes every frame and must bypass the group cache.
    pub fn is_live(&self) -> bool {
        matches!(
            self.kind,
            ComponentKind::Media(MediaContent {
                source: MediaSource::Video(_),
                ..
            })
        )
    }
}

/// What a component shows.
#[derive(Clone, Debug)]
pub enum ComponentKind {
    /// Static text.
    Text {
        /// Unicode text, any newline convention.
        text: String,
        /// Layout and paint.
        format: TextFormat,
    },
    /// Text slot whose content is filled in by the presentation layer (song verse, bible
    /// passage, ...).
    Placeholder {
        /// Which slot this is.
        role: PlaceholderRole,
        /// Current content.
        text: String,
        /// Layout and paint.
        format: TextFormat,
    },
    /// Current date/time, formatted with a strftime pattern at render time.
    DateTime {
        /// strftime pattern, e.g. `"%A %B %-d, %Y"`.
        pattern: String,
        /// Layout and paint.
        format: TextFormat,
    },
    /// Still image or video.
    Media(MediaContent),
}

impl ComponentKind {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Placeholder { .. } => "placeholder",
            Self::DateTime { .. } => "date_time",
            Self::Media(MediaContent {
                source: MediaSource::Image(_),
                ..
            }) => "image",
            Self::Media(MediaContent {
                source: MediaSource::Video(_),
                ..
            }) => "video",
        }
    }
}

/// Placeholder slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderRole {
    /// Title line.
    Title,
    /// Secondary title.
    Subtitle,
    /// Main content.
    Body,
    /// Footer (copyright, reference).
    Footer,
}

/// How a text component is laid out and painted.
#[derive(Clone, Debug)]
pub struct TextFormat {
    /// Font to shape with. Text without a font fails to rasterize and is skipped.
    pub font: Option<FontHandle>,
    /// Requested size in pixels.
    pub font_size: f32,
    /// Size fitting policy.
    pub fit: FitPolicy,
    /// Break lines at the box width.
    pub wrap: bool,
    /// Per-line horizontal alignment.
    pub h_align: HorizontalAlign,
    /// Block vertical alignment.
    pub v_align: VerticalAlign,
    /// Insets from the component bounds.
    pub padding: Padding,
    /// Paint layers.
    pub style: TextStyle,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            font: None,
            font_size: 48.0,
            fit: FitPolicy::None,
            wrap: true,
            h_align: HorizontalAlign::default(),
            v_align: VerticalAlign::default(),
            padding: Padding::default(),
            style: TextStyle::default(),
        }
    }
}

/// Media content and how it is fitted into the bounds.
#[derive(Clone, Debug)]
pub struct MediaContent {
    /// Pixels.
    pub source: MediaSource,
    /// Scaling into the component bounds.
    pub scale: ScaleMode,
}

/// Where media pixels come from.
#[derive(Clone, Debug)]
pub enum MediaSource {
    /// Decoded still image; cacheable.
    Image(ImageHandle),
    /// Latest frame of a playing video; live.
    Video(LiveFrame),
}

/// Media scaling into the component bounds. The result is always clipped to the bounds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Natural size, centered.
    None,
    /// Fill the bounds, ignoring aspect ratio.
    Stretch,
    /// Largest size that fits inside the bounds, centered.
    #[default]
    Uniform,
    /// Smallest size that covers the bounds, centered.
    UniformFill,
}

impl ScaleMode {
    /// Destination rectangle for content of `width` x `height` inside `bounds`.
    pub fn place(self, bounds: Rect, width: f64, height: f64) -> Rect {
        if width <= 0.0 || height <= 0.0 {
            return Rect::new(bounds.x0, bounds.y0, bounds.x0, bounds.y0);
        }
        let (w, h) = match self {
            Self::None => (width, height),
            Self::Stretch => return bounds,
            Self::Uniform => {
                let s = (bounds.width() / width).min(bounds.height() / height);
                (width * s, height * s)
            }
            Self::UniformFill => {
                let s = (bounds.width() / width).max(bounds.height() / height);
                (width * s, height * s)
            }
        };
        let c = bounds.center();
        Rect::new(c.x - w / 2.0, c.y - h / 2.0, c.x + w / 2.0, c.y + h / 2.0)
    }
}

/// Format `at` with a strftime `pattern`. Invalid patterns are an error, not a panic.
pub fn format_date_time(pattern: &str, at: &NaiveDateTime) -> RenderResult<String> {
    let mut out = String::new();
    write!(out, "{}", at.format_with_items(StrftimeItems::new(pattern)))
        .map_err(|_| RenderError::validation(format!("invalid date/time pattern '{pattern}'")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/slide/component.rs"]
mod tests;
