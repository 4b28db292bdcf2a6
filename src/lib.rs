//! Slide rendering core for a church presentation application.
//!
//! The crate turns slides into frames and animates between frames:
//!
//! - [`Compositor`] composes a [`Slide`] into a [`FrameRGBA`], caching static runs of
//!   components and redrawing live video every call
//! - [`TextEngine`] shapes text with Parley and fits font sizes to boxes under a [`FitPolicy`]
//! - [`TransitionEngine`] renders one frame of a [`Transition`] from an outgoing and an
//!   incoming frame at a given progress
//! - [`Easing`] maps elapsed time to progress; [`TransitionAnimation`] ties both together
//!
//! Fonts, images and video frames are resolved by the caller and passed in as handles.
//! All pixel buffers are premultiplied RGBA8.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod effects;
pub(crate) mod render;
pub(crate) mod slide;
pub(crate) mod text;

pub use crate::foundation::config::{CacheConfig, RenderConfig, TextConfig};
pub use crate::foundation::core::{Canvas, FrameRGBA, Point, Rect, Rgba8, Rgba8Premul, Vec2};
pub use crate::foundation::error::{RenderError, RenderResult};

pub use crate::animation::ease::{Easing, EasingCurve, EasingMode};
pub use crate::effects::composite::{PremulRgba8, over, over_in_place};
pub use crate::effects::engine::{TransitionAnimation, TransitionEngine, TransitionState};
pub use crate::effects::transitions::{
    SplitAxis, Sweep, Transition, TransitionDirection, TransitionKind, TransitionSettings,
};

pub use crate::render::compositor::{Compositor, CompositorStats};
pub use crate::render::groups::{RenderGroup, plan_groups};
pub use crate::slide::component::{
    ComponentId, ComponentKind, MediaContent, MediaSource, PlaceholderRole, ScaleMode,
    SlideComponent, TextFormat, format_date_time,
};
pub use crate::slide::model::Slide;
pub use crate::slide::resources::{FontHandle, ImageHandle, LiveFrame};
pub use crate::slide::style::{Border, BoxStyle, Outline, Shadow, TextStyle};

pub use crate::text::engine::TextEngine;
pub use crate::text::fit::{
    FitPolicy, FitRequest, FittedText, TextBounds, TextMeasure, fit_font_size,
};
pub use crate::text::layout::{
    HorizontalAlign, Padding, VerticalAlign, horizontal_offset, normalize_line_breaks,
    vertical_offset,
};
