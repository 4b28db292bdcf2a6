use crate::animation::ease::{Easing, EasingMode};
use crate::foundation::error::{RenderError, RenderResult};

/// Whether a transition brings a frame onto the screen or clears it away.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDirection {
    /// The incoming frame appears over the outgoing one.
    #[default]
    In,
    /// The outgoing frame disappears, uncovering the background.
    Out,
}

/// Axis and sense of a linear movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Sweep {
    /// Leading edge travels from the left edge to the right edge.
    Right,
    /// Leading edge travels from the right edge to the left edge.
    Left,
    /// Leading edge travels from the bottom edge to the top edge.
    Up,
    /// Leading edge travels from the top edge to the bottom edge.
    Down,
}

/// Orientation of the center line a split opens from (or closes onto).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SplitAxis {
    /// Horizontal center line; the split grows up and down.
    Horizontal,
    /// Vertical center line; the split grows left and right.
    Vertical,
}

/// Transition families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TransitionKind {
    /// Hard cut at completion.
    Swap,
    /// Alpha fade.
    Fade,
    /// Rectangular reveal with a moving leading edge.
    Swipe(Sweep),
    /// Strip growing outward from the center line.
    SplitExpand(SplitAxis),
    /// Strip shrinking onto the center line.
    SplitCollapse(SplitAxis),
    /// Circle growing from the center.
    CircularExpand,
    /// Circle shrinking onto the center.
    CircularCollapse,
    /// Frame grows from the center point.
    ZoomIn,
    /// Frame shrinks onto the center point.
    ZoomOut,
    /// Incoming frame pushes the outgoing one off screen.
    Push(Sweep),
}

impl TransitionKind {
    /// All kinds in id order.
    pub const ALL: [Self; 18] = [
        Self::Swap,
        Self::Fade,
        Self::Swipe(Sweep::Right),
        Self::Swipe(Sweep::Left),
        Self::Swipe(Sweep::Up),
        Self::Swipe(Sweep::Down),
        Self::SplitExpand(SplitAxis::Horizontal),
        Self::SplitCollapse(SplitAxis::Horizontal),
        Self::SplitExpand(SplitAxis::Vertical),
        Self::SplitCollapse(SplitAxis::Vertical),
        Self::CircularExpand,
        Self::CircularCollapse,
        Self::ZoomIn,
        Self::ZoomOut,
        Self::Push(Sweep::Right),
        Self::Push(Sweep::Left),
        Self::Push(Sweep::Up),
        Self::Push(Sweep::Down),
    ];

    /// Stable persistence id. Ids are never reused.
    pub const fn id(self) -> u32 {
        match self {
            Self::Swap => 10,
            Self::Fade => 20,
            Self::Swipe(Sweep::Right) => 30,
            Self::Swipe(Sweep::Left) => 31,
            Self::Swipe(Sweep::Up) => 32,
            Self::Swipe(Sweep::Down) => 33,
            Self::SplitExpand(SplitAxis::Horizontal) => 40,
            Self::SplitCollapse(SplitAxis::Horizontal) => 41,
            Self::SplitExpand(SplitAxis::Vertical) => 42,
            Self::SplitCollapse(SplitAxis::Vertical) => 43,
            Self::CircularExpand => 50,
            Self::CircularCollapse => 51,
            Self::ZoomIn => 60,
            Self::ZoomOut => 61,
            Self::Push(Sweep::Right) => 70,
            Self::Push(Sweep::Left) => 71,
            Self::Push(Sweep::Up) => 72,
            Self::Push(Sweep::Down) => 73,
        }
    }

    /// Look up a kind by persistence id.
    pub fn from_id(id: u32) -> RenderResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.id() == id)
            .ok_or_else(|| RenderError::config(format!("unknown transition id {id}")))
    }

    /// Human-readable name.
    pub fn name(self) -> String {
        match self {
            Self::Swap => "swap".to_string(),
            Self::Fade => "fade".to_string(),
            Self::Swipe(s) => format!("swipe-{}", sweep_name(s)),
            Self::SplitExpand(a) => format!("{}-split-expand", axis_name(a)),
            Self::SplitCollapse(a) => format!("{}-split-collapse", axis_name(a)),
            Self::CircularExpand => "circular-expand".to_string(),
            Self::CircularCollapse => "circular-collapse".to_string(),
            Self::ZoomIn => "zoom-in".to_string(),
            Self::ZoomOut => "zoom-out".to_string(),
            Self::Push(s) => format!("push-{}", sweep_name(s)),
        }
    }
}

fn sweep_name(s: Sweep) -> &'static str {
    match s {
        Sweep::Right => "right",
        Sweep::Left => "left",
        Sweep::Up => "up",
        Sweep::Down => "down",
    }
}

fn axis_name(a: SplitAxis) -> &'static str {
    match a {
        SplitAxis::Horizontal => "horizontal",
        SplitAxis::Vertical => "vertical",
    }
}

/// A transition family applied in one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Transition {
    /// Family.
    pub kind: TransitionKind,
    /// Appearing or disappearing.
    pub direction: TransitionDirection,
}

impl Transition {
    /// Build a transition.
    pub const fn new(kind: TransitionKind, direction: TransitionDirection) -> Self {
        Self { kind, direction }
    }

    /// Resolve a persisted transition id.
    pub fn from_id(id: u32, direction: TransitionDirection) -> RenderResult<Self> {
        Ok(Self::new(TransitionKind::from_id(id)?, direction))
    }
}

/// Transition metadata as persisted alongside a slide (integers and enums only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    /// [`TransitionKind::id`].
    pub transition_id: u32,
    /// IN or OUT.
    pub direction: TransitionDirection,
    /// [`crate::EasingCurve::id`].
    pub easing_id: u32,
    /// Easing direction.
    pub easing_mode: EasingMode,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            transition_id: TransitionKind::Fade.id(),
            direction: TransitionDirection::In,
            easing_id: Easing::LINEAR.curve.id(),
            easing_mode: EasingMode::InOut,
            duration_ms: 300,
        }
    }
}

impl TransitionSettings {
    /// Resolve ids into typed values; unknown ids are configuration errors.
    pub fn resolve(&self) -> RenderResult<(Transition, Easing)> {
        let transition = Transition::from_id(self.transition_id, self.direction)?;
        let easing = Easing::from_id(self.easing_id, self.easing_mode)?;
        Ok((transition, easing))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
