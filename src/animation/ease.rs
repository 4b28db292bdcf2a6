use crate::foundation::error::{RenderError, RenderResult};

/// Easing curve families. Each family has a stable integer id used by persisted slide data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EasingCurve {
    /// Constant rate.
    Linear,
    /// `t^2`.
    Quadratic,
    /// `t^3`.
    Cubic,
    /// `t^4`.
    Quartic,
    /// `t^5`.
    Quintic,
    /// `2^(10(t - 1))`.
    Exponential,
    /// Quarter cosine wave.
    Sinusoidal,
    /// Quarter circle.
    Circular,
}

impl EasingCurve {
    /// All curves in id order.
    pub const ALL: [Self; 8] = [
        Self::Linear,
        Self::Quadratic,
        Self::Cubic,
        Self::Quartic,
        Self::Quintic,
        Self::Exponential,
        Self::Sinusoidal,
        Self::Circular,
    ];

    /// Stable persistence id. Ids are never reused.
    pub const fn id(self) -> u32 {
        match self {
            Self::Linear => 10,
            Self::Quadratic => 20,
            Self::Cubic => 30,
            Self::Quartic => 40,
            Self::Quintic => 50,
            Self::Exponential => 60,
            Self::Sinusoidal => 70,
            Self::Circular => 80,
        }
    }

    /// Look up a curve by persistence id.
    pub fn from_id(id: u32) -> RenderResult<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| RenderError::config(format!("unknown easing id {id}")))
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::Cubic => "cubic",
            Self::Quartic => "quartic",
            Self::Quintic => "quintic",
            Self::Exponential => "exponential",
            Self::Sinusoidal => "sinusoidal",
            Self::Circular => "circular",
        }
    }

    // Ease-in shape on [0, 1]; the other modes are derived from it.
    fn ease_in(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Quadratic => t * t,
            Self::Cubic => t * t * t,
            Self::Quartic => t.powi(4),
            Self::Quintic => t.powi(5),
            Self::Exponential => {
                if t <= 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * (t - 1.0))
                }
            }
            Self::Sinusoidal => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
            Self::Circular => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
        }
    }
}

/// Direction in which a curve is applied.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingMode {
    /// Slow start.
    In,
    /// Slow finish.
    Out,
    /// Slow start and finish.
    #[default]
    InOut,
}

/// A curve applied in one direction. Stateless and `Copy`, so it can be evaluated from any
/// thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Easing {
    /// Curve family.
    pub curve: EasingCurve,
    /// Direction.
    pub mode: EasingMode,
}

impl Default for Easing {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl Easing {
    /// Linear easing (all modes coincide).
    pub const LINEAR: Self = Self {
        curve: EasingCurve::Linear,
        mode: EasingMode::InOut,
    };

    /// Build an easing.
    pub const fn new(curve: EasingCurve, mode: EasingMode) -> Self {
        Self { curve, mode }
    }

    /// Resolve a persisted easing id; unknown ids are configuration errors.
    pub fn from_id(id: u32, mode: EasingMode) -> RenderResult<Self> {
        Ok(Self::new(EasingCurve::from_id(id)?, mode))
    }

    /// Apply this easing to normalized progress `t` in `[0, 1]`.
    ///
    /// Endpoints are exact: `apply(0) == 0` and `apply(1) == 1` for every curve and mode.
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let f = |x: f64| self.curve.ease_in(x);
        let v = match self.mode {
            EasingMode::In => f(t),
            EasingMode::Out => 1.0 - f(1.0 - t),
            EasingMode::InOut => {
                if t < 0.5 {
                    f(2.0 * t) / 2.0
                } else {
                    1.0 - f(2.0 - 2.0 * t) / 2.0
                }
            }
        };
        v.clamp(0.0, 1.0)
    }

    /// Map `(elapsed, duration)` in milliseconds to progress in `[0, 1]`.
    ///
    /// A zero duration completes immediately.
    pub fn progress(self, elapsed_ms: u64, duration_ms: u64) -> f64 {
        if elapsed_ms >= duration_ms {
            return 1.0;
        }
        self.apply(elapsed_ms as f64 / duration_ms as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
