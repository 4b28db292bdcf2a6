use crate::foundation::core::Rgba8;
use crate::foundation::error::{RenderError, RenderResult};

/// Renderer configuration passed explicitly to the compositor and transition engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Background for composed frames and for the area uncovered by OUT transitions.
    pub clear_rgba: Rgba8,
    /// Text fitting limits.
    pub text: TextConfig,
    /// Render-group cache behavior.
    pub cache: CacheConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_rgba: Rgba8::transparent(),
            text: TextConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> RenderResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| RenderError::config(format!("invalid render config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges. Called by constructors that consume the config.
    pub fn validate(&self) -> RenderResult<()> {
        self.text.validate()
    }
}

/// Limits for the text fitting search.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Smallest font size the fitting search will return.
    pub min_font_size: f32,
    /// Numeric ceiling for best-fit growth.
    pub max_font_size: f32,
    /// Search stops once the bracket is narrower than this many pixels.
    pub fit_precision: f32,
    /// Hard cap on measurement passes per fit.
    pub max_fit_iterations: u32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            min_font_size: 1.0,
            max_font_size: 2000.0,
            fit_precision: 0.25,
            max_fit_iterations: 48,
        }
    }
}

impl TextConfig {
    fn validate(&self) -> RenderResult<()> {
        if !self.min_font_size.is_finite() || self.min_font_size <= 0.0 {
            return Err(RenderError::config("text.min_font_size must be finite and > 0"));
        }
        if !self.max_font_size.is_finite() || self.max_font_size < self.min_font_size {
            return Err(RenderError::config(
                "text.max_font_size must be finite and >= text.min_font_size",
            ));
        }
        if !self.fit_precision.is_finite() || self.fit_precision <= 0.0 {
            return Err(RenderError::config("text.fit_precision must be finite and > 0"));
        }
        if self.max_fit_iterations == 0 {
            return Err(RenderError::config("text.max_fit_iterations must be > 0"));
        }
        Ok(())
    }
}

/// Render-group cache switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// When false every draw re-rasterizes every group.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
