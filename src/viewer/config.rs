//! Viewer configuration.
//!
//! `ViewerConfig` controls how a [`ViewerController`](crate::viewer::ViewerController)
//! turns presentations into pixels: the size of the display surface, how text
//! is measured and which fonts the rasterizer may use.
//!
//! `ViewerConfig` provides sensible defaults via [`Default`] and a fluent
//! [`ViewerConfig::builder()`] for customization with validation.
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use lean_viewer::viewer::ViewerConfig;
//! let cfg = ViewerConfig::default();
//! assert_eq!(cfg.surface_width, 794);
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use lean_viewer::viewer::ViewerConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = ViewerConfig::builder()
//!     .surface_size(1024, 768)
//!     .load_system_fonts(false)
//!     .default_font_family("DejaVu Sans")
//!     .text_width_factor(0.6)
//!     .build()?; // returns Result<ViewerConfig, ViewerConfigError>
//! # Ok(()) }
//! ```
//!
//! # Fields (summary)
//! - `surface_width`, `surface_height`: Initial display surface in pixels (default: 794x1123, A4 at 96 dpi).
//! - `load_system_fonts`: Register installed fonts with the rasterizer (default: `true`).
//! - `default_font_family`: Family used when a text run names a font that is not installed.
//! - `text_width_factor`: Average glyph advance as a fraction of the font size (default: 0.55).
//! - `line_height_factor`: Line box height as a multiple of the font size (default: 1.2).
//!
//! # Errors
//!
//! Builder validation can return [`ViewerConfigError`] if values are invalid
//! (e.g. a zero surface dimension or a non-positive text factor).

use crate::layout::TextMetrics;
use crate::render::backend::SurfaceSize;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    pub load_system_fonts: bool,
    pub default_font_family: String,
    pub text_width_factor: f32,
    pub line_height_factor: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let metrics = TextMetrics::default();
        Self {
            surface_width: 794,
            surface_height: 1123,
            load_system_fonts: true,
            default_font_family: "Arial".to_string(),
            text_width_factor: metrics.width_factor,
            line_height_factor: metrics.line_height_factor,
        }
    }
}

impl ViewerConfig {
    pub fn builder() -> ViewerConfigBuilder {
        ViewerConfigBuilder::default()
    }

    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.surface_width, self.surface_height)
    }

    pub fn text_metrics(&self) -> TextMetrics {
        TextMetrics::new(self.text_width_factor, self.line_height_factor)
    }
}

/// Builder for [`ViewerConfig`].
#[derive(Debug, Clone, Default)]
pub struct ViewerConfigBuilder {
    inner: ViewerConfig,
}

impl ViewerConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut ViewerConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn surface_width(self, px: u32) -> Self { self.map(|c| c.surface_width = px) }
    pub fn surface_height(self, px: u32) -> Self { self.map(|c| c.surface_height = px) }
    pub fn surface_size(self, width: u32, height: u32) -> Self {
        self.map(|c| {
            c.surface_width = width;
            c.surface_height = height;
        })
    }
    pub fn load_system_fonts(self, on: bool) -> Self { self.map(|c| c.load_system_fonts = on) }
    pub fn default_font_family<S: Into<String>>(self, fam: S) -> Self { self.map(|c| c.default_font_family = fam.into()) }
    pub fn text_width_factor(self, factor: f32) -> Self { self.map(|c| c.text_width_factor = factor) }
    pub fn line_height_factor(self, factor: f32) -> Self { self.map(|c| c.line_height_factor = factor) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut ViewerConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<ViewerConfig, ViewerConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerConfigError {
    ZeroSurface { width: u32, height: u32 },
    InvalidTextWidthFactor(f32),
    InvalidLineHeightFactor(f32),
    EmptyFontFamily,
}

impl fmt::Display for ViewerConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerConfigError::ZeroSurface { width, height } =>
                write!(f, "surface size {width}x{height} must be at least 1x1"),
            ViewerConfigError::InvalidTextWidthFactor(v) =>
                write!(f, "text_width_factor {v} is out of range (expected 0.05..=5.0)"),
            ViewerConfigError::InvalidLineHeightFactor(v) =>
                write!(f, "line_height_factor {v} is out of range (expected 0.5..=5.0)"),
            ViewerConfigError::EmptyFontFamily =>
                write!(f, "default_font_family must not be empty"),
        }
    }
}
impl std::error::Error for ViewerConfigError {}

fn validate(c: &ViewerConfig) -> Result<(), ViewerConfigError> {
    if c.surface_width == 0 || c.surface_height == 0 {
        return Err(ViewerConfigError::ZeroSurface {
            width: c.surface_width,
            height: c.surface_height,
        });
    }
    if !(0.05..=5.0).contains(&c.text_width_factor) {
        return Err(ViewerConfigError::InvalidTextWidthFactor(c.text_width_factor));
    }
    if !(0.5..=5.0).contains(&c.line_height_factor) {
        return Err(ViewerConfigError::InvalidLineHeightFactor(c.line_height_factor));
    }
    if c.default_font_family.trim().is_empty() {
        return Err(ViewerConfigError::EmptyFontFamily);
    }
    Ok(())
}
