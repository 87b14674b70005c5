use crate::context::RenderContext;
use crate::geometry::Size;
use crate::presentation::{Component, ComponentKind, Font};

/// Supplies the size a component would take from its content alone.
pub trait ContentMetrics {
    fn content_size(&self, component: &Component, context: &RenderContext) -> Size;
}

/// Font-independent text measurement.
///
/// Text is measured with a fixed average advance per character so layout does not
/// depend on which fonts are installed. The renderer stretches drawn text to the
/// measured width, which keeps the rasterized glyphs inside the measured box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Average glyph advance as a fraction of the font size
    pub width_factor: f32,
    /// Line box height as a multiple of the font size
    pub line_height_factor: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            width_factor: 0.55,
            line_height_factor: 1.2,
        }
    }
}

impl TextMetrics {
    pub fn new(width_factor: f32, line_height_factor: f32) -> Self {
        Self {
            width_factor,
            line_height_factor,
        }
    }

    pub fn measure_text(&self, text: &str, font: &Font) -> Size {
        let chars = text.chars().count() as f32;
        let bold = if font.bold { 1.1 } else { 1.0 };
        Size::new(
            chars * font.size * self.width_factor * bold,
            font.size * self.line_height_factor,
        )
    }
}

impl ContentMetrics for TextMetrics {
    fn content_size(&self, component: &Component, context: &RenderContext) -> Size {
        match &component.kind {
            ComponentKind::Label(label) => {
                let font = label.font.as_ref().unwrap_or(&context.theme.default_font);
                self.measure_text(&context.expand(&label.label), font)
            }
            ComponentKind::Rectangle(_) | ComponentKind::Plugin { .. } => Size::ZERO,
        }
    }
}
