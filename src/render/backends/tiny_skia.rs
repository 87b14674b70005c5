use crate::errors::ViewerError;
use crate::render::backend::{scale_for, PixelFormat, RenderBackend, RgbaImage, SurfaceSize};
use crate::render::VectorDocument;
use ::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;

/// CPU rasterizer built on resvg and tiny-skia.
pub struct TinySkiaBackend {
    options: usvg::Options<'static>,
}

impl TinySkiaBackend {
    /// Creates a backend. With `load_system_fonts` the installed fonts are
    /// registered so text runs can be shaped; without it text is skipped.
    pub fn new(load_system_fonts: bool, default_font_family: &str) -> Self {
        let mut options = usvg::Options {
            font_family: default_font_family.to_string(),
            ..usvg::Options::default()
        };
        if load_system_fonts {
            options.fontdb_mut().load_system_fonts();
            log::debug!("tiny-skia: loaded {} font faces", options.fontdb.len());
        }
        Self { options }
    }
}

impl Default for TinySkiaBackend {
    fn default() -> Self {
        Self::new(true, "Arial")
    }
}

impl RenderBackend for TinySkiaBackend {
    fn name(&self) -> &str {
        "TinySkiaBackend"
    }

    fn rasterize(&mut self, document: &VectorDocument, size: SurfaceSize) -> Result<RgbaImage, ViewerError> {
        let size = size.validate()?;

        let tree = usvg::Tree::from_str(&document.svg, &self.options)
            .map_err(|e| ViewerError::VectorParse(e.to_string()))?;

        let mut pixmap = Pixmap::new(size.width, size.height).ok_or(ViewerError::InvalidSurfaceSize {
            width: size.width,
            height: size.height,
        })?;
        pixmap.fill(Color::WHITE);

        let scale = scale_for(document.width, document.height, size);
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        log::trace!(
            "tiny-skia: rasterized {}x{} document at {}x{} (scale {scale})",
            document.width,
            document.height,
            size.width,
            size.height
        );

        RgbaImage::from_raw(
            pixmap.take(),
            size.width,
            size.height,
            size.width * 4,
            PixelFormat::Rgba8Premultiplied,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::Color as FillColor;
    use crate::render::{DisplayItem, RenderList};

    fn red_square_document() -> VectorDocument {
        let mut list = RenderList::new();
        list.add_command(DisplayItem::Clear { color: FillColor::WHITE });
        list.add_command(DisplayItem::Rect {
            x: 0.0,
            y: 0.0,
            w: 50.0,
            h: 50.0,
            fill: Some(FillColor::from_u8(255, 0, 0, 255)),
            stroke: None,
            stroke_width: 0.0,
            radius: 0.0,
        });
        list.to_document(100.0, 100.0)
    }

    #[test]
    fn rasterizes_to_requested_size() {
        let mut backend = TinySkiaBackend::new(false, "Arial");
        let img = backend.rasterize(&red_square_document(), SurfaceSize::new(100, 100)).unwrap();

        assert_eq!((img.width, img.height), (100, 100));
        assert_eq!(img.pixels.len(), 100 * 100 * 4);
        assert_eq!(img.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(img.pixel(90, 90), Some([255, 255, 255, 255]));
    }

    #[test]
    fn document_is_scaled_to_fit() {
        let mut backend = TinySkiaBackend::new(false, "Arial");
        let img = backend.rasterize(&red_square_document(), SurfaceSize::new(50, 80)).unwrap();

        // scale 0.5, the square now covers 0..25
        assert_eq!(img.pixel(20, 20), Some([255, 0, 0, 255]));
        assert_eq!(img.pixel(30, 30), Some([255, 255, 255, 255]));
        // area below the scaled page stays white
        assert_eq!(img.pixel(10, 70), Some([255, 255, 255, 255]));
    }

    #[test]
    fn rendered_labels_with_control_characters_rasterize() {
        use crate::context::RenderContext;
        use crate::layout::LayoutEngine;
        use crate::presentation::{Component, Page, Parameter, Presentation};
        use crate::render::Renderer;

        let page = Page::new(200.0, 100.0)
            .with_component(Component::label("L", "a\u{1}b"))
            .with_component(Component::label("V", "v=${X}"));
        let renderer = Renderer::default();
        let ctx = RenderContext::new(&Presentation::new("P"), &[Parameter::new("X", "tab\u{B}vt")]);
        let layout = LayoutEngine::new(&renderer).resolve(&page, 0, &ctx).unwrap();
        let rendered = renderer.render(&page, &layout, &ctx).unwrap();

        let mut backend = TinySkiaBackend::new(false, "Arial");
        assert!(backend.rasterize(&rendered.document, SurfaceSize::new(200, 100)).is_ok());
    }

    #[test]
    fn malformed_document_is_a_vector_parse_error() {
        let mut backend = TinySkiaBackend::new(false, "Arial");
        let doc = VectorDocument::from_svg(10.0, 10.0, "<svg");
        assert!(matches!(
            backend.rasterize(&doc, SurfaceSize::new(10, 10)),
            Err(ViewerError::VectorParse(_))
        ));
    }

    #[test]
    fn zero_size_is_rejected() {
        let mut backend = TinySkiaBackend::new(false, "Arial");
        assert!(matches!(
            backend.rasterize(&red_square_document(), SurfaceSize::new(0, 10)),
            Err(ViewerError::InvalidSurfaceSize { .. })
        ));
    }
}
