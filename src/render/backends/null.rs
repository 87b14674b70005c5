use crate::errors::ViewerError;
use crate::render::backend::{RenderBackend, RgbaImage, SurfaceSize};
use crate::render::VectorDocument;

/// Null backend that does not perform any rendering.
///
/// Documents are checked for a plausible SVG root and a blank image of the
/// requested size is returned. Useful for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullBackend {
    frame_id: u64,
}

impl NullBackend {
    /// Creates a new instance of the null backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents rasterized so far.
    pub fn frames(&self) -> u64 {
        self.frame_id
    }
}

impl RenderBackend for NullBackend {
    fn name(&self) -> &str {
        "NullBackend"
    }

    fn rasterize(&mut self, document: &VectorDocument, size: SurfaceSize) -> Result<RgbaImage, ViewerError> {
        let size = size.validate()?;
        if !document.svg.trim_start().starts_with("<svg") {
            return Err(ViewerError::VectorParse("document has no <svg> root".into()));
        }

        self.frame_id = self.frame_id.wrapping_add(1);
        Ok(RgbaImage::blank(size))
    }
}
