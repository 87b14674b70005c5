use crate::presentation::{Parameter, Presentation};
use crate::render::backend::RgbaImage;
use crate::render::RenderPage;

/// Lifecycle of a viewer.
///
/// Navigation is synchronous, so a viewer is never observed between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerStatus {
    /// Nothing loaded yet
    Empty,
    Loaded,
    /// Released; every further operation fails
    Disposed,
}

/// Everything the viewer shows, replaced as a whole on navigation.
#[derive(Debug, Clone)]
pub struct ViewerState {
    pub presentation: Presentation,
    /// Parameters the current presentation was opened with
    pub parameters: Vec<Parameter>,
    pub render_page: RenderPage,
    /// Rasterized render page at the current surface size
    pub bitmap: RgbaImage,
    /// Surface pixels per page unit
    pub scale: f32,
}

impl ViewerState {
    /// Maps a surface pixel to page coordinates.
    pub fn to_page(&self, x: i32, y: i32) -> (f32, f32) {
        if self.scale <= 0.0 {
            return (x as f32, y as f32);
        }
        (x as f32 / self.scale, y as f32 / self.scale)
    }
}
