use crate::render::backend::{RgbaImage, SurfaceSize};
use crate::viewer::CursorStyle;

/// Where the viewer paints. Implemented by the host toolkit.
pub trait DisplaySurface {
    /// Size in pixels
    fn size(&self) -> SurfaceSize;

    /// Copies `image` with its top-left corner at `(x, y)`, clipped to the surface.
    fn blit(&mut self, image: &RgbaImage, x: i32, y: i32);

    fn set_cursor(&mut self, cursor: CursorStyle);
}

/// A CPU pixel buffer implementing [`DisplaySurface`]. Useful for headless
/// hosts and for inspecting what the viewer painted.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    image: RgbaImage,
    cursor: CursorStyle,
}

impl PixelSurface {
    /// Creates a surface cleared to opaque white.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::blank(SurfaceSize::new(width, height)),
            cursor: CursorStyle::Default,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.pixel(x, y)
    }
}

impl DisplaySurface for PixelSurface {
    fn size(&self) -> SurfaceSize {
        self.image.size()
    }

    fn blit(&mut self, image: &RgbaImage, x: i32, y: i32) {
        let dst_w = self.image.width as i64;
        let dst_h = self.image.height as i64;

        let x0 = (x as i64).max(0);
        let y0 = (y as i64).max(0);
        let x1 = (x as i64 + image.width as i64).min(dst_w);
        let y1 = (y as i64 + image.height as i64).min(dst_h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let row_bytes = ((x1 - x0) * 4) as usize;
        for dy in y0..y1 {
            let sy = (dy - y as i64) as usize;
            let sx = (x0 - x as i64) as usize;
            let src = sy * image.stride as usize + sx * 4;
            let dst = dy as usize * self.image.stride as usize + x0 as usize * 4;
            self.image.pixels[dst..dst + row_bytes].copy_from_slice(&image.pixels[src..src + row_bytes]);
        }
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }
}
