use crate::errors::ViewerError;
use crate::render::VectorDocument;

/// Size of a surface in pixels. It's a simple struct to hold width and height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Fails for surfaces with no pixels.
    pub fn validate(self) -> Result<Self, ViewerError> {
        if self.width == 0 || self.height == 0 {
            return Err(ViewerError::InvalidSurfaceSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// RGBA8 with color channels premultiplied by alpha, as produced by tiny-skia
    Rgba8Premultiplied,
}

/// An RGBA8 bitmap produced by a [`RenderBackend`].
#[derive(Clone, PartialEq)]
pub struct RgbaImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub stride: u32,
    pub format: PixelFormat,
}

impl RgbaImage {
    pub fn from_raw(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        stride: u32,
        format: PixelFormat,
    ) -> Result<Self, ViewerError> {
        if stride < width * 4 || pixels.len() < (height as usize) * (stride as usize) {
            return Err(ViewerError::Encode(format!(
                "pixel buffer of {} bytes too small for {width}x{height} (stride {stride})",
                pixels.len()
            )));
        }

        Ok(Self {
            pixels,
            width,
            height,
            stride,
            format,
        })
    }

    /// Opaque white image of the given size.
    pub fn blank(size: SurfaceSize) -> Self {
        Self {
            pixels: vec![0xff; (size.width as usize) * (size.height as usize) * 4],
            width: size.width,
            height: size.height,
            stride: size.width * 4,
            format: PixelFormat::Rgba8Premultiplied,
        }
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }

    /// RGBA value at a pixel, `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize) * (self.stride as usize) + (x as usize) * 4;
        let px = self.pixels.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Encodes the image as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, ViewerError> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header().map_err(|e| ViewerError::Encode(e.to_string()))?;
            writer
                .write_image_data(&self.unpremultiplied())
                .map_err(|e| ViewerError::Encode(e.to_string()))?;
        }
        Ok(out)
    }

    /// Tightly packed, straight alpha copy of the pixels.
    fn unpremultiplied(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity((self.width as usize) * (self.height as usize) * 4);
        for row in 0..self.height as usize {
            let start = row * self.stride as usize;
            for px in self.pixels[start..start + self.width as usize * 4].chunks_exact(4) {
                let a = px[3];
                if a == 0 || a == 255 {
                    data.extend_from_slice(px);
                    continue;
                }
                let un = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
                data.extend_from_slice(&[un(px[0]), un(px[1]), un(px[2]), a]);
            }
        }
        data
    }
}

impl std::fmt::Debug for RgbaImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbaImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.pixels.len())
            .finish()
    }
}

/// Scale that fits a document of `doc_width` x `doc_height` inside `size`
/// while keeping its aspect ratio.
pub fn scale_for(doc_width: f32, doc_height: f32, size: SurfaceSize) -> f32 {
    if doc_width <= 0.0 || doc_height <= 0.0 {
        return 1.0;
    }
    (size.width as f32 / doc_width).min(size.height as f32 / doc_height)
}

/// Turns vector documents into bitmaps.
pub trait RenderBackend {
    /// Name of the backend, used in log output
    fn name(&self) -> &str;

    /// Rasterizes `document` into an image of exactly `size` pixels. The document
    /// is scaled uniformly to fit and anchored at the top-left corner.
    fn rasterize(&mut self, document: &VectorDocument, size: SurfaceSize) -> Result<RgbaImage, ViewerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_surfaces_are_rejected() {
        assert!(SurfaceSize::new(10, 10).validate().is_ok());
        assert!(matches!(
            SurfaceSize::new(0, 10).validate(),
            Err(ViewerError::InvalidSurfaceSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn from_raw_checks_buffer_length() {
        assert!(RgbaImage::from_raw(vec![0; 16], 2, 2, 8, PixelFormat::Rgba8Premultiplied).is_ok());
        assert!(RgbaImage::from_raw(vec![0; 15], 2, 2, 8, PixelFormat::Rgba8Premultiplied).is_err());
        assert!(RgbaImage::from_raw(vec![0; 16], 2, 2, 4, PixelFormat::Rgba8Premultiplied).is_err());
    }

    #[test]
    fn pixel_lookup_honours_bounds() {
        let img = RgbaImage::blank(SurfaceSize::new(3, 2));
        assert_eq!(img.pixel(2, 1), Some([255, 255, 255, 255]));
        assert_eq!(img.pixel(3, 0), None);
        assert_eq!(img.pixel(0, 2), None);
    }

    #[test]
    fn png_encoding_produces_png_signature() {
        let img = RgbaImage::blank(SurfaceSize::new(4, 4));
        let png = img.encode_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn png_round_trips_straight_alpha() {
        // 50% red, premultiplied
        let img = RgbaImage::from_raw(vec![128, 0, 0, 128], 1, 1, 4, PixelFormat::Rgba8Premultiplied).unwrap();
        let png = img.encode_png().unwrap();

        let decoder = png::Decoder::new(std::io::Cursor::new(png));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        reader.next_frame(&mut buf).unwrap();
        assert_eq!(&buf[..4], &[255, 0, 0, 128]);
    }

    #[test]
    fn scale_fits_the_limiting_axis() {
        assert_eq!(scale_for(100.0, 200.0, SurfaceSize::new(50, 200)), 0.5);
        assert_eq!(scale_for(100.0, 200.0, SurfaceSize::new(400, 200)), 1.0);
        assert_eq!(scale_for(0.0, 200.0, SurfaceSize::new(400, 200)), 1.0);
    }
}
