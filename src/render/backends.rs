/// Backend that validates input but produces blank images
pub mod null;

/// resvg/tiny-skia CPU backend
pub mod tiny_skia;
