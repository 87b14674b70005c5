//! Render list and vector documents.
//!
//! The renderer describes a page as a [`RenderList`] of [`DisplayItem`]
//! commands, which is then serialized into a self-contained SVG
//! [`VectorDocument`]. The document is the only thing a
//! [`RenderBackend`](crate::render::backend::RenderBackend) needs to produce
//! pixels.
//!
//! # Example
//!
//! ```rust
//! use lean_viewer::presentation::Color;
//! use lean_viewer::render::{DisplayItem, RenderList};
//!
//! let mut list = RenderList::new();
//!
//! // Clear background
//! list.add_command(DisplayItem::Clear { color: Color::WHITE });
//!
//! // Draw a black rectangle
//! list.add_command(DisplayItem::Rect {
//!     x: 10.0,
//!     y: 20.0,
//!     w: 100.0,
//!     h: 50.0,
//!     fill: Some(Color::BLACK),
//!     stroke: None,
//!     stroke_width: 0.0,
//!     radius: 0.0,
//! });
//!
//! let doc = list.to_document(200.0, 100.0);
//! assert!(doc.svg.starts_with("<svg"));
//! ```

use crate::presentation::Color;
use quick_xml::escape::escape;

/// A single display item representing a drawing command.
///
/// Variants:
/// - [`DisplayItem::Clear`] — fill the entire page with a color.
/// - [`DisplayItem::Rect`] — draw a filled and/or stroked rectangle.
/// - [`DisplayItem::Line`] — draw a straight line.
/// - [`DisplayItem::TextRun`] — draw a run of text at a baseline position.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayItem {
    /// Fill the entire page with the given color.
    Clear {
        /// The color to clear the page with.
        color: Color,
    },

    /// Draw a rectangle at `(x, y)` with width `w` and height `h`.
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        /// Fill color, `None` for no fill
        fill: Option<Color>,
        /// Stroke color, `None` for no outline
        stroke: Option<Color>,
        stroke_width: f32,
        /// Corner radius
        radius: f32,
    },

    /// Draw a line from `(x1, y1)` to `(x2, y2)`.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        width: f32,
    },

    /// Draw a text run with its baseline starting at `(x, y)`.
    TextRun {
        /// The x-coordinate where the text starts.
        x: f32,
        /// The baseline y-coordinate.
        y: f32,
        /// The text to render.
        text: String,
        /// Font family name.
        family: String,
        /// The font size to use for the text.
        size: f32,
        bold: bool,
        italic: bool,
        /// The color to render the text with.
        color: Color,
        /// Advance the run is stretched or squeezed to.
        length: f32,
    },
}

/// A list of display items to be rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderList {
    /// Sequence of drawing commands to execute.
    pub items: Vec<DisplayItem>,
}

impl RenderList {
    /// Creates a new, empty render list.
    pub fn new() -> Self {
        RenderList { items: Vec::new() }
    }

    /// Adds a new display item (drawing command) to the list.
    pub fn add_command(&mut self, command: DisplayItem) {
        self.items.push(command);
    }

    /// Clears all display items from the list.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Serializes the list into an SVG document of the given page size.
    pub fn to_document(&self, width: f32, height: f32) -> VectorDocument {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );

        for item in &self.items {
            match item {
                DisplayItem::Clear { color } => {
                    svg.push_str(&format!(
                        r#"<rect x="0" y="0" width="{width}" height="{height}" {}/>"#,
                        paint("fill", color)
                    ));
                }
                DisplayItem::Rect {
                    x,
                    y,
                    w,
                    h,
                    fill,
                    stroke,
                    stroke_width,
                    radius,
                } => {
                    let fill = fill.as_ref().map_or_else(|| r#"fill="none""#.to_string(), |c| paint("fill", c));
                    let stroke = match stroke {
                        Some(c) if *stroke_width > 0.0 => {
                            format!(r#" {} stroke-width="{stroke_width}""#, paint("stroke", c))
                        }
                        _ => String::new(),
                    };
                    let radius = if *radius > 0.0 {
                        format!(r#" rx="{radius}" ry="{radius}""#)
                    } else {
                        String::new()
                    };
                    svg.push_str(&format!(
                        r#"<rect x="{x}" y="{y}" width="{w}" height="{h}"{radius} {fill}{stroke}/>"#
                    ));
                }
                DisplayItem::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                    width,
                } => {
                    svg.push_str(&format!(
                        r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" {} stroke-width="{width}"/>"#,
                        paint("stroke", color)
                    ));
                }
                DisplayItem::TextRun {
                    x,
                    y,
                    text,
                    family,
                    size,
                    bold,
                    italic,
                    color,
                    length,
                } => {
                    let text = xml_chars(text);
                    if text.is_empty() {
                        continue;
                    }
                    let weight = if *bold { "bold" } else { "normal" };
                    let style = if *italic { "italic" } else { "normal" };
                    let length = if *length > 0.0 {
                        format!(r#" textLength="{length}" lengthAdjust="spacingAndGlyphs""#)
                    } else {
                        String::new()
                    };
                    svg.push_str(&format!(
                        r#"<text x="{x}" y="{y}" font-family="{}" font-size="{size}" font-weight="{weight}" font-style="{style}" {}{length} xml:space="preserve">{}</text>"#,
                        escape(xml_chars(family).as_str()),
                        paint("fill", color),
                        escape(text.as_str()),
                    ));
                }
            }
        }

        svg.push_str("</svg>");

        VectorDocument { width, height, svg }
    }
}

/// Drops characters XML 1.0 does not allow in documents, which escaping
/// cannot represent.
fn xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}'))
        .collect()
}

fn paint(attr: &str, color: &Color) -> String {
    format!(r#"{attr}="{}" {attr}-opacity="{}""#, color.to_svg_rgb(), color.opacity())
}

/// A self-contained SVG scene description of one page.
#[derive(Clone, PartialEq)]
pub struct VectorDocument {
    /// Page width in document units
    pub width: f32,
    /// Page height in document units
    pub height: f32,
    /// Complete SVG markup
    pub svg: String,
}

impl VectorDocument {
    /// Wraps existing SVG markup. The markup is validated only when rasterized.
    pub fn from_svg(width: f32, height: f32, svg: impl Into<String>) -> Self {
        Self {
            width,
            height,
            svg: svg.into(),
        }
    }
}

impl std::fmt::Debug for VectorDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorDocument")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.svg.len())
            .finish()
    }
}
