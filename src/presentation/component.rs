//! Components and their layout constraints.

use super::theme::Color;
use crate::geometry::Size;
use serde::{Deserialize, Serialize};

pub const LABEL_PLUGIN_ID: &str = "LabelComponent";
pub const RECTANGLE_PLUGIN_ID: &str = "RectangleComponent";

/// A positioned visual element on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique within its page; attachments refer to components by this name
    pub name: String,
    pub kind: ComponentKind,
    #[serde(default)]
    pub layout: Layout,
    /// Explicit size, takes precedence over content and attachments
    #[serde(default)]
    pub size: Option<Size>,
}

impl Component {
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            kind,
            layout: Layout::default(),
            size: None,
        }
    }

    /// Shorthand for a label with default styling.
    pub fn label(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, ComponentKind::Label(LabelComponent::new(text)))
    }

    /// Shorthand for a filled rectangle.
    pub fn rectangle(name: impl Into<String>, fill: Color) -> Self {
        Self::new(
            name,
            ComponentKind::Rectangle(RectangleComponent {
                fill: Some(fill),
                ..Default::default()
            }),
        )
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }
}

/// The type-specific payload of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ComponentKind {
    Label(LabelComponent),
    Rectangle(RectangleComponent),
    /// Any other component type. Rendering needs a painter registered for `plugin_id`.
    Plugin {
        plugin_id: String,
        #[serde(default)]
        properties: serde_json::Value,
    },
}

impl ComponentKind {
    pub fn plugin_id(&self) -> &str {
        match self {
            ComponentKind::Label(_) => LABEL_PLUGIN_ID,
            ComponentKind::Rectangle(_) => RECTANGLE_PLUGIN_ID,
            ComponentKind::Plugin { plugin_id, .. } => plugin_id,
        }
    }

    /// Category reported on drawn items, used by interaction matching.
    pub fn category(&self) -> String {
        match self {
            ComponentKind::Label(label) => label.category.clone().unwrap_or_else(|| "Label".to_string()),
            ComponentKind::Rectangle(rect) => rect.category.clone().unwrap_or_else(|| "Shape".to_string()),
            ComponentKind::Plugin { plugin_id, properties } => properties
                .get("category")
                .and_then(|c| c.as_str())
                .unwrap_or(plugin_id)
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32, bold: bool, italic: bool) -> Self {
        Self {
            family: family.into(),
            size,
            bold,
            italic,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("Arial", 16.0, false, false)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// A single line of text.
///
/// The label may reference presentation parameters as `${NAME}`; references are
/// expanded before the label is measured and drawn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelComponent {
    pub label: String,
    /// Falls back to the theme font
    #[serde(default)]
    pub font: Option<Font>,
    /// Falls back to the theme foreground
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub background: Option<Color>,
    #[serde(default)]
    pub border: Option<Color>,
    #[serde(default)]
    pub horizontal_alignment: HorizontalAlignment,
    #[serde(default)]
    pub vertical_alignment: VerticalAlignment,
    #[serde(default)]
    pub category: Option<String>,
}

impl LabelComponent {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }
}

/// A filled and/or stroked rectangle. Has no content size of its own.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RectangleComponent {
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub stroke: Option<Color>,
    #[serde(default)]
    pub stroke_width: f32,
    #[serde(default)]
    pub corner_radius: f32,
    #[serde(default)]
    pub category: Option<String>,
}

/// Which edge or centerline of the attachment target the offset is measured from.
///
/// `Left`/`Top` name the start edge and `Right`/`Bottom` the end edge of either
/// axis; `Center`/`Middle` name the centerline. `Default` means the page edge the
/// attachment is named after, or the facing edge of a target component (a left
/// attachment sits against the target's right edge).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Default,
    Left,
    Right,
    Center,
    Top,
    Bottom,
    Middle,
}

/// Anchors one edge of a component to the page or to another component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Target component name, `None` for the page content area
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub offset: f32,
    #[serde(default)]
    pub alignment: Alignment,
}

impl Attachment {
    pub fn page(offset: f32) -> Self {
        Self::page_aligned(offset, Alignment::Default)
    }

    pub fn page_aligned(offset: f32, alignment: Alignment) -> Self {
        Self {
            component: None,
            offset,
            alignment,
        }
    }

    pub fn to(component: impl Into<String>, offset: f32) -> Self {
        Self::to_aligned(component, offset, Alignment::Default)
    }

    pub fn to_aligned(component: impl Into<String>, offset: f32, alignment: Alignment) -> Self {
        Self {
            component: Some(component.into()),
            offset,
            alignment,
        }
    }
}

/// Attachments for the four edges of a component.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub left: Option<Attachment>,
    #[serde(default)]
    pub right: Option<Attachment>,
    #[serde(default)]
    pub top: Option<Attachment>,
    #[serde(default)]
    pub bottom: Option<Attachment>,
}

impl Layout {
    /// Names of the components this layout depends on, in left/right/top/bottom order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        [&self.left, &self.right, &self.top, &self.bottom]
            .into_iter()
            .filter_map(|a| a.as_ref().and_then(|a| a.component.as_deref()))
    }
}
