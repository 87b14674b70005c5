use crate::geometry::Rect;
use crate::render::VectorDocument;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Kind of a drawn item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawnItemType {
    /// The whole component
    Component,
    /// A part of a component, such as one cell of a table
    ComponentItem,
}

impl Display for DrawnItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawnItemType::Component => write!(f, "Component"),
            DrawnItemType::ComponentItem => write!(f, "ComponentItem"),
        }
    }
}

/// The queryable value behind a drawn item, e.g. the text a label shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueContext {
    pub value: String,
}

impl ValueContext {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// A component as it ended up on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnItem {
    pub component_name: String,
    pub item_type: DrawnItemType,
    pub category: String,
    pub component_plugin_id: String,
    pub context: Option<ValueContext>,
    /// Bounding box in page coordinates
    pub bounds: Rect,
}

impl DrawnItem {
    /// Current value of the item, empty when it exposes none.
    pub fn value(&self) -> &str {
        self.context.as_ref().map_or("", |c| c.value.as_str())
    }
}

/// A unique identifier for one render of a page.
///
/// Two renders of the same page get different ids, so anything cached against a
/// render (such as its bitmap) is never reused for another one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderPageId(Uuid);

impl RenderPageId {
    /// Create a new unique `RenderPageId` using a random UUID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RenderPageId {
    fn default() -> Self {
        Self::new()
    }
}

/// The rendered form of one page: its vector document and the items drawn on it.
#[derive(Debug, Clone)]
pub struct RenderPage {
    pub id: RenderPageId,
    pub page_index: usize,
    pub width: f32,
    pub height: f32,
    pub document: VectorDocument,
    /// Drawn items in declaration order (bottom-most first)
    pub items: Vec<DrawnItem>,
}

impl RenderPage {
    /// Topmost item at a page coordinate. See [`hit_test`](crate::hit_test::hit_test).
    pub fn item_at(&self, x: f32, y: f32) -> Option<&DrawnItem> {
        crate::hit_test::hit_test(self, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_type_stringifies_as_variant_name() {
        assert_eq!(DrawnItemType::Component.to_string(), "Component");
        assert_eq!(DrawnItemType::ComponentItem.to_string(), "ComponentItem");
    }

    #[test]
    fn value_defaults_to_empty() {
        let mut item = DrawnItem {
            component_name: "c".into(),
            item_type: DrawnItemType::Component,
            category: "Label".into(),
            component_plugin_id: "LabelComponent".into(),
            context: None,
            bounds: Rect::default(),
        };
        assert_eq!(item.value(), "");
        item.context = Some(ValueContext::new("42"));
        assert_eq!(item.value(), "42");
    }

    #[test]
    fn render_page_ids_are_unique() {
        assert_ne!(RenderPageId::new(), RenderPageId::new());
    }
}
