//! Presentation definitions.
//!
//! A [`Presentation`] is the stored, declarative description of what the viewer
//! shows: one or more [`Page`]s of positioned [`Component`]s, the [`Theme`]s used
//! to paint them, and the [`Interaction`] rules that turn pointer events on
//! rendered items into navigation.
//!
//! Presentations are owned by a [`PresentationStore`](crate::storage::PresentationStore).
//! The viewer only ever works on a loaded copy.
//!
//! # Example
//!
//! ```
//! use lean_viewer::presentation::{Attachment, Component, Layout, Page, Presentation};
//!
//! let mut page = Page::new(800.0, 600.0);
//! page.components.push(
//!     Component::label("Title", "Hello").with_layout(Layout {
//!         left: Some(Attachment::page(0.0)),
//!         top: Some(Attachment::page(20.0)),
//!         ..Default::default()
//!     }),
//! );
//!
//! let presentation = Presentation::new("Welcome").with_page(page);
//! assert_eq!(presentation.pages.len(), 1);
//! ```

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

pub mod component;
pub mod interaction;
pub mod theme;

pub use component::{
    Alignment, Attachment, Component, ComponentKind, Font, HorizontalAlignment, LabelComponent, Layout,
    RectangleComponent, VerticalAlignment,
};
pub use interaction::{
    ActionType, Interaction, InteractionAction, InteractionLocation, InteractionMethod, InteractionParameter,
    Parameter, ParameterSourceType,
};
pub use theme::{Color, Theme};

/// A named, storable definition of pages, themes and interaction rules.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Presentation {
    /// Unique key in the presentation store
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub themes: Vec<Theme>,
    #[serde(default)]
    pub default_theme_name: Option<String>,
    /// Interaction rules, evaluated in declaration order
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

impl Presentation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.push(interaction);
        self
    }

    /// Adds a theme and makes it the default.
    pub fn with_default_theme(mut self, theme: Theme) -> Self {
        self.default_theme_name = Some(theme.name.clone());
        self.themes.push(theme);
        self
    }

    /// Returns the theme used for rendering.
    ///
    /// This is the theme named by `default_theme_name` when it exists, otherwise the
    /// first declared theme, otherwise [`Theme::default`].
    pub fn default_theme(&self) -> Theme {
        self.default_theme_name
            .as_deref()
            .and_then(|name| self.themes.iter().find(|t| t.name == name))
            .or_else(|| self.themes.first())
            .cloned()
            .unwrap_or_default()
    }
}

/// A single page: dimensions, margins and components in z-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub left_margin: f32,
    #[serde(default)]
    pub right_margin: f32,
    #[serde(default)]
    pub top_margin: f32,
    #[serde(default)]
    pub bottom_margin: f32,
    /// Components in declaration order. Later components draw on top.
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Page {
    /// Creates a page without margins.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            left_margin: 0.0,
            right_margin: 0.0,
            top_margin: 0.0,
            bottom_margin: 0.0,
            components: Vec::new(),
        }
    }

    pub fn with_margins(mut self, left: f32, right: f32, top: f32, bottom: f32) -> Self {
        self.left_margin = left;
        self.right_margin = right;
        self.top_margin = top;
        self.bottom_margin = bottom;
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// The full page rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The margin-inset rectangle page attachments are measured against.
    pub fn content_area(&self) -> Rect {
        Rect::new(
            self.left_margin,
            self.top_margin,
            (self.width - self.left_margin - self.right_margin).max(0.0),
            (self.height - self.top_margin - self.bottom_margin).max(0.0),
        )
    }
}
