use super::drawn_item::{DrawnItem, DrawnItemType, RenderPage, RenderPageId, ValueContext};
use super::render_list::{DisplayItem, RenderList};
use crate::context::RenderContext;
use crate::errors::ViewerError;
use crate::geometry::{Rect, Size};
use crate::layout::{ContentMetrics, LayoutResult, TextMetrics};
use crate::presentation::{
    Component, ComponentKind, HorizontalAlignment, LabelComponent, Page, RectangleComponent, VerticalAlignment,
};
use std::collections::HashMap;

/// Draws components of a plugin type the renderer does not know natively.
pub trait ComponentPainter {
    /// Plugin id this painter handles.
    fn plugin_id(&self) -> &str;

    /// Size the component takes from its content alone.
    fn measure(&self, component: &Component, context: &RenderContext) -> Size;

    /// Appends drawing commands for the component at `bounds` and returns the
    /// value the drawn item exposes, if any.
    fn paint(
        &self,
        component: &Component,
        bounds: Rect,
        context: &RenderContext,
        list: &mut RenderList,
    ) -> Result<Option<ValueContext>, ViewerError>;
}

/// Turns a laid out page into a vector document plus its drawn items.
pub struct Renderer {
    metrics: TextMetrics,
    painters: HashMap<String, Box<dyn ComponentPainter>>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(TextMetrics::default())
    }
}

impl Renderer {
    pub fn new(metrics: TextMetrics) -> Self {
        Self {
            metrics,
            painters: HashMap::new(),
        }
    }

    /// Registers a painter, replacing any previous painter for the same plugin id.
    pub fn register(&mut self, painter: Box<dyn ComponentPainter>) {
        self.painters.insert(painter.plugin_id().to_string(), painter);
    }

    pub fn text_metrics(&self) -> &TextMetrics {
        &self.metrics
    }

    /// Renders `page` at the geometry in `layout`.
    ///
    /// Components are drawn in declaration order so later ones end up on top, and
    /// each produces exactly one drawn item. `layout` must come from resolving the
    /// same page.
    pub fn render(&self, page: &Page, layout: &LayoutResult, context: &RenderContext) -> Result<RenderPage, ViewerError> {
        let mut list = RenderList::new();
        list.add_command(DisplayItem::Clear {
            color: context.theme.background,
        });

        let mut items = Vec::with_capacity(page.components.len());

        for (idx, component) in page.components.iter().enumerate() {
            let bounds = layout
                .geometries
                .get(idx)
                .filter(|g| g.name == component.name)
                .map(|g| g.bounds)
                .or_else(|| layout.geometry(&component.name).copied())
                .ok_or_else(|| ViewerError::MissingGeometry(component.name.clone()))?;

            let value = match &component.kind {
                ComponentKind::Label(label) => self.paint_label(label, bounds, context, &mut list),
                ComponentKind::Rectangle(rect) => {
                    paint_rectangle(rect, bounds, &mut list);
                    None
                }
                ComponentKind::Plugin { plugin_id, .. } => {
                    let painter = self
                        .painters
                        .get(plugin_id)
                        .ok_or_else(|| ViewerError::UnsupportedComponentType(plugin_id.clone()))?;
                    painter.paint(component, bounds, context, &mut list)?
                }
            };

            items.push(DrawnItem {
                component_name: component.name.clone(),
                item_type: DrawnItemType::Component,
                category: component.kind.category(),
                component_plugin_id: component.kind.plugin_id().to_string(),
                context: value,
                bounds,
            });
        }

        let document = list.to_document(page.width, page.height);
        log::debug!(
            "render: page {} of '{}' produced {} items, {} bytes of svg",
            layout.page_index,
            context.presentation_name,
            items.len(),
            document.svg.len()
        );

        Ok(RenderPage {
            id: RenderPageId::new(),
            page_index: layout.page_index,
            width: page.width,
            height: page.height,
            document,
            items,
        })
    }

    fn paint_label(
        &self,
        label: &LabelComponent,
        bounds: Rect,
        context: &RenderContext,
        list: &mut RenderList,
    ) -> Option<ValueContext> {
        let text = context.expand(&label.label);
        let font = label.font.as_ref().unwrap_or(&context.theme.default_font);
        let measured = self.metrics.measure_text(&text, font);

        if label.background.is_some() || label.border.is_some() {
            list.add_command(DisplayItem::Rect {
                x: bounds.x,
                y: bounds.y,
                w: bounds.width,
                h: bounds.height,
                fill: label.background,
                stroke: label.border,
                stroke_width: if label.border.is_some() { 1.0 } else { 0.0 },
                radius: 0.0,
            });
        }

        let x = match label.horizontal_alignment {
            HorizontalAlignment::Left => bounds.x,
            HorizontalAlignment::Center => bounds.x + (bounds.width - measured.width) / 2.0,
            HorizontalAlignment::Right => bounds.right() - measured.width,
        };
        let top = match label.vertical_alignment {
            VerticalAlignment::Top => bounds.y,
            VerticalAlignment::Middle => bounds.y + (bounds.height - measured.height) / 2.0,
            VerticalAlignment::Bottom => bounds.bottom() - measured.height,
        };

        list.add_command(DisplayItem::TextRun {
            x,
            y: top + font.size,
            text: text.clone(),
            family: font.family.clone(),
            size: font.size,
            bold: font.bold,
            italic: font.italic,
            color: label.color.unwrap_or(context.theme.foreground),
            length: measured.width,
        });

        Some(ValueContext::new(text))
    }
}

fn paint_rectangle(rect: &RectangleComponent, bounds: Rect, list: &mut RenderList) {
    list.add_command(DisplayItem::Rect {
        x: bounds.x,
        y: bounds.y,
        w: bounds.width,
        h: bounds.height,
        fill: rect.fill,
        stroke: rect.stroke,
        stroke_width: rect.stroke_width,
        radius: rect.corner_radius,
    });
}

impl ContentMetrics for Renderer {
    fn content_size(&self, component: &Component, context: &RenderContext) -> Size {
        match &component.kind {
            ComponentKind::Plugin { plugin_id, .. } => self
                .painters
                .get(plugin_id)
                .map_or(Size::ZERO, |p| p.measure(component, context)),
            _ => self.metrics.content_size(component, context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;
    use crate::presentation::{Alignment, Attachment, Color, Font, Layout, Parameter, Presentation};

    struct GaugePainter;

    impl ComponentPainter for GaugePainter {
        fn plugin_id(&self) -> &str {
            "Gauge"
        }

        fn measure(&self, _component: &Component, _context: &RenderContext) -> Size {
            Size::new(64.0, 8.0)
        }

        fn paint(
            &self,
            component: &Component,
            bounds: Rect,
            _context: &RenderContext,
            list: &mut RenderList,
        ) -> Result<Option<ValueContext>, ViewerError> {
            list.add_command(DisplayItem::Line {
                x1: bounds.x,
                y1: bounds.y,
                x2: bounds.right(),
                y2: bounds.y,
                color: Color::BLACK,
                width: 2.0,
            });
            let level = match &component.kind {
                ComponentKind::Plugin { properties, .. } => properties["level"].to_string(),
                _ => String::new(),
            };
            Ok(Some(ValueContext::new(level)))
        }
    }

    fn gauge(name: &str) -> Component {
        Component::new(
            name,
            ComponentKind::Plugin {
                plugin_id: "Gauge".into(),
                properties: serde_json::json!({ "level": 7 }),
            },
        )
    }

    fn render(renderer: &Renderer, page: &Page, params: &[Parameter]) -> Result<RenderPage, ViewerError> {
        let ctx = RenderContext::new(&Presentation::new("Sales"), params);
        let layout = LayoutEngine::new(renderer).resolve(page, 0, &ctx)?;
        renderer.render(page, &layout, &ctx)
    }

    fn stacked_labels(n: usize) -> Page {
        let mut page = Page::new(400.0, 400.0);
        for i in 0..n {
            let top = if i == 0 {
                Attachment::page(10.0)
            } else {
                Attachment::to_aligned(format!("L{}", i - 1), 5.0, Alignment::Bottom)
            };
            page.components.push(Component::label(format!("L{i}"), format!("Label {i}")).with_layout(Layout {
                top: Some(top),
                ..Default::default()
            }));
        }
        page
    }

    #[test]
    fn one_drawn_item_per_component_in_order() {
        let page = stacked_labels(4);
        let rp = render(&Renderer::default(), &page, &[]).unwrap();

        assert_eq!(rp.items.len(), 4);
        let names: Vec<_> = rp.items.iter().map(|i| i.component_name.as_str()).collect();
        assert_eq!(names, vec!["L0", "L1", "L2", "L3"]);
        assert!(rp.items.windows(2).all(|w| w[0].bounds.bottom() < w[1].bounds.y));
        assert_eq!(rp.items[2].value(), "Label 2");
        assert_eq!(rp.items[2].category, "Label");
        assert_eq!(rp.items[2].component_plugin_id, "LabelComponent");
        assert_eq!(rp.document.svg.matches("<text").count(), 4);
    }

    #[test]
    fn label_value_context_uses_expanded_text() {
        let page = Page::new(400.0, 100.0).with_component(Component::label("L", "From ${SOURCE}"));
        let rp = render(&Renderer::default(), &page, &[Parameter::new("SOURCE", "Dashboard")]).unwrap();
        assert_eq!(rp.items[0].value(), "From Dashboard");
        assert!(rp.document.svg.contains(">From Dashboard</text>"));
    }

    #[test]
    fn rectangles_have_no_value_context() {
        let page = Page::new(100.0, 100.0)
            .with_component(Component::rectangle("Box", Color::from_u8(200, 0, 0, 255)).with_size(10.0, 10.0));
        let rp = render(&Renderer::default(), &page, &[]).unwrap();
        assert!(rp.items[0].context.is_none());
        assert_eq!(rp.items[0].category, "Shape");
        assert!(rp.document.svg.contains(r#"fill="rgb(200,0,0)""#));
    }

    #[test]
    fn unknown_plugin_is_rejected() {
        let page = Page::new(100.0, 100.0)
            .with_component(Component::label("ok", "fine"))
            .with_component(gauge("g"));
        match render(&Renderer::default(), &page, &[]) {
            Err(ViewerError::UnsupportedComponentType(id)) => assert_eq!(id, "Gauge"),
            other => panic!("expected UnsupportedComponentType, got {other:?}"),
        }
    }

    #[test]
    fn registered_painter_measures_and_paints() {
        let mut renderer = Renderer::default();
        renderer.register(Box::new(GaugePainter));

        let page = Page::new(100.0, 100.0).with_component(gauge("g"));
        let rp = render(&renderer, &page, &[]).unwrap();

        assert_eq!(rp.items[0].bounds, Rect::new(0.0, 0.0, 64.0, 8.0));
        assert_eq!(rp.items[0].value(), "7");
        assert_eq!(rp.items[0].component_plugin_id, "Gauge");
        assert!(rp.document.svg.contains("<line"));
    }

    #[test]
    fn text_alignment_inside_a_larger_box() {
        let mut label = LabelComponent::new("ab").with_font(Font::new("Arial", 10.0, false, false));
        label.horizontal_alignment = HorizontalAlignment::Right;
        label.vertical_alignment = VerticalAlignment::Bottom;
        let page = Page::new(200.0, 200.0)
            .with_component(Component::new("L", ComponentKind::Label(label)).with_size(100.0, 50.0));

        let renderer = Renderer::new(TextMetrics::new(0.5, 1.0));
        let rp = render(&renderer, &page, &[]).unwrap();
        // 2 chars * 10 * 0.5 = 10 wide, 10 high; right/bottom aligned inside 100x50
        assert!(rp.document.svg.contains(r#"<text x="90" y="50""#));
    }

    #[test]
    fn theme_background_clears_the_page() {
        let mut theme = crate::presentation::Theme::default();
        theme.background = Color::from_u8(1, 2, 3, 255);
        let presentation = Presentation::new("Themed").with_default_theme(theme);
        let page = Page::new(10.0, 10.0);

        let renderer = Renderer::default();
        let ctx = RenderContext::new(&presentation, &[]);
        let layout = LayoutEngine::new(&renderer).resolve(&page, 0, &ctx).unwrap();
        let rp = renderer.render(&page, &layout, &ctx).unwrap();
        assert!(rp.document.svg.contains(r#"fill="rgb(1,2,3)""#));
        assert!(rp.items.is_empty());
    }
}
