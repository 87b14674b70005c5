use super::metrics::ContentMetrics;
use crate::context::RenderContext;
use crate::errors::ViewerError;
use crate::geometry::Rect;
use crate::presentation::{Alignment, Attachment, Component, Page, Presentation};
use std::collections::{HashMap, VecDeque};

/// Absolute placement of one component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentGeometry {
    pub name: String,
    pub bounds: Rect,
}

/// Non-fatal findings of a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutIssue {
    /// The component does not fit inside the page rectangle
    OutsidePage { component: String, bounds: Rect },
}

/// Resolved geometry of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub page_index: usize,
    /// One entry per component, in declaration order
    pub geometries: Vec<ComponentGeometry>,
    pub issues: Vec<LayoutIssue>,
}

impl LayoutResult {
    pub fn geometry(&self, name: &str) -> Option<&Rect> {
        self.geometries.iter().find(|g| g.name == name).map(|g| &g.bounds)
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, PartialEq)]
enum Side {
    Start,
    End,
}

/// Resolves attachment constraints into absolute rectangles.
pub struct LayoutEngine<'m> {
    metrics: &'m dyn ContentMetrics,
}

impl<'m> LayoutEngine<'m> {
    pub fn new(metrics: &'m dyn ContentMetrics) -> Self {
        Self { metrics }
    }

    /// Lays out every page of a presentation.
    pub fn resolve_presentation(
        &self,
        presentation: &Presentation,
        context: &RenderContext,
    ) -> Result<Vec<LayoutResult>, ViewerError> {
        presentation
            .pages
            .iter()
            .enumerate()
            .map(|(idx, page)| self.resolve(page, idx, context))
            .collect()
    }

    /// Lays out a single page.
    ///
    /// Components are resolved in dependency order. Fails on pages without a
    /// positive size, duplicate names, attachments to unknown components and
    /// attachment cycles.
    pub fn resolve(&self, page: &Page, page_index: usize, context: &RenderContext) -> Result<LayoutResult, ViewerError> {
        if !(page.width > 0.0 && page.height > 0.0 && page.width.is_finite() && page.height.is_finite()) {
            return Err(ViewerError::InvalidPageSize {
                width: page.width,
                height: page.height,
            });
        }

        let components = &page.components;
        let index = build_index(components)?;
        let order = dependency_order(components, &index)?;

        let area = page.content_area();
        let mut resolved: Vec<Option<Rect>> = vec![None; components.len()];

        for idx in order {
            let component = &components[idx];
            let content = self.metrics.content_size(component, context);
            let explicit = component.size;

            let (x, width) = resolve_axis(
                component,
                Axis::Horizontal,
                component.layout.left.as_ref(),
                component.layout.right.as_ref(),
                explicit.map(|s| s.width),
                content.width,
                area,
                &index,
                &resolved,
            )?;
            let (y, height) = resolve_axis(
                component,
                Axis::Vertical,
                component.layout.top.as_ref(),
                component.layout.bottom.as_ref(),
                explicit.map(|s| s.height),
                content.height,
                area,
                &index,
                &resolved,
            )?;

            log::debug!("layout: '{}' at ({x}, {y}) size {width}x{height}", component.name);
            resolved[idx] = Some(Rect::new(x, y, width, height));
        }

        let page_bounds = page.bounds();
        let mut geometries = Vec::with_capacity(components.len());
        let mut issues = Vec::new();

        for (component, bounds) in components.iter().zip(resolved) {
            // Every index comes out of dependency_order exactly once
            let bounds = bounds.unwrap_or_default();
            if !page_bounds.encloses(&bounds) {
                log::warn!("layout: component '{}' extends outside the page: {:?}", component.name, bounds);
                issues.push(LayoutIssue::OutsidePage {
                    component: component.name.clone(),
                    bounds,
                });
            }
            geometries.push(ComponentGeometry {
                name: component.name.clone(),
                bounds,
            });
        }

        Ok(LayoutResult {
            page_index,
            geometries,
            issues,
        })
    }
}

fn build_index(components: &[Component]) -> Result<HashMap<&str, usize>, ViewerError> {
    let mut index = HashMap::with_capacity(components.len());
    for (idx, component) in components.iter().enumerate() {
        if index.insert(component.name.as_str(), idx).is_some() {
            return Err(ViewerError::DuplicateComponent(component.name.clone()));
        }
    }
    Ok(index)
}

/// Topological order of the attachment graph (Kahn's algorithm).
///
/// Ties are broken by declaration order so the result is deterministic.
fn dependency_order(components: &[Component], index: &HashMap<&str, usize>) -> Result<Vec<usize>, ViewerError> {
    let n = components.len();
    let mut deps: Vec<Vec<usize>> = Vec::with_capacity(n);
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

    for (idx, component) in components.iter().enumerate() {
        let mut own = Vec::new();
        for target in component.layout.targets() {
            let target_idx = *index
                .get(target)
                .ok_or_else(|| ViewerError::UnknownAttachmentTarget {
                    component: component.name.clone(),
                    target: target.to_string(),
                })?;
            if !own.contains(&target_idx) {
                own.push(target_idx);
                dependents[target_idx].push(idx);
            }
        }
        deps.push(own);
    }

    let mut in_degree: Vec<usize> = deps.iter().map(Vec::len).collect();
    let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(idx) = queue.pop_front() {
        order.push(idx);
        for &dependent in &dependents[idx] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if order.len() < n {
        let cycle = find_cycle(&deps, &in_degree)
            .into_iter()
            .map(|i| components[i].name.clone())
            .collect();
        return Err(ViewerError::LayoutCycle { cycle });
    }

    Ok(order)
}

/// Extracts one cycle from the nodes Kahn's algorithm could not schedule.
///
/// Every unscheduled node still waits on at least one unscheduled dependency, so
/// following those dependencies from any unscheduled node must revisit a node
/// within `n` steps. The returned path starts and ends on the same node.
fn find_cycle(deps: &[Vec<usize>], in_degree: &[usize]) -> Vec<usize> {
    let pending = |i: usize| in_degree[i] > 0;
    let Some(start) = (0..deps.len()).find(|&i| pending(i)) else {
        return Vec::new();
    };

    let mut path = Vec::new();
    let mut seen_at: HashMap<usize, usize> = HashMap::new();
    let mut current = start;

    loop {
        if let Some(&pos) = seen_at.get(&current) {
            let mut cycle = path[pos..].to_vec();
            cycle.push(current);
            return cycle;
        }
        seen_at.insert(current, path.len());
        path.push(current);

        match deps[current].iter().copied().find(|&d| pending(d)) {
            Some(next) => current = next,
            None => return path,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_axis(
    component: &Component,
    axis: Axis,
    start: Option<&Attachment>,
    end: Option<&Attachment>,
    explicit: Option<f32>,
    content: f32,
    area: Rect,
    index: &HashMap<&str, usize>,
    resolved: &[Option<Rect>],
) -> Result<(f32, f32), ViewerError> {
    let start = start
        .map(|a| reference(component, a, Side::Start, axis, area, index, resolved))
        .transpose()?;
    let end = end
        .map(|a| reference(component, a, Side::End, axis, area, index, resolved))
        .transpose()?;

    let length = match (explicit, start, end) {
        (Some(len), _, _) => len,
        (None, Some((s, false)), Some((e, false))) => (e - s).max(0.0),
        _ => content,
    };

    let position = match (start, end) {
        (Some((s, true)), _) => s - length / 2.0,
        (Some((s, false)), _) => s,
        (None, Some((e, true))) => e - length / 2.0,
        (None, Some((e, false))) => e - length,
        (None, None) => match axis {
            Axis::Horizontal => area.x,
            Axis::Vertical => area.y,
        },
    };

    Ok((position, length))
}

/// Returns the coordinate an attachment points at, and whether it is a centerline.
fn reference(
    component: &Component,
    attachment: &Attachment,
    side: Side,
    axis: Axis,
    area: Rect,
    index: &HashMap<&str, usize>,
    resolved: &[Option<Rect>],
) -> Result<(f32, bool), ViewerError> {
    let target = match attachment.component.as_deref() {
        None => area,
        Some(name) => index
            .get(name)
            .and_then(|&i| resolved[i])
            .ok_or_else(|| ViewerError::UnknownAttachmentTarget {
                component: component.name.clone(),
                target: name.to_string(),
            })?,
    };

    let (lo, hi) = match axis {
        Axis::Horizontal => (target.x, target.right()),
        Axis::Vertical => (target.y, target.bottom()),
    };

    let (edge, centered) = match attachment.alignment {
        Alignment::Left | Alignment::Top => (lo, false),
        Alignment::Right | Alignment::Bottom => (hi, false),
        Alignment::Center | Alignment::Middle => ((lo + hi) / 2.0, true),
        Alignment::Default => {
            let on_page = attachment.component.is_none();
            match (side, on_page) {
                (Side::Start, true) | (Side::End, false) => (lo, false),
                (Side::End, true) | (Side::Start, false) => (hi, false),
            }
        }
    };

    Ok((edge + attachment.offset, centered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::layout::TextMetrics;
    use crate::presentation::Layout;

    /// Every label is 10 px per character and 20 px high.
    fn metrics() -> TextMetrics {
        TextMetrics::new(0.5, 1.0)
    }

    fn ctx() -> RenderContext {
        RenderContext::new(&Presentation::new("Test"), &[])
    }

    fn label(name: &str, text: &str, layout: Layout) -> Component {
        let mut c = Component::label(name, text).with_layout(layout);
        if let crate::presentation::ComponentKind::Label(l) = &mut c.kind {
            l.font = Some(crate::presentation::Font::new("Arial", 20.0, false, false));
        }
        c
    }

    fn resolve(page: &Page) -> Result<LayoutResult, ViewerError> {
        let m = metrics();
        LayoutEngine::new(&m).resolve(page, 0, &ctx())
    }

    #[test]
    fn unattached_component_sits_at_content_origin() {
        let page = Page::new(200.0, 100.0)
            .with_margins(5.0, 5.0, 7.0, 7.0)
            .with_component(label("A", "abc", Layout::default()));
        let result = resolve(&page).unwrap();
        assert_eq!(result.geometry("A"), Some(&Rect::new(5.0, 7.0, 30.0, 20.0)));
        assert!(result.issues.is_empty());
    }

    #[test]
    fn vertical_chain_follows_dependencies() {
        // Declared bottom-up on purpose: C depends on B depends on A.
        let page = Page::new(400.0, 400.0)
            .with_component(label(
                "C",
                "c",
                Layout {
                    top: Some(Attachment::to_aligned("B", 5.0, Alignment::Bottom)),
                    ..Default::default()
                },
            ))
            .with_component(label(
                "B",
                "b",
                Layout {
                    top: Some(Attachment::to("A", 5.0)),
                    ..Default::default()
                },
            ))
            .with_component(label(
                "A",
                "a",
                Layout {
                    top: Some(Attachment::page(100.0)),
                    ..Default::default()
                },
            ));

        let result = resolve(&page).unwrap();
        assert_eq!(result.geometries.len(), 3);
        assert_eq!(result.geometries[0].name, "C");
        assert_eq!(result.geometry("A").unwrap().y, 100.0);
        assert_eq!(result.geometry("B").unwrap().y, 125.0);
        assert_eq!(result.geometry("C").unwrap().y, 150.0);
    }

    #[test]
    fn center_alignment_centers_on_reference() {
        let page = Page::new(200.0, 100.0).with_component(label(
            "A",
            "abcd",
            Layout {
                left: Some(Attachment::page_aligned(0.0, Alignment::Center)),
                top: Some(Attachment::page_aligned(0.0, Alignment::Middle)),
                ..Default::default()
            },
        ));
        let r = *resolve(&page).unwrap().geometry("A").unwrap();
        assert_eq!(r, Rect::new(80.0, 40.0, 40.0, 20.0));
    }

    #[test]
    fn right_and_bottom_page_attachments_anchor_end_edges() {
        let page = Page::new(200.0, 100.0)
            .with_margins(10.0, 10.0, 10.0, 10.0)
            .with_component(label(
                "A",
                "ab",
                Layout {
                    right: Some(Attachment::page(0.0)),
                    bottom: Some(Attachment::page(0.0)),
                    ..Default::default()
                },
            ));
        let r = *resolve(&page).unwrap().geometry("A").unwrap();
        assert_eq!(r, Rect::new(170.0, 70.0, 20.0, 20.0));
    }

    #[test]
    fn both_edges_attached_stretches() {
        let page = Page::new(300.0, 100.0).with_component(
            Component::rectangle("R", crate::presentation::Color::BLACK).with_layout(Layout {
                left: Some(Attachment::page(10.0)),
                right: Some(Attachment::page(-10.0)),
                top: Some(Attachment::page(0.0)),
                bottom: Some(Attachment::page_aligned(0.0, Alignment::Middle)),
            }),
        );
        let r = *resolve(&page).unwrap().geometry("R").unwrap();
        // bottom is centered, so the height falls back to the (zero) content height
        assert_eq!(r, Rect::new(10.0, 0.0, 280.0, 0.0));
    }

    #[test]
    fn explicit_size_overrides_content_and_stretch() {
        let page = Page::new(300.0, 100.0).with_component(
            label(
                "A",
                "abc",
                Layout {
                    left: Some(Attachment::page(10.0)),
                    right: Some(Attachment::page(-10.0)),
                    ..Default::default()
                },
            )
            .with_size(50.0, 40.0),
        );
        let r = *resolve(&page).unwrap().geometry("A").unwrap();
        assert_eq!(r, Rect::new(10.0, 0.0, 50.0, 40.0));
        assert_eq!(r.size(), Size::new(50.0, 40.0));
    }

    #[test]
    fn default_alignment_to_component_uses_facing_edge() {
        let page = Page::new(400.0, 100.0)
            .with_component(label("A", "abcde", Layout::default()))
            .with_component(label(
                "B",
                "b",
                Layout {
                    left: Some(Attachment::to("A", 4.0)),
                    ..Default::default()
                },
            ))
            .with_component(label(
                "C",
                "c",
                Layout {
                    right: Some(Attachment::to("B", 0.0)),
                    top: Some(Attachment::to_aligned("A", 0.0, Alignment::Top)),
                    ..Default::default()
                },
            ));
        let result = resolve(&page).unwrap();
        assert_eq!(result.geometry("B").unwrap().x, 54.0);
        // C's right edge meets B's left edge
        assert_eq!(result.geometry("C").unwrap().right(), 54.0);
        assert_eq!(result.geometry("C").unwrap().y, 0.0);
    }

    #[test]
    fn two_node_cycle_is_reported() {
        let page = Page::new(100.0, 100.0)
            .with_component(label(
                "A",
                "a",
                Layout {
                    top: Some(Attachment::to("B", 0.0)),
                    ..Default::default()
                },
            ))
            .with_component(label(
                "B",
                "b",
                Layout {
                    top: Some(Attachment::to("A", 0.0)),
                    ..Default::default()
                },
            ));

        match resolve(&page) {
            Err(ViewerError::LayoutCycle { cycle }) => assert_eq!(cycle, vec!["A", "B", "A"]),
            other => panic!("expected LayoutCycle, got {other:?}"),
        }
    }

    #[test]
    fn self_attachment_is_a_cycle() {
        let page = Page::new(100.0, 100.0).with_component(label(
            "A",
            "a",
            Layout {
                left: Some(Attachment::to("A", 0.0)),
                ..Default::default()
            },
        ));
        match resolve(&page) {
            Err(ViewerError::LayoutCycle { cycle }) => assert_eq!(cycle, vec!["A", "A"]),
            other => panic!("expected LayoutCycle, got {other:?}"),
        }
    }

    #[test]
    fn cycle_behind_an_acyclic_prefix_is_found() {
        // D -> C -> B -> C; D itself is not on the cycle
        let attach = |target: &str| Layout {
            top: Some(Attachment::to(target, 0.0)),
            ..Default::default()
        };
        let page = Page::new(100.0, 100.0)
            .with_component(label("A", "a", Layout::default()))
            .with_component(label("D", "d", attach("C")))
            .with_component(label("C", "c", attach("B")))
            .with_component(label("B", "b", attach("C")));

        match resolve(&page) {
            Err(ViewerError::LayoutCycle { cycle }) => assert_eq!(cycle, vec!["C", "B", "C"]),
            other => panic!("expected LayoutCycle, got {other:?}"),
        }
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let mut page = Page::new(100.0, 100_000.0);
        page.components.push(label("c0", "x", Layout::default()));
        for i in 1..5_000 {
            page.components.push(label(
                &format!("c{i}"),
                "x",
                Layout {
                    top: Some(Attachment::to(format!("c{}", i - 1), 0.0)),
                    ..Default::default()
                },
            ));
        }
        let result = resolve(&page).unwrap();
        assert_eq!(result.geometries.len(), 5_000);
        assert_eq!(result.geometry("c4999").unwrap().y, 4_999.0 * 20.0);
    }

    #[test]
    fn unknown_target_is_an_error() {
        let page = Page::new(100.0, 100.0).with_component(label(
            "A",
            "a",
            Layout {
                top: Some(Attachment::to("Ghost", 0.0)),
                ..Default::default()
            },
        ));
        match resolve(&page) {
            Err(ViewerError::UnknownAttachmentTarget { component, target }) => {
                assert_eq!(component, "A");
                assert_eq!(target, "Ghost");
            }
            other => panic!("expected UnknownAttachmentTarget, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let page = Page::new(100.0, 100.0)
            .with_component(label("A", "a", Layout::default()))
            .with_component(label("A", "b", Layout::default()));
        assert!(matches!(resolve(&page), Err(ViewerError::DuplicateComponent(name)) if name == "A"));
    }

    #[test]
    fn pages_without_area_are_rejected() {
        for (w, h) in [(0.0, 0.0), (100.0, 0.0), (-5.0, 100.0), (f32::NAN, 100.0)] {
            let page = Page::new(w, h).with_component(label("A", "a", Layout::default()));
            assert!(matches!(resolve(&page), Err(ViewerError::InvalidPageSize { .. })), "{w}x{h}");
        }
    }

    #[test]
    fn overflow_is_reported_as_issue_not_error() {
        let page = Page::new(50.0, 50.0).with_component(label("Wide", "much too wide", Layout::default()));
        let result = resolve(&page).unwrap();
        assert_eq!(result.geometries.len(), 1);
        assert!(matches!(&result.issues[0], LayoutIssue::OutsidePage { component, .. } if component == "Wide"));
    }

    #[test]
    fn every_page_of_a_presentation_is_resolved() {
        let p = Presentation::new("P")
            .with_page(Page::new(100.0, 100.0).with_component(label("A", "a", Layout::default())))
            .with_page(Page::new(100.0, 100.0));
        let m = metrics();
        let results = LayoutEngine::new(&m).resolve_presentation(&p, &ctx()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].page_index, 1);
        assert!(results[1].geometries.is_empty());
    }
}
