use crate::context::RenderContext;
use crate::errors::ViewerError;
use crate::interaction::{InteractionDispatcher, NavigationRequest, Trigger};
use crate::layout::LayoutEngine;
use crate::presentation::Parameter;
use crate::render::backend::{scale_for, RenderBackend, SurfaceSize};
use crate::render::backends::tiny_skia::TinySkiaBackend;
use crate::render::{ComponentPainter, Renderer};
use crate::storage::PresentationStore;
use crate::viewer::{
    DisplaySurface, HoverState, PointerEvent, ViewerConfig, ViewerResponse, ViewerState, ViewerStatus,
};
use std::sync::Arc;

/// Shows one presentation at a time and reacts to pointer input.
///
/// The controller pulls presentations from its store, lays out and renders the
/// first page, and keeps the rasterized bitmap until the next navigation or
/// resize. Pointer events are hit tested against the drawn items and matched
/// against the presentation's interaction rules; a match may navigate to
/// another presentation.
///
/// A navigation either completes or leaves the previous state untouched.
pub struct ViewerController<S: PresentationStore> {
    store: S,
    backend: Box<dyn RenderBackend>,
    config: ViewerConfig,
    renderer: Renderer,
    dispatcher: InteractionDispatcher,
    surface_size: SurfaceSize,
    status: ViewerStatus,
    hovering: bool,
    state: Option<Arc<ViewerState>>,
}

impl<S: PresentationStore> ViewerController<S> {
    /// Creates a viewer rasterizing with resvg/tiny-skia.
    pub fn new(store: S, config: ViewerConfig) -> Self {
        let backend = TinySkiaBackend::new(config.load_system_fonts, &config.default_font_family);
        Self::with_backend(store, Box::new(backend), config)
    }

    pub fn with_backend(store: S, backend: Box<dyn RenderBackend>, config: ViewerConfig) -> Self {
        log::debug!("viewer: created with backend {}", backend.name());
        Self {
            store,
            backend,
            renderer: Renderer::new(config.text_metrics()),
            dispatcher: InteractionDispatcher::new(),
            surface_size: config.surface_size(),
            config,
            status: ViewerStatus::Empty,
            hovering: false,
            state: None,
        }
    }

    /// Registers a painter for a plugin component type.
    pub fn register_painter(&mut self, painter: Box<dyn ComponentPainter>) {
        self.renderer.register(painter);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn status(&self) -> ViewerStatus {
        self.status
    }

    pub fn state(&self) -> Option<&Arc<ViewerState>> {
        self.state.as_ref()
    }

    pub fn surface_size(&self) -> SurfaceSize {
        self.surface_size
    }

    pub fn current_presentation_name(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.presentation.name.as_str())
    }

    /// Parameters of the current presentation, empty when nothing is loaded.
    pub fn parameters(&self) -> &[Parameter] {
        self.state.as_ref().map(|s| s.parameters.as_slice()).unwrap_or_default()
    }

    /// Shows the named presentation, keeping the current parameters.
    pub fn load(&mut self, name: &str) -> Result<(), ViewerError> {
        let parameters = self.parameters().to_vec();
        self.open(name, parameters)
    }

    /// Shows the target of a navigation request with the request's parameters.
    pub fn navigate(&mut self, request: NavigationRequest) -> Result<(), ViewerError> {
        self.open(&request.target, request.parameters)
    }

    fn open(&mut self, name: &str, parameters: Vec<Parameter>) -> Result<(), ViewerError> {
        self.ensure_alive()?;

        let presentation = self
            .store
            .load(name)?
            .ok_or_else(|| ViewerError::PresentationNotFound(name.to_string()))?;
        let page = presentation
            .pages
            .first()
            .ok_or_else(|| ViewerError::EmptyRenderOutput(name.to_string()))?;

        let context = RenderContext::new(&presentation, &parameters);
        let layout = LayoutEngine::new(&self.renderer).resolve(page, 0, &context)?;
        let render_page = self.renderer.render(page, &layout, &context)?;
        let bitmap = self.backend.rasterize(&render_page.document, self.surface_size)?;
        let scale = scale_for(render_page.width, render_page.height, self.surface_size);

        log::info!(
            "viewer: showing '{}' ({} items, {} parameters)",
            name,
            render_page.items.len(),
            parameters.len()
        );

        self.state = Some(Arc::new(ViewerState {
            presentation,
            parameters,
            render_page,
            bitmap,
            scale,
        }));
        self.status = ViewerStatus::Loaded;
        self.hovering = false;
        Ok(())
    }

    /// Updates the hover state for a pointer at surface position `(x, y)`.
    pub fn on_pointer_move(&mut self, x: i32, y: i32) -> HoverState {
        let hover = match self.state.as_deref() {
            Some(state) if self.status != ViewerStatus::Disposed => {
                let (px, py) = state.to_page(x, y);
                let active = state
                    .render_page
                    .item_at(px, py)
                    .and_then(|item| self.dispatcher.find_interaction(&state.presentation, None, item))
                    .is_some();
                if active {
                    HoverState::Active
                } else {
                    HoverState::Inactive
                }
            }
            _ => HoverState::Inactive,
        };

        self.hovering = hover == HoverState::Active;
        hover
    }

    pub fn on_pointer_click(&mut self, x: i32, y: i32) -> Result<ViewerResponse, ViewerError> {
        self.on_trigger(Trigger::SingleClick, x, y)
    }

    pub fn on_pointer_double_click(&mut self, x: i32, y: i32) -> Result<ViewerResponse, ViewerError> {
        self.on_trigger(Trigger::DoubleClick, x, y)
    }

    fn on_trigger(&mut self, trigger: Trigger, x: i32, y: i32) -> Result<ViewerResponse, ViewerError> {
        self.ensure_alive()?;
        let Some(state) = self.state.clone() else {
            return Ok(ViewerResponse::default());
        };

        let (px, py) = state.to_page(x, y);
        let Some(item) = state.render_page.item_at(px, py) else {
            return Ok(ViewerResponse::default());
        };

        match self.dispatcher.dispatch(&state.presentation, trigger, item)? {
            Some(request) => {
                let target = request.target.clone();
                self.navigate(request)?;
                Ok(ViewerResponse::navigated(target))
            }
            None => Ok(ViewerResponse::default()),
        }
    }

    /// Host entry point for pointer input.
    ///
    /// Errors are logged and dropped so the viewer keeps handling later events.
    pub fn handle_event(&mut self, event: PointerEvent) -> ViewerResponse {
        let result = match event {
            PointerEvent::Move { x, y } => {
                let was_hovering = self.hovering;
                let hover = self.on_pointer_move(x, y);
                let mut response = ViewerResponse::default();
                if was_hovering != self.hovering {
                    response.cursor = Some(hover.cursor());
                }
                Ok(response)
            }
            PointerEvent::Click { x, y } => self.on_pointer_click(x, y),
            PointerEvent::DoubleClick { x, y } => self.on_pointer_double_click(x, y),
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => Ok(ViewerResponse::default()),
        };

        result.unwrap_or_else(|e| {
            log::error!("viewer: {event:?} failed: {e}");
            ViewerResponse::default()
        })
    }

    /// Paints the cached bitmap at the surface origin.
    pub fn paint(&self, surface: &mut dyn DisplaySurface) {
        let hover = if self.hovering {
            HoverState::Active
        } else {
            HoverState::Inactive
        };
        surface.set_cursor(hover.cursor());

        if let Some(state) = &self.state {
            surface.blit(&state.bitmap, 0, 0);
        }
    }

    /// Changes the surface size and rasterizes the current page again. The
    /// page is not laid out again.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ViewerError> {
        self.ensure_alive()?;
        let size = SurfaceSize::new(width, height).validate()?;

        if let Some(state) = &self.state {
            let bitmap = self.backend.rasterize(&state.render_page.document, size)?;
            let scale = scale_for(state.render_page.width, state.render_page.height, size);
            let mut next = ViewerState::clone(state);
            next.bitmap = bitmap;
            next.scale = scale;
            self.state = Some(Arc::new(next));
        }

        log::debug!("viewer: resized to {width}x{height}");
        self.surface_size = size;
        Ok(())
    }

    /// Releases the current state. Every later operation fails with
    /// [`ViewerError::Disposed`].
    pub fn dispose(&mut self) {
        if self.status != ViewerStatus::Disposed {
            log::debug!("viewer: disposed");
        }
        self.state = None;
        self.hovering = false;
        self.status = ViewerStatus::Disposed;
    }

    /// PNG export of the current bitmap, `None` when nothing is loaded.
    pub fn snapshot_png(&self) -> Result<Option<Vec<u8>>, ViewerError> {
        self.ensure_alive()?;
        self.state.as_ref().map(|s| s.bitmap.encode_png()).transpose()
    }

    fn ensure_alive(&self) -> Result<(), ViewerError> {
        if self.status == ViewerStatus::Disposed {
            return Err(ViewerError::Disposed);
        }
        Ok(())
    }
}
