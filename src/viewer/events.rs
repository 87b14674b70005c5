/// Pointer input delivered by the host, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Move { x: i32, y: i32 },
    Down { x: i32, y: i32 },
    Up { x: i32, y: i32 },
    Click { x: i32, y: i32 },
    DoubleClick { x: i32, y: i32 },
}

/// Whether the pointer is over an item that reacts to clicks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HoverState {
    Active,
    #[default]
    Inactive,
}

impl HoverState {
    pub fn cursor(self) -> CursorStyle {
        match self {
            HoverState::Active => CursorStyle::Pointer,
            HoverState::Inactive => CursorStyle::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorStyle {
    #[default]
    Default,
    /// Hand cursor shown over interactive items
    Pointer,
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerResponse {
    /// The cached bitmap changed and should be painted again
    pub redraw: bool,
    /// New cursor, only set when it changed
    pub cursor: Option<CursorStyle>,
    /// Presentation shown after a navigation triggered by the event
    pub navigated_to: Option<String>,
}

impl ViewerResponse {
    pub fn navigated(target: impl Into<String>) -> Self {
        Self {
            redraw: true,
            cursor: Some(CursorStyle::Default),
            navigated_to: Some(target.into()),
        }
    }
}
