#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("Unable to find presentation '{0}'")]
    PresentationNotFound(String),

    #[error("There was no output after rendering (0 pages) of presentation '{0}'")]
    EmptyRenderOutput(String),

    #[error("Layout cycle detected: {}", .cycle.join(" -> "))]
    LayoutCycle { cycle: Vec<String> },

    #[error("Component '{component}' is attached to unknown component '{target}'")]
    UnknownAttachmentTarget { component: String, target: String },

    #[error("Duplicate component name '{0}' on page")]
    DuplicateComponent(String),

    #[error("Invalid page size {width}x{height}")]
    InvalidPageSize { width: f32, height: f32 },

    #[error("Component '{0}' has no resolved geometry")]
    MissingGeometry(String),

    #[error("Unsupported component type: {0}")]
    UnsupportedComponentType(String),

    #[error("Vector document error: {0}")]
    VectorParse(String),

    #[error("Unsupported action type: {0}")]
    UnsupportedActionType(String),

    #[error("Invalid surface size {width}x{height}")]
    InvalidSurfaceSize { width: u32, height: u32 },

    #[error("Image encoding error: {0}")]
    Encode(String),

    #[error("Viewer has been disposed")]
    Disposed,

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_names_every_node() {
        let err = ViewerError::LayoutCycle {
            cycle: vec!["A".into(), "B".into(), "A".into()],
        };
        assert_eq!(err.to_string(), "Layout cycle detected: A -> B -> A");
    }

    #[test]
    fn store_errors_convert_from_anyhow() {
        let err: ViewerError = anyhow::anyhow!("disk full").into();
        assert!(matches!(err, ViewerError::Store(_)));
        assert_eq!(err.to_string(), "Store error: disk full");
    }
}
