use crate::presentation::{Parameter, Presentation, Theme};

/// Everything layout and rendering need besides the page itself.
///
/// A RenderContext is built once per navigation from the presentation being
/// shown and the parameters that navigation carried.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Name of the presentation being rendered
    pub presentation_name: String,
    /// Parameters passed in by the navigation that led here
    pub parameters: Vec<Parameter>,
    /// Theme resolved from the presentation defaults
    pub theme: Theme,
}

impl RenderContext {
    pub fn new(presentation: &Presentation, parameters: &[Parameter]) -> Self {
        Self {
            presentation_name: presentation.name.clone(),
            parameters: parameters.to_vec(),
            theme: presentation.default_theme(),
        }
    }

    /// Returns the value of a parameter. The last binding with a given name wins.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .rev()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Expands `${NAME}` references in `text`.
    ///
    /// Unknown parameters expand to the empty string. An unterminated `${` is kept
    /// verbatim.
    pub fn expand(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find('}') {
                Some(end) => {
                    out.push_str(self.parameter(&after[..end]).unwrap_or(""));
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}
