//! Interaction rules: which pointer events on which items trigger which actions.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Pointer gestures a rule reacts to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionMethod {
    #[serde(default)]
    pub single_click: bool,
    #[serde(default)]
    pub double_click: bool,
}

impl InteractionMethod {
    pub const SINGLE_CLICK: Self = Self { single_click: true, double_click: false };
    pub const DOUBLE_CLICK: Self = Self { single_click: false, double_click: true };
    pub const ANY_CLICK: Self = Self { single_click: true, double_click: true };
}

/// Where a rule applies. `None` fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionLocation {
    /// Matched against the presentation being shown
    #[serde(default)]
    pub presentation_name: Option<String>,
    #[serde(default)]
    pub component_name: Option<String>,
    /// Matched against the drawn item type name (`Component`, `ComponentItem`)
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub item_category: Option<String>,
    #[serde(default)]
    pub component_plugin_id: Option<String>,
}

impl InteractionLocation {
    pub fn component(name: impl Into<String>) -> Self {
        Self {
            component_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_plugin_id(mut self, plugin_id: impl Into<String>) -> Self {
        self.component_plugin_id = Some(plugin_id.into());
        self
    }
}

/// What an action does.
///
/// Stored as its name. Names this version does not know load as
/// [`ActionType::Unsupported`] and are reported when the action runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    OpenPresentation,
    Unsupported(String),
}

impl From<String> for ActionType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "OpenPresentation" => ActionType::OpenPresentation,
            _ => ActionType::Unsupported(name),
        }
    }
}

impl From<ActionType> for String {
    fn from(action: ActionType) -> Self {
        action.to_string()
    }
}

impl Display for ActionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::OpenPresentation => write!(f, "OpenPresentation"),
            ActionType::Unsupported(name) => write!(f, "{name}"),
        }
    }
}

/// Where the value of a navigation parameter comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterSourceType {
    PresentationName,
    ComponentName,
    ItemType,
    ItemValue,
    ItemCategory,
    ComponentPluginId,
}

/// Binding of a parameter name to a value source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionParameter {
    pub parameter_name: String,
    pub source_type: ParameterSourceType,
}

impl InteractionParameter {
    pub fn new(parameter_name: impl Into<String>, source_type: ParameterSourceType) -> Self {
        Self {
            parameter_name: parameter_name.into(),
            source_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionAction {
    pub action_type: ActionType,
    /// Target of the action, e.g. the presentation to open
    #[serde(default)]
    pub object_name: String,
    #[serde(default)]
    pub parameters: Vec<InteractionParameter>,
}

impl InteractionAction {
    pub fn open_presentation(target: impl Into<String>) -> Self {
        Self {
            action_type: ActionType::OpenPresentation,
            object_name: target.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, source_type: ParameterSourceType) -> Self {
        self.parameters.push(InteractionParameter::new(name, source_type));
        self
    }
}

/// A (method, location) → actions rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub method: InteractionMethod,
    #[serde(default)]
    pub location: InteractionLocation,
    #[serde(default)]
    pub actions: Vec<InteractionAction>,
}

impl Interaction {
    pub fn new(method: InteractionMethod, location: InteractionLocation, action: InteractionAction) -> Self {
        Self {
            method,
            location,
            actions: vec![action],
        }
    }
}

/// A resolved parameter binding passed to the next presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_action_names_load_as_unsupported() {
        let json = r#"{ "action_type": "SendEmail", "object_name": "ops" }"#;
        let action: InteractionAction = serde_json::from_str(json).unwrap();
        assert_eq!(action.action_type, ActionType::Unsupported("SendEmail".into()));
        assert!(action.parameters.is_empty());

        let back = serde_json::to_value(&action).unwrap();
        assert_eq!(back["action_type"], "SendEmail");
    }

    #[test]
    fn open_presentation_is_stored_by_name() {
        let action = InteractionAction::open_presentation("Sales")
            .with_parameter("SOURCE", ParameterSourceType::ItemValue);
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action_type"], "OpenPresentation");
        assert_eq!(json["parameters"][0]["source_type"], "ItemValue");

        let back: InteractionAction = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }
}
