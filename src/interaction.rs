//! Interaction dispatch.
//!
//! Matches a pointer gesture on a drawn item against the interaction rules of
//! the current presentation and turns the first matching rule into a
//! [`NavigationRequest`]. The dispatcher never loads anything itself; the
//! viewer decides what to do with the request.

use crate::errors::ViewerError;
use crate::presentation::{
    ActionType, Interaction, InteractionAction, InteractionLocation, Parameter, ParameterSourceType, Presentation,
};
use crate::render::DrawnItem;
use std::fmt::{Display, Formatter};

/// Gesture that fired an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    SingleClick,
    DoubleClick,
}

impl Display for Trigger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::SingleClick => write!(f, "single-click"),
            Trigger::DoubleClick => write!(f, "double-click"),
        }
    }
}

/// Request to show another presentation with the given parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub target: String,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InteractionDispatcher;

impl InteractionDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// First rule of `presentation` that applies to `item`.
    ///
    /// With `trigger` set to `None` any gesture matches, which is what hover
    /// feedback needs.
    pub fn find_interaction<'p>(
        &self,
        presentation: &'p Presentation,
        trigger: Option<Trigger>,
        item: &DrawnItem,
    ) -> Option<&'p Interaction> {
        presentation.interactions.iter().find(|interaction| {
            let method = &interaction.method;
            let method_matches = match trigger {
                Some(Trigger::SingleClick) => method.single_click,
                Some(Trigger::DoubleClick) => method.double_click,
                None => method.single_click || method.double_click,
            };
            method_matches && location_matches(&interaction.location, &presentation.name, item)
        })
    }

    /// Runs the first rule matching `trigger` on `item`.
    ///
    /// Returns the navigation the rule asks for, if any. When several actions
    /// open a presentation the last one is returned.
    pub fn dispatch(
        &self,
        presentation: &Presentation,
        trigger: Trigger,
        item: &DrawnItem,
    ) -> Result<Option<NavigationRequest>, ViewerError> {
        let Some(interaction) = self.find_interaction(presentation, Some(trigger), item) else {
            log::trace!("interaction: no {trigger} rule for '{}'", item.component_name);
            return Ok(None);
        };

        let mut request = None;
        for action in &interaction.actions {
            match &action.action_type {
                ActionType::OpenPresentation => {
                    if let Some(next) = open_presentation(action, &presentation.name, item) {
                        request = Some(next);
                    }
                }
                ActionType::Unsupported(name) => return Err(ViewerError::UnsupportedActionType(name.clone())),
            }
        }

        if let Some(req) = &request {
            log::debug!(
                "interaction: {trigger} on '{}' opens '{}' with {} parameters",
                item.component_name,
                req.target,
                req.parameters.len()
            );
        }
        Ok(request)
    }
}

fn location_matches(location: &InteractionLocation, presentation_name: &str, item: &DrawnItem) -> bool {
    fn field(expected: &Option<String>, actual: &str) -> bool {
        expected.as_deref().map_or(true, |e| e == actual)
    }

    field(&location.presentation_name, presentation_name)
        && field(&location.component_name, &item.component_name)
        && field(&location.item_type, &item.item_type.to_string())
        && field(&location.item_category, &item.category)
        && field(&location.component_plugin_id, &item.component_plugin_id)
}

fn open_presentation(action: &InteractionAction, presentation_name: &str, item: &DrawnItem) -> Option<NavigationRequest> {
    if action.object_name.is_empty() {
        return None;
    }

    let parameters = action
        .parameters
        .iter()
        .map(|binding| {
            let value = match binding.source_type {
                ParameterSourceType::PresentationName => presentation_name.to_string(),
                ParameterSourceType::ComponentName => item.component_name.clone(),
                ParameterSourceType::ItemType => item.item_type.to_string(),
                ParameterSourceType::ItemValue => item.value().to_string(),
                ParameterSourceType::ItemCategory => item.category.clone(),
                ParameterSourceType::ComponentPluginId => item.component_plugin_id.clone(),
            };
            Parameter::new(binding.parameter_name.clone(), value)
        })
        .collect();

    Some(NavigationRequest {
        target: action.object_name.clone(),
        parameters,
    })
}
