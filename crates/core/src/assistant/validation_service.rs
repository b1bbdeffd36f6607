use std::sync::Arc;

use log::warn;

use super::assistant_model::RemoteValidation;
use super::assistant_traits::GoalAssistantTrait;
use crate::wizard::{validate_goal_input, GoalInputValidation};

/// Remote goal validation with a local fallback.
#[derive(Clone)]
pub struct GoalValidationService {
    assistant: Arc<dyn GoalAssistantTrait>,
}

impl GoalValidationService {
    pub fn new(assistant: Arc<dyn GoalAssistantTrait>) -> Self {
        Self { assistant }
    }

    /// Asks the assistant for a verdict. Any failure degrades to the local rule
    /// chain; this never returns an error.
    pub async fn validate(&self, goal_text: &str) -> RemoteValidation {
        let local = validate_goal_input(goal_text);
        if !local.is_valid {
            return local_verdict(local);
        }

        match self.assistant.validate_goal(goal_text).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("AI validation failed, using local validation: {}", e);
                local_verdict(local)
            }
        }
    }
}

fn local_verdict(local: GoalInputValidation) -> RemoteValidation {
    RemoteValidation {
        is_valid: local.is_valid,
        confidence: Some(1.0),
        feedback: local.message,
        improved_goal: None,
    }
}
