use async_trait::async_trait;

use super::assistant_model::{AiPlan, GoalPlanRequest, RemoteValidation, TargetSuggestions};
use crate::errors::Result;

/// AI-backed helpers used while creating a goal.
///
/// Implemented by the `ai` crate. Errors from `validate_goal` are recovered by
/// [`GoalValidationService`](super::GoalValidationService); errors from
/// `generate_plan` are terminal for the submission attempt.
#[async_trait]
pub trait GoalAssistantTrait: Send + Sync {
    async fn validate_goal(&self, goal_text: &str) -> Result<RemoteValidation>;

    /// Never fails; a failed request yields an `Unavailable` empty list.
    async fn suggest_targets(
        &self,
        goal_name: &str,
        goal_description: Option<&str>,
    ) -> TargetSuggestions;

    async fn generate_plan(&self, request: &GoalPlanRequest) -> Result<AiPlan>;
}
