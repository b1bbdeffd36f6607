//! Goal assistant endpoints used by the creation wizard.

use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{extract::State, routing::post, Json, Router};
use mismetas_core::assistant::{AiPlan, GoalPlanRequest, RemoteValidation, TargetSuggestions};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateGoalBody {
    #[serde(default)]
    goal_text: String,
    /// When set, a failed remote check falls back to the local verdict.
    #[serde(default)]
    fallback: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestTargetsBody {
    #[serde(default)]
    goal_name: String,
    #[serde(default)]
    goal_description: Option<String>,
}

fn required(value: &str, message: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(message.to_string()));
    }
    Ok(())
}

async fn validate_goal(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ValidateGoalBody>,
) -> ApiResult<Json<RemoteValidation>> {
    required(&body.goal_text, "Goal text is required")?;
    let verdict = if body.fallback {
        state.validation_service.validate(&body.goal_text).await
    } else {
        state.assistant.validate_goal(&body.goal_text).await?
    };
    Ok(Json(verdict))
}

async fn suggest_target_options(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SuggestTargetsBody>,
) -> ApiResult<Json<TargetSuggestions>> {
    required(&body.goal_name, "Goal name is required")?;
    let suggestions = state
        .assistant
        .suggest_targets(&body.goal_name, body.goal_description.as_deref())
        .await;
    Ok(Json(suggestions))
}

async fn generate_goal_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GoalPlanRequest>,
) -> ApiResult<Json<AiPlan>> {
    required(&request.goal_name, "Goal name is required")?;
    if request.target_value <= 0 {
        return Err(ApiError::BadRequest(
            "Target must be a positive number".to_string(),
        ));
    }
    let plan = state.assistant.generate_plan(&request).await?;
    Ok(Json(plan))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ai/validate-goal", post(validate_goal))
        .route("/ai/suggest-target-options", post(suggest_target_options))
        .route("/ai/generate-goal-plan", post(generate_goal_plan))
}
