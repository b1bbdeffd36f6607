//! Goal assistant: validation, target suggestions and plan generation.
//!
//! Every response is treated as untrusted text. The first JSON object is
//! extracted, deserialized and checked for shape before anything reaches the
//! caller.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use mismetas_core::assistant::{
    AiPlan, GoalAssistantTrait, GoalPlanRequest, PlanTask, RemoteValidation, TargetOption,
    TargetSuggestions,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AiError;
use crate::json::parse_json_response;
use crate::oracle::CompletionOracle;
use crate::prompts::{plan_prompt, target_options_prompt, validation_prompt};

/// Most options kept from a suggestion response.
pub const MAX_TARGET_OPTIONS: usize = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidationResponse {
    is_valid: bool,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    feedback: Option<String>,
    #[serde(default)]
    improved_goal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OptionsResponse {
    options: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PlanTaskResponse {
    title: String,
}

#[derive(Debug, Deserialize)]
struct PlanResponse {
    tasks: Vec<PlanTaskResponse>,
    #[serde(default)]
    suggestions: Option<Vec<String>>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Keeps a raw option only if it has a positive finite value and a label.
fn to_target_option(raw: &Value) -> Option<TargetOption> {
    let value = raw.get("value")?.as_f64().filter(|v| v.is_finite() && *v > 0.0)?;
    let label = raw.get("label")?.as_str()?.trim();
    if label.is_empty() {
        return None;
    }
    let description = raw
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);
    Some(TargetOption {
        value,
        label: label.to_string(),
        description: non_blank(description),
    })
}

/// AI-backed [`GoalAssistantTrait`] over two oracles: one for validation and
/// one for suggestions and plans.
pub struct GoalAssistant {
    validator: Arc<dyn CompletionOracle>,
    planner: Arc<dyn CompletionOracle>,
}

impl GoalAssistant {
    pub fn new(validator: Arc<dyn CompletionOracle>, planner: Arc<dyn CompletionOracle>) -> Self {
        Self { validator, planner }
    }

    /// One remote validation attempt, no fallback.
    pub async fn validate_remote(&self, goal_text: &str) -> Result<RemoteValidation, AiError> {
        if goal_text.trim().is_empty() {
            return Err(AiError::invalid_input("Goal text is required"));
        }
        let raw = self.validator.complete(&validation_prompt(goal_text)).await?;
        debug!("Validation response: {}", raw);

        let parsed: ValidationResponse = parse_json_response(&raw)?;
        Ok(RemoteValidation {
            is_valid: parsed.is_valid,
            confidence: parsed
                .confidence
                .filter(|c| c.is_finite())
                .map(|c| c.clamp(0.0, 1.0)),
            feedback: non_blank(parsed.feedback),
            improved_goal: non_blank(parsed.improved_goal),
        })
    }

    /// Target options, or an error when the request or the response failed.
    pub async fn suggest_targets_remote(
        &self,
        goal_name: &str,
        goal_description: Option<&str>,
    ) -> Result<TargetSuggestions, AiError> {
        if goal_name.trim().is_empty() {
            return Err(AiError::invalid_input("Goal name is required"));
        }
        let raw = self
            .planner
            .complete(&target_options_prompt(goal_name, goal_description))
            .await?;
        debug!("Target options response: {}", raw);

        let parsed: OptionsResponse = parse_json_response(&raw)?;
        let options: Vec<TargetOption> = parsed
            .options
            .iter()
            .filter_map(to_target_option)
            .take(MAX_TARGET_OPTIONS)
            .collect();
        if options.is_empty() && !parsed.options.is_empty() {
            return Err(AiError::invalid_response(format!(
                "none of the {} target options were usable",
                parsed.options.len()
            )));
        }
        if options.len() < parsed.options.len().min(MAX_TARGET_OPTIONS) {
            debug!(
                "Discarded {} malformed target options",
                parsed.options.len().min(MAX_TARGET_OPTIONS) - options.len()
            );
        }
        Ok(TargetSuggestions::suggested(options))
    }

    pub async fn generate_plan_remote(&self, request: &GoalPlanRequest) -> Result<AiPlan, AiError> {
        if request.goal_name.trim().is_empty() {
            return Err(AiError::invalid_input("Goal name is required"));
        }
        if request.target_value <= 0 {
            return Err(AiError::invalid_input("Target must be a positive number"));
        }
        let prompt = plan_prompt(
            &request.goal_name,
            request.goal_description.as_deref(),
            request.target_value,
            request.target_date,
        );
        let raw = self.planner.complete(&prompt).await?;
        debug!("Plan response: {}", raw);

        let parsed: PlanResponse = parse_json_response(&raw)?;
        let tasks: Vec<PlanTask> = parsed
            .tasks
            .into_iter()
            .filter_map(|t| non_blank(Some(t.title)))
            .map(|title| PlanTask { title })
            .collect();
        if tasks.is_empty() {
            return Err(AiError::invalid_response("plan has no tasks"));
        }
        let suggestions = parsed
            .suggestions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| non_blank(Some(s)))
            .collect();

        Ok(AiPlan { tasks, suggestions })
    }
}

#[async_trait]
impl GoalAssistantTrait for GoalAssistant {
    async fn validate_goal(&self, goal_text: &str) -> mismetas_core::Result<RemoteValidation> {
        Ok(self.validate_remote(goal_text).await?)
    }

    async fn suggest_targets(
        &self,
        goal_name: &str,
        goal_description: Option<&str>,
    ) -> TargetSuggestions {
        match self.suggest_targets_remote(goal_name, goal_description).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!("Target suggestions unavailable: {}", e);
                TargetSuggestions::unavailable()
            }
        }
    }

    async fn generate_plan(&self, request: &GoalPlanRequest) -> mismetas_core::Result<AiPlan> {
        Ok(self.generate_plan_remote(request).await?)
    }
}
