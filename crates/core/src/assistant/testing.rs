//! Scripted assistant for service and wizard tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::assistant_model::{AiPlan, GoalPlanRequest, RemoteValidation, TargetSuggestions};
use super::assistant_traits::GoalAssistantTrait;
use crate::errors::{Error, Result};

#[derive(Default)]
struct Script {
    validations: VecDeque<Result<RemoteValidation>>,
    suggestions: VecDeque<TargetSuggestions>,
    plans: VecDeque<Result<AiPlan>>,
    validation_calls: Vec<String>,
    suggestion_calls: Vec<String>,
    plan_calls: Vec<GoalPlanRequest>,
    validation_delay: Option<Duration>,
}

/// Replays queued responses and records every call.
#[derive(Clone, Default)]
pub struct ScriptedAssistant {
    script: Arc<Mutex<Script>>,
}

impl ScriptedAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_validation(&self, result: Result<RemoteValidation>) {
        self.script.lock().unwrap().validations.push_back(result);
    }

    pub fn push_suggestions(&self, suggestions: TargetSuggestions) {
        self.script.lock().unwrap().suggestions.push_back(suggestions);
    }

    pub fn push_plan(&self, result: Result<AiPlan>) {
        self.script.lock().unwrap().plans.push_back(result);
    }

    /// Makes every validation call take `delay` before answering.
    pub fn delay_validations(&self, delay: Duration) {
        self.script.lock().unwrap().validation_delay = Some(delay);
    }

    pub fn validation_calls(&self) -> Vec<String> {
        self.script.lock().unwrap().validation_calls.clone()
    }

    pub fn suggestion_calls(&self) -> Vec<String> {
        self.script.lock().unwrap().suggestion_calls.clone()
    }

    pub fn plan_calls(&self) -> Vec<GoalPlanRequest> {
        self.script.lock().unwrap().plan_calls.clone()
    }
}

#[async_trait]
impl GoalAssistantTrait for ScriptedAssistant {
    async fn validate_goal(&self, goal_text: &str) -> Result<RemoteValidation> {
        let (delay, result) = {
            let mut script = self.script.lock().unwrap();
            script.validation_calls.push(goal_text.to_string());
            let result = script.validations.pop_front().unwrap_or_else(|| {
                Ok(RemoteValidation {
                    is_valid: true,
                    confidence: Some(0.9),
                    feedback: None,
                    improved_goal: None,
                })
            });
            (script.validation_delay, result)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn suggest_targets(
        &self,
        goal_name: &str,
        _goal_description: Option<&str>,
    ) -> TargetSuggestions {
        let mut script = self.script.lock().unwrap();
        script.suggestion_calls.push(goal_name.to_string());
        script
            .suggestions
            .pop_front()
            .unwrap_or_else(|| TargetSuggestions::suggested(Vec::new()))
    }

    async fn generate_plan(&self, request: &GoalPlanRequest) -> Result<AiPlan> {
        let mut script = self.script.lock().unwrap();
        script.plan_calls.push(request.clone());
        script
            .plans
            .pop_front()
            .unwrap_or_else(|| Err(Error::Ai("no plan scripted".to_string())))
    }
}
