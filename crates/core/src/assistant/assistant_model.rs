//! Results exchanged with the goal assistant.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Verdict of a remote goal validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteValidation {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improved_goal: Option<String>,
}

/// A quantitative target the user can pick in the second wizard step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetOption {
    pub value: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TargetOption {
    /// The option's value as a goal target: rounded up, at least 1.
    pub fn target_value(&self) -> i32 {
        if !self.value.is_finite() {
            return 1;
        }
        (self.value.ceil() as i32).max(1)
    }
}

/// Why an option list looks the way it does.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionStatus {
    #[default]
    Suggested,
    /// The assistant answered but judged the goal too abstract for numbers.
    NotApplicable,
    /// The assistant could not be reached or answered garbage.
    Unavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TargetSuggestions {
    pub options: Vec<TargetOption>,
    #[serde(default)]
    pub status: SuggestionStatus,
}

impl TargetSuggestions {
    pub fn suggested(options: Vec<TargetOption>) -> Self {
        let status = if options.is_empty() {
            SuggestionStatus::NotApplicable
        } else {
            SuggestionStatus::Suggested
        };
        Self { options, status }
    }

    pub fn unavailable() -> Self {
        Self {
            options: Vec::new(),
            status: SuggestionStatus::Unavailable,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanTask {
    pub title: String,
}

/// Generated task plan with strategy tips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AiPlan {
    pub tasks: Vec<PlanTask>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlanRequest {
    pub goal_name: String,
    #[serde(default)]
    pub goal_description: Option<String>,
    pub target_value: i32,
    /// `None` means a habit with no end date.
    #[serde(default)]
    pub target_date: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_value_rounds_up() {
        let option = |value| TargetOption {
            value,
            label: "x".to_string(),
            description: None,
        };
        assert_eq!(option(12.0).target_value(), 12);
        assert_eq!(option(2.5).target_value(), 3);
        assert_eq!(option(0.2).target_value(), 1);
        assert_eq!(option(f64::NAN).target_value(), 1);
    }

    #[test]
    fn test_suggestion_status_from_options() {
        assert_eq!(
            TargetSuggestions::suggested(vec![]).status,
            SuggestionStatus::NotApplicable
        );
        assert_eq!(
            TargetSuggestions::unavailable().status,
            SuggestionStatus::Unavailable
        );
    }

    #[test]
    fn test_suggestions_wire_shape() {
        let json = serde_json::to_value(TargetSuggestions::unavailable()).unwrap();
        assert_eq!(json["options"], serde_json::json!([]));
        assert_eq!(json["status"], "unavailable");

        let parsed: TargetSuggestions =
            serde_json::from_str(r#"{"options":[{"value":10,"label":"10 books"}]}"#).unwrap();
        assert_eq!(parsed.status, SuggestionStatus::Suggested);
        assert_eq!(parsed.options[0].target_value(), 10);
    }
}
