//! Goal assistant behaviour against scripted oracle output.

use std::sync::Arc;

use chrono::NaiveDate;
use mismetas_ai::{FakeOracle, GoalAssistant};
use mismetas_core::assistant::{
    GoalAssistantTrait, GoalPlanRequest, GoalValidationService, SuggestionStatus,
};
use mismetas_core::Error;

fn assistant(validator: &FakeOracle, planner: &FakeOracle) -> GoalAssistant {
    GoalAssistant::new(Arc::new(validator.clone()), Arc::new(planner.clone()))
}

fn plan_request(target_date: Option<chrono::NaiveDateTime>) -> GoalPlanRequest {
    GoalPlanRequest {
        goal_name: "Read 12 books".to_string(),
        goal_description: None,
        target_value: 12,
        target_date,
    }
}

// ==================== validation ====================

#[tokio::test]
async fn validation_parses_json_wrapped_in_prose() {
    let validator = FakeOracle::with_response(
        "Here is my analysis:\n{\"isValid\": false, \"confidence\": 1.7, \"feedback\": \"Too vague\", \"improvedGoal\": \"\"}\nHope it helps!",
    );
    let planner = FakeOracle::new();

    let verdict = assistant(&validator, &planner)
        .validate_goal("get better")
        .await
        .unwrap();
    assert!(!verdict.is_valid);
    assert_eq!(verdict.confidence, Some(1.0));
    assert_eq!(verdict.feedback.as_deref(), Some("Too vague"));
    assert_eq!(verdict.improved_goal, None);
    assert!(validator.prompts()[0].contains("\"get better\""));
    assert!(planner.prompts().is_empty());
}

#[tokio::test]
async fn validation_rejects_missing_is_valid() {
    let validator = FakeOracle::with_response("{\"confidence\": 0.9}");
    let err = assistant(&validator, &FakeOracle::new())
        .validate_goal("learn to code")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Ai(_)));
}

#[tokio::test]
async fn validation_service_falls_back_on_garbage() {
    let validator = FakeOracle::with_response("I think this is a lovely goal!");
    let service = GoalValidationService::new(Arc::new(assistant(&validator, &FakeOracle::new())));

    let verdict = service.validate("learn to code").await;
    assert!(verdict.is_valid);
    assert_eq!(verdict.confidence, Some(1.0));
    assert_eq!(validator.prompts().len(), 1);
}

// ==================== target suggestions ====================

#[tokio::test]
async fn suggestions_drop_malformed_options() {
    let planner = FakeOracle::with_response(
        r#"{"options": [
            {"value": 6, "label": "6 books", "description": "One every two months"},
            {"value": -3, "label": "negative"},
            {"value": "ten", "label": "not a number"},
            {"value": 12, "label": "  "},
            {"value": 12, "label": "12 books"}
        ]}"#,
    );
    let suggestions = assistant(&FakeOracle::new(), &planner)
        .suggest_targets("Read more books", Some("Fiction and essays"))
        .await;

    assert_eq!(suggestions.status, SuggestionStatus::Suggested);
    let labels: Vec<&str> = suggestions.options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["6 books", "12 books"]);
    assert!(planner.prompts()[0].contains("Fiction and essays"));
}

#[tokio::test]
async fn suggestions_with_only_malformed_options_are_unavailable() {
    let response = r#"{"options":[{"value":"ten","label":"10 books"},{"label":"x"}]}"#;

    let planner = FakeOracle::with_response(response);
    let err = assistant(&FakeOracle::new(), &planner)
        .suggest_targets_remote("Read more books", None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_RESPONSE");

    let planner = FakeOracle::with_response(response);
    let suggestions = assistant(&FakeOracle::new(), &planner)
        .suggest_targets("Read more books", None)
        .await;
    assert_eq!(suggestions.status, SuggestionStatus::Unavailable);
    assert!(suggestions.options.is_empty());
}

#[tokio::test]
async fn empty_suggestions_are_not_applicable() {
    let planner = FakeOracle::with_response(r#"{"options": []}"#);
    let suggestions = assistant(&FakeOracle::new(), &planner)
        .suggest_targets("Be kinder", None)
        .await;
    assert_eq!(suggestions.status, SuggestionStatus::NotApplicable);
    assert!(suggestions.options.is_empty());
}

#[tokio::test]
async fn failed_suggestions_are_unavailable_not_errors() {
    for planner in [
        {
            let p = FakeOracle::new();
            p.push_failure("503 Service Unavailable");
            p
        },
        FakeOracle::with_response("no json at all"),
        FakeOracle::with_response(r#"{"choices": []}"#),
    ] {
        let suggestions = assistant(&FakeOracle::new(), &planner)
            .suggest_targets("Run a marathon", None)
            .await;
        assert_eq!(suggestions.status, SuggestionStatus::Unavailable);
        assert!(suggestions.options.is_empty());
    }
}

// ==================== plan generation ====================

#[tokio::test]
async fn plan_is_parsed_in_order() {
    let planner = FakeOracle::with_response(
        r#"```json
{"tasks": [{"title": "Pick the first book"}, {"title": " "}, {"title": "Read 10 pages a day"}],
 "suggestions": ["Keep a book by the bed"]}
```"#,
    );
    let date = NaiveDate::from_ymd_opt(2024, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 59);
    let plan = assistant(&FakeOracle::new(), &planner)
        .generate_plan(&plan_request(date))
        .await
        .unwrap();

    let titles: Vec<&str> = plan.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Pick the first book", "Read 10 pages a day"]);
    assert_eq!(plan.suggestions, vec!["Keep a book by the bed".to_string()]);
    assert!(planner.prompts()[0].contains("December 31, 2024"));
}

#[tokio::test]
async fn plan_without_suggestions_defaults_to_empty() {
    let planner = FakeOracle::with_response(r#"{"tasks": [{"title": "Meditate 2 minutes"}]}"#);
    let plan = assistant(&FakeOracle::new(), &planner)
        .generate_plan(&plan_request(None))
        .await
        .unwrap();
    assert!(plan.suggestions.is_empty());
    assert!(planner.prompts()[0].contains("habit-based goal"));
}

#[tokio::test]
async fn plan_failures_are_errors() {
    for response in [
        "Sorry, I can't help with that.",
        r#"{"suggestions": ["no tasks"]}"#,
        r#"{"tasks": "not an array"}"#,
        r#"{"tasks": []}"#,
    ] {
        let planner = FakeOracle::with_response(response);
        let err = assistant(&FakeOracle::new(), &planner)
            .generate_plan(&plan_request(None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Ai(_)), "{response}");
    }
}
