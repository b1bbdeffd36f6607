//! Local goal input validation.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::verbs::contains_action_verb;
use crate::constants::MIN_GOAL_INPUT_LENGTH;

pub const TOO_SHORT_MESSAGE: &str = "Too short! Add more detail";
pub const NOT_A_GOAL_MESSAGE: &str = "Please enter a real goal";
pub const MISSING_VERB_MESSAGE: &str = "Try: Learn, Build, Run, or Create";

lazy_static! {
    static ref INJECTION_REGEX: Regex =
        Regex::new(r"(?i)<script|javascript:|eval\(|function\(").expect("Invalid regex pattern");
    static ref PLACEHOLDER_REGEX: Regex =
        Regex::new(r"(?i)^(test|asdf|qwerty|123|xxx)").expect("Invalid regex pattern");
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoalInputValidation {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GoalInputValidation {
    fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    fn invalid(message: &str) -> Self {
        Self {
            is_valid: false,
            message: Some(message.to_string()),
        }
    }
}

fn looks_like_noise(text: &str) -> bool {
    let no_letters = !text.chars().any(|c| c.is_ascii_alphabetic());
    let only_symbols = text
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || !(c.is_ascii_alphanumeric() || c == '_'));

    no_letters || only_symbols || INJECTION_REGEX.is_match(text) || PLACEHOLDER_REGEX.is_match(text)
}

/// Checks free-text goal input. Rules run in order and the first failure wins.
pub fn validate_goal_input(input: &str) -> GoalInputValidation {
    let trimmed = input.trim();

    if trimmed.chars().count() < MIN_GOAL_INPUT_LENGTH {
        return GoalInputValidation::invalid(TOO_SHORT_MESSAGE);
    }

    if looks_like_noise(trimmed) {
        return GoalInputValidation::invalid(NOT_A_GOAL_MESSAGE);
    }

    if !contains_action_verb(trimmed) {
        return GoalInputValidation::invalid(MISSING_VERB_MESSAGE);
    }

    GoalInputValidation::valid()
}
