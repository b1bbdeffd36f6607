//! Wizard states, draft and errors.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_TARGET_VALUE, VALIDATION_DEBOUNCE_MS};
use crate::errors::FieldErrors;
use crate::goals::GoalDuration;

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    /// Step 1: describe the goal.
    Goal,
    /// Step 2: pick a quantitative target.
    Target,
    /// Step 3: pick a timeframe.
    Timeline,
    GeneratingPlan,
    /// Reviewing generated tasks before saving.
    Confirmation,
    Submitting,
    Completed,
    Cancelled,
}

impl WizardStep {
    /// Whether the session can still be cancelled.
    pub fn is_cancellable(&self) -> bool {
        !matches!(
            self,
            WizardStep::Submitting | WizardStep::Completed | WizardStep::Cancelled
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ValidationStatus {
    #[default]
    Idle,
    Validating,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidationState {
    pub status: ValidationStatus,
    pub message: Option<String>,
}

impl ValidationState {
    pub fn new(status: ValidationStatus, message: Option<String>) -> Self {
        Self { status, message }
    }
}

/// Unsaved goal data held by one wizard session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub title: String,
    pub description: Option<String>,
    pub duration: GoalDuration,
    pub target_value: i32,
}

impl GoalDraft {
    pub fn new(default_target: i32) -> Self {
        Self {
            title: String::new(),
            description: None,
            duration: GoalDuration::today(),
            target_value: default_target,
        }
    }
}

impl Default for GoalDraft {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_VALUE)
    }
}

/// Wizard tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardConfig {
    /// Idle time after the last keystroke before remote validation fires.
    pub debounce: Duration,
    /// Target used when no suggestion is selected.
    pub default_target: i32,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(VALIDATION_DEBOUNCE_MS),
            default_target: DEFAULT_TARGET_VALUE,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("Cannot {action} while in the {step:?} step")]
    InvalidTransition {
        step: WizardStep,
        action: &'static str,
    },

    #[error("Invalid goal: {0}")]
    InvalidGoal(String),

    #[error("Target must be a positive whole number")]
    InvalidTarget,

    #[error("No target option at index {0}")]
    UnknownOption(usize),

    #[error("No timeframe preset at index {0}")]
    UnknownPreset(usize),

    #[error("No task at index {0}")]
    UnknownTask(usize),

    #[error("Select at least one task")]
    NoTaskSelected,

    #[error("Invalid timeframe: {0}")]
    Timeframe(String),

    #[error("Could not generate plan: {0}")]
    PlanFailed(String),

    #[error("Goal was not saved: {0}")]
    Submission(FieldErrors),
}

pub type WizardResult<T> = std::result::Result<T, WizardError>;
