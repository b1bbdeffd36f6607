//! Goals domain models.

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Lifecycle status of a goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    #[default]
    InProgress,
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::InProgress => "IN_PROGRESS",
            GoalStatus::Completed => "COMPLETED",
        }
    }

    /// Status implied by a progress value against its target.
    pub fn for_progress(progress: i32, target: i32) -> Self {
        if progress >= target {
            GoalStatus::Completed
        } else {
            GoalStatus::InProgress
        }
    }
}

impl FromStr for GoalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(GoalStatus::InProgress),
            "COMPLETED" => Ok(GoalStatus::Completed),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown goal status '{}'",
                other
            )))),
        }
    }
}

/// Whether the user kept a task when creating the goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Suggested,
    Accepted,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Suggested => "SUGGESTED",
            TaskStatus::Accepted => "ACCEPTED",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUGGESTED" => Ok(TaskStatus::Suggested),
            "ACCEPTED" => Ok(TaskStatus::Accepted),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown task status '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub target: i32,
    pub progress: i32,
    pub target_date: Option<NaiveDateTime>,
    pub is_habit: bool,
    pub status: GoalStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    /// Completion percentage, 0..=100.
    pub fn completion_percent(&self) -> f64 {
        if self.target <= 0 {
            return 0.0;
        }
        (self.progress as f64 / self.target as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Domain model representing a task attached to a goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub goal_id: String,
    pub title: String,
    pub completed: bool,
    pub status: TaskStatus,
    pub position: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A goal together with its tasks in plan order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalWithTasks {
    #[serde(flatten)]
    pub goal: Goal,
    pub tasks: Vec<Task>,
}

/// Task input for goal creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub status: TaskStatus,
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target: i32,
    #[serde(default)]
    pub target_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_habit: bool,
    pub tasks: Vec<NewTask>,
}

/// Input model for editing goal details
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target: i32,
}

/// Goal row as handed to the repository, after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalRecord {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub target: i32,
    pub target_date: Option<NaiveDateTime>,
    pub is_habit: bool,
    pub tasks: Vec<NewTask>,
}

/// Aggregate numbers shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub active_goals: usize,
    pub completed_goals: usize,
    /// Average completion across all goals, rounded to a whole percent.
    pub overall_progress: u32,
}

impl DashboardSummary {
    pub fn from_goals(goals: &[Goal]) -> Self {
        let completed_goals = goals
            .iter()
            .filter(|g| g.progress >= g.target)
            .count();
        let overall_progress = if goals.is_empty() {
            0
        } else {
            let total: f64 = goals.iter().map(Goal::completion_percent).sum();
            (total / goals.len() as f64).round() as u32
        };
        Self {
            active_goals: goals.len() - completed_goals,
            completed_goals,
            overall_progress,
        }
    }
}
