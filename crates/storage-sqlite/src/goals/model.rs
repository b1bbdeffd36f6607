//! Database models for goals and tasks.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use mismetas_core::goals::{Goal, GoalStatus, Task, TaskStatus};

use crate::errors::StorageError;

/// Database model for goals
#[derive(Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub target: i32,
    pub progress: i32,
    pub target_date: Option<NaiveDateTime>,
    pub is_habit: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new goal
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
pub struct NewGoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub target: i32,
    pub progress: i32,
    pub target_date: Option<NaiveDateTime>,
    pub is_habit: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for tasks
#[derive(
    Queryable, Identifiable, Associations, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(GoalDB, foreign_key = goal_id))]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskDB {
    pub id: String,
    pub goal_id: String,
    pub title: String,
    pub completed: bool,
    pub status: String,
    pub position: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTaskDB {
    pub id: String,
    pub goal_id: String,
    pub title: String,
    pub completed: bool,
    pub status: String,
    pub position: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl TryFrom<GoalDB> for Goal {
    type Error = StorageError;

    fn try_from(db: GoalDB) -> Result<Self, Self::Error> {
        let status = GoalStatus::from_str(&db.status)
            .map_err(|e| StorageError::CorruptRow(format!("goal {}: {}", db.id, e)))?;
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            description: db.description,
            target: db.target,
            progress: db.progress,
            target_date: db.target_date,
            is_habit: db.is_habit,
            status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl TryFrom<TaskDB> for Task {
    type Error = StorageError;

    fn try_from(db: TaskDB) -> Result<Self, Self::Error> {
        let status = TaskStatus::from_str(&db.status)
            .map_err(|e| StorageError::CorruptRow(format!("task {}: {}", db.id, e)))?;
        Ok(Self {
            id: db.id,
            goal_id: db.goal_id,
            title: db.title,
            completed: db.completed,
            status,
            position: db.position,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            title: domain.title,
            description: domain.description,
            target: domain.target,
            progress: domain.progress,
            target_date: domain.target_date,
            is_habit: domain.is_habit,
            status: domain.status.as_str().to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl From<Task> for TaskDB {
    fn from(domain: Task) -> Self {
        Self {
            id: domain.id,
            goal_id: domain.goal_id,
            title: domain.title,
            completed: domain.completed,
            status: domain.status.as_str().to_string(),
            position: domain.position,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
