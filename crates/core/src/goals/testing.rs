//! In-memory goal repository shared by service and wizard tests.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use super::goals_model::{Goal, GoalRecord, GoalStatus, GoalWithTasks, Task};
use super::goals_traits::GoalRepositoryTrait;
use crate::errors::{Error, Result};

pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[derive(Default)]
pub struct InMemoryGoalRepository {
    pub goals: RwLock<Vec<Goal>>,
    pub tasks: RwLock<Vec<Task>>,
    pub fail_inserts: bool,
}

impl InMemoryGoalRepository {
    pub fn failing() -> Self {
        Self {
            fail_inserts: true,
            ..Default::default()
        }
    }

    pub fn seed_goal(&self, id: &str, user_id: &str, target: i32, progress: i32) -> Goal {
        let goal = Goal {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: format!("Goal {}", id),
            description: String::new(),
            target,
            progress,
            target_date: None,
            is_habit: false,
            status: GoalStatus::for_progress(progress, target),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        };
        self.goals.write().unwrap().push(goal.clone());
        goal
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryGoalRepository {
    fn load_goals_for_user(&self, user_id: &str) -> Result<Vec<Goal>> {
        Ok(self
            .goals
            .read()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    fn find_goal(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>> {
        Ok(self
            .goals
            .read()
            .unwrap()
            .iter()
            .find(|g| g.id == goal_id && g.user_id == user_id)
            .cloned())
    }

    fn load_tasks(&self, goal_id: &str) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.goal_id == goal_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.position);
        Ok(tasks)
    }

    async fn insert_goal_with_tasks(&self, record: GoalRecord) -> Result<GoalWithTasks> {
        if self.fail_inserts {
            return Err(Error::Unexpected("database unavailable".to_string()));
        }
        let goal_id = format!("goal-{}", self.goals.read().unwrap().len() + 1);
        let goal = Goal {
            id: goal_id.clone(),
            user_id: record.user_id,
            title: record.title,
            description: record.description,
            target: record.target,
            progress: 0,
            target_date: record.target_date,
            is_habit: record.is_habit,
            status: GoalStatus::InProgress,
            created_at: fixed_now(),
            updated_at: fixed_now(),
        };
        let tasks: Vec<Task> = record
            .tasks
            .into_iter()
            .enumerate()
            .map(|(i, t)| Task {
                id: format!("{}-task-{}", goal_id, i),
                goal_id: goal_id.clone(),
                title: t.title,
                completed: false,
                status: t.status,
                position: i as i32,
                created_at: fixed_now(),
                updated_at: fixed_now(),
            })
            .collect();
        self.goals.write().unwrap().push(goal.clone());
        self.tasks.write().unwrap().extend(tasks.clone());
        Ok(GoalWithTasks { goal, tasks })
    }

    async fn update_goal(&self, goal_update: Goal) -> Result<Goal> {
        let mut goals = self.goals.write().unwrap();
        let slot = goals
            .iter_mut()
            .find(|g| g.id == goal_update.id)
            .ok_or_else(|| Error::not_found("Goal"))?;
        *slot = goal_update.clone();
        Ok(goal_update)
    }

    async fn delete_goal(&self, user_id: String, goal_id: String) -> Result<usize> {
        let mut goals = self.goals.write().unwrap();
        let before = goals.len();
        goals.retain(|g| !(g.id == goal_id && g.user_id == user_id));
        let deleted = before - goals.len();
        if deleted > 0 {
            self.tasks.write().unwrap().retain(|t| t.goal_id != goal_id);
        }
        Ok(deleted)
    }

    async fn update_task(&self, task_update: Task) -> Result<Task> {
        let mut tasks = self.tasks.write().unwrap();
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task_update.id)
            .ok_or_else(|| Error::not_found("Task"))?;
        *slot = task_update.clone();
        Ok(task_update)
    }
}
