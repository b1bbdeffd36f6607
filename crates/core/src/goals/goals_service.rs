use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::goals_model::{
    DashboardSummary, Goal, GoalRecord, GoalStatus, GoalUpdate, GoalWithTasks, NewGoal, Task,
    TaskStatus,
};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::constants::MAX_GOAL_TITLE_LENGTH;
use crate::errors::{Error, FieldErrors, Result};

const GOAL: &str = "Goal";
const TASK: &str = "Task";

fn validate_title(title: &str, errors: &mut FieldErrors) {
    let title = title.trim();
    if title.is_empty() {
        errors.add("title", "Title is required");
    } else if title.chars().count() > MAX_GOAL_TITLE_LENGTH {
        errors.add("title", "Title is too long");
    }
}

fn validate_target(target: i32, errors: &mut FieldErrors) {
    if target <= 0 {
        errors.add("target", "Target must be a positive whole number");
    }
}

/// Checks a goal creation request, returning all field errors at once.
pub fn validate_new_goal(new_goal: &NewGoal) -> Result<()> {
    let mut errors = FieldErrors::new();
    validate_title(&new_goal.title, &mut errors);
    validate_target(new_goal.target, &mut errors);

    if new_goal.tasks.is_empty() {
        errors.add("tasks", "At least one task is required");
    } else if new_goal.tasks.iter().any(|t| t.title.trim().is_empty()) {
        errors.add("tasks", "Task titles cannot be empty");
    }

    if new_goal.is_habit && new_goal.target_date.is_some() {
        errors.add("targetDate", "Habit goals cannot have a target date");
    }

    errors.into_result()
}

/// Checks an edit of goal details.
pub fn validate_goal_update(update: &GoalUpdate) -> Result<()> {
    let mut errors = FieldErrors::new();
    validate_title(&update.title, &mut errors);
    validate_target(update.target, &mut errors);
    errors.into_result()
}

fn ensure_user(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(Error::Unauthenticated);
    }
    Ok(())
}

/// Service for managing a user's goals and their tasks.
pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(goal_repo: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { goal_repo }
    }

    /// Loads a goal owned by `user_id`. Foreign goals look exactly like missing ones.
    fn owned_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        ensure_user(user_id)?;
        match self.goal_repo.find_goal(user_id, goal_id)? {
            Some(goal) if goal.user_id == user_id => Ok(goal),
            _ => Err(Error::not_found(GOAL)),
        }
    }

    fn owned_task(&self, user_id: &str, goal_id: &str, task_id: &str) -> Result<Task> {
        let goal = self.owned_goal(user_id, goal_id)?;
        self.goal_repo
            .load_tasks(&goal.id)?
            .into_iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| Error::not_found(TASK))
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        ensure_user(user_id)?;
        self.goal_repo.load_goals_for_user(user_id)
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalWithTasks> {
        let goal = self.owned_goal(user_id, goal_id)?;
        let tasks = self.goal_repo.load_tasks(&goal.id)?;
        Ok(GoalWithTasks { goal, tasks })
    }

    fn get_dashboard_summary(&self, user_id: &str) -> Result<DashboardSummary> {
        let goals = self.get_goals(user_id)?;
        Ok(DashboardSummary::from_goals(&goals))
    }

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<GoalWithTasks> {
        ensure_user(user_id)?;
        validate_new_goal(&new_goal)?;

        let record = GoalRecord {
            user_id: user_id.to_string(),
            title: new_goal.title.trim().to_string(),
            description: new_goal
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            target: new_goal.target,
            target_date: new_goal.target_date,
            is_habit: new_goal.is_habit,
            tasks: new_goal
                .tasks
                .into_iter()
                .map(|mut t| {
                    t.title = t.title.trim().to_string();
                    t
                })
                .collect(),
        };
        let created = self.goal_repo.insert_goal_with_tasks(record).await?;
        info!(
            "Created goal {} with {} tasks for user {}",
            created.goal.id,
            created.tasks.len(),
            user_id
        );
        Ok(created)
    }

    async fn update_goal(&self, user_id: &str, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
        validate_goal_update(&update)?;
        let mut goal = self.owned_goal(user_id, goal_id)?;

        goal.title = update.title.trim().to_string();
        goal.description = update
            .description
            .map(|d| d.trim().to_string())
            .unwrap_or_default();
        goal.target = update.target;
        goal.progress = goal.progress.clamp(0, goal.target);
        goal.status = GoalStatus::for_progress(goal.progress, goal.target);

        self.goal_repo.update_goal(goal).await
    }

    async fn update_goal_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        progress: i32,
    ) -> Result<Goal> {
        let mut goal = self.owned_goal(user_id, goal_id)?;
        goal.progress = progress.clamp(0, goal.target);
        goal.status = GoalStatus::for_progress(goal.progress, goal.target);
        debug!(
            "Goal {} progress set to {}/{}",
            goal.id, goal.progress, goal.target
        );
        self.goal_repo.update_goal(goal).await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        let goal = self.owned_goal(user_id, goal_id)?;
        let deleted = self
            .goal_repo
            .delete_goal(user_id.to_string(), goal.id)
            .await?;
        if deleted == 0 {
            return Err(Error::not_found(GOAL));
        }
        Ok(())
    }

    async fn toggle_task(&self, user_id: &str, goal_id: &str, task_id: &str) -> Result<Task> {
        let mut task = self.owned_task(user_id, goal_id, task_id)?;
        task.completed = !task.completed;
        self.goal_repo.update_task(task).await
    }

    async fn accept_task(&self, user_id: &str, goal_id: &str, task_id: &str) -> Result<Task> {
        let mut task = self.owned_task(user_id, goal_id, task_id)?;
        if task.status == TaskStatus::Accepted {
            return Ok(task);
        }
        task.status = TaskStatus::Accepted;
        self.goal_repo.update_task(task).await
    }
}
