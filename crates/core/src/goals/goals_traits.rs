use crate::errors::Result;
use crate::goals::goals_model::{
    DashboardSummary, Goal, GoalRecord, GoalUpdate, GoalWithTasks, NewGoal, Task,
};
use async_trait::async_trait;

/// Trait for goal repository operations
///
/// Every lookup is scoped by the owning user's id.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn load_goals_for_user(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn find_goal(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>>;
    fn load_tasks(&self, goal_id: &str) -> Result<Vec<Task>>;
    async fn insert_goal_with_tasks(&self, record: GoalRecord) -> Result<GoalWithTasks>;
    async fn update_goal(&self, goal_update: Goal) -> Result<Goal>;
    async fn delete_goal(&self, user_id: String, goal_id: String) -> Result<usize>;
    async fn update_task(&self, task_update: Task) -> Result<Task>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalWithTasks>;
    fn get_dashboard_summary(&self, user_id: &str) -> Result<DashboardSummary>;
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<GoalWithTasks>;
    async fn update_goal(&self, user_id: &str, goal_id: &str, update: GoalUpdate) -> Result<Goal>;
    async fn update_goal_progress(&self, user_id: &str, goal_id: &str, progress: i32)
        -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;
    async fn toggle_task(&self, user_id: &str, goal_id: &str, task_id: &str) -> Result<Task>;
    async fn accept_task(&self, user_id: &str, goal_id: &str, task_id: &str) -> Result<Task>;
}
