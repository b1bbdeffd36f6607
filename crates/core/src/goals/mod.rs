//! Goals module - domain models, services, and traits.

mod duration;
mod goals_model;
mod goals_service;
mod goals_traits;

#[cfg(test)]
pub(crate) mod testing;

pub use duration::{
    resolve_target_date, DurationUnit, GoalDuration, ResolvedTimeframe, TimeframePreset,
    TIMEFRAME_PRESETS,
};
pub use goals_model::{
    DashboardSummary, Goal, GoalRecord, GoalStatus, GoalUpdate, GoalWithTasks, NewGoal, NewTask,
    Task, TaskStatus,
};
pub use goals_service::{validate_goal_update, validate_new_goal, GoalService};
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
