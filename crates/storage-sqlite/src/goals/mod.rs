//! SQLite storage implementation for goals and their tasks.

mod model;
mod repository;

pub use model::{GoalDB, NewGoalDB, NewTaskDB, TaskDB};
pub use repository::GoalRepository;
