use mismetas_core::goals::{
    Goal, GoalRecord, GoalRepositoryTrait, GoalStatus, GoalWithTasks, Task,
};
use mismetas_core::{Error, Result};

use super::model::{GoalDB, NewGoalDB, NewTaskDB, TaskDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{goals, tasks};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;

use std::sync::Arc;
use uuid::Uuid;

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn to_goals(rows: Vec<GoalDB>) -> Result<Vec<Goal>> {
    rows.into_iter()
        .map(|row| Goal::try_from(row).map_err(Error::from))
        .collect()
}

fn to_tasks(rows: Vec<TaskDB>) -> Result<Vec<Task>> {
    rows.into_iter()
        .map(|row| Task::try_from(row).map_err(Error::from))
        .collect()
}

fn tasks_for_goal(conn: &mut SqliteConnection, goal_id: &str) -> Result<Vec<Task>> {
    let rows = tasks::table
        .filter(tasks::goal_id.eq(goal_id))
        .order((tasks::position.asc(), tasks::created_at.asc()))
        .select(TaskDB::as_select())
        .load::<TaskDB>(conn)
        .map_err(StorageError::from)?;
    to_tasks(rows)
}

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals_for_user(&self, user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq(user_id))
            .order((goals::updated_at.desc(), goals::created_at.desc()))
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_goals(rows)
    }

    fn find_goal(&self, user_id: &str, goal_id: &str) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let row = goals::table
            .filter(goals::id.eq(goal_id))
            .filter(goals::user_id.eq(user_id))
            .select(GoalDB::as_select())
            .first::<GoalDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(|r| Goal::try_from(r).map_err(Error::from))
            .transpose()
    }

    fn load_tasks(&self, goal_id: &str) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        tasks_for_goal(&mut conn, goal_id)
    }

    async fn insert_goal_with_tasks(&self, record: GoalRecord) -> Result<GoalWithTasks> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<GoalWithTasks> {
                let timestamp = now();
                let goal_id = Uuid::new_v4().to_string();
                let new_goal = NewGoalDB {
                    id: goal_id.clone(),
                    user_id: record.user_id,
                    title: record.title,
                    description: record.description,
                    target: record.target,
                    progress: 0,
                    target_date: record.target_date,
                    is_habit: record.is_habit,
                    status: GoalStatus::InProgress.as_str().to_string(),
                    created_at: timestamp,
                    updated_at: timestamp,
                };

                let goal_row = diesel::insert_into(goals::table)
                    .values(&new_goal)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                let new_tasks: Vec<NewTaskDB> = record
                    .tasks
                    .into_iter()
                    .enumerate()
                    .map(|(position, task)| NewTaskDB {
                        id: Uuid::new_v4().to_string(),
                        goal_id: goal_id.clone(),
                        title: task.title,
                        completed: false,
                        status: task.status.as_str().to_string(),
                        position: position as i32,
                        created_at: timestamp,
                        updated_at: timestamp,
                    })
                    .collect();
                diesel::insert_into(tasks::table)
                    .values(&new_tasks)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                debug!("Inserted goal {} with {} tasks", goal_id, new_tasks.len());

                Ok(GoalWithTasks {
                    goal: Goal::try_from(goal_row)?,
                    tasks: tasks_for_goal(conn, &goal_id)?,
                })
            })
            .await
    }

    async fn update_goal(&self, goal_update: Goal) -> Result<Goal> {
        let mut goal_db = GoalDB::from(goal_update);
        goal_db.updated_at = now();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let updated = diesel::update(
                    goals::table
                        .filter(goals::id.eq(&goal_db.id))
                        .filter(goals::user_id.eq(&goal_db.user_id)),
                )
                .set((
                    goals::title.eq(&goal_db.title),
                    goals::description.eq(&goal_db.description),
                    goals::target.eq(goal_db.target),
                    goals::progress.eq(goal_db.progress),
                    goals::status.eq(&goal_db.status),
                    goals::updated_at.eq(goal_db.updated_at),
                ))
                .returning(GoalDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?;

                match updated {
                    Some(row) => Ok(Goal::try_from(row)?),
                    None => Err(Error::not_found("Goal")),
                }
            })
            .await
    }

    async fn delete_goal(&self, user_id: String, goal_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    goals::table
                        .filter(goals::id.eq(goal_id))
                        .filter(goals::user_id.eq(user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn update_task(&self, task_update: Task) -> Result<Task> {
        let mut task_db = TaskDB::from(task_update);
        task_db.updated_at = now();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Task> {
                let updated = diesel::update(tasks::table.find(&task_db.id))
                    .set((
                        tasks::completed.eq(task_db.completed),
                        tasks::status.eq(&task_db.status),
                        tasks::updated_at.eq(task_db.updated_at),
                    ))
                    .returning(TaskDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?;

                match updated {
                    Some(row) => Ok(Task::try_from(row)?),
                    None => Err(Error::not_found("Task")),
                }
            })
            .await
    }
}
