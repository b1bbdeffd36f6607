use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use mismetas_core::goals::{Goal, GoalUpdate, GoalWithTasks, NewGoal, Task};
use mismetas_core::users::SessionUser;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressBody {
    progress: i32,
}

async fn get_goals(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.get_goals(&session.user_id)?;
    Ok(Json(goals))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    Json(goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<GoalWithTasks>)> {
    let created = state
        .goal_service
        .create_goal(&session.user_id, goal)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<GoalWithTasks>> {
    let goal = state.goal_service.get_goal(&session.user_id, &id)?;
    Ok(Json(goal))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    Json(update): Json<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    let goal = state
        .goal_service
        .update_goal(&session.user_id, &id, update)
        .await?;
    Ok(Json(goal))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&session.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_progress(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    Json(body): Json<ProgressBody>,
) -> ApiResult<Json<Goal>> {
    let goal = state
        .goal_service
        .update_goal_progress(&session.user_id, &id, body.progress)
        .await?;
    Ok(Json(goal))
}

async fn toggle_task(
    Path((id, task_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Task>> {
    let task = state
        .goal_service
        .toggle_task(&session.user_id, &id, &task_id)
        .await?;
    Ok(Json(task))
}

async fn accept_task(
    Path((id, task_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Task>> {
    let task = state
        .goal_service
        .accept_task(&session.user_id, &id, &task_id)
        .await?;
    Ok(Json(task))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/progress", put(update_progress))
        .route("/goals/{id}/tasks/{task_id}/toggle", put(toggle_task))
        .route("/goals/{id}/tasks/{task_id}/accept", put(accept_task))
}
