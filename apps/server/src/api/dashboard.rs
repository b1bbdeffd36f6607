use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Extension, Json, Router};
use mismetas_core::goals::DashboardSummary;
use mismetas_core::users::SessionUser;

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<DashboardSummary>> {
    let summary = state.goal_service.get_dashboard_summary(&session.user_id)?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard/summary", get(get_summary))
}
