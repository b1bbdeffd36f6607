use std::sync::Arc;

use crate::{
    auth::TokenResponse,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use mismetas_core::users::{Credentials, SessionUser, SignUp};
use mismetas_core::Error as CoreError;

async fn register(
    State(state): State<Arc<AppState>>,
    Json(sign_up): Json<SignUp>,
) -> ApiResult<(StatusCode, Json<SessionUser>)> {
    let user = state.user_service.register(sign_up).await?;
    Ok((StatusCode::CREATED, Json(SessionUser::from(&user))))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state
        .user_service
        .authenticate(&credentials)
        .map_err(|e| match e {
            CoreError::Unauthenticated => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            other => ApiError::Core(other),
        })?;
    let tokens = state.auth.token_response(SessionUser::from(&user))?;
    Ok(Json(tokens))
}

async fn session(Extension(session): Extension<SessionUser>) -> Json<SessionUser> {
    Json(session)
}

/// Routes reachable without a token.
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/session", get(session))
}
