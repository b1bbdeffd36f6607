use std::sync::Arc;

use crate::{
    auth::{decode_secret_key, generate_secret_key, Argon2PasswordHasher, AuthManager},
    config::Config,
};
use mismetas_ai::{build_oracle, GoalAssistant, OracleSettings};
use mismetas_core::{
    assistant::{GoalAssistantTrait, GoalValidationService},
    goals::{GoalService, GoalServiceTrait},
    users::{UserService, UserServiceTrait},
};
use mismetas_storage_sqlite::{
    db::{self, spawn_writer},
    GoalRepository, UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Validation asks for a short, deterministic verdict.
const VALIDATION_SETTINGS: OracleSettings = OracleSettings {
    max_tokens: 200,
    temperature: 0.0,
};

const PLANNING_SETTINGS: OracleSettings = OracleSettings {
    max_tokens: 1024,
    temperature: 0.7,
};

pub struct AppState {
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub assistant: Arc<dyn GoalAssistantTrait>,
    pub validation_service: GoalValidationService,
    pub auth: Arc<AuthManager>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("MM_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Builds the application state with the configured AI providers.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let credentials = &config.ai.credentials;
    let assistant: Arc<dyn GoalAssistantTrait> = Arc::new(GoalAssistant::new(
        build_oracle(config.ai.validation_provider, credentials, VALIDATION_SETTINGS),
        build_oracle(config.ai.planning_provider, credentials, PLANNING_SETTINGS),
    ));
    tracing::info!(
        "AI providers: validation={}, planning={}",
        config.ai.validation_provider,
        config.ai.planning_provider
    );
    build_state_with_assistant(config, assistant).await
}

/// Builds the application state around an already constructed assistant.
pub async fn build_state_with_assistant(
    config: &Config,
    assistant: Arc<dyn GoalAssistantTrait>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let goal_service: Arc<dyn GoalServiceTrait> = Arc::new(GoalService::new(goal_repository));

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer));
    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(
        user_repository,
        Arc::new(Argon2PasswordHasher),
    ));

    let jwt_secret = match config.secret_key.as_deref() {
        Some(raw) => decode_secret_key(raw)?,
        None => {
            tracing::warn!("MM_SECRET_KEY is not set; sessions will not survive a restart");
            generate_secret_key()
        }
    };
    let auth = Arc::new(AuthManager::new(&jwt_secret, config.access_token_ttl));

    Ok(Arc::new(AppState {
        goal_service,
        user_service,
        validation_service: GoalValidationService::new(assistant.clone()),
        assistant,
        auth,
        db_path,
    }))
}
