use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use mismetas_ai::{ProviderCredentials, ProviderKind};

const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-haiku-20240307";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Which provider backs each assistant job, and the credentials to reach them.
#[derive(Clone, Debug)]
pub struct AiConfig {
    pub validation_provider: ProviderKind,
    pub planning_provider: ProviderKind,
    pub credentials: ProviderCredentials,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            validation_provider: ProviderKind::Anthropic,
            planning_provider: ProviderKind::Gemini,
            credentials: ProviderCredentials {
                anthropic_api_key: None,
                google_api_key: None,
                anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
                gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Base64-encoded 32-byte HS256 secret. Generated at startup when absent.
    pub secret_key: Option<String>,
    pub access_token_ttl: Duration,
    pub ai: AiConfig,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("MM_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid MM_LISTEN_ADDR")?;
        let db_path = env_or("MM_DB_PATH", "./db/app.db");
        let cors_allow = env_or("MM_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("MM_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let token_ttl_secs: u64 = env_or("MM_ACCESS_TOKEN_TTL_SECS", "86400")
            .parse()
            .unwrap_or(86400);

        let ai = AiConfig {
            validation_provider: env_or("MM_AI_VALIDATION_PROVIDER", "anthropic")
                .parse()
                .context("Invalid MM_AI_VALIDATION_PROVIDER")?,
            planning_provider: env_or("MM_AI_PLANNING_PROVIDER", "gemini")
                .parse()
                .context("Invalid MM_AI_PLANNING_PROVIDER")?,
            credentials: ProviderCredentials {
                anthropic_api_key: env_opt("ANTHROPIC_API_KEY"),
                google_api_key: env_opt("GOOGLE_API_KEY"),
                anthropic_model: env_or("MM_ANTHROPIC_MODEL", DEFAULT_ANTHROPIC_MODEL),
                gemini_model: env_or("MM_GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            },
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            secret_key: env_opt("MM_SECRET_KEY"),
            access_token_ttl: Duration::from_secs(token_ttl_secs),
            ai,
        })
    }

    /// Local defaults with the database at `db_path`.
    pub fn local(db_path: impl Into<String>) -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            db_path: db_path.into(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_secs(30),
            secret_key: None,
            access_token_ttl: Duration::from_secs(86400),
            ai: AiConfig::default(),
        }
    }
}
