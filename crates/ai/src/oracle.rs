//! Text-completion oracles.
//!
//! A [`CompletionOracle`] takes a prompt and returns free text. Two providers
//! are supported through rig-core (Anthropic and Google Gemini); which one
//! backs each job is chosen by configuration.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use rig::{
    client::CompletionClient,
    completion::Prompt,
    providers::{anthropic, gemini},
};

use crate::error::AiError;

/// Capability interface over an LLM: prompt in, text out.
#[async_trait]
pub trait CompletionOracle: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}

// ============================================================================
// Provider selection
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            other => Err(AiError::UnknownProvider(other.to_string())),
        }
    }
}

/// Generation parameters for one kind of request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OracleSettings {
    pub max_tokens: u64,
    pub temperature: f64,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.7,
        }
    }
}

/// Credentials and models for the supported providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub anthropic_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub anthropic_model: String,
    pub gemini_model: String,
}

/// Builds the oracle for `kind`.
///
/// A missing API key is not an error here; the oracle reports it on each call
/// so callers can fall back.
pub fn build_oracle(
    kind: ProviderKind,
    credentials: &ProviderCredentials,
    settings: OracleSettings,
) -> Arc<dyn CompletionOracle> {
    match kind {
        ProviderKind::Anthropic => Arc::new(AnthropicOracle {
            api_key: credentials.anthropic_api_key.clone(),
            model: credentials.anthropic_model.clone(),
            settings,
        }),
        ProviderKind::Gemini => Arc::new(GeminiOracle {
            api_key: credentials.google_api_key.clone(),
            model: credentials.gemini_model.clone(),
            settings,
        }),
    }
}

fn require_key(key: &Option<String>, provider: ProviderKind) -> Result<&str, AiError> {
    key.as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| AiError::MissingApiKey(provider.to_string()))
}

// ============================================================================
// Providers
// ============================================================================

pub struct AnthropicOracle {
    api_key: Option<String>,
    model: String,
    settings: OracleSettings,
}

#[async_trait]
impl CompletionOracle for AnthropicOracle {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let key = require_key(&self.api_key, ProviderKind::Anthropic)?;
        debug!("Prompting anthropic model {}", self.model);
        let client: anthropic::Client<HttpClient> =
            anthropic::Client::new(key).map_err(|e| AiError::Provider(e.to_string()))?;
        client
            .agent(&self.model)
            .max_tokens(self.settings.max_tokens)
            .temperature(self.settings.temperature)
            .build()
            .prompt(prompt)
            .await
            .map_err(|e| AiError::Provider(e.to_string()))
    }
}

pub struct GeminiOracle {
    api_key: Option<String>,
    model: String,
    settings: OracleSettings,
}

#[async_trait]
impl CompletionOracle for GeminiOracle {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let key = require_key(&self.api_key, ProviderKind::Gemini)?;
        debug!("Prompting gemini model {}", self.model);
        let client: gemini::Client<HttpClient> =
            gemini::Client::new(key).map_err(|e| AiError::Provider(e.to_string()))?;
        client
            .agent(&self.model)
            .max_tokens(self.settings.max_tokens)
            .temperature(self.settings.temperature)
            .build()
            .prompt(prompt)
            .await
            .map_err(|e| AiError::Provider(e.to_string()))
    }
}

// ============================================================================
// Fake Provider for Testing
// ============================================================================

/// An oracle that replays scripted responses and records prompts.
///
/// Once the script runs out every call fails with a provider error.
#[derive(Clone, Default)]
pub struct FakeOracle {
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fake oracle that answers once with `text`.
    pub fn with_response(text: &str) -> Self {
        let oracle = Self::new();
        oracle.push_response(text);
        oracle
    }

    pub fn push_response(&self, text: &str) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(Ok(text.to_string()));
        }
    }

    pub fn push_failure(&self, message: &str) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(Err(message.to_string()));
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CompletionOracle for FakeOracle {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let next = self
            .responses
            .lock()
            .map_err(|e| AiError::Internal(e.to_string()))?
            .pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(AiError::Provider(message)),
            None => Err(AiError::Provider("no scripted response".to_string())),
        }
    }
}
