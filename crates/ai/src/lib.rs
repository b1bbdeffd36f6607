//! MisMetas AI - goal assistance over text-completion providers.
//!
//! # Architecture
//!
//! - `oracle`: the `CompletionOracle` capability, its Anthropic and Gemini
//!   implementations (rig-core) and a scripted fake
//! - `assistant`: goal validation, target suggestions and plan generation
//! - `json`: extraction of the JSON object embedded in model output
//! - `prompts`: prompt templates
//! - `error`: `AiError`

pub mod assistant;
pub mod error;
pub mod json;
pub mod oracle;
pub mod prompts;

pub use assistant::{GoalAssistant, MAX_TARGET_OPTIONS};
pub use error::AiError;
pub use json::{extract_json_object, parse_json_response};
pub use oracle::{
    build_oracle, AnthropicOracle, CompletionOracle, FakeOracle, GeminiOracle, OracleSettings,
    ProviderCredentials, ProviderKind,
};
