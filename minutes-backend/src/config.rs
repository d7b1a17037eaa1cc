use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Origin allowed by CORS. "*" allows any origin.
    pub const CORS_ALLOWED_ORIGIN: &str = "CORS_ALLOWED_ORIGIN";
    /// API key for the summarization endpoint. Unset disables AI summaries.
    pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
    /// Base URL of the OpenAI-compatible chat completions API
    pub const GROQ_API_URL: &str = "GROQ_API_URL";
    pub const GROQ_MODEL: &str = "GROQ_MODEL";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8000;
    pub const DATABASE_URL: &str = "./.db/minutes.db";
    pub const CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";
    pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1";
    pub const GROQ_MODEL: &str = "llama-3.3-70b-versatile";
    /// Characters of meeting content sent to the model
    pub const SUMMARY_INPUT_CHARS: usize = 2000;
    pub const SUMMARY_MAX_TOKENS: u32 = 500;
    pub const SUMMARY_TEMPERATURE: f32 = 0.3;
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub cors_allowed_origin: String,
    pub summarizer: SummarizerConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let port = match env::var(env_vars::PORT) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("PORT '{}' is not a valid number, using {}", raw, defaults::PORT);
                defaults::PORT
            }),
            Err(_) => defaults::PORT,
        };

        Self {
            port,
            database_url: env::var(env_vars::DATABASE_URL)
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            cors_allowed_origin: env::var(env_vars::CORS_ALLOWED_ORIGIN)
                .unwrap_or_else(|_| defaults::CORS_ALLOWED_ORIGIN.to_string()),
            summarizer: SummarizerConfig::from_env(),
        }
    }
}

/// Settings for the AI summarization endpoint
#[derive(Clone, Debug)]
pub struct SummarizerConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub input_chars: usize,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl SummarizerConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(env_vars::GROQ_API_KEY)
                .ok()
                .filter(|k| !k.trim().is_empty()),
            api_url: env::var(env_vars::GROQ_API_URL)
                .unwrap_or_else(|_| defaults::GROQ_API_URL.to_string()),
            model: env::var(env_vars::GROQ_MODEL)
                .unwrap_or_else(|_| defaults::GROQ_MODEL.to_string()),
            ..Self::default()
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: defaults::GROQ_API_URL.to_string(),
            model: defaults::GROQ_MODEL.to_string(),
            input_chars: defaults::SUMMARY_INPUT_CHARS,
            max_tokens: defaults::SUMMARY_MAX_TOKENS,
            temperature: defaults::SUMMARY_TEMPERATURE,
        }
    }
}
