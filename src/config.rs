use std::env;
use std::fmt;

use clap::ValueEnum;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const OLLAMA_MODEL_VAR: &str = "OLLAMA_MODEL";
const OLLAMA_HOST_VAR: &str = "OLLAMA_HOST";
const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
const GEMINI_BASE_URL_VAR: &str = "GEMINI_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub ollama_model: Option<String>,
    pub ollama_host: String,
    pub gemini_api_key: Option<String>,
    /// Overrides the Gemini API origin, e.g. for a proxy.
    pub gemini_base_url: Option<String>,
}

/// The inference backend a run sends tickets to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// Locally running Ollama service. Requires OLLAMA_MODEL.
    #[default]
    Ollama,
    /// Google Gemini API. Requires GOOGLE_API_KEY.
    Gemini,
}

impl Backend {
    pub fn display_name(&self) -> &'static str {
        match self {
            Backend::Ollama => "Ollama",
            Backend::Gemini => "Gemini",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl AppConfig {
    /// Loads `.env` (if any) and resolves settings from the process environment.
    pub fn from_env() -> Self {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!("ignoring unreadable .env file: {err}");
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let ollama_host = non_empty(OLLAMA_HOST_VAR)
            .map(|host| normalize_host(&host))
            .unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string());

        Self {
            ollama_model: non_empty(OLLAMA_MODEL_VAR),
            ollama_host,
            gemini_api_key: non_empty(GOOGLE_API_KEY_VAR).or_else(|| non_empty(GEMINI_API_KEY_VAR)),
            gemini_base_url: non_empty(GEMINI_BASE_URL_VAR).map(|url| normalize_host(&url)),
        }
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}
