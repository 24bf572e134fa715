use std::path::Path;

use crate::config::{AppConfig, Backend, DEFAULT_GEMINI_BASE_URL, GEMINI_MODEL};
use crate::error::AppResult;

/// Prints the resolved configuration (secrets masked).
pub fn run(config: &AppConfig, backend: Backend, input: &Path, output: &Path) -> AppResult<()> {
    println!("Backend: {}", backend.display_name());
    println!("Input directory: {}", input.display());
    println!("Output directory: {}", output.display());
    println!("Ollama host: {}", config.ollama_host);
    println!("Ollama model: {}", display_value(&config.ollama_model));
    println!("Gemini model: {GEMINI_MODEL}");
    println!(
        "Gemini base URL: {}",
        config
            .gemini_base_url
            .as_deref()
            .unwrap_or(DEFAULT_GEMINI_BASE_URL)
    );
    println!("Gemini API key: {}", mask_secret(&config.gemini_api_key));
    Ok(())
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
