use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{Backend, DEFAULT_GEMINI_BASE_URL, GEMINI_MODEL};
use crate::domain::prompt::build_prompt;
use crate::domain::ticket::TriageOutcome;
use crate::error::{AppError, AppResult};
use crate::infra::error_message;
use crate::services::TriageService;

pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{GEMINI_MODEL}:generateContent",
            self.base_url
        )
    }

    /// `Ok(None)` when the call succeeded but produced no text.
    async fn generate(&self, prompt: &str) -> AppResult<Option<String>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::LanguageModel(
                "no API key found; set GOOGLE_API_KEY or GEMINI_API_KEY".to_string(),
            )
        })?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    thought: false,
                }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| AppError::LanguageModel(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::LanguageModel(error_message(response).await));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse Gemini response: {err}"))
        })?;
        Ok(payload.text())
    }
}

#[async_trait]
impl TriageService for GeminiClient {
    fn backend(&self) -> Backend {
        Backend::Gemini
    }

    async fn triage(&self, ticket: &str) -> TriageOutcome {
        let prompt = build_prompt(ticket);
        tracing::info!("Sending ticket to Gemini ({GEMINI_MODEL}) for triage...");

        let outcome = match self.generate(&prompt).await {
            Ok(Some(text)) if !text.is_empty() => TriageOutcome::Report(text),
            Ok(_) => TriageOutcome::Empty {
                backend: self.backend(),
            },
            Err(err) => TriageOutcome::from_result(self.backend(), Err(err)),
        };

        match &outcome {
            TriageOutcome::Report(_) => {
                tracing::info!("Successfully received triage report from Gemini.")
            }
            failure => tracing::warn!("{}", failure.render()),
        }
        outcome
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing)]
    thought: bool,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate, skipping thought summaries.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let texts: Vec<&str> = content
            .parts
            .iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text.as_deref())
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}
