use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, Backend};
use crate::domain::prompt::build_prompt;
use crate::domain::pull::{PullEvent, PullState, PullTracker};
use crate::domain::ticket::TriageOutcome;
use crate::error::{AppError, AppResult};
use crate::infra::error_message;
use crate::services::{ModelRegistryService, TriageService};

pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Fails when no local model is configured, before any request is made.
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let model = config.ollama_model.clone().ok_or_else(|| {
            AppError::Configuration("OLLAMA_MODEL environment variable not set.".to_string())
        })?;
        Ok(Self::with_base_url(&config.ollama_host, model))
    }

    pub fn with_base_url(base_url: &str, model: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn chat(&self, prompt: &str) -> AppResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let response = self
            .http
            .post(self.endpoint("/api/chat"))
            .json(&request)
            .send()
            .await
            .map_err(|err| AppError::LanguageModel(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::LanguageModel(error_message(response).await));
        }

        let payload: ChatResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse Ollama response: {err}"))
        })?;
        Ok(payload.message.content)
    }
}

#[async_trait]
impl TriageService for OllamaClient {
    fn backend(&self) -> Backend {
        Backend::Ollama
    }

    async fn triage(&self, ticket: &str) -> TriageOutcome {
        let prompt = build_prompt(ticket);
        tracing::info!("Sending ticket to Ollama ({}) for triage...", self.model);

        let outcome = TriageOutcome::from_result(self.backend(), self.chat(&prompt).await);
        match &outcome {
            TriageOutcome::Report(_) => {
                tracing::info!("Successfully received triage report from Ollama.")
            }
            failure => tracing::warn!("{}", failure.render()),
        }
        outcome
    }
}

#[async_trait]
impl ModelRegistryService for OllamaClient {
    async fn list_models(&self) -> AppResult<Vec<String>> {
        let response = self
            .http
            .get(self.endpoint("/api/tags"))
            .send()
            .await
            .map_err(|err| AppError::ModelRegistry(format!("failed to call Ollama: {err}")))?;

        if !response.status().is_success() {
            return Err(AppError::ModelRegistry(error_message(response).await));
        }

        let payload: TagsResponse = response.json().await.map_err(|err| {
            AppError::ModelRegistry(format!("failed to parse model list: {err}"))
        })?;
        Ok(payload.models.into_iter().map(|model| model.name).collect())
    }

    async fn pull_model(&self, model: &str) -> AppResult<()> {
        tracing::info!("Starting to pull model: {model}");

        let response = self
            .http
            .post(self.endpoint("/api/pull"))
            .json(&PullRequest { name: model })
            .send()
            .await
            .map_err(|err| AppError::ModelRegistry(format!("failed to call Ollama: {err}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ModelRegistry(format!(
                "Error: {} - {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let mut tracker = PullTracker::new(model);
        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| {
                AppError::ModelRegistry(format!("pull stream interrupted: {err}"))
            })?;
            buffer.extend_from_slice(&chunk);

            while let Some(newline) = buffer.iter().position(|byte| *byte == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline).collect();
                if observe_line(&mut tracker, &line)? {
                    return Ok(());
                }
            }
        }
        if observe_line(&mut tracker, &buffer)? {
            return Ok(());
        }

        tracing::info!(
            "Pull process completed after {} events.",
            tracker.events_seen()
        );
        Ok(())
    }
}

/// Returns `true` once the stream reports a terminal success.
fn observe_line(tracker: &mut PullTracker, line: &[u8]) -> AppResult<bool> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return Ok(false);
    }

    let event: PullEvent = serde_json::from_slice(line)
        .map_err(|err| AppError::ModelRegistry(format!("invalid pull event: {err}")))?;

    match tracker.observe(&event) {
        PullState::Continue => Ok(false),
        PullState::Succeeded => Ok(true),
        PullState::Failed(message) => Err(AppError::ModelRegistry(message)),
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Serialize)]
struct PullRequest<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}
