use std::path::PathBuf;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::availability::ensure_available;
use crate::workflow::batch::{BatchReport, run_batch};

#[derive(Debug, Clone)]
pub struct TriageCommandArgs {
    pub input: PathBuf,
    pub output: PathBuf,
}

pub async fn run(ctx: &AppContext, args: TriageCommandArgs) -> AppResult<BatchReport> {
    if let Some(local) = &ctx.local_model {
        tracing::debug!(
            "Checking model '{}' on {}",
            local.name,
            ctx.config.ollama_host
        );
        let available = ensure_available(local.registry.as_ref(), &local.name).await?;
        if !available {
            tracing::warn!(
                "Model '{}' could not be pulled; triage requests may fail.",
                local.name
            );
        }
    }

    run_batch(ctx.triage.as_ref(), &args.input, &args.output).await
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use httpmock::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::config::AppConfig;
    use crate::context::LocalModel;
    use crate::infra::ollama::OllamaClient;

    fn ollama_context(server: &MockServer) -> AppContext {
        let config = AppConfig::from_lookup(|key| match key {
            "OLLAMA_MODEL" => Some("test-ollama-model".to_string()),
            "OLLAMA_HOST" => Some(server.base_url()),
            _ => None,
        });
        let client = Arc::new(OllamaClient::new(&config).unwrap());
        let local_model = LocalModel {
            registry: client.clone(),
            name: client.model().to_string(),
        };
        AppContext::new(config, client, Some(local_model))
    }

    fn args(input: &TempDir, output: &TempDir) -> TriageCommandArgs {
        TriageCommandArgs {
            input: input.path().to_path_buf(),
            output: output.path().join("tickets-triaged"),
        }
    }

    #[tokio::test]
    async fn pulls_missing_model_then_triages() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tags");
                then.status(200).json_body(json!({"models": []}));
            })
            .await;
        let pull = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/pull");
                then.status(200).body("{\"status\":\"success\"}\n");
            })
            .await;
        let chat = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(200)
                    .json_body(json!({"message": {"role": "assistant", "content": "**Urgency**: High"}}));
            })
            .await;

        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("fire.md"), "My printer is on fire.").unwrap();
        let args = args(&input, &output);

        let report = run(&ollama_context(&server), args.clone()).await.unwrap();

        pull.assert_async().await;
        chat.assert_async().await;
        assert_eq!(report.processed, 1);
        assert!(
            fs::read_to_string(args.output.join("fire.md"))
                .unwrap()
                .ends_with("## Triage\n\n**Urgency**: High")
        );
    }

    #[tokio::test]
    async fn failed_pull_still_writes_every_ticket() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tags");
                then.status(200).json_body(json!({"models": [{"name": "other"}]}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/pull");
                then.status(500).body("registry unreachable");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(404)
                    .json_body(json!({"error": "model 'test-ollama-model' not found"}));
            })
            .await;

        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("a.md"), "VPN drops.").unwrap();
        fs::write(input.path().join("b.md"), "Mouse broken.").unwrap();
        let args = args(&input, &output);

        let report = run(&ollama_context(&server), args.clone()).await.unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.contained_failures, 2);
        let written = fs::read_to_string(args.output.join("b.md")).unwrap();
        assert!(written.contains(
            "Error during Ollama triage: model 'test-ollama-model' not found"
        ));
    }

    #[tokio::test]
    async fn listing_failure_aborts_before_any_ticket() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tags");
                then.status(500).body("internal error");
            })
            .await;
        let chat = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(200);
            })
            .await;

        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("a.md"), "VPN drops.").unwrap();
        let args = args(&input, &output);

        assert!(run(&ollama_context(&server), args.clone()).await.is_err());
        assert_eq!(chat.hits_async().await, 0);
        assert!(!args.output.exists());
    }
}
