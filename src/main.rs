mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod logging;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::cmd::triage::{self, TriageCommandArgs};
use crate::config::{AppConfig, Backend};
use crate::context::{AppContext, LocalModel};
use crate::error::AppResult;
use crate::infra::gemini::GeminiClient;
use crate::infra::ollama::OllamaClient;

const DEFAULT_INPUT_DIR: &str = "tickets-original";
const DEFAULT_OUTPUT_DIR: &str = "tickets-triaged";

#[derive(Parser)]
#[command(
    name = "triage",
    author,
    version,
    about = "AI-powered IT ticket triage workflow",
    long_about = "Processes markdown tickets from the input directory, triages them with the \
                  selected AI backend, and saves the results in the output directory."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// The backend to use for triaging tickets.
    #[arg(long, value_enum, default_value_t = Backend::default())]
    model: Backend,
    /// Directory holding the original `.md` tickets.
    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,
    /// Directory receiving triaged tickets.
    #[arg(long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Remove every file from the triaged tickets directory.
    Clean,
    /// Show the resolved configuration (secrets masked).
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    match cli.command {
        Some(Commands::Clean) => cmd::clean::run(&cli.output),
        Some(Commands::Config) => {
            let config = AppConfig::from_env();
            cmd::config::run(&config, cli.model, &cli.input, &cli.output)
        }
        None => run_triage(cli).await,
    }
}

async fn run_triage(cli: Cli) -> AppResult<()> {
    let config = AppConfig::from_env();
    let context = build_context(config, cli.model)?;

    let report = triage::run(
        &context,
        TriageCommandArgs {
            input: cli.input,
            output: cli.output.clone(),
        },
    )
    .await?;

    println!(
        "Triaged {} tickets into {} ({} with errors).",
        report.processed,
        cli.output.display(),
        report.contained_failures
    );
    Ok(())
}

fn build_context(config: AppConfig, backend: Backend) -> AppResult<AppContext> {
    match backend {
        Backend::Ollama => {
            let client = Arc::new(OllamaClient::new(&config)?);
            let local_model = LocalModel {
                registry: client.clone(),
                name: client.model().to_string(),
            };
            Ok(AppContext::new(config, client, Some(local_model)))
        }
        Backend::Gemini => {
            if config.gemini_api_key.is_none() {
                tracing::warn!("Gemini API key not configured; every triage request will fail.");
            }
            let mut client = GeminiClient::new(config.gemini_api_key.clone());
            if let Some(base_url) = &config.gemini_base_url {
                client = client.with_base_url(base_url);
            }
            Ok(AppContext::new(config, Arc::new(client), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::error::AppError;
    use crate::services::TriageService;

    #[test]
    fn defaults_to_local_backend_and_standard_directories() {
        let cli = Cli::try_parse_from(["triage"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.model, Backend::Ollama);
        assert_eq!(cli.input, PathBuf::from("tickets-original"));
        assert_eq!(cli.output, PathBuf::from("tickets-triaged"));
    }

    #[test]
    fn parses_backend_selector_and_clean() {
        let cli = Cli::try_parse_from(["triage", "--model", "gemini"]).unwrap();
        assert_eq!(cli.model, Backend::Gemini);

        let cli = Cli::try_parse_from(["triage", "clean", "--output", "out"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Clean)));
        assert_eq!(cli.output, PathBuf::from("out"));

        assert!(Cli::try_parse_from(["triage", "--model", "openai"]).is_err());
    }

    #[test]
    fn local_backend_without_model_fails_fast() {
        let config = AppConfig::from_lookup(|_| None);
        let error = build_context(config, Backend::Ollama).err().unwrap();
        assert!(matches!(error, AppError::Configuration(_)));
    }

    #[test]
    fn remote_backend_skips_availability_check() {
        let config = AppConfig::from_lookup(|_| None);
        let context = build_context(config, Backend::Gemini).unwrap();
        assert!(context.local_model.is_none());
        assert_eq!(context.triage.backend(), Backend::Gemini);
    }

    #[tokio::test]
    async fn remote_backend_honours_configured_base_url() {
        let server = MockServer::start_async().await;
        let generate = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-2.5-flash:generateContent")
                    .header("x-goog-api-key", "test-gemini-key");
                then.status(200).json_body(json!({
                    "candidates": [{"content": {"parts": [{"text": "**Urgency**: Low"}]}}]
                }));
            })
            .await;

        let base_url = server.base_url();
        let config = AppConfig::from_lookup(|key| match key {
            "GOOGLE_API_KEY" => Some("test-gemini-key".to_string()),
            "GEMINI_BASE_URL" => Some(base_url.clone()),
            _ => None,
        });
        let context = build_context(config, Backend::Gemini).unwrap();

        let report = context.triage.triage("Printer jammed.").await.render();

        generate.assert_async().await;
        assert_eq!(report, "**Urgency**: Low");
    }
}
