use crate::error::AppResult;
use crate::services::ModelRegistryService;

/// Makes sure `model` is present on the local service, pulling it if needed.
///
/// A failed listing is fatal. A failed pull is logged and reported as
/// `Ok(false)`; the triage calls that follow will surface the missing model.
pub async fn ensure_available(
    registry: &dyn ModelRegistryService,
    model: &str,
) -> AppResult<bool> {
    let models = registry.list_models().await.inspect_err(|err| {
        tracing::error!("Failed to check or pull Ollama model '{model}': {err}");
    })?;

    if models.iter().any(|name| name == model) {
        tracing::debug!("Ollama model '{model}' is already available.");
        return Ok(true);
    }

    tracing::info!("Ollama model '{model}' not found locally. Pulling it now...");
    match registry.pull_model(model).await {
        Ok(()) => {
            tracing::info!("Successfully pulled Ollama model '{model}'.");
            Ok(true)
        }
        Err(err) => {
            tracing::error!("Failed to pull Ollama model '{model}': {err}");
            Ok(false)
        }
    }
}
