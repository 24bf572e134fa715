use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait ModelRegistryService: Send + Sync {
    /// Names of the models already present on the local service.
    async fn list_models(&self) -> AppResult<Vec<String>>;
    /// Downloads a model, returning once the service reports completion.
    async fn pull_model(&self, model: &str) -> AppResult<()>;
}
