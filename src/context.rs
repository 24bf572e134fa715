use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{ModelRegistryService, TriageService};

/// The local model a run must confirm before triaging.
#[derive(Clone)]
pub struct LocalModel {
    pub registry: Arc<dyn ModelRegistryService>,
    pub name: String,
}

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub triage: Arc<dyn TriageService>,
    pub local_model: Option<LocalModel>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        triage: Arc<dyn TriageService>,
        local_model: Option<LocalModel>,
    ) -> Self {
        Self {
            config,
            triage,
            local_model,
        }
    }
}
