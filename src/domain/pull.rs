use serde::Deserialize;

/// One line of the streamed model pull response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullEvent {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub completed: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PullEvent {
    pub fn percent(&self) -> Option<f64> {
        match (self.completed, self.total) {
            (Some(completed), Some(total)) if total > 0 => {
                Some(completed as f64 / total as f64 * 100.0)
            }
            _ => None,
        }
    }

    pub fn is_terminal_success(&self) -> bool {
        self.status.as_deref().is_some_and(|status| {
            let status = status.to_lowercase();
            status.contains("success") || status.contains("finished")
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PullState {
    Continue,
    Succeeded,
    Failed(String),
}

/// Folds pull events for one model, logging progress as it goes.
pub struct PullTracker {
    model: String,
    events: usize,
}

impl PullTracker {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            events: 0,
        }
    }

    pub fn events_seen(&self) -> usize {
        self.events
    }

    pub fn observe(&mut self, event: &PullEvent) -> PullState {
        self.events += 1;

        if let Some(error) = &event.error {
            return PullState::Failed(error.clone());
        }
        if let Some(status) = &event.status {
            tracing::info!("Status: {status}");
            if event.is_terminal_success() {
                tracing::info!("Model '{}' has been successfully pulled.", self.model);
                return PullState::Succeeded;
            }
        }
        if let Some(percent) = event.percent() {
            tracing::info!("Downloading layer: {percent:.2}% complete");
        }
        PullState::Continue
    }
}
