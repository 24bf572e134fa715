use crate::config::Backend;
use crate::error::{AppError, AppResult};

pub const STATUS_BLOCK: &str = "\n\n---\n\n**Status:** new";
pub const TRIAGE_SEPARATOR: &str = "\n\n---\n\n## Triage\n\n";

/// A support ticket read from disk. The content is never modified.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub file_name: String,
    pub content: String,
}

/// Result of one backend call for one ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageOutcome {
    Report(String),
    Failed { backend: Backend, cause: String },
    Empty { backend: Backend },
}

impl TriageOutcome {
    pub fn from_result(backend: Backend, result: AppResult<String>) -> Self {
        match result {
            Ok(report) => TriageOutcome::Report(report),
            Err(AppError::LanguageModel(cause)) => TriageOutcome::Failed { backend, cause },
            Err(other) => TriageOutcome::Failed {
                backend,
                cause: other.to_string(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, TriageOutcome::Report(_))
    }

    pub fn render(&self) -> String {
        match self {
            TriageOutcome::Report(report) => report.clone(),
            TriageOutcome::Failed { backend, cause } => {
                format!("Error during {backend} triage: {cause}")
            }
            TriageOutcome::Empty { backend } => format!("Error: Empty response from {backend}."),
        }
    }
}

impl Ticket {
    pub fn with_status(&self) -> String {
        format!("{}{STATUS_BLOCK}", self.content)
    }

    /// Original content, the `new` status block, then the triage section.
    pub fn triaged_document(&self, outcome: &TriageOutcome) -> String {
        format!("{}{TRIAGE_SEPARATOR}{}", self.with_status(), outcome.render())
    }
}
