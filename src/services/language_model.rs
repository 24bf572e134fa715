use async_trait::async_trait;

use crate::config::Backend;
use crate::domain::ticket::TriageOutcome;

/// A backend that turns ticket text into a triage report.
///
/// Implementations contain their own failures: a broken call yields
/// [`TriageOutcome::Failed`] rather than an error, so one ticket never
/// aborts a batch.
#[async_trait]
pub trait TriageService: Send + Sync {
    fn backend(&self) -> Backend;
    async fn triage(&self, ticket: &str) -> TriageOutcome;
}
