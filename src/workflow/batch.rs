use std::fs;
use std::path::Path;

use crate::domain::ticket::Ticket;
use crate::error::AppResult;
use crate::services::TriageService;

const TICKET_EXTENSION: &str = ".md";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub contained_failures: usize,
}

/// Triages every `.md` ticket directly inside `input_dir` into `output_dir`.
///
/// Tickets are handled one at a time in file name order. Every ticket yields
/// exactly one output file; backend failures only change the report text.
pub async fn run_batch(
    service: &dyn TriageService,
    input_dir: &Path,
    output_dir: &Path,
) -> AppResult<BatchReport> {
    fs::create_dir_all(output_dir)?;

    tracing::info!(
        "Starting ticket triage process using the '{}' model.",
        service.backend()
    );

    let mut report = BatchReport::default();
    for file_name in ticket_file_names(input_dir)? {
        let source = input_dir.join(&file_name);
        let target = output_dir.join(&file_name);

        let ticket = Ticket {
            content: fs::read_to_string(&source)?,
            file_name,
        };
        tracing::info!("Read ticket: {}", ticket.file_name);

        let outcome = service.triage(&ticket.content).await;
        if outcome.is_failure() {
            report.contained_failures += 1;
        }

        tracing::info!("Writing triaged ticket to: {}", target.display());
        fs::write(&target, ticket.triaged_document(&outcome))?;
        report.processed += 1;
    }

    tracing::info!(
        processed = report.processed,
        failures = report.contained_failures,
        "All tickets have been processed."
    );
    Ok(report)
}

fn ticket_file_names(input_dir: &Path) -> AppResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        // Follows symlinks; dangling links and directories are skipped.
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(TICKET_EXTENSION) => names.push(name),
            Ok(_) => {}
            Err(name) => tracing::warn!("Skipping non UTF-8 file name: {name:?}"),
        }
    }
    names.sort();
    Ok(names)
}
