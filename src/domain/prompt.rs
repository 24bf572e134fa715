const INSTRUCTIONS: &str = r#"You are an expert IT support ticket triaging system. Your task is to analyze the following IT ticket and provide a structured triage report.

The triage report must include the following sections:
- **Urgency**: (e.g., Low, Medium, High, Critical)
- **Category**: (e.g., Hardware, Software, Network, Account, Other)
- **Summary**: A brief, one-sentence summary of the issue.
- **Next Step**: Propose a concrete next action. This should be a numbered list of 1-3 clear, actionable steps.
- **New Status**: Based on the "Next Step", set the status to one of the following: "unclear" (if more information is needed), "pending next step" (if the user needs to do something), or "closed" (if no action is required).

Here is the ticket:"#;

pub const TICKET_DELIMITER: &str = "---";

const CLOSING: &str = "Please provide the triage report in markdown format.";

/// Renders the triage prompt shared by every backend.
pub fn build_prompt(ticket: &str) -> String {
    format!("{INSTRUCTIONS}\n{TICKET_DELIMITER}\n{ticket}\n{TICKET_DELIMITER}\n\n{CLOSING}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_ticket_between_delimiters() {
        let ticket = "My printer is on fire.\n\n  Please help!";
        let prompt = build_prompt(ticket);
        let expected = format!("\n---\n{ticket}\n---\n");
        assert!(prompt.contains(&expected));
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(build_prompt("same"), build_prompt("same"));
    }

    #[test]
    fn lists_every_report_section() {
        let prompt = build_prompt("x");
        for section in ["Urgency", "Category", "Summary", "Next Step", "New Status"] {
            assert!(prompt.contains(&format!("**{section}**")), "missing {section}");
        }
        assert!(prompt.trim_end().ends_with("markdown format."));
    }
}
