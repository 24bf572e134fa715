pub mod gemini;
pub mod ollama;

use reqwest::Response;

/// Best-effort human readable message for a non-success HTTP response.
///
/// Understands both `{"error": "..."}` and `{"error": {"message": "..."}}` bodies.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unable to read response>".to_string());
    format!("{} (status code: {})", extract_error(&body), status.as_u16())
}

fn extract_error(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = parsed.as_ref().and_then(|value| {
        let error = value.get("error")?;
        error
            .as_str()
            .or_else(|| error.get("message").and_then(|message| message.as_str()))
            .map(str::to_string)
    });

    match message {
        Some(message) => message,
        None if body.trim().is_empty() => "<empty response body>".to_string(),
        None => body.trim().to_string(),
    }
}
