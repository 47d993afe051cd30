use thiserror::Error;

/// Failures that end a single dashboard update cycle.
///
/// None of these are fatal to the process: the pipeline turns every one of
/// them into an error placeholder and the next input change starts over.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Connection refused, DNS failure, timeout, or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl DashboardError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        DashboardError::MalformedPayload(msg.into())
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::Transport(_) => "transport",
            DashboardError::HttpStatus { .. } => "http_status",
            DashboardError::MalformedPayload(_) => "malformed_payload",
            DashboardError::Client(_) => "client",
        }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_cuts_long_bodies_on_char_boundary() {
        let body = "ä".repeat(300);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }

    #[test]
    fn status_error_message() {
        let err = DashboardError::HttpStatus { status: 500, body: "boom".into() };
        assert_eq!(err.to_string(), "request failed with status 500: boom");
        assert_eq!(err.kind(), "http_status");
    }
}
