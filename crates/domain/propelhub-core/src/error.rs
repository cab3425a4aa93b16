use serde_json::{json, Value};
use thiserror::Error;

/// Failure of a remote call made on behalf of a workflow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("credential rejected by server")]
    Unauthorized,
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "transport",
            ApiError::Status { .. } => "status",
            ApiError::Decode(_) => "decode",
            ApiError::Unauthorized => "unauthorized",
        }
    }

    /// JSON form carried in the `error` field of a failure action.
    pub fn to_payload(&self) -> Value {
        match self {
            ApiError::Status { status, body } => json!({
                "kind": self.kind(),
                "status": status,
                "detail": body,
            }),
            ApiError::Transport(detail) | ApiError::Decode(detail) => json!({
                "kind": self.kind(),
                "detail": detail,
            }),
            ApiError::Unauthorized => json!({
                "kind": self.kind(),
                "status": 401,
                "detail": self.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_payload_keeps_code_and_body() {
        let err = ApiError::Status {
            status: 503,
            body: "busy".into(),
        };
        let payload = err.to_payload();
        assert_eq!(payload["kind"], "status");
        assert_eq!(payload["status"], 503);
        assert_eq!(payload["detail"], "busy");
    }

    #[test]
    fn transport_payload_has_no_status() {
        let payload = ApiError::Transport("refused".into()).to_payload();
        assert_eq!(payload["kind"], "transport");
        assert!(payload.get("status").is_none());
    }
}
