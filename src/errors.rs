use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for operations against the SetDoc admin API.
///
/// Callers react to the tag, not the message: only `Unauthorized` ends the
/// session, everything else is surfaced and the operator re-triggers by hand.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("could not reach the API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unauthorized: {detail}")]
    Unauthorized { detail: String },

    #[error("request rejected ({status}): {detail}")]
    Validation { status: u16, detail: String },

    #[error("server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("not logged in")]
    NotAuthenticated,

    #[error("no action is pending confirmation")]
    NothingPending,

    #[error("{0}")]
    InvalidInput(String),

    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}

impl AdminError {
    /// Map a non-2xx response to its variant, pulling the server-provided
    /// `detail` message out of the body when there is one.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = extract_detail(status, body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized { detail },
            s if s.is_client_error() => Self::Validation {
                status: s.as_u16(),
                detail,
            },
            s => Self::Server {
                status: s.as_u16(),
                detail,
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Best-effort extraction of the API's error message: the JSON `detail`
/// field, else the raw body text, else the status reason.
fn extract_detail(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(s)) => return s.clone(),
            // FastAPI-style validation errors carry a structured detail array
            Some(other) if !other.is_null() => return other.to_string(),
            _ => {}
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

// ── Tests ─────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_field_is_preferred() {
        let err = AdminError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": "name must not be empty"}"#,
        );
        match err {
            AdminError::Validation { status, detail } => {
                assert_eq!(status, 422);
                assert_eq!(detail, "name must not be empty");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn structured_detail_is_stringified() {
        let err = AdminError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["body", "name"], "msg": "field required"}]}"#,
        );
        match err {
            AdminError::Validation { detail, .. } => assert!(detail.contains("field required")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn non_json_body_is_used_verbatim() {
        let err = AdminError::from_status(StatusCode::BAD_GATEWAY, "upstream unavailable");
        match err {
            AdminError::Server { status, detail } => {
                assert_eq!(status, 502);
                assert_eq!(detail, "upstream unavailable");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn empty_body_falls_back_to_status_reason() {
        let err = AdminError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        match err {
            AdminError::Server { detail, .. } => assert_eq!(detail, "Internal Server Error"),
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn forbidden_maps_to_unauthorized() {
        let err = AdminError::from_status(StatusCode::FORBIDDEN, r#"{"detail": "not an admin"}"#);
        assert!(err.is_unauthorized());
    }
}
