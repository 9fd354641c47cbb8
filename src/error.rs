use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// One violated field of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldIssue>),
    #[error("missing session cookie")]
    MissingSession,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    issues: Option<Vec<FieldIssue>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(issues) => {
                warn!(?issues, "request rejected");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody {
                        error: "validation failed",
                        issues: Some(issues),
                    }),
                )
                    .into_response()
            }
            AppError::MissingSession => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "Unauthorized",
                    issues: None,
                }),
            )
                .into_response(),
            AppError::Storage(e) => {
                error!(error = %format!("{e:#}"), "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "Internal server error",
                        issues: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let v = AppError::Validation(vec![FieldIssue::new("name", "required")]);
        assert_eq!(v.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::MissingSession.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        let s = AppError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(s.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn issues_are_skipped_when_absent() {
        let json = serde_json::to_string(&ErrorBody {
            error: "Unauthorized",
            issues: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"error":"Unauthorized"}"#);
    }
}
