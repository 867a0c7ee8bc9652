use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    Expired(String),
    AlreadyVerified(String),
    CodeMismatch(String),
    Delivery {
        message: String,
        submission_id: Option<String>,
    },
    ConfigError(String),
    InternalError(String),
}

impl AppError {
    /// Machine-readable discriminator carried in every error body.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Expired(_) => "expired",
            AppError::AlreadyVerified(_) => "already_verified",
            AppError::CodeMismatch(_) => "code_mismatch",
            AppError::Delivery { .. } => "delivery",
            AppError::ConfigError(_) => "config",
            AppError::InternalError(_) => "internal",
        }
    }

    /// Attaches a submission id to a delivery failure so the caller can
    /// fall back to resend instead of resubmitting the whole draft.
    pub fn with_submission_id(self, id: &str) -> Self {
        match self {
            AppError::Delivery { message, .. } => AppError::Delivery {
                message,
                submission_id: Some(id.to_string()),
            },
            other => other,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Expired(msg) => write!(f, "Expired: {}", msg),
            AppError::AlreadyVerified(msg) => write!(f, "Already verified: {}", msg),
            AppError::CodeMismatch(msg) => write!(f, "Code mismatch: {}", msg),
            AppError::Delivery { message, .. } => write!(f, "Delivery failed: {}", message),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Expired(_) => StatusCode::GONE,
            AppError::AlreadyVerified(_) => StatusCode::CONFLICT,
            AppError::CodeMismatch(_) => StatusCode::BAD_REQUEST,
            AppError::Delivery { .. } => StatusCode::BAD_GATEWAY,
            AppError::ConfigError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let kind = self.kind();

        let message = match &self {
            AppError::ConfigError(msg) => {
                tracing::error!("Configuration error: {}", msg);
                "Server configuration error".to_string()
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Delivery { message, .. } => {
                tracing::error!("Email delivery failed: {}", message);
                message.clone()
            }
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Expired(msg)
            | AppError::AlreadyVerified(msg)
            | AppError::CodeMismatch(msg) => msg.clone(),
        };

        let mut body = json!({
            "success": false,
            "kind": kind,
            "message": message,
        });

        if let AppError::Delivery {
            submission_id: Some(id),
            ..
        } = &self
        {
            body["submissionId"] = json!(id);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_stable_per_variant() {
        assert_eq!(AppError::Validation("x".into()).kind(), "validation");
        assert_eq!(AppError::NotFound("x".into()).kind(), "not_found");
        assert_eq!(AppError::Expired("x".into()).kind(), "expired");
        assert_eq!(
            AppError::AlreadyVerified("x".into()).kind(),
            "already_verified"
        );
        assert_eq!(AppError::CodeMismatch("x".into()).kind(), "code_mismatch");
    }

    #[test]
    fn with_submission_id_only_touches_delivery() {
        let err = AppError::Delivery {
            message: "send failed".into(),
            submission_id: None,
        }
        .with_submission_id("abc");
        match err {
            AppError::Delivery { submission_id, .. } => {
                assert_eq!(submission_id.as_deref(), Some("abc"))
            }
            _ => panic!("expected delivery error"),
        }

        let err = AppError::NotFound("gone".into()).with_submission_id("abc");
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
