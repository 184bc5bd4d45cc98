use serde::Serialize;
use thiserror::Error;

pub const CONFIG_MISSING_MESSAGE: &str = "API_GATEWAY_URL environment variable is not set";
pub const NO_IMAGE_MESSAGE: &str = "No image data received from client";
pub const UPSTREAM_FAILED_MESSAGE: &str = "Failed to process image via gateway";
pub const PROCESSING_FALLBACK_MESSAGE: &str = "Gateway processing failed";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("{0}")]
    ConfigError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{message} (gateway status {status})")]
    UpstreamError {
        status: u16,
        message: String,
        details: String,
    },
    #[error("{0}")]
    ProcessingError(String),
    #[error("{0}")]
    InternalError(String),
}

/// JSON envelope returned to the client for every failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ProxyError {
    pub fn missing_gateway_url() -> Self {
        ProxyError::ConfigError(CONFIG_MISSING_MESSAGE.to_string())
    }

    pub fn upstream(status: u16, details: impl Into<String>) -> Self {
        ProxyError::UpstreamError {
            status,
            message: UPSTREAM_FAILED_MESSAGE.to_string(),
            details: details.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::ValidationError(_) => 400,
            ProxyError::UpstreamError { status, .. } => *status,
            ProxyError::ConfigError(_)
            | ProxyError::ProcessingError(_)
            | ProxyError::InternalError(_) => 500,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::ConfigError(_) => "configuration",
            ProxyError::ValidationError(_) => "validation",
            ProxyError::UpstreamError { .. } => "upstream",
            ProxyError::ProcessingError(_) => "processing",
            ProxyError::InternalError(_) => "internal",
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        match self {
            ProxyError::UpstreamError {
                message, details, ..
            } => ErrorBody {
                error: message.clone(),
                details: Some(details.clone()),
            },
            ProxyError::ConfigError(msg)
            | ProxyError::ValidationError(msg)
            | ProxyError::ProcessingError(msg)
            | ProxyError::InternalError(msg) => ErrorBody {
                error: msg.clone(),
                details: None,
            },
        }
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::InternalError(err.to_string())
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::InternalError(format!("Gateway request timed out: {}", err))
        } else {
            ProxyError::InternalError(err.to_string())
        }
    }
}

#[cfg(feature = "server")]
impl actix_web::ResponseError for ProxyError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::from_u16(ProxyError::status_code(self))
            .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(actix_web::ResponseError::status_code(self))
            .json(self.to_body())
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(ProxyError::missing_gateway_url().status_code(), 500);
        assert_eq!(
            ProxyError::ValidationError(NO_IMAGE_MESSAGE.into()).status_code(),
            400
        );
        assert_eq!(ProxyError::upstream(502, "bad gateway").status_code(), 502);
        assert_eq!(ProxyError::ProcessingError("x".into()).status_code(), 500);
        assert_eq!(ProxyError::InternalError("x".into()).status_code(), 500);
    }

    #[test]
    fn upstream_body_carries_details() {
        let body = ProxyError::upstream(503, "down for maintenance").to_body();
        assert_eq!(body.error, UPSTREAM_FAILED_MESSAGE);
        assert_eq!(body.details.as_deref(), Some("down for maintenance"));
    }

    #[test]
    fn plain_errors_omit_details_field() {
        let body = ProxyError::ProcessingError("model timeout".into()).to_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "model timeout" }));
    }
}
