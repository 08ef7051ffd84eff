use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shapetab_core::error::ShapetabError;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ShapetabError> for ApiError {
    fn from(err: ShapetabError) -> Self {
        if err.is_input_error() {
            Self::bad_request("Could not convert archive").with_details(err.to_string())
        } else {
            Self::internal("Conversion failed").with_details(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_input_errors_are_bad_requests() {
        let err = ApiError::from(ShapetabError::Archive {
            path: PathBuf::from("upload.zip"),
            message: "Invalid or corrupt ZIP".to_string(),
        });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.details.unwrap().contains("upload.zip"));

        let err = ApiError::from(ShapetabError::UnsupportedGeometry {
            kind: "Point".to_string(),
        });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = ApiError::from(ShapetabError::Export {
            message: "disk full".to_string(),
        });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::from(ShapetabError::ConfigInvalid {
            key: "tolerance".to_string(),
            reason: "must be non-negative".to_string(),
        });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
