use std::path::PathBuf;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared::ErrorResponse;

use crate::config::ConfigError;

/// Failures that keep the server from becoming ready. Never retried.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),
    #[error("Failed to load model from {}: {reason}", .path.display())]
    ModelLoad { path: PathBuf, reason: String },
    #[error("No inference backend compiled in; rebuild with the `torch` feature")]
    BackendUnavailable,
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<StartupError> for std::io::Error {
    fn from(err: StartupError) -> Self {
        std::io::Error::other(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Unsupported file type for {0}; upload a JPG, JPEG or PNG image")]
    UnsupportedExtension(String),
    #[error("No image was uploaded")]
    EmptyUpload,
    #[error("Malformed upload: {0}")]
    Upload(String),
    #[error("Image is larger than the {limit} byte upload limit")]
    TooLarge { limit: usize },
    #[error("Could not decode image: {0}")]
    Decode(String),
    #[error("Preprocessed tensor has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        expected: [usize; 4],
        actual: Vec<usize>,
    },
    #[error("Model returned {0} scores, expected one per severity class")]
    UnexpectedOutput(usize),
    #[error("Model error: {0}")]
    Model(String),
}

impl InferenceError {
    /// Errors the user caused and can fix by uploading another file.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            InferenceError::UnsupportedExtension(_)
                | InferenceError::EmptyUpload
                | InferenceError::Upload(_)
                | InferenceError::TooLarge { .. }
                | InferenceError::Decode(_)
        )
    }
}

impl ResponseError for InferenceError {
    fn status_code(&self) -> StatusCode {
        match self {
            InferenceError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ if self.is_user_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.is_user_error() {
            self.to_string()
        } else {
            "Model inference failed".to_string()
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn user_errors_map_to_client_statuses() {
        assert_eq!(
            InferenceError::Decode("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            InferenceError::UnsupportedExtension("a.txt".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            InferenceError::TooLarge { limit: 10 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            InferenceError::UnexpectedOutput(3).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn internal_errors_hide_details() {
        let resp = InferenceError::Model("cuda out of memory".into()).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.error, "Model inference failed");
    }

    #[test]
    fn startup_error_names_the_path() {
        let err = StartupError::ModelNotFound(PathBuf::from("/nope/model.pt"));
        assert_eq!(err.to_string(), "Model file not found: /nope/model.pt");
        let io: std::io::Error = err.into();
        assert!(io.to_string().contains("/nope/model.pt"));
    }
}
