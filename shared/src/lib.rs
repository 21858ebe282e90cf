pub mod contact;
pub mod severity;

use serde::{Deserialize, Serialize};

pub use contact::{
    CONTACT_CONFIRMATION, CONTACT_MISSING_FIELDS, ContactField, ContactForm, ContactSubject,
    ContactValidationError,
};
pub use severity::{AlertLevel, Recommendation, SeverityClass, SeverityInfo, argmax};

/// Image size the classifier was trained on.
pub const MODEL_INPUT_SIDE: u32 = 224;
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InferenceResponse {
    pub request_id: String,
    pub file_name: String,
    pub severity: SeverityClass,
    pub severity_index: usize,
    pub predictions: Vec<f32>,
    pub class_labels: Vec<String>,
    pub analyzed_at: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ContactResponse {
    pub message: String,
    pub received_at: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<ContactField>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            missing_fields: Vec::new(),
        }
    }
}

impl From<&ContactValidationError> for ErrorResponse {
    fn from(err: &ContactValidationError) -> Self {
        Self {
            error: err.to_string(),
            missing_fields: err.missing.clone(),
        }
    }
}

/// The accepted extension a file name ends with, as listed in `ACCEPTED_EXTENSIONS`.
pub fn accepted_extension(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    ACCEPTED_EXTENSIONS
        .iter()
        .copied()
        .find(|accepted| ext.eq_ignore_ascii_case(accepted))
}

pub fn has_accepted_extension(file_name: &str) -> bool {
    accepted_extension(file_name).is_some()
}
