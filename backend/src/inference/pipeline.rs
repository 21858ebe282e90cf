use std::sync::Arc;

use shared::{SeverityClass, argmax};

use crate::error::InferenceError;
use crate::inference::model::Classifier;
use crate::inference::preprocess::{INPUT_SHAPE, UploadedImage, preprocess};

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub severity: SeverityClass,
    pub predictions: Vec<f32>,
}

/// Bytes in, severity out. Cheap to clone; the classifier is shared.
#[derive(Clone)]
pub struct InferencePipeline {
    classifier: Arc<dyn Classifier>,
}

impl InferencePipeline {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn run(&self, upload: &UploadedImage) -> Result<Diagnosis, InferenceError> {
        let tensor = preprocess(upload)?;

        if !tensor.has_model_shape() {
            return Err(InferenceError::ShapeMismatch {
                expected: INPUT_SHAPE,
                actual: tensor.shape().to_vec(),
            });
        }

        let predictions = self.classifier.predict(&tensor)?;
        let severity = reduce(&predictions)?;

        Ok(Diagnosis {
            severity,
            predictions,
        })
    }
}

/// Top class only; no confidence threshold.
fn reduce(predictions: &[f32]) -> Result<SeverityClass, InferenceError> {
    if predictions.len() != SeverityClass::count() {
        return Err(InferenceError::UnexpectedOutput(predictions.len()));
    }
    argmax(predictions)
        .and_then(SeverityClass::from_index)
        .ok_or(InferenceError::UnexpectedOutput(predictions.len()))
}
