use std::sync::Mutex;

use crate::error::InferenceError;
use crate::inference::model::Classifier;
use crate::inference::preprocess::PreprocessedTensor;

/// Returns the same scores for every input.
pub struct FixedClassifier(pub Vec<f32>);

impl Classifier for FixedClassifier {
    fn predict(&self, _input: &PreprocessedTensor) -> Result<Vec<f32>, InferenceError> {
        Ok(self.0.clone())
    }
}

/// Puts all mass on a class chosen from the mean intensity, so output depends on the pixels.
pub struct BrightnessClassifier;

impl Classifier for BrightnessClassifier {
    fn predict(&self, input: &PreprocessedTensor) -> Result<Vec<f32>, InferenceError> {
        let view = input.view();
        let mean = view.iter().sum::<f32>() / view.len() as f32;
        let class = ((mean * 5.0) as usize).min(4);
        let mut scores = vec![0.0; 5];
        scores[class] = 1.0;
        Ok(scores)
    }
}

/// Records the shape of every batch it sees.
#[derive(Default)]
pub struct ShapeProbe {
    pub seen: Mutex<Vec<Vec<usize>>>,
}

impl Classifier for ShapeProbe {
    fn predict(&self, input: &PreprocessedTensor) -> Result<Vec<f32>, InferenceError> {
        self.seen.lock().unwrap().push(input.shape().to_vec());
        Ok(vec![0.2; 5])
    }
}

pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn predict(&self, _input: &PreprocessedTensor) -> Result<Vec<f32>, InferenceError> {
        Err(InferenceError::Model("forward pass failed".to_string()))
    }
}
