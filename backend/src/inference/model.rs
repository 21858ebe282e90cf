use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{InferenceError, StartupError};
use crate::inference::preprocess::PreprocessedTensor;

#[cfg(feature = "torch")]
use torch::TorchClassifier;

/// Pre-trained severity classifier. Shared read-only across workers once loaded.
pub trait Classifier: Send + Sync {
    /// Runs one forward pass over a `[1, 224, 224, 3]` batch and returns one score per class.
    fn predict(&self, input: &PreprocessedTensor) -> Result<Vec<f32>, InferenceError>;
}

/// Construct-once holder: the loader runs at most once successfully,
/// concurrent first callers block until it finishes.
pub struct ModelCell<C> {
    cell: OnceCell<Arc<C>>,
}

impl<C> ModelCell<C> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get_or_load<F>(&self, load: F) -> Result<Arc<C>, StartupError>
    where
        F: FnOnce() -> Result<C, StartupError>,
    {
        self.cell
            .get_or_try_init(|| load().map(Arc::new))
            .cloned()
    }
}

#[cfg(feature = "torch")]
static TORCH_MODEL: ModelCell<TorchClassifier> = ModelCell::new();

/// Process-wide classifier, loaded from `path` on first use.
#[cfg(feature = "torch")]
pub fn shared_classifier(path: &Path) -> Result<Arc<dyn Classifier>, StartupError> {
    let model = TORCH_MODEL.get_or_load(|| TorchClassifier::load(path))?;
    Ok(model as Arc<dyn Classifier>)
}

#[cfg(not(feature = "torch"))]
pub fn shared_classifier(path: &Path) -> Result<Arc<dyn Classifier>, StartupError> {
    if !path.is_file() {
        return Err(StartupError::ModelNotFound(path.to_path_buf()));
    }
    Err(StartupError::BackendUnavailable)
}

#[cfg(feature = "torch")]
mod torch {
    use std::path::Path;
    use std::sync::Mutex;

    use tch::{CModule, Device, Kind, Tensor};

    use super::Classifier;
    use crate::error::{InferenceError, StartupError};
    use crate::inference::preprocess::{INPUT_SHAPE, PreprocessedTensor};

    /// TorchScript export of the classifier. `CModule` is not `Sync`, hence the mutex.
    pub struct TorchClassifier {
        module: Mutex<CModule>,
        device: Device,
    }

    impl TorchClassifier {
        pub fn load(path: &Path) -> Result<Self, StartupError> {
            if !path.is_file() {
                return Err(StartupError::ModelNotFound(path.to_path_buf()));
            }

            let device = Device::cuda_if_available();
            log::info!("Loading model from {} on {:?}", path.display(), device);

            let mut module =
                CModule::load_on_device(path, device).map_err(|e| StartupError::ModelLoad {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
            module.set_eval();

            Ok(Self {
                module: Mutex::new(module),
                device,
            })
        }
    }

    impl Classifier for TorchClassifier {
        fn predict(&self, input: &PreprocessedTensor) -> Result<Vec<f32>, InferenceError> {
            let data = input.as_slice().ok_or_else(|| InferenceError::ShapeMismatch {
                expected: INPUT_SHAPE,
                actual: input.shape().to_vec(),
            })?;
            let [batch, height, width, channels] = INPUT_SHAPE.map(|d| d as i64);
            let tensor = Tensor::from_slice(data)
                .view([batch, height, width, channels])
                .to_device(self.device);

            let module = self
                .module
                .lock()
                .map_err(|_| InferenceError::Model("model lock poisoned".to_string()))?;
            let output = tch::no_grad(|| module.forward_ts(&[tensor]))
                .map_err(|e| InferenceError::Model(e.to_string()))?;

            let output_flat = output
                .to_kind(Kind::Float)
                .to_device(Device::Cpu)
                .view([-1]);
            let num_elements = output_flat.size()[0] as usize;
            let mut output_vec = vec![0.0f32; num_elements];
            output_flat.copy_data(&mut output_vec, num_elements);
            Ok(output_vec)
        }
    }

}
