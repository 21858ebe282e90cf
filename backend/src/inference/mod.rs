pub mod model;
pub mod pipeline;
pub mod preprocess;

#[cfg(test)]
pub(crate) mod testing;

pub use model::shared_classifier;
pub use pipeline::InferencePipeline;
pub use preprocess::UploadedImage;
