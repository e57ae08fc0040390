pub mod batch;
pub mod remote;

use crate::error::ClassifyError;
use crate::models::wardrobe_types::{ClassificationResult, ImageRef};
use async_trait::async_trait;
use std::future::Future;

/// Classifies a single image. Implemented by the hosted-model client and by
/// any `Fn(ImageRef) -> Future` closure.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn classify(&self, image: &ImageRef) -> Result<ClassificationResult, ClassifyError>;
}

#[async_trait]
impl<F, Fut> ImageClassifier for F
where
    F: Fn(ImageRef) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ClassificationResult, ClassifyError>> + Send + 'static,
{
    async fn classify(&self, image: &ImageRef) -> Result<ClassificationResult, ClassifyError> {
        (self)(image.clone()).await
    }
}
