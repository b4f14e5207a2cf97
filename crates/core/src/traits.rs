use crate::{GenerationError, ScoredChunk, SearchError};
use async_trait::async_trait;
use std::sync::Arc;

/// Nearest-neighbour lookup over chunk embeddings.
pub trait VectorIndex: Send + Sync {
    fn dimensions(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns at most `top_k` chunks, closest first.
    fn search_vector(
        &self,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, SearchError>;
}

/// Sends a prompt to a language model and returns the generated text.
#[async_trait]
pub trait Generator: Send + Sync {
    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[async_trait]
impl<T> Generator for Arc<T>
where
    T: Generator + ?Sized,
{
    fn model(&self) -> &str {
        (**self).model()
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt).await
    }
}
