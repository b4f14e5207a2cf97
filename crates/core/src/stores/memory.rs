use crate::embeddings::Embedder;
use crate::traits::VectorIndex;
use crate::{DocumentChunk, IngestError, ScoredChunk, SearchError};

#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub embedding: Vec<f32>,
    pub chunk: DocumentChunk,
}

/// Exhaustive in-memory index ranked by squared L2 distance. Entries are keyed
/// by insertion position; equal distances keep insertion order.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

impl FlatIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
        }
    }

    /// Embeds every chunk and indexes it in order.
    pub fn from_chunks(
        chunks: Vec<DocumentChunk>,
        embedder: &dyn Embedder,
    ) -> Result<Self, IngestError> {
        let mut index = Self::new(embedder.dimensions());
        index.entries.reserve(chunks.len());

        for chunk in chunks {
            let embedding = embedder.embed(&chunk.text);
            index.insert(chunk, embedding)?;
        }

        Ok(index)
    }

    pub fn insert(&mut self, chunk: DocumentChunk, embedding: Vec<f32>) -> Result<(), IngestError> {
        if embedding.len() != self.dimensions {
            return Err(IngestError::Embedding(format!(
                "embedding dimension {} != {} for chunk {}",
                embedding.len(),
                self.dimensions,
                chunk.chunk_index
            )));
        }

        self.entries.push(IndexEntry { embedding, chunk });
        Ok(())
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }
}

impl VectorIndex for FlatIndex {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn search_vector(
        &self,
        query_vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, SearchError> {
        if query_vector.len() != self.dimensions {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimensions,
                actual: query_vector.len(),
            });
        }
        if self.entries.is_empty() {
            return Err(SearchError::EmptyIndex);
        }

        let mut scored = self
            .entries
            .iter()
            .map(|entry| (squared_l2(&entry.embedding, query_vector), entry))
            .collect::<Vec<_>>();

        // sort_by is stable, so ties stay in insertion order.
        scored.sort_by(|left, right| left.0.total_cmp(&right.0));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(distance, entry)| ScoredChunk {
                chunk: entry.chunk.clone(),
                distance,
            })
            .collect())
    }
}

fn squared_l2(left: &[f32], right: &[f32]) -> f32 {
    left.iter()
        .zip(right)
        .map(|(a, b)| {
            let diff = a - b;
            diff * diff
        })
        .sum()
}
