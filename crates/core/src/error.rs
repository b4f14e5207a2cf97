use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("invalid chunking config: {0}")]
    InvalidChunkConfig(String),

    #[error("document produced no text chunks: {0}")]
    EmptyDocument(String),

    #[error("embedding error: {0}")]
    Embedding(String),

    #[error("ingestion task failed: {0}")]
    Task(String),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("query vector dimension {actual} does not match index dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("vector index is empty")]
    EmptyIndex,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation api returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("generation api returned no text")]
    EmptyResponse,

    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Please upload a PDF first!")]
    NoDocument,

    #[error("{0}")]
    Retrieval(#[from] SearchError),

    #[error("{0}")]
    Generation(#[from] GenerationError),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
