pub mod chunking;
pub mod embeddings;
pub mod error;
pub mod extractor;
pub mod generation;
pub mod ingest;
pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod session;
pub mod stores;
pub mod traits;

pub use chunking::{build_chunks, ChunkingConfig, RecursiveCharacterSplitter, TextSplitter};
pub use embeddings::{CharacterNgramEmbedder, Embedder, DEFAULT_EMBEDDING_DIMENSIONS};
pub use error::{ChatError, GenerationError, IngestError, SearchError};
pub use extractor::{extract_page_texts, LopdfExtractor, PageText, PdfExtractor};
pub use generation::{
    GeminiClient, GeminiConfig, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GENERATION_TIMEOUT,
    DEFAULT_MODEL,
};
pub use ingest::{ingest_pdf, ingest_upload, IngestReport, TempUpload};
pub use models::{
    DocumentChunk, IngestionOptions, RetrievalOptions, ScoredChunk, SessionSnapshot,
};
pub use orchestrator::ChatCoordinator;
pub use prompt::{build_context, build_prompt, FALLBACK_ANSWER};
pub use session::{LoadedDocument, SessionStore};
pub use stores::{FlatIndex, IndexEntry};
pub use traits::{Generator, VectorIndex};
