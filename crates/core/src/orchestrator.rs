use crate::chunking::{ChunkingConfig, RecursiveCharacterSplitter, TextSplitter};
use crate::embeddings::{CharacterNgramEmbedder, Embedder};
use crate::extractor::{LopdfExtractor, PdfExtractor};
use crate::ingest::{ingest_upload, IngestReport};
use crate::prompt::{build_context, build_prompt};
use crate::session::SessionStore;
use crate::traits::Generator;
use crate::{ChatError, IngestError, IngestionOptions, RetrievalOptions, SessionSnapshot};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Ingests uploads into a session and answers questions against it.
pub struct ChatCoordinator<G>
where
    G: Generator,
{
    session: SessionStore,
    extractor: Arc<dyn PdfExtractor>,
    splitter: Arc<dyn TextSplitter>,
    embedder: Arc<dyn Embedder>,
    generator: G,
    retrieval: RetrievalOptions,
    upload_dir: PathBuf,
}

impl<G> ChatCoordinator<G>
where
    G: Generator,
{
    pub fn new(generator: G, options: &IngestionOptions) -> Result<Self, IngestError> {
        let splitter = RecursiveCharacterSplitter::new(ChunkingConfig::from(options))?;

        Ok(Self {
            session: SessionStore::new(),
            extractor: Arc::new(LopdfExtractor),
            splitter: Arc::new(splitter),
            embedder: Arc::new(CharacterNgramEmbedder::default()),
            generator,
            retrieval: RetrievalOptions::default(),
            upload_dir: std::env::temp_dir(),
        })
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn PdfExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = embedder;
        self
    }

    pub fn with_retrieval(mut self, retrieval: RetrievalOptions) -> Self {
        self.retrieval = retrieval;
        self
    }

    pub fn with_upload_dir(mut self, upload_dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = upload_dir.into();
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub async fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.snapshot().await
    }

    /// Indexes `bytes` as the session document. On failure the previous
    /// document, if any, stays in place.
    pub async fn ingest(&self, filename: &str, bytes: Vec<u8>) -> Result<IngestReport, IngestError> {
        let upload_dir = self.upload_dir.clone();
        let source = filename.to_string();
        let extractor = Arc::clone(&self.extractor);
        let splitter = Arc::clone(&self.splitter);
        let embedder = Arc::clone(&self.embedder);

        let document = tokio::task::spawn_blocking(move || {
            ingest_upload(
                &upload_dir,
                &source,
                &bytes,
                extractor.as_ref(),
                splitter.as_ref(),
                embedder.as_ref(),
            )
        })
        .await
        .map_err(|error| IngestError::Task(error.to_string()))??;

        let report = IngestReport {
            source: document.snapshot.source.clone(),
            pages: document.snapshot.pages,
            chunks_processed: document.snapshot.chunks_indexed,
        };

        let replaced = self.session.replace(document).await;
        info!(
            source = %report.source,
            pages = report.pages,
            chunks = report.chunks_processed,
            replaced = ?replaced.map(|previous| previous.snapshot.source.clone()),
            "document indexed"
        );

        Ok(report)
    }

    /// Retrieves the closest chunks for `question` and asks the generator to
    /// answer from them alone.
    pub async fn answer(&self, question: &str) -> Result<String, ChatError> {
        let document = self.session.current().await.ok_or(ChatError::NoDocument)?;

        let query_vector = self.embedder.embed(question);
        let hits = document
            .index
            .search_vector(&query_vector, self.retrieval.top_k)?;
        debug!(
            source = %document.snapshot.source,
            hits = hits.len(),
            model = self.generator.model(),
            "retrieved context"
        );

        let context = build_context(&hits);
        let prompt = build_prompt(&context, question);
        let answer = self.generator.generate(&prompt).await?;

        Ok(answer)
    }
}
