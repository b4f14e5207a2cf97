use crate::traits::VectorIndex;
use crate::SessionSnapshot;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A fully built index together with what it was built from.
pub struct LoadedDocument {
    pub index: Box<dyn VectorIndex>,
    pub snapshot: SessionSnapshot,
}

impl LoadedDocument {
    pub fn new(source: impl Into<String>, pages: usize, index: Box<dyn VectorIndex>) -> Self {
        let chunks_indexed = index.len();
        Self {
            index,
            snapshot: SessionSnapshot {
                source: source.into(),
                pages,
                chunks_indexed,
                loaded_at: Utc::now(),
            },
        }
    }
}

/// Holds at most one loaded document. Replacing it is a single swap, so
/// readers see either the old document or the new one, never a partial index.
#[derive(Default)]
pub struct SessionStore {
    current: RwLock<Option<Arc<LoadedDocument>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `document` and returns whatever it replaced.
    pub async fn replace(&self, document: LoadedDocument) -> Option<Arc<LoadedDocument>> {
        let mut slot = self.current.write().await;
        slot.replace(Arc::new(document))
    }

    /// The live document, if any. The lock is released before this returns.
    pub async fn current(&self) -> Option<Arc<LoadedDocument>> {
        self.current.read().await.clone()
    }

    pub async fn snapshot(&self) -> Option<SessionSnapshot> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|document| document.snapshot.clone())
    }

    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentChunk, FlatIndex};

    fn document(source: &str, chunks: usize) -> LoadedDocument {
        let mut index = FlatIndex::new(1);
        for chunk_index in 0..chunks {
            index
                .insert(
                    DocumentChunk {
                        chunk_index,
                        page: 1,
                        text: format!("chunk {chunk_index}"),
                    },
                    vec![chunk_index as f32],
                )
                .expect("dimension matches");
        }
        LoadedDocument::new(source, 1, Box::new(index))
    }

    #[tokio::test]
    async fn store_starts_empty() {
        let store = SessionStore::new();
        assert!(!store.is_loaded().await);
        assert!(store.current().await.is_none());
        assert!(store.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn replace_swaps_the_whole_document() {
        let store = SessionStore::new();
        assert!(store.replace(document("first.pdf", 2)).await.is_none());

        let held = store.current().await.expect("document loaded");
        let previous = store
            .replace(document("second.pdf", 5))
            .await
            .expect("first document replaced");

        assert_eq!(previous.snapshot.source, "first.pdf");
        // A reader holding the old document keeps a consistent view.
        assert_eq!(held.index.len(), 2);

        let snapshot = store.snapshot().await.expect("second document loaded");
        assert_eq!(snapshot.source, "second.pdf");
        assert_eq!(snapshot.chunks_indexed, 5);
    }
}
