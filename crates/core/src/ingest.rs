use crate::chunking::{build_chunks, TextSplitter};
use crate::embeddings::Embedder;
use crate::extractor::PdfExtractor;
use crate::session::LoadedDocument;
use crate::stores::FlatIndex;
use crate::IngestError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const UPLOAD_PREFIX: &str = "temp_";
const MAX_SUFFIX_CHARS: usize = 64;

/// An uploaded file written to disk for the duration of one ingest. The file
/// is removed when the guard drops, whichever way ingestion ends.
pub struct TempUpload {
    file: NamedTempFile,
}

impl TempUpload {
    pub fn create(dir: &Path, filename: &str, bytes: &[u8]) -> Result<Self, IngestError> {
        let mut file = tempfile::Builder::new()
            .prefix(UPLOAD_PREFIX)
            .suffix(&upload_suffix(filename))
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub source: String,
    pub pages: usize,
    pub chunks_processed: usize,
}

/// Extracts, splits and embeds one PDF into a fresh index.
pub fn ingest_pdf(
    path: &Path,
    source: &str,
    extractor: &dyn PdfExtractor,
    splitter: &dyn TextSplitter,
    embedder: &dyn Embedder,
) -> Result<LoadedDocument, IngestError> {
    let pages = extractor.extract_pages(path)?;
    let chunks = build_chunks(&pages, splitter);

    if chunks.is_empty() {
        return Err(IngestError::EmptyDocument(format!(
            "no extractable text in {source}"
        )));
    }

    let index = FlatIndex::from_chunks(chunks, embedder)?;
    Ok(LoadedDocument::new(source, pages.len(), Box::new(index)))
}

/// Writes `bytes` to a temporary upload in `dir` and ingests it.
pub fn ingest_upload(
    dir: &Path,
    source: &str,
    bytes: &[u8],
    extractor: &dyn PdfExtractor,
    splitter: &dyn TextSplitter,
    embedder: &dyn Embedder,
) -> Result<LoadedDocument, IngestError> {
    let upload = TempUpload::create(dir, source, bytes)?;
    ingest_pdf(upload.path(), source, extractor, splitter, embedder)
}

// Keeps only the final path component of the client filename, restricted to
// characters that are safe in a file name.
fn upload_suffix(filename: &str) -> String {
    let name = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let cleaned = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect::<String>();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        return ".pdf".to_string();
    }

    let skip = cleaned.chars().count().saturating_sub(MAX_SUFFIX_CHARS);
    format!("_{}", cleaned.chars().skip(skip).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::{ChunkingConfig, RecursiveCharacterSplitter};
    use crate::extractor::{test_pdf, LopdfExtractor, PageText};
    use crate::{CharacterNgramEmbedder, IngestionOptions};
    use std::fs;
    use tempfile::tempdir;

    fn default_splitter() -> RecursiveCharacterSplitter {
        RecursiveCharacterSplitter::new(ChunkingConfig::from(&IngestionOptions::default()))
            .expect("default chunking config is valid")
    }

    fn leftover_files(dir: &Path) -> usize {
        fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    #[test]
    fn suffix_keeps_safe_file_name_only() {
        assert_eq!(upload_suffix("report.pdf"), "_report.pdf");
        assert_eq!(upload_suffix("../../etc/passwd"), "_passwd");
        assert_eq!(upload_suffix("my report (v2).pdf"), "_myreportv2.pdf");
        assert_eq!(upload_suffix(""), ".pdf");
        assert_eq!(upload_suffix("..."), ".pdf");
    }

    #[test]
    fn temp_upload_is_removed_on_drop() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let upload = TempUpload::create(dir.path(), "a.pdf", b"%PDF-1.4")?;

        let path = upload.path().to_path_buf();
        assert!(path.exists());
        assert!(path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("temp_") && name.ends_with("_a.pdf")));

        drop(upload);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn chunk_count_matches_the_splitter() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let splitter = default_splitter();
        let bytes = test_pdf::build(&["The sky is blue.", "Grass is green."]);

        let document = ingest_upload(
            dir.path(),
            "colors.pdf",
            &bytes,
            &LopdfExtractor,
            &splitter,
            &CharacterNgramEmbedder::default(),
        )?;

        let path = dir.path().join("expected.pdf");
        fs::write(&path, &bytes)?;
        let expected = LopdfExtractor
            .extract_pages(&path)?
            .iter()
            .map(|page| splitter.split(&page.text).len())
            .sum::<usize>();
        fs::remove_file(&path)?;

        assert_eq!(document.snapshot.chunks_indexed, expected);
        assert_eq!(document.snapshot.pages, 2);
        assert_eq!(document.snapshot.source, "colors.pdf");
        assert_eq!(leftover_files(dir.path()), 0);
        Ok(())
    }

    #[test]
    fn malformed_upload_fails_and_leaves_no_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;

        let result = ingest_upload(
            dir.path(),
            "broken.pdf",
            b"%PDF-1.4\n%broken",
            &LopdfExtractor,
            &default_splitter(),
            &CharacterNgramEmbedder::default(),
        );

        assert!(matches!(result, Err(IngestError::PdfParse(_))));
        assert_eq!(leftover_files(dir.path()), 0);
        Ok(())
    }

    struct BlankExtractor;

    impl PdfExtractor for BlankExtractor {
        fn extract_pages(&self, _path: &Path) -> Result<Vec<PageText>, IngestError> {
            Ok(vec![PageText {
                number: 1,
                text: "   ".to_string(),
            }])
        }
    }

    #[test]
    fn document_without_text_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;

        let result = ingest_upload(
            dir.path(),
            "scan.pdf",
            b"%PDF-1.4",
            &BlankExtractor,
            &default_splitter(),
            &CharacterNgramEmbedder::default(),
        );

        assert!(matches!(result, Err(IngestError::EmptyDocument(_))));
        assert_eq!(leftover_files(dir.path()), 0);
        Ok(())
    }
}
