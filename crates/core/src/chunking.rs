use crate::error::IngestError;
use crate::extractor::PageText;
use crate::models::{DocumentChunk, IngestionOptions};
use std::collections::VecDeque;

const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Splits text into bounded, overlapping windows. Boundaries must be
/// deterministic for a given input.
pub trait TextSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub max_chars: usize,
    pub overlap_chars: usize,
}

impl From<&IngestionOptions> for ChunkingConfig {
    fn from(value: &IngestionOptions) -> Self {
        Self {
            max_chars: value.chunk_max_chars,
            overlap_chars: value.chunk_overlap_chars,
        }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.max_chars == 0 {
            return Err(IngestError::InvalidChunkConfig(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if self.overlap_chars >= self.max_chars {
            return Err(IngestError::InvalidChunkConfig(format!(
                "chunk overlap {} must be smaller than chunk size {}",
                self.overlap_chars, self.max_chars
            )));
        }
        Ok(())
    }
}

/// Splits on the coarsest separator present in the text (paragraphs, then
/// lines, then words, then characters) and greedily merges the pieces back
/// into windows of at most `max_chars` characters, carrying up to
/// `overlap_chars` characters of the previous window into the next one.
#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    config: ChunkingConfig,
    separators: Vec<String>,
}

impl RecursiveCharacterSplitter {
    pub fn new(config: ChunkingConfig) -> Result<Self, IngestError> {
        config.validate()?;
        Ok(Self {
            config,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn config(&self) -> ChunkingConfig {
        self.config
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        let (separator, remaining) = pick_separator(text, separators);

        let mut chunks = Vec::new();
        let mut fitting = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if char_len(&piece) < self.config.max_chars {
                fitting.push(piece);
                continue;
            }

            if !fitting.is_empty() {
                chunks.extend(self.merge_pieces(&fitting));
                fitting.clear();
            }

            if remaining.is_empty() {
                chunks.push(piece);
            } else {
                chunks.extend(self.split_recursive(&piece, remaining));
            }
        }

        if !fitting.is_empty() {
            chunks.extend(self.merge_pieces(&fitting));
        }

        chunks
    }

    fn merge_pieces(&self, pieces: &[String]) -> Vec<String> {
        let max = self.config.max_chars;
        let overlap = self.config.overlap_chars;

        let mut merged = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);

            if total + len > max && !window.is_empty() {
                if let Some(joined) = join_window(&window) {
                    merged.push(joined);
                }

                while total > overlap || (total + len > max && total > 0) {
                    match window.pop_front() {
                        Some(front) => total -= char_len(front),
                        None => break,
                    }
                }
            }

            window.push_back(piece);
            total += len;
        }

        if let Some(joined) = join_window(&window) {
            merged.push(joined);
        }

        merged
    }
}

impl TextSplitter for RecursiveCharacterSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.separators)
    }
}

/// Splits every page and numbers the chunks in document order.
pub fn build_chunks(pages: &[PageText], splitter: &dyn TextSplitter) -> Vec<DocumentChunk> {
    let mut chunks = Vec::new();
    let mut cursor = 0usize;

    for page in pages {
        for text in splitter.split(&page.text) {
            chunks.push(DocumentChunk {
                chunk_index: cursor,
                page: page.number,
                text,
            });
            cursor += 1;
        }
    }

    chunks
}

fn pick_separator<'a>(text: &str, separators: &'a [String]) -> (&'a str, &'a [String]) {
    for (position, separator) in separators.iter().enumerate() {
        if separator.is_empty() {
            return ("", &[]);
        }
        if text.contains(separator.as_str()) {
            return (separator.as_str(), &separators[position + 1..]);
        }
    }

    (separators.last().map(String::as_str).unwrap_or(""), &[])
}

// The separator stays attached to the start of the piece that follows it.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(String::from).collect();
    }

    let mut parts = text.split(separator);
    let mut pieces = Vec::new();
    if let Some(first) = parts.next() {
        pieces.push(first.to_string());
    }
    pieces.extend(parts.map(|part| format!("{separator}{part}")));
    pieces.retain(|piece| !piece.is_empty());
    pieces
}

fn join_window(window: &VecDeque<&str>) -> Option<String> {
    let joined = window.iter().copied().collect::<String>();
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
