use crate::ScoredChunk;

/// What the model is told to answer when the context does not cover the
/// question. Adherence is up to the model.
pub const FALLBACK_ANSWER: &str = "I don't find that information in the document.";

const CONTEXT_SEPARATOR: &str = "\n\n";

/// Joins retrieved chunk texts, in retrieval order, with a blank line.
pub fn build_context(hits: &[ScoredChunk]) -> String {
    hits.iter()
        .map(|hit| hit.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "You are a helpful AI assistant. Answer the user's question based ONLY on the context provided below.\n\
         If the answer is not in the context, simply say \"{FALLBACK_ANSWER}\"\n\
         \n\
         CONTEXT:\n\
         {context}\n\
         \n\
         QUESTION:\n\
         {question}\n"
    )
}
