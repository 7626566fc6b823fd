use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One bounded slice of an article, sized to fit an LLM context window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleChunk {
    pub article_id: String,
    pub chunk_id: String,
    /// Zero-based position of this chunk within its article.
    pub index: usize,
    pub text: String,
    pub source: String,
    pub offset: (usize, usize), // [start, end] character positions
}

impl ArticleChunk {
    pub fn new(
        article_id: String,
        index: usize,
        text: String,
        source: String,
        offset: (usize, usize),
    ) -> Self {
        // Stable chunk_id so re-ingesting the same article yields the same ids
        let chunk_id = Self::generate_chunk_id(&article_id, &text, offset);

        Self {
            article_id,
            chunk_id,
            index,
            text,
            source,
            offset,
        }
    }

    fn generate_chunk_id(article_id: &str, text: &str, offset: (usize, usize)) -> String {
        let mut hasher = Sha256::new();
        hasher.update(article_id.as_bytes());
        hasher.update(text.as_bytes());
        hasher.update(offset.0.to_string().as_bytes());
        hasher.update(offset.1.to_string().as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..16]) // Use first 16 bytes (32 hex chars)
    }

    /// Estimate token count (rough: 1.3 tokens per word)
    pub fn estimated_tokens(&self) -> usize {
        let word_count = self.text.split_whitespace().count();
        (word_count as f64 * 1.3) as usize
    }
}
