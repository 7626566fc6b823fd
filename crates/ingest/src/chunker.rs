use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::chunk::ArticleChunk;

pub struct ChunkerConfig {
    pub max_chunk_tokens: usize,
    pub overlap_tokens: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_chunk_tokens: 1600,
            overlap_tokens: 120,
        }
    }
}

pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// Split an article into chunks that fit the token budget.
    ///
    /// Splits on markdown headings first, then packs paragraphs. A single
    /// paragraph larger than the budget is split on sentence boundaries.
    /// Chunk indices are assigned densely in emission order.
    pub fn chunk_article(&self, article_id: &str, text: &str, source: &str) -> Vec<ArticleChunk> {
        let mut pieces = Vec::new();

        for section in self.split_by_headings(text) {
            for para in self.split_by_paragraphs(&section) {
                if self.estimate_tokens(&para) > self.config.max_chunk_tokens {
                    pieces.extend(self.split_by_sentences(&para));
                } else {
                    pieces.push(para);
                }
            }
        }

        let mut chunks: Vec<ArticleChunk> = Vec::new();
        let mut buffer = String::new();
        let mut buffer_start = 0usize;
        let mut cursor = 0usize;

        for piece in pieces {
            let piece_tokens = self.estimate_tokens(&piece);
            let buffer_tokens = self.estimate_tokens(&buffer);

            // Flush the buffer once adding this piece would exceed the budget
            if buffer_tokens + piece_tokens > self.config.max_chunk_tokens && !buffer.trim().is_empty()
            {
                chunks.push(ArticleChunk::new(
                    article_id.to_string(),
                    chunks.len(),
                    buffer.trim_end().to_string(),
                    source.to_string(),
                    (buffer_start, buffer_start + buffer.len()),
                ));

                // Carry trailing context into the next chunk
                buffer = self.tail_overlap(&buffer, self.config.overlap_tokens);
                if !buffer.is_empty() {
                    buffer.push_str("\n\n");
                }
                buffer_start = cursor.saturating_sub(buffer.len());
            }

            buffer.push_str(&piece);
            buffer.push_str("\n\n");
            cursor += piece.len() + 2;
        }

        if !buffer.trim().is_empty() {
            chunks.push(ArticleChunk::new(
                article_id.to_string(),
                chunks.len(),
                buffer.trim_end().to_string(),
                source.to_string(),
                (buffer_start, cursor),
            ));
        }

        debug!(
            article = article_id,
            chunks = chunks.len(),
            "Chunked article"
        );

        chunks
    }

    fn split_by_headings(&self, text: &str) -> Vec<String> {
        let mut sections = Vec::new();
        let mut current_section = String::new();

        for line in text.lines() {
            if line.trim_start().starts_with('#') {
                if !current_section.is_empty() {
                    sections.push(current_section);
                    current_section = String::new();
                }
            }
            current_section.push_str(line);
            current_section.push('\n');
        }

        if !current_section.is_empty() {
            sections.push(current_section);
        }

        if sections.is_empty() {
            sections.push(text.to_string());
        }

        sections
    }

    fn split_by_paragraphs(&self, text: &str) -> Vec<String> {
        text.split("\n\n")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Break an oversized paragraph into sentence runs under the budget
    fn split_by_sentences(&self, para: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut current = String::new();

        for sentence in para.unicode_sentences() {
            let sentence_tokens = self.estimate_tokens(sentence);
            let current_tokens = self.estimate_tokens(&current);

            if current_tokens + sentence_tokens > self.config.max_chunk_tokens
                && !current.trim().is_empty()
            {
                pieces.push(current.trim().to_string());
                current = String::new();
            }

            current.push_str(sentence);
        }

        if !current.trim().is_empty() {
            pieces.push(current.trim().to_string());
        }

        pieces
    }

    fn estimate_tokens(&self, text: &str) -> usize {
        let word_count = text.split_whitespace().count();
        (word_count as f64 * 1.3) as usize
    }

    fn tail_overlap(&self, text: &str, target_tokens: usize) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let target_words = (target_tokens as f64 / 1.3) as usize;

        if words.len() <= target_words {
            return text.to_string();
        }

        words[words.len().saturating_sub(target_words)..].join(" ")
    }
}
