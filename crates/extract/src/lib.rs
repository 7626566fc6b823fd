pub mod config;
pub mod merge;
pub mod prompt;
pub mod schema;

pub use config::ClientConfig;
pub use merge::merge_chunk_flows;
pub use schema::{AttackFlow, Confidence, Edge, ExtractedChunk, Node, NodeData, NodeType};

use anyhow::{Context, Result};
use flow_ingest::ArticleChunk;
use tracing::debug;

/// Build the prompt sequence for a chunked article: the full extraction
/// prompt for the first chunk, a continuation prompt for every later one.
/// The caller sends each prompt to the model and feeds the responses back
/// through [`FlowAssembler`].
pub fn plan_prompts(chunks: &[ArticleChunk]) -> Vec<String> {
    let total = chunks.len();
    chunks
        .iter()
        .map(|chunk| prompt::build_chunk_prompt(chunk.index, total, &chunk.text))
        .collect()
}

/// Accumulates per-chunk model responses and merges them into one flow
pub struct FlowAssembler {
    chunks: Vec<ExtractedChunk>,
}

impl FlowAssembler {
    pub fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    pub fn push(&mut self, chunk: ExtractedChunk) {
        self.chunks.push(chunk);
    }

    /// Parse one chunk's JSON response and queue it for merging
    pub fn push_json(&mut self, article_id: &str, chunk_index: usize, json: &str) -> Result<()> {
        let flow = AttackFlow::from_json(json)
            .with_context(|| format!("Failed to parse extraction for chunk {}", chunk_index))?;

        debug!(
            article = article_id,
            chunk = chunk_index,
            nodes = flow.nodes.len(),
            edges = flow.edges.len(),
            "Parsed chunk extraction"
        );

        self.chunks.push(ExtractedChunk {
            article_id: article_id.to_string(),
            chunk_index,
            flow,
        });

        Ok(())
    }

    pub fn into_flow(self) -> AttackFlow {
        merge_chunk_flows(self.chunks)
    }
}

impl Default for FlowAssembler {
    fn default() -> Self {
        Self::new()
    }
}
