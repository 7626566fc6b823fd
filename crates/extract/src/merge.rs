use std::collections::HashSet;
use tracing::{debug, warn};

use crate::schema::{AttackFlow, ExtractedChunk};

/// Combine per-chunk extractions into one flow.
///
/// Chunks are ordered by index and concatenated. Within a chunk the model
/// interleaves each edge directly after its source node, and that order is
/// the contract with the renderer, so nothing is re-sorted here. Duplicate
/// ids mean the model lost numbering continuity between parts; they are
/// surfaced as warnings, never deduplicated or renumbered.
pub fn merge_chunk_flows(mut chunks: Vec<ExtractedChunk>) -> AttackFlow {
    chunks.sort_by_key(|chunk| chunk.chunk_index);

    let mut flow = AttackFlow::default();
    let mut node_ids: HashSet<String> = HashSet::new();
    let mut edge_ids: HashSet<String> = HashSet::new();

    for chunk in chunks {
        let ExtractedChunk {
            chunk_index,
            flow: chunk_flow,
            ..
        } = chunk;

        for node in chunk_flow.nodes {
            if !node_ids.insert(node.id.clone()) {
                warn!(
                    id = %node.id,
                    chunk = chunk_index,
                    "Duplicate node id across chunks"
                );
            }
            flow.nodes.push(node);
        }

        for edge in chunk_flow.edges {
            if !edge_ids.insert(edge.id.clone()) {
                warn!(
                    id = %edge.id,
                    chunk = chunk_index,
                    "Duplicate edge id across chunks"
                );
            }
            flow.edges.push(edge);
        }
    }

    debug!(
        nodes = flow.nodes.len(),
        edges = flow.edges.len(),
        "Merged chunk flows"
    );

    flow
}
