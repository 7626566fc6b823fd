pub mod chunk;
pub mod chunker;
pub mod reader;

pub use chunk::ArticleChunk;
pub use chunker::{Chunker, ChunkerConfig};
pub use reader::ArticleReader;

use anyhow::Result;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::info;

/// Generate a stable article ID from file path
pub fn generate_article_id(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..16])
}

/// Load one article and chunk it with the default config
pub async fn ingest_article(file_path: &Path) -> Result<Vec<ArticleChunk>> {
    let content = ArticleReader::read_article(file_path).await?;
    let path_str = file_path.to_string_lossy().to_string();
    let article_id = generate_article_id(&path_str);

    let chunker = Chunker::new(ChunkerConfig::default());
    let chunks = chunker.chunk_article(&article_id, &content, &path_str);

    info!(
        article = %article_id,
        chunks = chunks.len(),
        "Ingested article"
    );

    Ok(chunks)
}

/// Ingest every article under a directory
pub async fn ingest_directory(dir_path: &Path) -> Result<Vec<ArticleChunk>> {
    let articles = ArticleReader::read_directory(dir_path).await?;
    let chunker = Chunker::new(ChunkerConfig::default());

    let mut all_chunks = Vec::new();

    for (path, content) in articles {
        let article_id = generate_article_id(&path);
        let chunks = chunker.chunk_article(&article_id, &content, &path);
        all_chunks.extend(chunks);
    }

    Ok(all_chunks)
}
