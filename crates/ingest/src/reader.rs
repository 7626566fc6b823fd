use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

pub struct ArticleReader;

impl ArticleReader {
    pub async fn read_article(path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match extension {
            "txt" | "md" => {
                let content = fs::read_to_string(path)
                    .await
                    .context(format!("Failed to read article: {:?}", path))?;
                Ok(content)
            }
            _ => anyhow::bail!("Unsupported article format: {}", extension),
        }
    }

    /// Recursively collect (path, content) pairs for every article under `dir`,
    /// in sorted path order.
    pub async fn read_directory(dir: &Path) -> Result<Vec<(String, String)>> {
        let mut paths = Vec::new();

        for entry in WalkDir::new(dir) {
            let entry = entry.context("Failed to walk article directory")?;
            let path = entry.path();

            if path.is_file()
                && matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("txt") | Some("md")
                )
            {
                paths.push(path.to_path_buf());
            }
        }

        paths.sort();

        let mut articles = Vec::new();
        for path in paths {
            let content = Self::read_article(&path).await?;
            articles.push((path.to_string_lossy().to_string(), content));
        }

        debug!(dir = ?dir, articles = articles.len(), "Read article directory");

        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_markdown_article() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        std::fs::write(&path, "# Campaign\n\nThe actor phished the helpdesk.").unwrap();

        let content = ArticleReader::read_article(&path).await.unwrap();
        assert!(content.contains("phished"));
    }

    #[tokio::test]
    async fn rejects_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, "binary").unwrap();

        assert!(ArticleReader::read_article(&path).await.is_err());
    }

    #[tokio::test]
    async fn walks_directories_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("2024");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("a.txt"), "first").unwrap();
        std::fs::write(nested.join("b.md"), "second").unwrap();
        std::fs::write(dir.path().join("skip.json"), "{}").unwrap();

        let articles = ArticleReader::read_directory(dir.path()).await.unwrap();
        assert_eq!(articles.len(), 2);
    }
}
