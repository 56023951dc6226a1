//! Output directory layout
//!
//! Text articles land directly in the output directory as `<title>.txt`; PDF
//! renditions land in `<output>/PDF/<short-name>.pdf`. Existing files are
//! overwritten.

use crate::CrawlError;
use std::path::{Path, PathBuf};

/// Subdirectory of the output directory that receives PDF renditions
pub const PDF_DIR: &str = "PDF";

/// Writes crawl artifacts below one output directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    /// Creates the output directory (and parents) if needed
    pub async fn create(root: impl Into<PathBuf>) -> Result<Self, CrawlError> {
        let root = root.into();
        create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pdf_dir(&self) -> PathBuf {
        self.root.join(PDF_DIR)
    }

    /// Creates `<output>/PDF/` if needed
    pub async fn ensure_pdf_dir(&self) -> Result<PathBuf, CrawlError> {
        let dir = self.pdf_dir();
        create_dir_all(&dir).await?;
        Ok(dir)
    }

    /// Writes `body` to `<output>/<title>.txt`
    pub async fn write_text(&self, title: &str, body: &str) -> Result<PathBuf, CrawlError> {
        let path = self.root.join(format!("{}.txt", file_stem(title)));
        write_file(&path, body.as_bytes()).await?;
        Ok(path)
    }

    /// Writes `bytes` to `<output>/PDF/<short_name>.pdf`
    pub async fn write_pdf(&self, short_name: &str, bytes: &[u8]) -> Result<PathBuf, CrawlError> {
        let dir = self.ensure_pdf_dir().await?;
        let path = dir.join(format!("{}.pdf", file_stem(short_name)));
        write_file(&path, bytes).await?;
        Ok(path)
    }
}

/// Replaces path separators so a title can never leave the output directory
///
/// Wikipedia titles such as "AC/DC" would otherwise name a subdirectory.
pub fn file_stem(name: &str) -> String {
    let stem = name.replace(['/', '\\'], "_");
    if matches!(stem.as_str(), "" | "." | "..") {
        format!("_{}", stem)
    } else {
        stem
    }
}

async fn create_dir_all(path: &Path) -> Result<(), CrawlError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| io_error(path, source))
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), CrawlError> {
    tracing::debug!("Writing {} bytes to {}", contents.len(), path.display());
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> CrawlError {
    CrawlError::Io {
        path: path.display().to_string(),
        source,
    }
}
