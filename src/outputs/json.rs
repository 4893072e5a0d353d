//! JSON output files.
//!
//! Both outputs are pretty-printed UTF-8 with two-space indentation and
//! non-ASCII text written as-is (Vietnamese titles stay readable):
//!
//! ```text
//! articles.json     # array of article records
//! categories.json   # category tree, or an error document
//! ```

use crate::categories::CategoryDocument;
use crate::error::CrawlError;
use crate::models::ArticleRecord;
use crate::utils::ensure_parent_dir;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write the extracted articles as a JSON array.
///
/// Creates the parent directory if needed and overwrites any existing file.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = articles.len()))]
pub async fn write_articles(articles: &[ArticleRecord], path: &Path) -> Result<(), CrawlError> {
    let json = serde_json::to_string_pretty(articles)?;
    write_file(path, json).await?;
    info!("Wrote articles JSON");
    Ok(())
}

/// Write an aggregation result, tree or error document alike.
#[instrument(level = "info", skip_all, fields(path = %path.display(), failed = document.is_error()))]
pub async fn write_categories(document: &CategoryDocument, path: &Path) -> Result<(), CrawlError> {
    let json = document.to_json_pretty()?;
    write_file(path, json).await?;
    info!("Wrote categories JSON");
    Ok(())
}

async fn write_file(path: &Path, contents: String) -> Result<(), CrawlError> {
    ensure_parent_dir(path).await?;
    if let Err(e) = fs::write(path, contents).await {
        error!(error = %e, "Failed to write JSON file");
        return Err(e.into());
    }
    Ok(())
}
