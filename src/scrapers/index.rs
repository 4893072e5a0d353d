//! Article URL list loading.
//!
//! The crawl input is a plain text file with one URL per line. Lines are
//! trimmed and only those ending in `.html` are kept, in file order; section
//! pages, feeds and blank lines drop out.

use crate::error::CrawlError;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Read the URL list file and return the article URLs in file order.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn index_articles(path: &Path) -> Result<Vec<String>, CrawlError> {
    let text = tokio::fs::read_to_string(path).await?;
    let article_urls = article_urls(&text);

    info!(count = article_urls.len(), "Indexed article URLs");
    debug!(urls = ?article_urls, "Article URLs");

    Ok(article_urls)
}

/// Keep trimmed lines ending in `.html`.
pub fn article_urls(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.ends_with(".html"))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_html_lines_kept_in_order() {
        let text = "https://vnexpress.net/b-2.html\n\
                    https://vnexpress.net/thoi-su\n\
                    \n\
                    https://vnexpress.net/a-1.html  \r\n\
                    https://vnexpress.net/rss/tin-moi-nhat.rss\n\
                    https://vnexpress.net/c-3.html?utm=x\n";
        assert_eq!(
            article_urls(text),
            vec!["https://vnexpress.net/b-2.html", "https://vnexpress.net/a-1.html"]
        );
    }

    #[test]
    fn test_empty_list() {
        assert!(article_urls("").is_empty());
    }

    #[tokio::test]
    async fn test_index_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "https://example.com/x.html\nhttps://example.com/\n").unwrap();

        let urls = index_articles(&path).await.unwrap();
        assert_eq!(urls, vec!["https://example.com/x.html"]);
    }

    #[tokio::test]
    async fn test_missing_list_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = index_articles(&dir.path().join("nope.txt")).await.unwrap_err();
        assert!(matches!(err, CrawlError::Io(_)));
    }
}
