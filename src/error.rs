//! Error types for crawling and category aggregation.
//!
//! Two families exist because they have different recovery contracts:
//!
//! - [`CrawlError`]: anything that can go wrong for a single URL (fetch,
//!   missing markup, unparseable date) plus the configuration/I-O errors that
//!   happen before or after the batch. Per-URL variants never escape the batch
//!   loop; see [`CrawlError::is_per_url`].
//! - [`AggregationError`]: faults while reading the saved articles file. The
//!   aggregator turns every one of these into a structured error document.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching and extracting articles.
#[derive(Error, Debug)]
pub enum CrawlError {
    /// Network or download failure for a single URL.
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Expected breadcrumb or date markup is absent from the page.
    #[error("Missing page structure: no element matches `{selector}`")]
    MissingStructure { selector: String },

    /// Publish date text does not have the weekday/date/time shape.
    #[error("Unrecognized publish date `{text}`: {reason}")]
    DateParse { text: String, reason: String },

    /// A site template selector could not be compiled.
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The site template file could not be parsed.
    #[error("Invalid site template: {0}")]
    Template(#[from] serde_yaml::Error),

    /// Serializing articles failed.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading the URL list or writing outputs failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CrawlError {
    /// `true` for errors that only affect the URL being processed.
    pub fn is_per_url(&self) -> bool {
        matches!(
            self,
            CrawlError::Fetch { .. } | CrawlError::MissingStructure { .. } | CrawlError::DateParse { .. }
        )
    }
}

impl From<reqwest::Error> for CrawlError {
    fn from(err: reqwest::Error) -> Self {
        CrawlError::Fetch {
            url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            reason: err.to_string(),
        }
    }
}

/// Errors raised while aggregating categories from a saved articles file.
#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid JSON in file: {}", .0.display())]
    InvalidJson(PathBuf),

    #[error("Error processing file: {0}")]
    Other(String),
}

impl From<std::io::Error> for AggregationError {
    fn from(err: std::io::Error) -> Self {
        AggregationError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_url_classification() {
        let fetch = CrawlError::Fetch {
            url: "https://example.com/a.html".to_string(),
            reason: "connection refused".to_string(),
        };
        let missing = CrawlError::MissingStructure { selector: "ul.breadcrumb".to_string() };
        let date = CrawlError::DateParse { text: "yesterday".to_string(), reason: "bad shape".to_string() };
        let io = CrawlError::Io(std::io::Error::other("disk full"));

        assert!(fetch.is_per_url());
        assert!(missing.is_per_url());
        assert!(date.is_per_url());
        assert!(!io.is_per_url());
    }

    #[test]
    fn test_aggregation_messages() {
        let err = AggregationError::FileNotFound(PathBuf::from("./articles.json"));
        assert_eq!(err.to_string(), "File not found: ./articles.json");

        let err = AggregationError::InvalidJson(PathBuf::from("broken.json"));
        assert_eq!(err.to_string(), "Invalid JSON in file: broken.json");

        let err = AggregationError::Other("boom".to_string());
        assert_eq!(err.to_string(), "Error processing file: boom");
    }

    #[test]
    fn test_missing_structure_names_selector() {
        let err = CrawlError::MissingStructure { selector: "span.date".to_string() };
        assert!(err.to_string().contains("span.date"));
    }
}
