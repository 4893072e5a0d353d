//! Extraction and aggregation core of News Harvest.
//!
//! - [`scrapers`]: URL list, page fetching and field extraction
//! - [`normalize`]: record cleanup with injectable premium policy and clock
//! - [`pipeline`]: the sequential per-URL crawl
//! - [`categories`]: category tree aggregation over saved articles
//! - [`outputs`]: JSON writers

pub mod categories;
pub mod cli;
pub mod error;
pub mod models;
pub mod normalize;
pub mod outputs;
pub mod pipeline;
pub mod scrapers;
pub mod template;
pub mod utils;

pub use categories::{CategoryDocument, extract_categories};
pub use error::{AggregationError, CrawlError};
pub use models::{ArticleRecord, ArticleStatus, Category, CategoryEntry, Timestamp};
pub use pipeline::{CrawlReport, Crawler};
pub use template::SiteTemplate;
