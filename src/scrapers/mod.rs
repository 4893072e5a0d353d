//! Article scraping: from a URL list to extracted page fields.
//!
//! Scraping follows a two-phase pattern:
//!
//! 1. **Indexing**: Read article URLs from the URL list file ([`index`])
//! 2. **Fetching**: Download each page's HTML ([`fetch`])
//!
//! and two extraction passes over the parsed document:
//!
//! | Module | Fields | Driven by |
//! |--------|--------|-----------|
//! | [`page`] | title, abstract, body text, top image, images, tags | generic metadata |
//! | [`fields`] | categories, publish date, authors | the site template |
//!
//! Extraction is synchronous and pure; only indexing and fetching touch I/O.

pub mod fetch;
pub mod fields;
pub mod index;
pub mod page;
