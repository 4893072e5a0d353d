//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: Writes the extracted articles and the category tree as JSON
//!
//! # Output Structure
//!
//! ```text
//! articles.json    # every article extracted in this run
//! categories.json  # [{"category": ..., "subcategories": [...]}, ...]
//! ```

pub mod json;
