//! Data models for extracted articles and the aggregated category tree.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleRecord`]: One fully extracted and normalized article
//! - [`ArticleStatus`]: Editorial workflow state carried by each record
//! - [`Timestamp`]: A date-time that tolerates unparsed placeholder values
//! - [`Category`] / [`CategoryEntry`]: The category → subcategories tree
//!
//! Field names follow the JSON layout consumed downstream, so the serialized
//! form of an [`ArticleRecord`] is the persisted artifact of a crawl.

use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// ISO-8601 layout used for every serialized timestamp.
///
/// `%.f` only emits a fraction when the value has sub-second precision, so a
/// whole-minute publish date renders as `2025-03-12T10:15:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Editorial workflow state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Published,
    Rejected,
}

/// A point in time attached to an article.
///
/// Records may be partially populated, so a timestamp field can also hold a
/// raw text value. Raw values serialize as their literal text rather than
/// failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// A parsed local date-time (no timezone; the page's zone is discarded).
    At(NaiveDateTime),
    /// Placeholder or unparseable text, kept verbatim.
    Raw(String),
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Raw(String::new())
    }
}

impl Timestamp {
    /// The parsed date-time, if this timestamp holds one.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Timestamp::At(dt) => Some(*dt),
            Timestamp::Raw(_) => None,
        }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Timestamp::At(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::At(dt) => write!(f, "{}", dt.format(TIMESTAMP_FORMAT)),
            Timestamp::Raw(text) => f.write_str(text),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(match NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT) {
            Ok(dt) => Timestamp::At(dt),
            Err(_) => Timestamp::Raw(text),
        })
    }
}

/// One extracted and normalized news article.
///
/// Created once per URL, fully populated in a single pass and serialized
/// once. `content_images` and `tags` are sets; their serialized order is not
/// part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub content: String,
    pub top_image: String,
    pub content_images: BTreeSet<String>,
    /// Breadcrumb order: index 0 is the top-level category, index 1 the subcategory.
    pub categories: Vec<String>,
    pub tags: BTreeSet<String>,
    /// Byline authors in document order, duplicates kept.
    pub authors: Vec<String>,
    pub status: ArticleStatus,
    pub is_premium: bool,
    pub published_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ArticleRecord {
    /// The `(category, subcategory)` pair used by aggregation, if present.
    pub fn category_pair(&self) -> Option<(&str, &str)> {
        match self.categories.as_slice() {
            [main, sub, ..] => Some((main.as_str(), sub.as_str())),
            _ => None,
        }
    }
}

/// A top-level category and the distinct subcategories seen under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    subcategories: HashSet<String>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subcategories: HashSet::new(),
        }
    }

    /// Add a subcategory; duplicates are ignored.
    pub fn add_subcategory(&mut self, subcategory: impl Into<String>) {
        self.subcategories.insert(subcategory.into());
    }

    /// Remove a subcategory. Removing an unknown name is a no-op.
    pub fn remove_subcategory(&mut self, subcategory: &str) {
        self.subcategories.remove(subcategory);
    }

    pub fn contains(&self, subcategory: &str) -> bool {
        self.subcategories.contains(subcategory)
    }

    /// Subcategories in sorted order.
    pub fn subcategories(&self) -> Vec<String> {
        self.subcategories.iter().sorted().cloned().collect()
    }
}

/// Serialized form of a [`Category`]: `{"category": ..., "subcategories": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub category: String,
    pub subcategories: Vec<String>,
}

impl From<&Category> for CategoryEntry {
    fn from(category: &Category) -> Self {
        Self {
            category: category.name.clone(),
            subcategories: category.subcategories(),
        }
    }
}
