//! Category tree aggregation over saved articles.
//!
//! Reads the articles JSON written by a crawl and groups the breadcrumb pairs
//! into `category → {subcategories}`. The input is read untyped so that
//! partially populated or foreign records still aggregate: only the
//! `categories` key matters, and a record without at least two entries is
//! skipped.
//!
//! # Error Contract
//!
//! [`extract_categories`] never fails. Every fault becomes a
//! [`CategoryDocument::Failed`] document:
//!
//! ```json
//! { "error": "File not found: ./articles.json", "categories": [] }
//! ```

use crate::error::AggregationError;
use crate::models::{Category, CategoryEntry};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, error, info, instrument};

/// Result of an aggregation run, ready to be written as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CategoryDocument {
    /// One entry per top-level category, in first-seen order.
    Tree(Vec<CategoryEntry>),
    /// Structured error in place of the tree.
    Failed { error: String, categories: Vec<CategoryEntry> },
}

impl CategoryDocument {
    pub fn failed(err: &AggregationError) -> Self {
        CategoryDocument::Failed {
            error: err.to_string(),
            categories: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CategoryDocument::Failed { .. })
    }

    /// Pretty JSON with non-ASCII text left unescaped.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Aggregate the articles file at `path` into a category document.
///
/// Missing files, invalid JSON and any other fault are reported inside the
/// returned document rather than as an error.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn extract_categories(path: &Path) -> CategoryDocument {
    match try_extract_categories(path) {
        Ok(entries) => {
            info!(categories = entries.len(), "Aggregated categories");
            CategoryDocument::Tree(entries)
        }
        Err(e) => {
            error!(error = %e, "Category aggregation failed");
            CategoryDocument::failed(&e)
        }
    }
}

fn try_extract_categories(path: &Path) -> Result<Vec<CategoryEntry>, AggregationError> {
    if !path.exists() {
        return Err(AggregationError::FileNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    let data: Value = serde_json::from_str(&text).map_err(|_| AggregationError::InvalidJson(path.to_path_buf()))?;

    let records = match data {
        Value::Array(items) => items,
        other => vec![other],
    };
    let tree = aggregate(&records)?;
    Ok(tree.iter().map(CategoryEntry::from).collect())
}

/// Group `(categories[0], categories[1])` pairs by top-level category.
///
/// Categories keep first-insertion order. Records whose `categories` is
/// missing or has fewer than two entries are skipped.
///
/// # Errors
///
/// [`AggregationError::Other`] when a record is not an object, its
/// `categories` is not an array, or one of the first two entries is not a
/// string.
pub fn aggregate(records: &[Value]) -> Result<Vec<Category>, AggregationError> {
    let mut tree: Vec<Category> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let object = record
            .as_object()
            .ok_or_else(|| AggregationError::Other(format!("record {index} is not an object")))?;

        let categories: &[Value] = match object.get("categories") {
            None | Some(Value::Null) => &[],
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => {
                return Err(AggregationError::Other(format!(
                    "record {index}: `categories` is not an array"
                )));
            }
        };

        let [main, sub, ..] = categories else {
            debug!(index, entries = categories.len(), "Skipping record with fewer than 2 categories");
            continue;
        };
        let main = category_name(main, index)?;
        let sub = category_name(sub, index)?;

        let position = match tree.iter().position(|c| c.name == main) {
            Some(position) => position,
            None => {
                tree.push(Category::new(main));
                tree.len() - 1
            }
        };
        tree[position].add_subcategory(sub);
    }

    Ok(tree)
}

fn category_name(value: &Value, index: usize) -> Result<&str, AggregationError> {
    value
        .as_str()
        .ok_or_else(|| AggregationError::Other(format!("record {index}: category {value} is not a string")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn write_temp(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    fn as_set(items: &[String]) -> BTreeSet<&str> {
        items.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_aggregate_groups_and_skips_short() {
        let records = vec![
            json!({"categories": ["World", "Asia"]}),
            json!({"categories": ["World", "Europe"]}),
            json!({"categories": ["Sports"]}),
        ];
        let tree = aggregate(&records).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "World");
        let entry = CategoryEntry::from(&tree[0]);
        assert_eq!(as_set(&entry.subcategories), BTreeSet::from(["Asia", "Europe"]));
    }

    #[test]
    fn test_first_insertion_order_and_dedupe() {
        let records = vec![
            json!({"categories": ["Sports", "Football"]}),
            json!({"categories": ["World", "Asia"]}),
            json!({"categories": ["Sports", "Football", "Premier League"]}),
            json!({"categories": ["Business", "Markets"]}),
            json!({"categories": ["World", "Asia"]}),
        ];
        let tree = aggregate(&records).unwrap();
        let names: Vec<&str> = tree.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Sports", "World", "Business"]);
        assert_eq!(tree[0].subcategories(), vec!["Football"]);
        assert_eq!(tree[1].subcategories(), vec!["Asia"]);
    }

    #[test]
    fn test_missing_or_null_categories_skipped() {
        let records = vec![json!({"title": "no categories"}), json!({"categories": null}), json!({"categories": []})];
        assert!(aggregate(&records).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_record_is_error() {
        let err = aggregate(&[json!(42)]).unwrap_err();
        assert!(matches!(err, AggregationError::Other(_)));
    }

    #[test]
    fn test_file_aggregation_document() {
        let (_dir, path) = write_temp(
            r#"[
                {"title": "a", "categories": ["World", "Asia"]},
                {"title": "b", "categories": ["World", "Europe"]},
                {"title": "c", "categories": ["Sports"]}
            ]"#,
        );
        let doc = extract_categories(&path);
        let CategoryDocument::Tree(entries) = &doc else {
            panic!("expected tree, got {doc:?}");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, "World");
        assert_eq!(as_set(&entries[0].subcategories), BTreeSet::from(["Asia", "Europe"]));

        let value: Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value[0]["category"], "World");
        assert_eq!(value[0]["subcategories"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_single_object_is_wrapped() {
        let (_dir, path) = write_temp(r#"{"categories": ["Thời sự", "Giao thông"]}"#);
        let doc = extract_categories(&path);
        assert_eq!(
            doc,
            CategoryDocument::Tree(vec![CategoryEntry {
                category: "Thời sự".to_string(),
                subcategories: vec!["Giao thông".to_string()],
            }])
        );
        assert!(doc.to_json_pretty().unwrap().contains("Thời sự"));
    }

    #[test]
    fn test_missing_file_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let doc = extract_categories(&path);
        assert!(doc.is_error());

        let value: Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert!(value["error"].as_str().unwrap().starts_with("File not found: "));
        assert!(value["error"].as_str().unwrap().ends_with("missing.json"));
        assert_eq!(value["categories"], json!([]));
    }

    #[test]
    fn test_invalid_json_document() {
        let (_dir, path) = write_temp("[{\"categories\": [\"World\", ");
        let value = serde_json::to_value(extract_categories(&path)).unwrap();
        assert!(value["error"].as_str().unwrap().starts_with("Invalid JSON in file: "));
        assert_eq!(value["categories"], json!([]));
    }

    #[test]
    fn test_other_fault_document() {
        let (_dir, path) = write_temp(r#"[{"categories": "World/Asia"}]"#);
        let value = serde_json::to_value(extract_categories(&path)).unwrap();
        assert!(value["error"].as_str().unwrap().starts_with("Error processing file: "));
        assert_eq!(value["categories"], json!([]));
    }

    #[test]
    fn test_empty_array_gives_empty_tree() {
        let (_dir, path) = write_temp("[]");
        assert_eq!(extract_categories(&path), CategoryDocument::Tree(Vec::new()));
        assert_eq!(extract_categories(&path).to_json_pretty().unwrap(), "[]");
    }
}
