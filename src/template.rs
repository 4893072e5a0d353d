//! Site template configuration.
//!
//! Breadcrumb, publish-date and byline locations are conventions of one
//! source site's markup, not semantic HTML. They are described by a
//! [`SiteTemplate`] so the extractor can be pointed at another site without
//! touching the pipeline. Templates are plain YAML:
//!
//! ```yaml
//! name: vnexpress
//! breadcrumb: ul.breadcrumb
//! breadcrumb_link: a
//! date: span.date
//! byline: p.Normal
//! byline_author: strong
//! body: "p.description, article.fck_detail p.Normal"
//! image_marker: .jpg
//! date_format: "%d/%m/%Y,%H:%M"
//! ```
//!
//! Any key left out falls back to the VnExpress default.

use crate::error::CrawlError;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// Selectors and formats describing one source site's article markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteTemplate {
    /// Human-readable template name, used in logs.
    pub name: String,
    /// Container holding the category breadcrumb.
    pub breadcrumb: String,
    /// Links inside the breadcrumb container, one per category level.
    pub breadcrumb_link: String,
    /// Element whose text is the publish date.
    pub date: String,
    /// Body-text paragraphs that may carry a byline.
    pub byline: String,
    /// Bold/strong child of a byline paragraph holding the author name.
    pub byline_author: String,
    /// Elements whose text makes up the article body, in document order.
    pub body: String,
    /// Substring an image URL must contain to be kept.
    pub image_marker: String,
    /// `chrono` format for the recombined `date,time` string.
    pub date_format: String,
}

impl Default for SiteTemplate {
    fn default() -> Self {
        Self {
            name: "vnexpress".to_string(),
            breadcrumb: "ul.breadcrumb".to_string(),
            breadcrumb_link: "a".to_string(),
            date: "span.date".to_string(),
            byline: "p.Normal".to_string(),
            byline_author: "strong".to_string(),
            body: "p.description, article.fck_detail p.Normal".to_string(),
            image_marker: ".jpg".to_string(),
            date_format: "%d/%m/%Y,%H:%M".to_string(),
        }
    }
}

impl SiteTemplate {
    /// Parse a template from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, CrawlError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a template from a YAML file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, CrawlError> {
        let text = tokio::fs::read_to_string(path).await?;
        let template = Self::from_yaml(&text)?;
        info!(name = %template.name, "Loaded site template");
        Ok(template)
    }

    /// Compile every selector, failing on the first invalid one.
    pub fn compile(&self) -> Result<CompiledTemplate, CrawlError> {
        Ok(CompiledTemplate {
            breadcrumb: parse_selector(&self.breadcrumb)?,
            breadcrumb_link: parse_selector(&self.breadcrumb_link)?,
            date: parse_selector(&self.date)?,
            byline: parse_selector(&self.byline)?,
            byline_author: parse_selector(&self.byline_author)?,
            body: parse_selector(&self.body)?,
            source: self.clone(),
        })
    }
}

/// A [`SiteTemplate`] with its selectors compiled once, ready for extraction.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    pub breadcrumb: Selector,
    pub breadcrumb_link: Selector,
    pub date: Selector,
    pub byline: Selector,
    pub byline_author: Selector,
    pub body: Selector,
    pub source: SiteTemplate,
}

impl CompiledTemplate {
    pub fn name(&self) -> &str {
        &self.source.name
    }

    pub fn image_marker(&self) -> &str {
        &self.source.image_marker
    }

    pub fn date_format(&self) -> &str {
        &self.source.date_format
    }
}

fn parse_selector(selector: &str) -> Result<Selector, CrawlError> {
    Selector::parse(selector).map_err(|e| CrawlError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_compiles() {
        let compiled = SiteTemplate::default().compile().unwrap();
        assert_eq!(compiled.name(), "vnexpress");
        assert_eq!(compiled.image_marker(), ".jpg");
        assert_eq!(compiled.date_format(), "%d/%m/%Y,%H:%M");
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let template = SiteTemplate::from_yaml("name: other\nbreadcrumb: nav.crumbs\n").unwrap();
        assert_eq!(template.name, "other");
        assert_eq!(template.breadcrumb, "nav.crumbs");
        assert_eq!(template.date, "span.date");
        assert_eq!(template.byline_author, "strong");
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let template = SiteTemplate {
            date: "span[".to_string(),
            ..Default::default()
        };
        match template.compile() {
            Err(CrawlError::InvalidSelector { selector, .. }) => assert_eq!(selector, "span["),
            other => panic!("expected InvalidSelector, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_yaml_is_template_error() {
        let err = SiteTemplate::from_yaml("breadcrumb: [unclosed").unwrap_err();
        assert!(matches!(err, CrawlError::Template(_)));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.yaml");
        std::fs::write(&path, "name: file-site\nimage_marker: .png\n").unwrap();

        let template = SiteTemplate::load(&path).await.unwrap();
        assert_eq!(template.name, "file-site");
        assert_eq!(template.image_marker, ".png");
    }
}
