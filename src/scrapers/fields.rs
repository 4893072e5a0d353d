//! Template-driven field extraction.
//!
//! Derives the fields that generic article parsing cannot find: the category
//! breadcrumb, the publish timestamp and the byline authors. Every lookup is
//! driven by a [`CompiledTemplate`], so these are positional heuristics for
//! one site layout rather than a general parser.

use crate::error::CrawlError;
use crate::template::CompiledTemplate;
use chrono::NaiveDateTime;
use scraper::{ElementRef, Html};
use tracing::debug;

/// Fields extracted from the page's site-specific markup.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFields {
    pub categories: Vec<String>,
    pub published_at: NaiveDateTime,
    pub authors: Vec<String>,
}

/// Extract categories, publish date and authors from a parsed page.
///
/// # Errors
///
/// - [`CrawlError::MissingStructure`] if the breadcrumb container or the date
///   element is absent.
/// - [`CrawlError::DateParse`] if the date text has the wrong shape.
pub fn extract_fields(document: &Html, template: &CompiledTemplate) -> Result<ExtractedFields, CrawlError> {
    let categories = extract_categories(document, template)?;
    let published_at = extract_published_at(document, template)?;
    let authors = extract_authors(document, template);
    debug!(
        categories = categories.len(),
        authors = authors.len(),
        %published_at,
        "Extracted template fields"
    );
    Ok(ExtractedFields {
        categories,
        published_at,
        authors,
    })
}

/// Texts of the links under the first breadcrumb container, in document order.
pub fn extract_categories(document: &Html, template: &CompiledTemplate) -> Result<Vec<String>, CrawlError> {
    let breadcrumb = document
        .select(&template.breadcrumb)
        .next()
        .ok_or_else(|| CrawlError::MissingStructure {
            selector: template.source.breadcrumb.clone(),
        })?;

    Ok(breadcrumb
        .select(&template.breadcrumb_link)
        .map(element_text)
        .collect())
}

/// Locate the date element and parse its text.
pub fn extract_published_at(document: &Html, template: &CompiledTemplate) -> Result<NaiveDateTime, CrawlError> {
    let date = document
        .select(&template.date)
        .next()
        .ok_or_else(|| CrawlError::MissingStructure {
            selector: template.source.date.clone(),
        })?;
    let text = date.text().collect::<String>();
    parse_publish_date(&text, template.date_format())
}

/// One author per byline paragraph that has a bold child, in document order.
///
/// Duplicates are kept. Paragraphs without a bold child contribute nothing.
pub fn extract_authors(document: &Html, template: &CompiledTemplate) -> Vec<String> {
    document
        .select(&template.byline)
        .filter_map(|paragraph| paragraph.select(&template.byline_author).next())
        .map(element_text)
        .collect()
}

/// Parse a page date of the form `<weekday>, <date>, <time> (<zone>)`.
///
/// The text must split on `", "` into exactly three parts. The timezone is
/// everything from the first `" ("` onward and is discarded; the remaining
/// date and time are joined as `date,time` and parsed with `format`.
///
/// Some pages put the time inside the parentheses instead
/// (`<weekday>, <date> (<time>, <zone>)`); that layout is accepted too.
pub fn parse_publish_date(text: &str, format: &str) -> Result<NaiveDateTime, CrawlError> {
    let text = text.trim();
    let parts: Vec<&str> = text.split(", ").collect();
    let [_weekday, date, trailing] = parts.as_slice() else {
        return Err(CrawlError::DateParse {
            text: text.to_string(),
            reason: format!("expected 3 comma-separated parts, found {}", parts.len()),
        });
    };

    let (date, time) = match date.split_once(" (") {
        Some((date, time)) => (date, time),
        None => (*date, strip_timezone(trailing)),
    };

    let stamp = format!("{},{}", date, time);
    NaiveDateTime::parse_from_str(&stamp, format).map_err(|e| CrawlError::DateParse {
        text: text.to_string(),
        reason: e.to_string(),
    })
}

fn strip_timezone(segment: &str) -> &str {
    segment.split(" (").next().unwrap_or(segment)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
