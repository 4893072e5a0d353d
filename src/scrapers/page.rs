//! Generic article parsing: title, abstract, body text, images and tags.
//!
//! This is the site-independent half of extraction. It reads the metadata
//! most news pages carry (Open Graph, `meta` description/keywords) with
//! simple fallbacks, and collects the body text from the template's body
//! selector. The site-specific half lives in [`super::fields`].

use crate::template::CompiledTemplate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use url::Url;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Generic fields of an article page, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPage {
    pub title: String,
    pub abstract_text: String,
    /// Body blocks joined by blank lines; the first block is usually the lead.
    pub text: String,
    pub top_image: String,
    pub images: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

/// Parse the generic fields of an article page.
///
/// Relative image URLs are resolved against `base`, when given.
pub fn parse_page(document: &Html, base: Option<&Url>, template: &CompiledTemplate) -> ParsedPage {
    let images = collect_images(document, base);
    let top_image = meta_content(document, &["og:image", "twitter:image"])
        .map(|src| resolve(base, &src))
        .or_else(|| first_image(document, base))
        .unwrap_or_default();

    ParsedPage {
        title: extract_title(document),
        abstract_text: meta_content(document, &["description", "og:description"]).unwrap_or_default(),
        text: body_text(document, &template.body),
        top_image,
        images,
        tags: collect_tags(document),
    }
}

/// `og:title`, then `<title>`, then the first `<h1>`.
fn extract_title(document: &Html) -> String {
    if let Some(title) = meta_content(document, &["og:title"]) {
        return title;
    }
    for tag in ["title", "h1"] {
        if let Some(text) = first_text(document, tag) {
            return text;
        }
    }
    String::new()
}

fn body_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .map(collapsed_text)
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn collect_images(document: &Html, base: Option<&Url>) -> BTreeSet<String> {
    let Ok(selector) = Selector::parse("img") else {
        return BTreeSet::new();
    };
    document
        .select(&selector)
        .filter_map(image_source)
        .map(|src| resolve(base, src))
        .collect()
}

fn first_image(document: &Html, base: Option<&Url>) -> Option<String> {
    let selector = Selector::parse("img").ok()?;
    document
        .select(&selector)
        .find_map(image_source)
        .map(|src| resolve(base, src))
}

fn image_source(img: ElementRef<'_>) -> Option<&str> {
    let value = img.value();
    value
        .attr("src")
        .or_else(|| value.attr("data-src"))
        .map(str::trim)
        .filter(|src| !src.is_empty() && !src.starts_with("data:"))
}

/// Keywords meta lists plus `rel="tag"` link texts.
fn collect_tags(document: &Html) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    for name in ["keywords", "news_keywords"] {
        if let Some(list) = meta_content(document, &[name]) {
            tags.extend(
                list.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(String::from),
            );
        }
    }
    if let Ok(selector) = Selector::parse("a[rel~=\"tag\"]") {
        tags.extend(
            document
                .select(&selector)
                .map(collapsed_text)
                .filter(|tag| !tag.is_empty()),
        );
    }
    tags
}

/// First non-empty `content` among `meta[name=..]` / `meta[property=..]` keys.
fn meta_content(document: &Html, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        let selector = Selector::parse(&format!("meta[name=\"{key}\"], meta[property=\"{key}\"]")).ok()?;
        document
            .select(&selector)
            .filter_map(|meta| meta.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
            .map(String::from)
    })
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .map(collapsed_text)
        .find(|text| !text.is_empty())
}

fn collapsed_text(element: ElementRef<'_>) -> String {
    let text = element.text().collect::<String>();
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

fn resolve(base: Option<&Url>, src: &str) -> String {
    base.and_then(|base| base.join(src).ok())
        .map(|url| url.to_string())
        .unwrap_or_else(|| src.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::SiteTemplate;

    const PAGE: &str = r#"
        <html>
        <head>
          <title>Fallback title - VnExpress</title>
          <meta property="og:title" content="Hà Nội mở rộng tuyến metro">
          <meta name="description" content="Tuyến metro số 3 sẽ kéo dài thêm 4 km.">
          <meta property="og:image" content="https://i.example.com/share/top.jpg">
          <meta name="keywords" content="metro, Hà Nội , giao thông,">
        </head>
        <body>
          <p class="description">Tuyến metro số 3   sẽ kéo dài
             thêm 4 km.</p>
          <article class="fck_detail">
            <p class="Normal">First body paragraph.</p>
            <figure><img src="/images/a.jpg" alt=""></figure>
            <p class="Normal">   </p>
            <p class="Normal">Second body paragraph.</p>
            <img data-src="https://cdn.example.com/b.png">
            <img src="data:image/gif;base64,R0lGOD">
            <p class="Normal" style="text-align:right;"><strong>Võ Hải</strong></p>
          </article>
          <a rel="tag" href="/tag/metro">Đường sắt đô thị</a>
        </body>
        </html>
    "#;

    fn parse(html: &str, base: Option<&str>) -> ParsedPage {
        let document = Html::parse_document(html);
        let base = base.map(|b| Url::parse(b).unwrap());
        let template = SiteTemplate::default().compile().unwrap();
        parse_page(&document, base.as_ref(), &template)
    }

    #[test]
    fn test_metadata_fields() {
        let page = parse(PAGE, Some("https://vnexpress.net/ha-noi-metro-123.html"));
        assert_eq!(page.title, "Hà Nội mở rộng tuyến metro");
        assert_eq!(page.abstract_text, "Tuyến metro số 3 sẽ kéo dài thêm 4 km.");
        assert_eq!(page.top_image, "https://i.example.com/share/top.jpg");
    }

    #[test]
    fn test_body_text_blocks() {
        let page = parse(PAGE, None);
        assert_eq!(
            page.text,
            "Tuyến metro số 3 sẽ kéo dài thêm 4 km.\n\nFirst body paragraph.\n\nSecond body paragraph.\n\nVõ Hải"
        );
    }

    #[test]
    fn test_images_resolved_and_data_uris_skipped() {
        let page = parse(PAGE, Some("https://vnexpress.net/ha-noi-metro-123.html"));
        let expected: BTreeSet<String> = ["https://vnexpress.net/images/a.jpg", "https://cdn.example.com/b.png"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(page.images, expected);
    }

    #[test]
    fn test_tags_from_keywords_and_links() {
        let page = parse(PAGE, None);
        let expected: BTreeSet<String> = ["metro", "Hà Nội", "giao thông", "Đường sắt đô thị"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(page.tags, expected);
    }

    #[test]
    fn test_title_fallbacks() {
        let page = parse("<html><head><title> Plain title </title></head></html>", None);
        assert_eq!(page.title, "Plain title");

        let page = parse("<html><body><h1>Heading only</h1></body></html>", None);
        assert_eq!(page.title, "Heading only");

        let page = parse("<html><body><p>nothing</p></body></html>", None);
        assert_eq!(page.title, "");
    }

    #[test]
    fn test_top_image_falls_back_to_first_image() {
        let page = parse(
            r#"<html><body><img src="one.jpg"><img src="two.jpg"></body></html>"#,
            Some("https://example.com/news/story.html"),
        );
        assert_eq!(page.top_image, "https://example.com/news/one.jpg");
    }

    #[test]
    fn test_empty_page() {
        let page = parse("<html></html>", None);
        assert_eq!(page, ParsedPage::default());
    }
}
