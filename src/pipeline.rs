//! Sequential crawl of a URL list into article records.
//!
//! One URL is fetched and fully processed (parse → extract → normalize)
//! before the next starts. A failure for one URL is logged and recorded in
//! the [`CrawlReport`]; the batch always runs to the end of the list or the
//! configured limit.

use crate::error::CrawlError;
use crate::models::ArticleRecord;
use crate::normalize::{Clock, PremiumPolicy, normalize};
use crate::scrapers::fetch::FetchHtml;
use crate::scrapers::fields::extract_fields;
use crate::scrapers::page::parse_page;
use crate::template::CompiledTemplate;
use scraper::Html;
use tracing::{debug, error, info, instrument};
use url::Url;

/// A URL that could not be turned into an article.
#[derive(Debug)]
pub struct UrlFailure {
    pub url: String,
    pub error: CrawlError,
}

/// Outcome of a crawl: the extracted articles plus per-URL failures.
#[derive(Debug, Default)]
pub struct CrawlReport {
    pub articles: Vec<ArticleRecord>,
    pub failures: Vec<UrlFailure>,
}

impl CrawlReport {
    pub fn attempted(&self) -> usize {
        self.articles.len() + self.failures.len()
    }
}

/// Crawls article pages with one fetcher, site template, premium policy and clock.
pub struct Crawler<F, P, C> {
    fetcher: F,
    template: CompiledTemplate,
    premium: P,
    clock: C,
}

impl<F, P, C> Crawler<F, P, C>
where
    F: FetchHtml,
    P: PremiumPolicy,
    C: Clock,
{
    pub fn new(fetcher: F, template: CompiledTemplate, premium: P, clock: C) -> Self {
        Self {
            fetcher,
            template,
            premium,
            clock,
        }
    }

    /// Crawl `urls` in order.
    ///
    /// With `limit`, the crawl stops once that many articles were extracted
    /// successfully; failed URLs do not count toward it.
    #[instrument(level = "info", skip_all, fields(urls = urls.len(), template = %self.template.name()))]
    pub async fn crawl(&mut self, urls: &[String], limit: Option<usize>) -> CrawlReport {
        let mut report = CrawlReport::default();

        for (index, url) in urls.iter().enumerate() {
            if limit.is_some_and(|max| report.articles.len() >= max) {
                info!(limit = ?limit, "Article limit reached; stopping crawl");
                break;
            }

            info!(index, %url, "Getting article");
            match self.scrape(url).await {
                Ok(article) => {
                    debug!(index, %url, title = %article.title, "Extracted article");
                    report.articles.push(article);
                }
                Err(e) => {
                    error!(index, %url, error = %e, "Error processing article; skipping");
                    report.failures.push(UrlFailure {
                        url: url.clone(),
                        error: e,
                    });
                }
            }
        }

        info!(
            succeeded = report.articles.len(),
            failed = report.failures.len(),
            total = urls.len(),
            "Crawl complete"
        );
        report
    }

    /// Fetch one URL and extract its article.
    pub async fn scrape(&mut self, url: &str) -> Result<ArticleRecord, CrawlError> {
        let html = self.fetcher.fetch_html(url).await?;
        self.extract(url, &html)
    }

    /// Extract an article from already-fetched HTML.
    ///
    /// `url` is used to resolve relative image links.
    pub fn extract(&mut self, url: &str, html: &str) -> Result<ArticleRecord, CrawlError> {
        let document = Html::parse_document(html);
        let base = Url::parse(url).ok();
        let fields = extract_fields(&document, &self.template)?;
        let page = parse_page(&document, base.as_ref(), &self.template);
        Ok(normalize(
            page,
            fields,
            self.template.image_marker(),
            &mut self.premium,
            &self.clock,
        ))
    }
}
