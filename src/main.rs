//! # News Harvest
//!
//! Crawls news article pages listed in a text file, extracts structured
//! records (title, abstract, body text, images, tags, category breadcrumb,
//! publish date, byline authors) and saves them as JSON. A second pass groups
//! the saved breadcrumbs into a category → subcategories tree.
//!
//! ## Usage
//!
//! ```sh
//! news_harvest -u urls.txt -a articles.json -c categories.json
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Indexing**: Read article URLs from the URL list
//! 2. **Fetching**: Download each page, one at a time
//! 3. **Extraction**: Parse generic metadata and template-specific fields
//! 4. **Normalization**: Filter images, trim the lead line, assign flags
//! 5. **Output**: Write the articles JSON, then aggregate it into categories JSON
//!
//! A failure on one URL is logged and skipped; it never stops the batch.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use news_harvest::categories;
use news_harvest::cli::{Cli, PremiumMode};
use news_harvest::normalize::{CoinFlip, FixedPremium, PremiumPolicy, SystemClock};
use news_harvest::outputs::json;
use news_harvest::pipeline::Crawler;
use news_harvest::scrapers::{self, fetch::HttpFetcher};
use news_harvest::template::SiteTemplate;
use news_harvest::utils::truncate_for_log;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_harvest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    if args.aggregate_only {
        info!(path = %args.articles_output.display(), "Skipping crawl; aggregating existing articles");
    } else {
        crawl(&args).await?;
    }

    // ---- Category aggregation ----
    let document = categories::extract_categories(&args.articles_output);
    if document.is_error() {
        warn!("Category aggregation produced an error document");
    }
    json::write_categories(&document, &args.categories_output).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Index, fetch, extract and save all articles from the URL list.
async fn crawl(args: &Cli) -> Result<(), Box<dyn Error>> {
    // ---- Load template ----
    let template = match &args.template {
        Some(path) => SiteTemplate::load(path).await?,
        None => SiteTemplate::default(),
    };
    let template = template.compile()?;
    info!(template = %template.name(), "Site template ready");

    // ---- Index ----
    let urls = scrapers::index::index_articles(&args.urls).await?;

    // ---- Fetch and extract, one URL at a time ----
    let fetcher = HttpFetcher::new(&args.user_agent)?;
    let premium: Box<dyn PremiumPolicy> = match args.premium {
        PremiumMode::Free => Box::new(FixedPremium(false)),
        PremiumMode::Premium => Box::new(FixedPremium(true)),
        PremiumMode::CoinFlip => Box::new(CoinFlip::from_entropy()),
    };
    let mut crawler = Crawler::new(fetcher, template, premium, SystemClock);
    let report = crawler.crawl(&urls, args.limit).await;

    for failure in &report.failures {
        debug!(
            url = %failure.url,
            error = %truncate_for_log(&failure.error.to_string(), 200),
            "Skipped URL"
        );
    }

    // ---- Save ----
    json::write_articles(&report.articles, &args.articles_output).await?;
    info!(
        saved = report.articles.len(),
        skipped = report.failures.len(),
        path = %args.articles_output.display(),
        "Successfully saved articles"
    );

    Ok(())
}
