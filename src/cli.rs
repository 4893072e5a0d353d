//! Command-line interface definitions for News Harvest.
//!
//! All arguments can be provided via command-line flags or environment
//! variables; every one has a default, so a bare `news_harvest` crawls
//! `urls.txt` and writes `articles.json` and `categories.json`.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::scrapers::fetch::DEFAULT_USER_AGENT;

/// How the premium flag is assigned to extracted articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PremiumMode {
    /// Every article is free.
    Free,
    /// Every article is premium.
    Premium,
    /// Random per article, like sample data generation.
    CoinFlip,
}

/// Command-line arguments for the News Harvest application.
///
/// # Examples
///
/// ```sh
/// # Crawl urls.txt and build the category tree
/// news_harvest
///
/// # Custom paths, first 5 articles only
/// news_harvest -u links.txt -a out/articles.json -c out/categories.json --limit 5
///
/// # Rebuild categories.json from an existing articles file
/// news_harvest --aggregate-only
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Text file with one article URL per line (only `.html` URLs are used)
    #[arg(short, long, env = "NEWS_HARVEST_URLS", default_value = "urls.txt")]
    pub urls: PathBuf,

    /// Output file for the extracted articles
    #[arg(short, long, env = "NEWS_HARVEST_ARTICLES", default_value = "articles.json")]
    pub articles_output: PathBuf,

    /// Output file for the aggregated category tree
    #[arg(short, long, env = "NEWS_HARVEST_CATEGORIES", default_value = "categories.json")]
    pub categories_output: PathBuf,

    /// Optional YAML site template overriding the built-in selectors
    #[arg(short, long, env = "NEWS_HARVEST_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Stop after this many articles were extracted successfully
    #[arg(short, long, env = "NEWS_HARVEST_LIMIT")]
    pub limit: Option<usize>,

    /// How to assign the premium flag
    #[arg(long, env = "NEWS_HARVEST_PREMIUM", value_enum, default_value_t = PremiumMode::Free)]
    pub premium: PremiumMode,

    /// Skip crawling and only rebuild the category tree from the articles file
    #[arg(long, env = "NEWS_HARVEST_AGGREGATE_ONLY")]
    pub aggregate_only: bool,

    /// User agent sent with every page request
    #[arg(long, env = "NEWS_HARVEST_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}
