//! Post-extraction cleanup of article records.
//!
//! Normalization turns a parsed page plus its template fields into the final
//! [`ArticleRecord`]:
//!
//! 1. Image URLs are filtered by a plain substring check (`.jpg` by default).
//! 2. The lead line is removed from the body text, then two more characters.
//! 3. Status is set to `published` and the premium flag comes from a
//!    [`PremiumPolicy`].
//! 4. `updated_at` is stamped from a [`Clock`].
//!
//! Policy and clock are injected so the whole step is deterministic under test.

use crate::models::{ArticleRecord, ArticleStatus, Timestamp};
use crate::scrapers::fields::ExtractedFields;
use crate::scrapers::page::ParsedPage;
use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::fmt;

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Decides whether an article is marked premium.
///
/// There is no real business rule behind this yet; callers choose a policy
/// explicitly.
pub trait PremiumPolicy {
    fn is_premium(&mut self, article: &ArticleRecord) -> bool;
}

/// Every article gets the same flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPremium(pub bool);

impl PremiumPolicy for FixedPremium {
    fn is_premium(&mut self, _article: &ArticleRecord) -> bool {
        self.0
    }
}

/// A fair coin flip per article, drawn from the wrapped random source.
pub struct CoinFlip<R = StdRng> {
    rng: R,
}

impl<R: Rng> CoinFlip<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl CoinFlip<StdRng> {
    /// Coin flip seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible coin flip.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R> fmt::Debug for CoinFlip<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoinFlip").finish_non_exhaustive()
    }
}

impl<R: Rng> PremiumPolicy for CoinFlip<R> {
    fn is_premium(&mut self, _article: &ArticleRecord) -> bool {
        self.rng.random_bool(0.5)
    }
}

impl<P: PremiumPolicy + ?Sized> PremiumPolicy for Box<P> {
    fn is_premium(&mut self, article: &ArticleRecord) -> bool {
        (**self).is_premium(article)
    }
}

/// Keep only URLs containing `marker` as a literal, case-sensitive substring.
///
/// `c.jpg?x=1` passes for `.jpg`; `C.JPG` does not.
pub fn filter_images<'a, I>(images: I, marker: &str) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    images
        .into_iter()
        .filter(|url| url.contains(marker))
        .cloned()
        .collect()
}

/// Remove the lead line from `content`, then drop two leading characters.
///
/// The lead line is the text before the first `\n`. Every occurrence of it is
/// deleted from the whole content, not just the first one. Afterwards the
/// first two characters of the remainder are dropped unconditionally, which
/// normally removes the blank line that followed the lead.
pub fn trim_lead_line(content: &str) -> String {
    let lead = content.split('\n').next().unwrap_or_default();
    let without_lead = content.replace(lead, "");
    match without_lead.char_indices().nth(2) {
        Some((offset, _)) => without_lead[offset..].to_string(),
        None => String::new(),
    }
}

/// Build the final record from a parsed page and its template fields.
pub fn normalize<P, C>(
    page: ParsedPage,
    fields: ExtractedFields,
    image_marker: &str,
    premium: &mut P,
    clock: &C,
) -> ArticleRecord
where
    P: PremiumPolicy + ?Sized,
    C: Clock + ?Sized,
{
    let mut article = ArticleRecord {
        content_images: filter_images(&page.images, image_marker),
        content: trim_lead_line(&page.text),
        title: page.title,
        abstract_text: page.abstract_text,
        top_image: page.top_image,
        tags: page.tags,
        categories: fields.categories,
        authors: fields.authors,
        status: ArticleStatus::Published,
        is_premium: false,
        published_at: Timestamp::At(fields.published_at),
        updated_at: Timestamp::At(clock.now()),
    };
    article.is_premium = premium.is_premium(&article);
    article
}
