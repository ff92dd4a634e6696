//! Sitemap crawl coordinator - breadth-first traversal of the sitemap graph
//!
//! Nodes are sitemap documents and edges are the `<loc>` references inside
//! index documents. URL-set documents are leaves whose `<loc>` entries are the
//! crawl's output. The traversal is guarded by:
//! - Queued and visited sets, so self-references, diamonds, cycles and
//!   repeated `<loc>` entries are enqueued and fetched once
//! - A hard cap on the number of documents visited
//! - A hard cap on the number of leaf URLs discovered

use crate::crawler::fetcher::fetch_sitemap;
use crate::crawler::parser::{parse_sitemap, DocumentKind};
use crate::CrawlError;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info};
use url::Url;

/// Maximum number of sitemap documents visited in one crawl
pub const MAX_TOTAL_SITEMAPS: usize = 10_000;

/// Maximum number of leaf URLs discovered in one crawl
pub const MAX_TOTAL_SITEMAP_URLS: usize = 200_000;

/// Hard limits for one crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlLimits {
    pub max_sitemaps: usize,
    pub max_urls: usize,
}

impl Default for CrawlLimits {
    fn default() -> Self {
        Self {
            max_sitemaps: MAX_TOTAL_SITEMAPS,
            max_urls: MAX_TOTAL_SITEMAP_URLS,
        }
    }
}

/// FIFO of sitemap documents still to fetch
///
/// A URL is accepted at most once per crawl, so the queue never holds more
/// entries than there are distinct documents.
#[derive(Debug)]
struct Frontier {
    queue: VecDeque<String>,
    queued: HashSet<String>,
}

impl Frontier {
    fn new(entry: String) -> Self {
        Self {
            queue: VecDeque::from([entry.clone()]),
            queued: HashSet::from([entry]),
        }
    }

    /// Enqueues `url` unless it was enqueued before; returns whether it was added
    fn push(&mut self, url: String) -> bool {
        if !self.queued.insert(url.clone()) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Breadth-first sitemap crawler
#[derive(Debug, Clone)]
pub struct SitemapCrawler {
    client: Client,
    limits: CrawlLimits,
}

impl SitemapCrawler {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            limits: CrawlLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: CrawlLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> CrawlLimits {
        self.limits
    }

    /// Crawls the sitemap graph rooted at `entry_url` and returns every leaf URL
    ///
    /// Documents are processed in enqueue (level) order. The returned URLs are
    /// deduplicated and in discovery order.
    ///
    /// # Errors
    ///
    /// * `CrawlError::LimitExceeded` - more than `max_sitemaps` documents or
    ///   `max_urls` leaf URLs
    /// * `CrawlError::Fetch` / `CrawlError::Network` - any document could not
    ///   be fetched
    ///
    /// No partial result is returned on error.
    pub async fn crawl(&self, entry_url: &str) -> Result<Vec<String>, CrawlError> {
        info!("Starting sitemap crawl at {}", entry_url);

        // Child references are compared in `Url` serialized form, so the entry must be too
        let entry = canonical_entry(entry_url);

        let mut frontier = Frontier::new(entry);
        let mut visited: HashSet<String> = HashSet::new();
        let mut discovered: Vec<String> = Vec::new();
        let mut discovered_set: HashSet<String> = HashSet::new();

        while let Some(sitemap_url) = frontier.pop() {
            if !visited.insert(sitemap_url.clone()) {
                debug!("Skipping already visited sitemap {}", sitemap_url);
                continue;
            }

            if visited.len() > self.limits.max_sitemaps {
                return Err(CrawlError::LimitExceeded("sitemap recursion limit exceeded"));
            }

            let body = fetch_sitemap(&self.client, &sitemap_url).await?;
            let parsed = parse_sitemap(&body);
            let base = Url::parse(&sitemap_url).ok();

            debug!(
                "Sitemap {} parsed as {:?} with {} locations ({} documents queued)",
                sitemap_url,
                parsed.kind,
                parsed.locs.len(),
                frontier.len()
            );

            match parsed.kind {
                DocumentKind::Index => {
                    for loc in &parsed.locs {
                        let Some(child) = resolve_loc(base.as_ref(), loc) else {
                            debug!("Skipping unresolvable sitemap reference {:?}", loc);
                            continue;
                        };
                        frontier.push(child);
                    }
                }
                DocumentKind::UrlSet => {
                    for loc in &parsed.locs {
                        let Some(page) = resolve_loc(base.as_ref(), loc) else {
                            debug!("Skipping unresolvable page reference {:?}", loc);
                            continue;
                        };
                        if discovered_set.insert(page.clone()) {
                            discovered.push(page);
                            if discovered.len() > self.limits.max_urls {
                                return Err(CrawlError::LimitExceeded(
                                    "sitemap URL hard limit exceeded",
                                ));
                            }
                        }
                    }
                }
            }
        }

        info!(
            "Sitemap crawl complete: {} documents visited, {} URLs discovered",
            visited.len(),
            discovered.len()
        );

        Ok(discovered)
    }
}

/// Re-serializes the entry URL the way `resolve_loc` serializes children
///
/// An unparseable entry is kept as given and fails at fetch time.
fn canonical_entry(entry_url: &str) -> String {
    Url::parse(entry_url)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| entry_url.to_string())
}

/// Resolves a `<loc>` value against the URL of the document containing it
fn resolve_loc(base: Option<&Url>, loc: &str) -> Option<String> {
    let resolved = match base {
        Some(base) => base.join(loc).ok()?,
        None => Url::parse(loc).ok()?,
    };
    Some(resolved.to_string())
}
