//! Sitemap crawler module
//!
//! This module discovers the full set of page URLs published by a site:
//! - Fetching sitemap documents over HTTPS
//! - Extracting `<loc>` entries and classifying documents
//! - Breadth-first traversal of sitemap indexes with cycle and size guards

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{CrawlLimits, SitemapCrawler, MAX_TOTAL_SITEMAPS, MAX_TOTAL_SITEMAP_URLS};
pub use fetcher::{fetch_sitemap, SITEMAP_ACCEPT};
pub use parser::{classify, decode_xml_entities, extract_locs, parse_sitemap, DocumentKind, ParsedSitemap};
