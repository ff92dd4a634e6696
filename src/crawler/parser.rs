//! Sitemap document parser
//!
//! `<loc>` values are pulled out with regular expressions rather than a full
//! XML parser so that slightly malformed documents still yield their URLs.

use regex::Regex;
use std::sync::OnceLock;

/// Kind of sitemap document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `<sitemapindex>`: each `<loc>` names another sitemap document
    Index,
    /// `<urlset>`: each `<loc>` is a page URL
    UrlSet,
}

/// Extracted contents of one sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSitemap {
    pub kind: DocumentKind,
    /// Decoded `<loc>` values in document order (not yet resolved)
    pub locs: Vec<String>,
}

/// Parses a sitemap document into its kind and `<loc>` values
///
/// # Example
///
/// ```
/// use sumi_notify::crawler::{parse_sitemap, DocumentKind};
///
/// let xml = r#"<urlset><url><loc>https://example.com/?a=1&amp;b=2</loc></url></urlset>"#;
/// let parsed = parse_sitemap(xml);
/// assert_eq!(parsed.kind, DocumentKind::UrlSet);
/// assert_eq!(parsed.locs, vec!["https://example.com/?a=1&b=2"]);
/// ```
pub fn parse_sitemap(xml: &str) -> ParsedSitemap {
    let locs = extract_locs(xml);
    let kind = classify(xml, &locs);
    ParsedSitemap { kind, locs }
}

/// Extracts all non-empty `<loc>` values, decoding XML entities and CDATA
pub fn extract_locs(xml: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?is)<loc(?:\s[^>]*)?>(.*?)</loc\s*>").expect("loc regex is valid")
    });

    re.captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| decode_loc(m.as_str()))
        .filter(|loc| !loc.is_empty())
        .collect()
}

/// Classifies a document as an index or a URL set
///
/// An explicit `<sitemapindex>`/`<sitemap>` tag means index and `<urlset>`
/// means URL set. With neither tag present, a document whose every `<loc>`
/// ends in `.xml` is assumed to be an index. That fallback misclassifies a
/// URL set that only lists `.xml` pages; it is kept for compatibility with
/// hand-written sitemaps that omit the root element.
pub fn classify(xml: &str, locs: &[String]) -> DocumentKind {
    static INDEX_TAG: OnceLock<Regex> = OnceLock::new();
    static URLSET_TAG: OnceLock<Regex> = OnceLock::new();

    let index_tag = INDEX_TAG
        .get_or_init(|| Regex::new(r"(?i)<sitemap(?:index)?[\s>/]").expect("index regex is valid"));
    if index_tag.is_match(xml) {
        return DocumentKind::Index;
    }

    let urlset_tag =
        URLSET_TAG.get_or_init(|| Regex::new(r"(?i)<urlset[\s>/]").expect("urlset regex is valid"));
    if urlset_tag.is_match(xml) {
        return DocumentKind::UrlSet;
    }

    if !locs.is_empty() && locs.iter().all(|loc| looks_like_sitemap(loc)) {
        tracing::debug!(
            "Untagged document with only .xml locations treated as a sitemap index ({} entries)",
            locs.len()
        );
        return DocumentKind::Index;
    }

    DocumentKind::UrlSet
}

/// Returns true if `loc` ends in `.xml`, ignoring any query or fragment
fn looks_like_sitemap(loc: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?i)\.xml(?:[?#].*)?$").expect("xml regex is valid"));
    re.is_match(loc)
}

fn decode_loc(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some(inner) = trimmed
        .strip_prefix("<![CDATA[")
        .and_then(|rest| rest.strip_suffix("]]>"))
    {
        return inner.trim().to_string();
    }

    decode_xml_entities(trimmed)
}

/// Decodes the five predefined XML entities
///
/// `&amp;` is decoded last so that `&amp;lt;` becomes `&lt;`, not `<`.
pub fn decode_xml_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
