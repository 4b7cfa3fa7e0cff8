//! URL handling module for Subtree-Scribe
//!
//! This module provides the crawl root, the scope filter that keeps a crawl
//! inside the root's subtree, and domain extraction for file naming.

mod domain;
mod scope;

use crate::{UrlError, UrlResult};
use ::url::Url;
use std::fmt;

// Re-export main functions
pub use domain::{extract_domain, filesystem_safe};
pub use scope::is_in_scope;

/// The seed URL of a crawl and the boundary of its scope
///
/// Immutable once constructed; every page fetched during the crawl is
/// stored under the root's domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRoot {
    url: Url,
    domain: String,
}

impl CrawlRoot {
    /// Parses and checks a crawl root
    ///
    /// The root must be an absolute `http` or `https` URL with a host.
    ///
    /// # Examples
    ///
    /// ```
    /// use subtree_scribe::url::CrawlRoot;
    ///
    /// let root = CrawlRoot::parse("https://example.com/guide/phone").unwrap();
    /// assert_eq!(root.domain(), "example.com");
    /// assert!(root.contains("https://example.com/guide/phone/setup"));
    ///
    /// assert!(CrawlRoot::parse("ftp://example.com/").is_err());
    /// ```
    pub fn parse(input: &str) -> UrlResult<Self> {
        let url = Url::parse(input).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let domain =
            extract_domain(&url).ok_or_else(|| UrlError::MissingHost(input.to_string()))?;

        Ok(Self { url, domain })
    }

    /// The root as a parsed URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The root as it will be visited
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Host and explicit port of the root
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns true if `candidate` passes the scope filter for this root
    pub fn contains(&self, candidate: &str) -> bool {
        is_in_scope(candidate, &self.url)
    }
}

impl fmt::Display for CrawlRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
