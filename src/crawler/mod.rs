//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with charset detection
//! - HTML parsing and link extraction
//! - The depth-first work stack and request pacing
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, decode_body, fetch_url, FetchResult};
pub use parser::extract_links;
pub use scheduler::{Frame, Scheduler};

pub use crate::output::CrawlReport;

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the crawl root
/// 2. Build the HTTP client
/// 3. Visit the root and, depth-first, every in-scope link below it
/// 4. Store each fetched page as a flat file
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `root` - The crawl root URL
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl finished (possibly with per-page failures)
/// * `Err(ScribeError)` - Crawl could not start
pub async fn crawl(config: Config, root: &str) -> Result<CrawlReport> {
    run_crawl(config, root).await
}
