//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the crawler's identity header and timeout
//! - GET requests to fetch page content
//! - Charset detection and decoding of the response body
//! - Error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body, decoded with `encoding`
        body: String,
        /// Name of the encoding the body was decoded with
        encoding: &'static str,
    },

    /// Transport failure or non-success HTTP status
    NetworkError {
        /// Error description
        error: String,
        /// HTTP status code, when the server answered
        status_code: Option<u16>,
    },

    /// Any other failure while fetching
    UnknownError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// The client sends the crawler's identity header on every request and
/// gives up on a request after `request_timeout` seconds.
///
/// # Example
///
/// ```no_run
/// use subtree_scribe::config::{CrawlerConfig, UserAgentConfig};
/// use subtree_scribe::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Non-2xx status | NetworkError (with status) |
/// | Timeout | NetworkError |
/// | Connection refused / DNS failure | NetworkError |
/// | Body read interrupted | NetworkError |
/// | Request could not be built (bad URL) | UnknownError |
///
/// There is no retry; the first failure is final.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return FetchResult::NetworkError {
            error: format!("HTTP {}", status),
            status_code: Some(status.as_u16()),
        };
    }

    let declared = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(declared_charset);

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return classify_error(e),
    };

    let (body, encoding) = decode_body(&bytes);

    if let Some(declared) = declared {
        if declared != encoding {
            tracing::debug!(
                "{} declares {} but decodes as {}",
                url,
                declared.name(),
                encoding.name()
            );
        }
    }

    FetchResult::Success {
        final_url,
        status_code: status.as_u16(),
        body,
        encoding: encoding.name(),
    }
}

/// Decodes a response body with its detected encoding
///
/// A byte order mark wins; otherwise the encoding is guessed from the bytes
/// themselves. The declared charset is not consulted because servers often
/// declare a default that does not match the content.
pub fn decode_body(bytes: &[u8]) -> (String, &'static Encoding) {
    let encoding = match Encoding::for_bom(bytes) {
        Some((encoding, _)) => encoding,
        None => {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        }
    };

    let (text, actual, _had_errors) = encoding.decode(bytes);
    (text.into_owned(), actual)
}

/// Extracts the charset parameter from a Content-Type header value
fn declared_charset(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Encoding::for_label(value.trim().trim_matches('"').as_bytes())
        } else {
            None
        }
    })
}

/// Maps a reqwest error onto the fetch failure taxonomy
fn classify_error(e: reqwest::Error) -> FetchResult {
    if e.is_builder() {
        return FetchResult::UnknownError {
            error: e.to_string(),
        };
    }

    let error = if e.is_timeout() {
        format!("Request timeout: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };

    FetchResult::NetworkError {
        error,
        status_code: e.status().map(|s| s.as_u16()),
    }
}
