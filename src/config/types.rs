use serde::Deserialize;

/// Main configuration structure for Subtree-Scribe
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Depth budget given to the crawl root
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Consecutive revisit attempts that stop the whole crawl
    #[serde(rename = "max-consecutive-duplicates")]
    pub max_consecutive_duplicates: u32,

    /// Pause before descending into each in-scope link (milliseconds)
    #[serde(rename = "request-delay")]
    pub request_delay: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_consecutive_duplicates: 10,
            request_delay: 2000,
            request_timeout: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "subtree-scribe".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/subtree-scribe/subtree-scribe".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the identity header: `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the raw HTML page files
    #[serde(rename = "pages-dir")]
    pub pages_dir: String,

    /// Directory receiving the converted Markdown files
    #[serde(rename = "text-dir")]
    pub text_dir: String,

    /// Keep link text but drop link targets during conversion
    #[serde(rename = "ignore-links")]
    pub ignore_links: bool,

    /// Drop images during conversion
    #[serde(rename = "ignore-images")]
    pub ignore_images: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pages_dir: "data".to_string(),
            text_dir: "data/markdown".to_string(),
            ignore_links: false,
            ignore_images: false,
        }
    }
}
