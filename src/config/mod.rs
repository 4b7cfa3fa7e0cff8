//! Configuration module for Subtree-Scribe
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All settings have defaults, so a configuration file is optional.
//!
//! # Example
//!
//! ```no_run
//! use subtree_scribe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scribe.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
