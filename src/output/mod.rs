//! Output module for crawl reports and text conversion
//!
//! This module handles:
//! - Converting stored pages to Markdown
//! - Collecting and printing crawl reports

mod markdown;
pub mod stats;

pub use markdown::{
    convert_directory, html_to_markdown, ConvertError, ConvertOptions, ConvertResult,
    TextConverter,
};
pub use stats::{print_report, CrawlReport, PageFailure};

use crate::config::OutputConfig;
use std::path::{Path, PathBuf};

/// Runs the conversion job configured in `config`
///
/// Reads every stored page from `pages_dir` and writes one Markdown file
/// per page into `text_dir`.
pub fn convert_pages(config: &OutputConfig) -> ConvertResult<Vec<PathBuf>> {
    tracing::info!(
        "Converting pages from {} to {}",
        config.pages_dir,
        config.text_dir
    );

    let written = convert_directory(
        Path::new(&config.pages_dir),
        Path::new(&config.text_dir),
        ConvertOptions::from(config),
    )?;

    tracing::info!("Converted {} pages", written.len());
    Ok(written)
}
