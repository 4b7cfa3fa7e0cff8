//! HTML to Markdown conversion of stored pages
//!
//! This module turns the raw pages written by the crawler into readable
//! Markdown. Page chrome (`script`, `style`, `header`, `footer`, `nav`) is
//! dropped before conversion. Link targets and images can optionally be
//! suppressed as well.

use crate::config::OutputConfig;
use htmd::{Element, HtmlToMarkdown};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Elements removed from every page before conversion
const CHROME_TAGS: [&str; 5] = ["script", "style", "header", "footer", "nav"];

/// Errors that can occur while converting stored pages
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to list {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to convert {path}: {source}")]
    Markdown {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Options of the conversion job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Keep link text but drop link targets
    pub ignore_links: bool,

    /// Drop images
    pub ignore_images: bool,
}

impl From<&OutputConfig> for ConvertOptions {
    fn from(config: &OutputConfig) -> Self {
        Self {
            ignore_links: config.ignore_links,
            ignore_images: config.ignore_images,
        }
    }
}

/// Stateless HTML to Markdown converter
pub struct TextConverter {
    converter: HtmlToMarkdown,
}

impl TextConverter {
    /// Builds a converter for the given options
    pub fn new(options: ConvertOptions) -> Self {
        let mut skip_tags = CHROME_TAGS.to_vec();
        if options.ignore_images {
            skip_tags.push("img");
        }

        let mut builder = HtmlToMarkdown::builder().skip_tags(skip_tags);
        if options.ignore_links {
            // Replaces the built-in anchor handler; only the link text remains
            builder = builder.add_handler(vec!["a"], |element: Element| {
                Some(element.content.to_string())
            });
        }

        Self {
            converter: builder.build(),
        }
    }

    /// Converts one HTML document to Markdown
    pub fn convert(&self, html: &str) -> std::io::Result<String> {
        self.converter.convert(html)
    }
}

/// Converts a single HTML document to Markdown
///
/// # Example
///
/// ```
/// use subtree_scribe::output::{html_to_markdown, ConvertOptions};
///
/// let html = "<html><body><script>track()</script><p>Hello</p></body></html>";
/// let markdown = html_to_markdown(html, ConvertOptions::default()).unwrap();
/// assert!(markdown.contains("Hello"));
/// assert!(!markdown.contains("track()"));
/// ```
pub fn html_to_markdown(html: &str, options: ConvertOptions) -> ConvertResult<String> {
    TextConverter::new(options)
        .convert(html)
        .map_err(|source| ConvertError::Markdown {
            path: PathBuf::new(),
            source,
        })
}

/// Converts every `*.html` file in `pages_dir` into `{stem}.md` in `text_dir`
///
/// Files are processed in name order. `text_dir` is created on the first
/// write. The first failing file aborts the job.
///
/// # Returns
///
/// The Markdown files written, in processing order
pub fn convert_directory(
    pages_dir: &Path,
    text_dir: &Path,
    options: ConvertOptions,
) -> ConvertResult<Vec<PathBuf>> {
    let converter = TextConverter::new(options);
    let html_files = list_html_files(pages_dir)?;
    let mut written = Vec::with_capacity(html_files.len());

    for html_file in html_files {
        let html = fs::read_to_string(&html_file).map_err(|source| ConvertError::Read {
            path: html_file.clone(),
            source,
        })?;

        let markdown = converter
            .convert(&html)
            .map_err(|source| ConvertError::Markdown {
                path: html_file.clone(),
                source,
            })?;

        fs::create_dir_all(text_dir).map_err(|source| ConvertError::Write {
            path: text_dir.to_path_buf(),
            source,
        })?;

        let stem = html_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let markdown_file = text_dir.join(format!("{}.md", stem));

        fs::write(&markdown_file, markdown).map_err(|source| ConvertError::Write {
            path: markdown_file.clone(),
            source,
        })?;

        tracing::info!(
            "Converted: {} -> {}",
            html_file.display(),
            markdown_file.display()
        );
        written.push(markdown_file);
    }

    Ok(written)
}

/// Lists the `*.html` files directly inside `dir`, sorted by name
fn list_html_files(dir: &Path) -> ConvertResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| ConvertError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ConvertError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
