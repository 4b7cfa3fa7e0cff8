//! Storage traits and error types
//!
//! This module defines the trait interface for page stores and the
//! associated error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write page {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for page store implementations
///
/// A page store persists the raw body of every successfully fetched page.
/// Records are created once and never updated or deleted by the crawler.
pub trait PageStore: Send {
    /// Persists a fetched page
    ///
    /// # Arguments
    ///
    /// * `domain` - Domain of the crawl root the page belongs to
    /// * `url` - The exact URL the page was requested with
    /// * `body` - The decoded page body
    ///
    /// # Returns
    ///
    /// The location the page was written to
    fn save(&mut self, domain: &str, url: &str, body: &str) -> StorageResult<PathBuf>;
}
