//! Storage module for persisting fetched pages
//!
//! This module handles writing raw page bodies to flat files, one file per
//! successfully fetched URL, named from the crawl root's domain and a
//! digest of the URL.

mod file_store;
mod traits;

pub use file_store::{page_file_name, url_digest, FilePageStore};
pub use traits::{PageStore, StorageError, StorageResult};

use std::path::Path;

/// Opens the flat-file page store rooted at `dir`
pub fn open_storage(dir: &Path) -> FilePageStore {
    FilePageStore::new(dir)
}
