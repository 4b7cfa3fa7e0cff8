use crate::storage::traits::{PageStore, StorageError, StorageResult};
use crate::url::filesystem_safe;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;

/// Number of digest bytes kept in a page file name
const DIGEST_BYTES: usize = 16;

/// Flat-file page store
///
/// Each page becomes `scrape_{domain}_{digest}.html` inside one directory.
/// The digest is derived from the exact URL string, so the same URL maps to
/// the same file on every run and a refetch overwrites the previous copy.
#[derive(Debug, Clone)]
pub struct FilePageStore {
    dir: PathBuf,
}

impl FilePageStore {
    /// Creates a store writing into `dir`
    ///
    /// The directory is created lazily on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path a page with this domain and URL is stored at
    pub fn path_for(&self, domain: &str, url: &str) -> PathBuf {
        self.dir.join(page_file_name(domain, url))
    }
}

impl PageStore for FilePageStore {
    fn save(&mut self, domain: &str, url: &str, body: &str) -> StorageResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(domain, url);
        fs::write(&path, body).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Saved {} -> {}", url, path.display());
        Ok(path)
    }
}

/// Computes the file name of a stored page
///
/// # Examples
///
/// ```
/// use subtree_scribe::storage::page_file_name;
///
/// let name = page_file_name("example.com", "https://example.com/guide");
/// assert!(name.starts_with("scrape_example.com_"));
/// assert!(name.ends_with(".html"));
/// assert_eq!(name, page_file_name("example.com", "https://example.com/guide"));
/// ```
pub fn page_file_name(domain: &str, url: &str) -> String {
    format!("scrape_{}_{}.html", filesystem_safe(domain), url_digest(url))
}

/// Hex-encoded, truncated SHA-256 of a URL string
pub fn url_digest(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    hex::encode(&digest[..DIGEST_BYTES])
}
