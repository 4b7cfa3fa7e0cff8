use url::Url;

/// Checks whether a candidate URL lies inside the crawl scope of `root`
///
/// A candidate is in scope when:
/// 1. It parses as an absolute URL with a host
/// 2. Its host and port equal the root's
/// 3. Its path starts with the root's path
///
/// The path test is a plain string prefix, not a segment match, so under a
/// root of `/guide/phone` the sibling `/guide/phone2` is in scope as well.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use subtree_scribe::url::is_in_scope;
///
/// let root = Url::parse("https://example.com/guide/phone").unwrap();
///
/// assert!(is_in_scope("https://example.com/guide/phone/ios18", &root));
/// assert!(is_in_scope("https://example.com/guide/phone2", &root));
/// assert!(!is_in_scope("https://example.com/guide", &root));
/// assert!(!is_in_scope("https://other.com/guide/phone", &root));
/// ```
pub fn is_in_scope(candidate: &str, root: &Url) -> bool {
    let candidate = match Url::parse(candidate) {
        Ok(url) => url,
        Err(_) => return false,
    };

    let host = match candidate.host_str() {
        Some(host) => host,
        None => return false,
    };

    root.host_str() == Some(host)
        && candidate.port() == root.port()
        && candidate.path().starts_with(root.path())
}
