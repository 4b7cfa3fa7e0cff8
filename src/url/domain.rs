use url::Url;

/// Extracts the network location (host plus explicit port) from a URL
///
/// Two URLs belong to the same site only when both host and port agree, so
/// the port is kept whenever the URL spells one out. Default ports are
/// dropped by the `url` crate during parsing and never appear here.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use subtree_scribe::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/guide").unwrap();
/// assert_eq!(extract_domain(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Makes a network location usable as part of a file name
///
/// Only `:` (port separator) and `[`/`]` (IPv6 literals) can appear in a
/// parsed host that are unsafe in file names on common platforms.
pub fn filesystem_safe(domain: &str) -> String {
    domain
        .chars()
        .map(|c| match c {
            ':' | '[' | ']' => '_',
            other => other,
        })
        .collect()
}
