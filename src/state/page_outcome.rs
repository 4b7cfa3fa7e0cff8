/// Page outcome definitions for crawl reporting
///
/// Every URL that passes the depth and duplicate checks is fetched exactly
/// once and ends in one of these outcomes.
use std::fmt;

/// Represents how the visit of a single page ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// Page was fetched and written to the page store
    Saved,

    /// Transport failure or non-success HTTP status
    ///
    /// Covers timeouts, refused connections, DNS failures and every non-2xx
    /// response.
    NetworkError,

    /// Anything else that went wrong while handling the page
    ///
    /// A request the client could not build, or a page that could not be
    /// written to disk.
    UnknownError,
}

impl PageOutcome {
    /// Short label used in log lines and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::NetworkError => "network_error",
            Self::UnknownError => "unknown_error",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
