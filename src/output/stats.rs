//! Crawl report collection and display
//!
//! The crawl controller fills a [`CrawlReport`] while it runs; the CLI
//! prints it once the crawl is over.

use crate::state::PageOutcome;
use chrono::Utc;
use std::collections::HashMap;
use std::path::PathBuf;

/// A page visit that ended in an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// The URL that failed
    pub url: String,

    /// NetworkError or UnknownError
    pub outcome: PageOutcome,

    /// Error description
    pub error: String,
}

/// Summary of a single crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The crawl root
    pub root: String,

    /// RFC 3339 start timestamp
    pub started_at: String,

    /// RFC 3339 finish timestamp, once the crawl is over
    pub finished_at: Option<String>,

    /// Files written by the page store, in visiting order
    pub pages_saved: Vec<PathBuf>,

    /// Count of visited pages by outcome
    pub outcomes: HashMap<PageOutcome, u64>,

    /// Every failed visit, in visiting order
    pub failures: Vec<PageFailure>,

    /// Number of distinct URLs whose visit started
    pub visited: usize,

    /// Candidate links rejected by the scope filter
    pub out_of_scope_links: u64,

    /// Attempts to visit an already visited URL
    pub duplicate_attempts: u64,

    /// Scheduled visits dropped because their depth budget was spent
    pub depth_exhausted: u64,

    /// Whether the duplicate-streak limit stopped the crawl
    pub halted_on_duplicates: bool,
}

impl CrawlReport {
    /// Starts a report for a crawl of `root`
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            started_at: Utc::now().to_rfc3339(),
            finished_at: None,
            pages_saved: Vec::new(),
            outcomes: HashMap::new(),
            failures: Vec::new(),
            visited: 0,
            out_of_scope_links: 0,
            duplicate_attempts: 0,
            depth_exhausted: 0,
            halted_on_duplicates: false,
        }
    }

    /// Records a page written to the page store
    pub fn record_saved(&mut self, path: PathBuf) {
        *self.outcomes.entry(PageOutcome::Saved).or_insert(0) += 1;
        self.pages_saved.push(path);
    }

    /// Records a failed visit
    pub fn record_failure(&mut self, url: &str, outcome: PageOutcome, error: impl Into<String>) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        self.failures.push(PageFailure {
            url: url.to_string(),
            outcome,
            error: error.into(),
        });
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now().to_rfc3339());
    }

    /// Number of visits that ended with `outcome`
    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of fetch attempts made
    pub fn total_attempts(&self) -> u64 {
        self.outcomes.values().sum()
    }

    /// Number of failed visits
    pub fn total_errors(&self) -> u64 {
        self.count(PageOutcome::NetworkError) + self.count(PageOutcome::UnknownError)
    }

    /// Percentage of attempts that were saved
    pub fn success_rate(&self) -> f64 {
        let total = self.total_attempts();
        if total == 0 {
            return 0.0;
        }
        (self.count(PageOutcome::Saved) as f64 / total as f64) * 100.0
    }
}

/// Prints a crawl report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Run:");
    println!("  Root: {}", report.root);
    println!("  Started: {}", report.started_at);
    if let Some(finished) = &report.finished_at {
        println!("  Finished: {}", finished);
    }
    if report.halted_on_duplicates {
        println!("  Stopped early: duplicate-visit limit reached");
    }
    println!();

    println!("Pages:");
    println!("  Visited URLs: {}", report.visited);
    println!("  Saved: {}", report.count(PageOutcome::Saved));
    println!("  Network errors: {}", report.count(PageOutcome::NetworkError));
    println!("  Unknown errors: {}", report.count(PageOutcome::UnknownError));
    println!("  Success rate: {:.1}%", report.success_rate());
    println!();

    println!("Links:");
    println!("  Out of scope: {}", report.out_of_scope_links);
    println!("  Duplicate attempts: {}", report.duplicate_attempts);
    println!("  Depth exhausted: {}", report.depth_exhausted);

    if !report.failures.is_empty() {
        println!("\nFailures:");
        for failure in report.failures.iter().take(20) {
            println!("  [{}] {} - {}", failure.outcome, failure.url, failure.error);
        }
        if report.failures.len() > 20 {
            println!("  ... and {} more", report.failures.len() - 20);
        }
    }
}
