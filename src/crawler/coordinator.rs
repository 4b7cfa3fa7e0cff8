//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop. For every frame taken off the work
//! stack it:
//! - Waits out the pacing delay (child links only)
//! - Checks the depth budget
//! - Offers the URL to the visit state (duplicate detection)
//! - Fetches the page and hands it to the page store
//! - Extracts links, filters them by scope and schedules the survivors
//!
//! A failed page ends only its own branch. The one condition that stops the
//! whole crawl is the duplicate-streak limit.

use crate::config::{validate, Config};
use crate::crawler::parser::extract_links;
use crate::crawler::scheduler::{Frame, Scheduler};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::output::CrawlReport;
use crate::state::{Observation, PageOutcome, VisitState};
use crate::storage::{open_storage, PageStore};
use crate::url::CrawlRoot;
use crate::Result;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// What the crawl loop does after a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Halt,
}

/// Main crawler coordinator structure
///
/// Owns all state of one crawl. Independent coordinators share nothing, so
/// several crawls can run side by side.
pub struct Coordinator {
    max_depth: u32,
    root: CrawlRoot,
    client: Client,
    store: Box<dyn PageStore>,
    scheduler: Scheduler,
    state: VisitState,
    report: CrawlReport,
}

impl Coordinator {
    /// Creates a coordinator that stores pages in `config.output.pages_dir`
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `root` - The crawl root URL
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScribeError)` - Invalid configuration, invalid root URL or
    ///   HTTP client setup failure
    pub fn new(config: Config, root: &str) -> Result<Self> {
        let store = open_storage(Path::new(&config.output.pages_dir));
        Self::with_store(config, root, Box::new(store))
    }

    /// Creates a coordinator with a custom page store
    pub fn with_store(
        config: Config,
        root: &str,
        store: Box<dyn PageStore>,
    ) -> Result<Self> {
        validate(&config)?;
        let root = CrawlRoot::parse(root)?;
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        let scheduler = Scheduler::new(Duration::from_millis(config.crawler.request_delay));
        let state = VisitState::new(config.crawler.max_consecutive_duplicates);
        let report = CrawlReport::new(root.as_str());

        Ok(Self {
            max_depth: config.crawler.max_depth,
            root,
            client,
            store,
            scheduler,
            state,
            report,
        })
    }

    /// The crawl root
    pub fn root(&self) -> &CrawlRoot {
        &self.root
    }

    /// Visited set and duplicate streak of this crawl
    pub fn visit_state(&self) -> &VisitState {
        &self.state
    }

    /// Runs the crawl loop until the work stack is empty or the
    /// duplicate-streak limit is hit
    pub async fn run(&mut self) -> CrawlReport {
        tracing::info!(
            "Starting crawl of {} (max depth {}, max consecutive duplicates {}, delay {:?})",
            self.root,
            self.max_depth,
            self.state.max_consecutive_duplicates(),
            self.scheduler.delay()
        );

        let start_time = std::time::Instant::now();
        self.scheduler
            .seed(self.root.as_str(), self.max_depth);

        while let Some(frame) = self.scheduler.next_frame() {
            if self.visit(frame).await == Step::Halt {
                self.scheduler.clear();
                break;
            }
        }

        self.report.visited = self.state.visited_count();
        self.report.duplicate_attempts = self.state.duplicate_attempts();
        self.report.finish();

        tracing::info!(
            "Crawl completed: {} pages saved, {} errors, {} URLs visited in {:?}",
            self.report.count(PageOutcome::Saved),
            self.report.total_errors(),
            self.report.visited,
            start_time.elapsed()
        );

        self.report.clone()
    }

    /// Visits a single frame
    async fn visit(&mut self, frame: Frame) -> Step {
        self.scheduler.pace(&frame).await;

        if frame.depth_budget == 0 {
            self.report.depth_exhausted += 1;
            return Step::Continue;
        }

        match self.state.observe(&frame.url) {
            Observation::Novel => {}
            Observation::Duplicate { streak } => {
                tracing::debug!("Already visited {} (streak {})", frame.url, streak);
                return Step::Continue;
            }
            Observation::StreakLimit { streak } => {
                tracing::warn!(
                    "{} consecutive visits to already visited URLs, stopping crawl",
                    streak
                );
                self.report.halted_on_duplicates = true;
                return Step::Halt;
            }
        }

        let body = match fetch_url(&self.client, &frame.url).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
                encoding,
            } => {
                if final_url != frame.url {
                    tracing::debug!("{} redirected to {}", frame.url, final_url);
                }
                tracing::debug!(
                    "Fetched {} (HTTP {}, {})",
                    frame.url,
                    status_code,
                    encoding
                );
                body
            }
            FetchResult::NetworkError { error, .. } => {
                tracing::error!("Request error: {} - {}", frame.url, error);
                self.report
                    .record_failure(&frame.url, PageOutcome::NetworkError, error);
                return Step::Continue;
            }
            FetchResult::UnknownError { error } => {
                tracing::error!("Unexpected error: {} - {}", frame.url, error);
                self.report
                    .record_failure(&frame.url, PageOutcome::UnknownError, error);
                return Step::Continue;
            }
        };

        match self.store.save(self.root.domain(), &frame.url, &body) {
            Ok(path) => self.report.record_saved(path),
            Err(e) => {
                tracing::error!("Unexpected error: {} - {}", frame.url, e);
                self.report
                    .record_failure(&frame.url, PageOutcome::UnknownError, e.to_string());
                return Step::Continue;
            }
        }

        self.schedule_links(&frame, &body);
        Step::Continue
    }

    /// Extracts the links of a fetched page and schedules those in scope
    fn schedule_links(&mut self, frame: &Frame, body: &str) {
        let base = match Url::parse(&frame.url) {
            Ok(base) => base,
            Err(e) => {
                tracing::debug!("Cannot resolve links of {}: {}", frame.url, e);
                return;
            }
        };

        let (eligible, out_of_scope): (Vec<String>, Vec<String>) =
            extract_links(body, &base)
                .into_iter()
                .partition(|link| self.root.contains(link));

        tracing::trace!(
            "{}: {} links in scope, {} out of scope",
            frame.url,
            eligible.len(),
            out_of_scope.len()
        );

        self.report.out_of_scope_links += out_of_scope.len() as u64;
        self.scheduler.push_children(eligible, frame.depth_budget);
    }
}

/// Runs a complete crawl with the flat-file page store
pub async fn run_crawl(config: Config, root: &str) -> Result<CrawlReport> {
    let mut coordinator = Coordinator::new(config, root)?;
    Ok(coordinator.run().await)
}
