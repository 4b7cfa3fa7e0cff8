//! Scheduler for the crawl work stack and request pacing
//!
//! This module handles:
//! - The depth-first work stack of pending visits
//! - The fixed politeness delay before each descent into a child link
//!
//! Traversal is strictly sequential. Children of a page are pushed in
//! reverse document order so they are popped left to right, and a child is
//! only popped once the whole subtree of its previous sibling is done. This
//! gives the same visiting order as a recursive depth-first walk.

use std::time::Duration;

/// A pending visit on the work stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The URL to visit
    pub url: String,

    /// Remaining descents permitted from this URL
    pub depth_budget: u32,

    /// Whether the pacing delay runs before this visit
    ///
    /// False only for the crawl root.
    pub paced: bool,
}

/// Scheduler manages the work stack and pacing
pub struct Scheduler {
    /// Pending visits; the top of the stack is the next to run
    stack: Vec<Frame>,

    /// Pause before each descent into a child link
    delay: Duration,
}

impl Scheduler {
    /// Creates a new scheduler with the given pacing delay
    pub fn new(delay: Duration) -> Self {
        Self {
            stack: Vec::new(),
            delay,
        }
    }

    /// Seeds the stack with the crawl root
    ///
    /// The root is visited without a preceding delay.
    pub fn seed(&mut self, url: &str, depth_budget: u32) {
        self.stack.push(Frame {
            url: url.to_string(),
            depth_budget,
            paced: false,
        });
    }

    /// Schedules the in-scope children of a page
    ///
    /// # Arguments
    ///
    /// * `links` - Child URLs in document order
    /// * `depth_budget` - Budget of the parent; children receive one less
    pub fn push_children(&mut self, links: Vec<String>, depth_budget: u32) {
        let child_budget = depth_budget.saturating_sub(1);

        self.stack.extend(links.into_iter().rev().map(|url| Frame {
            url,
            depth_budget: child_budget,
            paced: true,
        }));
    }

    /// Takes the next visit off the stack
    pub fn next_frame(&mut self) -> Option<Frame> {
        self.stack.pop()
    }

    /// Announces a paced visit and waits out the pacing delay
    ///
    /// Does nothing for unpaced frames.
    pub async fn pace(&self, frame: &Frame) {
        if !frame.paced {
            return;
        }

        tracing::info!("Visiting: {}", frame.url);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// Drops every pending visit
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// The pacing delay
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
