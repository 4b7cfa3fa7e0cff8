//! Visited set and duplicate-streak tracking
//!
//! One `VisitState` spans a whole crawl: every branch of the traversal
//! reads and updates the same set and the same counter, which makes the
//! duplicate-streak halt global rather than per-branch.

use std::collections::HashSet;

/// Result of offering a URL to the visit state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// First time this URL is seen; it is now recorded as visited
    Novel,

    /// Already visited; the streak is still below the threshold
    Duplicate { streak: u32 },

    /// Already visited and the streak reached the threshold
    StreakLimit { streak: u32 },
}

/// Visitation state of a single crawl
#[derive(Debug, Clone)]
pub struct VisitState {
    /// URLs whose visit has started, keyed by their exact string
    visited: HashSet<String>,

    /// Revisit attempts since the last novel URL
    duplicate_streak: u32,

    /// Streak length that stops the crawl
    max_consecutive_duplicates: u32,

    /// Revisit attempts over the whole crawl
    duplicate_attempts: u64,
}

impl VisitState {
    /// Creates an empty visit state
    ///
    /// A threshold of zero is treated as one: the first revisit stops the
    /// crawl.
    pub fn new(max_consecutive_duplicates: u32) -> Self {
        Self {
            visited: HashSet::new(),
            duplicate_streak: 0,
            max_consecutive_duplicates: max_consecutive_duplicates.max(1),
            duplicate_attempts: 0,
        }
    }

    /// Records an attempt to visit `url`
    ///
    /// A novel URL is inserted into the visited set and resets the streak.
    /// A known URL extends the streak; once the streak reaches the
    /// threshold, [`Observation::StreakLimit`] is returned and the caller
    /// must stop the crawl.
    pub fn observe(&mut self, url: &str) -> Observation {
        if self.visited.contains(url) {
            self.duplicate_streak += 1;
            self.duplicate_attempts += 1;

            if self.duplicate_streak >= self.max_consecutive_duplicates {
                return Observation::StreakLimit {
                    streak: self.duplicate_streak,
                };
            }

            return Observation::Duplicate {
                streak: self.duplicate_streak,
            };
        }

        self.duplicate_streak = 0;
        self.visited.insert(url.to_string());
        Observation::Novel
    }

    /// Returns true if `url` has been visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Iterates over all visited URLs (in no particular order)
    pub fn visited(&self) -> impl Iterator<Item = &str> {
        self.visited.iter().map(String::as_str)
    }

    /// Number of visited URLs
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Current streak of consecutive revisit attempts
    pub fn duplicate_streak(&self) -> u32 {
        self.duplicate_streak
    }

    /// Total revisit attempts so far
    pub fn duplicate_attempts(&self) -> u64 {
        self.duplicate_attempts
    }

    /// Streak length that stops the crawl
    pub fn max_consecutive_duplicates(&self) -> u32 {
        self.max_consecutive_duplicates
    }
}
