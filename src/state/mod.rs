//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitState`: the visited set and the duplicate streak of one crawl
//! - `PageOutcome`: how the visit of a single page ended

mod page_outcome;
mod visit_state;

// Re-export main types
pub use page_outcome::PageOutcome;
pub use visit_state::{Observation, VisitState};
