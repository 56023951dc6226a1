//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `ArticleState`: the steps one article goes through during a crawl
//! - `ArticleTracker`: holds the current state of one article and rejects
//!   out-of-order steps

mod article_state;

pub use article_state::ArticleState;

use crate::CrawlError;

/// Current state of one article, advanced by the coordinator
#[derive(Debug)]
pub struct ArticleTracker {
    state: ArticleState,
}

impl ArticleTracker {
    pub fn new() -> Self {
        Self {
            state: ArticleState::Pending,
        }
    }

    pub fn state(&self) -> ArticleState {
        self.state
    }

    /// Moves to `next`, or fails with `CrawlError::InvalidTransition`
    pub fn advance(&mut self, next: ArticleState) -> Result<(), CrawlError> {
        if !self.state.can_transition_to(next) {
            return Err(CrawlError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!("article state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}

impl Default for ArticleTracker {
    fn default() -> Self {
        Self::new()
    }
}
