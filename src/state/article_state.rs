/// Article state definitions for tracking crawl progress
///
/// Every member article moves through `Pending → Fetching → Extracting →
/// Writing → Written`. Any active state may drop to `Failed`. PDF downloads
/// skip `Extracting`, since the payload is written unchanged.
use std::fmt;

/// Represents the current state of an article in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleState {
    // ===== Active States =====
    /// Listed on the category page, not yet requested
    Pending,

    /// Article HTML or PDF is being downloaded
    Fetching,

    /// Title and paragraph text are being pulled out of the HTML
    Extracting,

    /// Output file is being written
    Writing,

    // ===== Terminal States =====
    /// Output file is on disk
    Written,

    /// Fetching, extracting or writing failed
    Failed,
}

impl ArticleState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Written | Self::Failed)
    }

    /// Returns true if the step from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: ArticleState) -> bool {
        use ArticleState::*;

        match (self, next) {
            (Pending, Fetching) => true,
            (Fetching, Extracting) | (Fetching, Writing) => true,
            (Extracting, Writing) => true,
            (Writing, Written) => true,
            (state, Failed) => !state.is_terminal(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Writing => "writing",
            Self::Written => "written",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ArticleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
