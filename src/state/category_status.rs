/// Category status definitions for reporting crawl outcomes
///
/// This module defines how the walk over one requested category ended.
use std::fmt;

/// Final state of one requested category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryStatus {
    // ===== Success =====
    /// Every listing page was fetched; the last one had no next link
    Completed,

    // ===== Recovered Failures =====
    /// The requested name is not in the category map; nothing was fetched
    NotFound,

    /// A listing page failed to fetch; records from earlier pages are kept
    FetchFailed {
        /// The page that failed
        url: String,
        /// Description of the failure
        error: String,
    },

    /// The page bound was reached before the listing ran out
    PageLimitReached {
        /// The bound that was hit
        limit: u32,
    },

    // ===== Interrupted =====
    /// Cancellation was requested before the next page fetch
    Cancelled,
}

impl CategoryStatus {
    /// Returns true if the walk ended early because something went wrong
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::FetchFailed { .. } | Self::PageLimitReached { .. }
        )
    }
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::NotFound => write!(f, "category not found"),
            Self::FetchFailed { url, error } => write!(f, "failed to load {}: {}", url, error),
            Self::PageLimitReached { limit } => write!(f, "stopped after {} pages", limit),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}
