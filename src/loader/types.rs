//! Types exchanged between the load controller and its surroundings

use std::fmt;

/// Controller state for the current query session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No active session
    #[default]
    Idle,
    /// Session exists, nothing in flight, more pages may remain
    Ready,
    /// A page fetch is outstanding
    Fetching,
    /// Nothing left to load until the next submit
    Exhausted,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Fetching => "fetching",
            Self::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// External signal asking the controller to act
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Search form submitted with raw query text
    Submit(String),
    /// Sentinel near the end of the gallery came into view
    Proximity,
    /// Scrolled to the very bottom
    ScrollEnd,
}

impl Trigger {
    /// Whether this trigger asks for the next page of the running session
    #[must_use]
    pub const fn is_scroll(&self) -> bool {
        matches!(self, Self::Proximity | Self::ScrollEnd)
    }
}

/// Why a search could not show results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Blank query submitted
    EmptyQuery,
    /// First page of a session came back empty
    NoResults,
    /// The request for the first page failed
    FetchFailed,
}

/// Closed set of notifications the controller can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// First page arrived; carries the reported total
    Success { total: u64 },
    /// Scrolling reached the end of the results
    EndOfResults,
    Failure(FailureReason),
}

/// What a single trigger led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A page was rendered
    Loaded {
        /// Items on the page
        count: usize,
        /// Session is now exhausted
        exhausted: bool,
    },
    /// A scroll fetch returned nothing; session is now exhausted
    Exhausted,
    /// The first page of a new session was empty
    NoResults,
    /// Blank submit; nothing was fetched
    Rejected,
    /// The fetch failed; session stays usable
    Failed,
    /// Not acted upon (already fetching, exhausted, or no session)
    Ignored,
    /// Result belonged to a replaced session and was dropped
    Discarded,
}
