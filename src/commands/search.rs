//! Search command - print a fixed number of result pages and exit

use tracing::debug;

use super::App;
use crate::loader::{Trigger, TriggerOutcome};

/// How many pages a one-shot search may load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLimit {
    /// Stop after this many pages
    Pages(u32),
    /// Keep going until the results run out
    All,
}

impl PageLimit {
    #[must_use]
    pub const fn allows(self, loaded_pages: u32) -> bool {
        match self {
            Self::Pages(limit) => loaded_pages < limit,
            Self::All => true,
        }
    }
}

/// What a one-shot search ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchSummary {
    /// Pages rendered
    pub pages: u32,
    /// Images rendered
    pub images: u64,
    /// Every available result was loaded
    pub exhausted: bool,
    /// A request failed before the limit was reached
    pub failed: bool,
}

/// Execute the search command
///
/// Submits `query`, then raises proximity triggers until `limit` pages have
/// been shown, the results are exhausted, or a request fails.
pub async fn execute(app: &App, query: &str, limit: PageLimit) -> SearchSummary {
    let controller = &app.controller;
    let mut summary = SearchSummary::default();
    let mut outcome = controller.submit(query).await;

    loop {
        debug!(?outcome, pages = summary.pages, "search step");
        match outcome {
            TriggerOutcome::Loaded { exhausted, .. } => {
                summary.pages += 1;
                if exhausted {
                    summary.exhausted = true;
                    break;
                }
            }
            TriggerOutcome::Exhausted => {
                summary.exhausted = true;
                break;
            }
            TriggerOutcome::Failed => {
                summary.failed = true;
                break;
            }
            TriggerOutcome::NoResults
            | TriggerOutcome::Rejected
            | TriggerOutcome::Ignored
            | TriggerOutcome::Discarded => break,
        }

        if !limit.allows(summary.pages) {
            break;
        }
        outcome = controller.handle_trigger(Trigger::Proximity).await;
    }

    summary.images = controller.loaded_count();

    if !summary.exhausted
        && !summary.failed
        && summary.pages > 0
        && !app.quiet
        && let Some(total) = controller.session().and_then(|s| s.total_available)
    {
        let remaining = total.saturating_sub(summary.images);
        if remaining > 0 {
            app.writer.info(&format!(
                "Showing {} of {total}. Use --pages or --all to load more.",
                summary.images
            ));
        }
    }

    summary
}
