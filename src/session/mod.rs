//! Browser-automation sessions.
//!
//! A session is a scoped, exclusive browser instance owned by one
//! extraction job for its whole lifetime. Sessions are never shared or
//! reused across jobs, and the provider bounds how many exist at once.
//!
//! # Architecture
//!
//! ```text
//! acquire() → Ready(session) → navigate / scan → close()
//! ```
//!
//! `Unavailable` answers a failed acquire and routes the job to the
//! static fallback fetch instead.

pub mod chrome;
pub mod redirect;
mod scripts;

pub use chrome::ChromeSessionProvider;
pub use redirect::resolve_redirect;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::MatchCandidate;

/// Raw direct-mode read of the review markers on the current page.
///
/// An absent element is `None` here; mapping absence to sentinel strings
/// is the locator's job.
#[derive(Debug, Clone, Default)]
pub struct ReviewSnapshot {
    pub text: Option<String>,
    pub date: Option<String>,
}

/// Result of attempting to acquire a browser session.
///
/// `Unavailable` is a capability degradation signal, not an error: the
/// orchestrator answers it with the static fallback fetch.
pub enum SessionOutcome {
    Ready(Box<dyn PageSession>),
    Unavailable { reason: String },
}

/// The narrow driver interface the rest of the engine sees.
///
/// One implementation drives a real browser; tests substitute scripted
/// fakes. A session belongs to exactly one job and is released exactly
/// once, by `close` or by drop.
#[async_trait]
pub trait PageSession: Send {
    /// Navigate to a URL and wait for the navigation to commit.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// The page's current URL, as the page itself reports it.
    async fn current_url(&mut self) -> Result<String>;

    /// Read the direct-mode review markers from the current page.
    async fn read_review(&mut self) -> Result<ReviewSnapshot>;

    /// Collect all review blocks currently rendered in the feed.
    async fn feed_blocks(&mut self) -> Result<Vec<MatchCandidate>>;

    /// Scroll to the bottom of the page to trigger incremental loading.
    async fn scroll_to_bottom(&mut self) -> Result<()>;

    /// Release the session. Never fails; release problems are logged.
    async fn close(self: Box<Self>);
}

/// Hands out scoped browser sessions.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn acquire(&self) -> SessionOutcome;
}
