//! Locating review content on a loaded page.
//!
//! Two strategies behind one interface, selected by `UrlKind` exactly
//! once at the orchestrator: `DirectLocator` reads the single canonical
//! review element on a permalink page, `FeedLocator` scans a scrolling
//! feed for the block whose store label matches the expected name.

mod direct;
mod feed;

pub use direct::DirectLocator;
pub use feed::FeedLocator;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{MatchCandidate, ReviewContent};
use crate::session::PageSession;

/// A content-location strategy.
#[async_trait]
pub trait Locate: Send + Sync {
    /// Extract review text and date from the session's current page.
    ///
    /// `expected_store_name` drives feed matching; the direct strategy
    /// ignores it.
    async fn locate(
        &self,
        session: &mut dyn PageSession,
        expected_store_name: Option<&str>,
    ) -> Result<ReviewContent>;
}

/// First block whose trimmed store label equals the trimmed expected name.
///
/// Exact, case-sensitive comparison. When several blocks carry the same
/// label, the first in document order wins.
pub fn first_match<'a>(
    blocks: &'a [MatchCandidate],
    expected_store_name: &str,
) -> Option<&'a MatchCandidate> {
    let expected = expected_store_name.trim();
    blocks.iter().find(|block| block.store_label.trim() == expected)
}
