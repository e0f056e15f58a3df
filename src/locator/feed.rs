use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::app::{Result, RevexError};
use crate::config::EngineConfig;
use crate::domain::{MatchCandidate, ReviewContent};
use crate::locator::{first_match, Locate};
use crate::outcome::{RECEIPT_DATE_MISSING, REVIEW_TEXT_MISSING};
use crate::session::PageSession;

/// Scans a scrolling feed of review blocks for the expected store.
///
/// Bounded scroll-and-reparse loop: snapshot the rendered blocks, take
/// the first label match, otherwise scroll to the bottom, wait for
/// rendering to settle, and re-parse. Exhausting the bound is the
/// deterministic "store name not matched" failure.
pub struct FeedLocator {
    max_scroll_iterations: u32,
    settle_after_scroll: Duration,
}

impl FeedLocator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            max_scroll_iterations: config.max_scroll_iterations,
            settle_after_scroll: config.settle_after_scroll(),
        }
    }
}

#[async_trait]
impl Locate for FeedLocator {
    async fn locate(
        &self,
        session: &mut dyn PageSession,
        expected_store_name: Option<&str>,
    ) -> Result<ReviewContent> {
        let expected = expected_store_name.ok_or(RevexError::MissingStoreName)?;

        let mut scrolls = 0u32;
        loop {
            let blocks = session.feed_blocks().await?;
            debug!(blocks = blocks.len(), scrolls, "parsed feed snapshot");

            if let Some(target) = first_match(&blocks, expected) {
                debug!(store = %target.store_label.trim(), "matched review block");
                return Ok(content_from(target));
            }

            if scrolls >= self.max_scroll_iterations {
                return Err(RevexError::StoreNotMatched {
                    expected: expected.trim().to_string(),
                    scrolls,
                });
            }

            session.scroll_to_bottom().await?;
            scrolls += 1;
            tokio::time::sleep(self.settle_after_scroll).await;
        }
    }
}

/// Body and date from the matched block only. Absent fields become their
/// sentinel strings.
fn content_from(block: &MatchCandidate) -> ReviewContent {
    let text = block
        .review_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| REVIEW_TEXT_MISSING.to_string());

    let date = block
        .receipt_date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| RECEIPT_DATE_MISSING.to_string());

    ReviewContent { text, date }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::session::ReviewSnapshot;

    fn block(label: &str, text: &str, date: &str) -> MatchCandidate {
        MatchCandidate {
            store_label: label.to_string(),
            review_text: Some(text.to_string()),
            receipt_date: Some(date.to_string()),
        }
    }

    /// Feed that reveals a new set of blocks after each scroll.
    struct ScrollingFeed {
        pages: Vec<Vec<MatchCandidate>>,
        scrolls: Arc<AtomicUsize>,
        snapshots: Arc<AtomicUsize>,
    }

    impl ScrollingFeed {
        fn new(pages: Vec<Vec<MatchCandidate>>) -> Self {
            Self {
                pages,
                scrolls: Arc::new(AtomicUsize::new(0)),
                snapshots: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn visible(&self) -> Vec<MatchCandidate> {
            let upto = (self.scrolls.load(Ordering::SeqCst) + 1).min(self.pages.len());
            self.pages[..upto].iter().flatten().cloned().collect()
        }
    }

    #[async_trait]
    impl PageSession for ScrollingFeed {
        async fn navigate(&mut self, _url: &str) -> Result<()> {
            Ok(())
        }

        async fn current_url(&mut self) -> Result<String> {
            Ok(String::new())
        }

        async fn read_review(&mut self) -> Result<ReviewSnapshot> {
            Ok(ReviewSnapshot::default())
        }

        async fn feed_blocks(&mut self) -> Result<Vec<MatchCandidate>> {
            self.snapshots.fetch_add(1, Ordering::SeqCst);
            Ok(self.visible())
        }

        async fn scroll_to_bottom(&mut self) -> Result<()> {
            self.scrolls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn close(self: Box<Self>) {}
    }

    fn locator(max_scrolls: u32) -> FeedLocator {
        FeedLocator {
            max_scroll_iterations: max_scrolls,
            settle_after_scroll: Duration::from_millis(0),
        }
    }

    #[tokio::test]
    async fn test_match_on_first_snapshot_never_scrolls() {
        let mut feed = ScrollingFeed::new(vec![vec![
            block("Pasta Lane", "al dente, would return", "3.1.Fri"),
            block("Haven Coffee", "good beans, cozy corner", "3.2.Sat"),
        ]]);
        let scrolls = feed.scrolls.clone();

        let content = locator(10)
            .locate(&mut feed, Some("Haven Coffee"))
            .await
            .unwrap();

        assert_eq!(content.text, "good beans, cozy corner");
        assert_eq!(content.date, "3.2.Sat");
        assert_eq!(scrolls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_match_after_two_scrolls() {
        let mut feed = ScrollingFeed::new(vec![
            vec![block("Pasta Lane", "al dente", "3.1.Fri")],
            vec![block("Burger Yard", "juicy", "3.3.Sun")],
            vec![block("Haven Coffee", "good beans, cozy corner", "3.2.Sat")],
        ]);
        let scrolls = feed.scrolls.clone();
        let snapshots = feed.snapshots.clone();

        let content = locator(10)
            .locate(&mut feed, Some("Haven Coffee"))
            .await
            .unwrap();

        assert_eq!(content.text, "good beans, cozy corner");
        assert_eq!(scrolls.load(Ordering::SeqCst), 2);
        assert_eq!(snapshots.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_no_match_exhausts_exact_bound() {
        let mut feed = ScrollingFeed::new(vec![vec![block("Pasta Lane", "al dente", "3.1.Fri")]]);
        let scrolls = feed.scrolls.clone();

        let err = locator(5)
            .locate(&mut feed, Some("Haven Coffee"))
            .await
            .unwrap_err();

        assert_eq!(scrolls.load(Ordering::SeqCst), 5);
        match err {
            RevexError::StoreNotMatched { ref expected, scrolls } => {
                assert_eq!(expected, "Haven Coffee");
                assert_eq!(scrolls, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("Haven Coffee"));
    }

    #[tokio::test]
    async fn test_extracts_only_from_matched_block() {
        let mut feed = ScrollingFeed::new(vec![vec![
            block("Pasta Lane", "al dente, would return", "3.1.Fri"),
            block("Haven Coffee", "good beans, cozy corner", "3.2.Sat"),
            block("Burger Yard", "juicy, long queue", "3.3.Sun"),
        ]]);

        let content = locator(10)
            .locate(&mut feed, Some("Haven Coffee"))
            .await
            .unwrap();

        assert_eq!(content.text, "good beans, cozy corner");
        assert_eq!(content.date, "3.2.Sat");
    }

    #[tokio::test]
    async fn test_matched_block_without_body_yields_sentinels() {
        let mut feed = ScrollingFeed::new(vec![vec![MatchCandidate {
            store_label: "Haven Coffee".to_string(),
            review_text: None,
            receipt_date: None,
        }]]);

        let content = locator(10)
            .locate(&mut feed, Some("Haven Coffee"))
            .await
            .unwrap();

        assert_eq!(content.text, REVIEW_TEXT_MISSING);
        assert_eq!(content.date, RECEIPT_DATE_MISSING);
    }

    #[tokio::test]
    async fn test_missing_store_name_is_rejected() {
        let mut feed = ScrollingFeed::new(vec![Vec::new()]);
        let err = locator(10).locate(&mut feed, None).await.unwrap_err();
        assert!(matches!(err, RevexError::MissingStoreName));
    }

    #[tokio::test]
    async fn test_snapshot_error_propagates() {
        struct BrokenFeed;

        #[async_trait]
        impl PageSession for BrokenFeed {
            async fn navigate(&mut self, _url: &str) -> Result<()> {
                Ok(())
            }

            async fn current_url(&mut self) -> Result<String> {
                Ok(String::new())
            }

            async fn read_review(&mut self) -> Result<ReviewSnapshot> {
                Ok(ReviewSnapshot::default())
            }

            async fn feed_blocks(&mut self) -> Result<Vec<MatchCandidate>> {
                Err(RevexError::Evaluation("renderer gone".into()))
            }

            async fn scroll_to_bottom(&mut self) -> Result<()> {
                Ok(())
            }

            async fn close(self: Box<Self>) {}
        }

        let mut feed = BrokenFeed;
        assert!(locator(10)
            .locate(&mut feed, Some("Haven Coffee"))
            .await
            .is_err());
    }
}
