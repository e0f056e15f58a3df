use async_trait::async_trait;

use crate::app::Result;
use crate::domain::ReviewContent;
use crate::locator::Locate;
use crate::outcome::{RECEIPT_DATE_MISSING, REVIEW_TEXT_MISSING};
use crate::session::PageSession;

/// Reads the single canonical review element on a permalink page.
///
/// An absent or empty marker yields its sentinel string instead of an
/// error; the outcome classifier decides what that means for the job.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectLocator;

#[async_trait]
impl Locate for DirectLocator {
    async fn locate(
        &self,
        session: &mut dyn PageSession,
        _expected_store_name: Option<&str>,
    ) -> Result<ReviewContent> {
        let snapshot = session.read_review().await?;

        let text = match snapshot.text {
            Some(ref t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => REVIEW_TEXT_MISSING.to_string(),
        };
        let date = match snapshot.date {
            Some(ref d) if !d.trim().is_empty() => d.trim().to_string(),
            _ => RECEIPT_DATE_MISSING.to_string(),
        };

        Ok(ReviewContent { text, date })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::app::RevexError;
    use crate::domain::MatchCandidate;
    use crate::session::ReviewSnapshot;

    /// Serves one fixed snapshot and counts which operations run.
    struct SnapshotSession {
        snapshot: ReviewSnapshot,
        feed_calls: Arc<AtomicUsize>,
        scroll_calls: Arc<AtomicUsize>,
    }

    impl SnapshotSession {
        fn new(text: Option<&str>, date: Option<&str>) -> Self {
            Self {
                snapshot: ReviewSnapshot {
                    text: text.map(String::from),
                    date: date.map(String::from),
                },
                feed_calls: Arc::new(AtomicUsize::new(0)),
                scroll_calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl PageSession for SnapshotSession {
        async fn navigate(&mut self, _url: &str) -> Result<()> {
            Ok(())
        }

        async fn current_url(&mut self) -> Result<String> {
            Ok(String::new())
        }

        async fn read_review(&mut self) -> Result<ReviewSnapshot> {
            Ok(self.snapshot.clone())
        }

        async fn feed_blocks(&mut self) -> Result<Vec<MatchCandidate>> {
            self.feed_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn scroll_to_bottom(&mut self) -> Result<()> {
            self.scroll_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn close(self: Box<Self>) {}
    }

    #[tokio::test]
    async fn test_both_markers_present() {
        let mut session =
            SnapshotSession::new(Some("  Best pasta in town, five stars  "), Some("3.2.Sat"));
        let content = DirectLocator.locate(&mut session, None).await.unwrap();
        assert_eq!(content.text, "Best pasta in town, five stars");
        assert_eq!(content.date, "3.2.Sat");
    }

    #[tokio::test]
    async fn test_missing_text_becomes_sentinel() {
        let mut session = SnapshotSession::new(None, Some("3.2.Sat"));
        let content = DirectLocator.locate(&mut session, None).await.unwrap();
        assert_eq!(content.text, REVIEW_TEXT_MISSING);
        assert_eq!(content.date, "3.2.Sat");
    }

    #[tokio::test]
    async fn test_missing_date_becomes_sentinel() {
        let mut session = SnapshotSession::new(Some("Best pasta in town"), None);
        let content = DirectLocator.locate(&mut session, None).await.unwrap();
        assert_eq!(content.text, "Best pasta in town");
        assert_eq!(content.date, RECEIPT_DATE_MISSING);
    }

    #[tokio::test]
    async fn test_whitespace_only_marker_counts_as_missing() {
        let mut session = SnapshotSession::new(Some("   \n "), Some("  "));
        let content = DirectLocator.locate(&mut session, None).await.unwrap();
        assert_eq!(content.text, REVIEW_TEXT_MISSING);
        assert_eq!(content.date, RECEIPT_DATE_MISSING);
    }

    #[tokio::test]
    async fn test_never_consults_the_feed() {
        let mut session = SnapshotSession::new(Some("Best pasta in town"), Some("3.2.Sat"));
        let feed_calls = session.feed_calls.clone();
        let scroll_calls = session.scroll_calls.clone();

        DirectLocator
            .locate(&mut session, Some("Haven Coffee"))
            .await
            .unwrap();

        assert_eq!(feed_calls.load(Ordering::SeqCst), 0);
        assert_eq!(scroll_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_driver_error_propagates() {
        struct BrokenSession;

        #[async_trait]
        impl PageSession for BrokenSession {
            async fn navigate(&mut self, _url: &str) -> Result<()> {
                Ok(())
            }

            async fn current_url(&mut self) -> Result<String> {
                Ok(String::new())
            }

            async fn read_review(&mut self) -> Result<ReviewSnapshot> {
                Err(RevexError::Evaluation("tab crashed".into()))
            }

            async fn feed_blocks(&mut self) -> Result<Vec<MatchCandidate>> {
                Ok(Vec::new())
            }

            async fn scroll_to_bottom(&mut self) -> Result<()> {
                Ok(())
            }

            async fn close(self: Box<Self>) {}
        }

        let mut session = BrokenSession;
        assert!(DirectLocator.locate(&mut session, None).await.is_err());
    }
}
