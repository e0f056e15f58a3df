//! The extraction orchestrator.
//!
//! Ties the engine's pieces into one job: classify the URL, acquire a
//! browser session or degrade to the static fallback, resolve the
//! redirect if the link is a shortcut, locate the review content, classify
//! the outcome, and release the session.
//!
//! # Architecture
//!
//! ```text
//! URL + expected name → classify → session (or static fetch) → locate → outcome
//! ```
//!
//! Nothing is thrown out of [`Extractor::extract`]: every failure path
//! resolves to a Failed result carrying a human-readable error.

mod retry;

pub use retry::{extract_with_retry, RetryPolicy};

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::app::Result;
use crate::config::EngineConfig;
use crate::domain::{ExtractionJob, ExtractionResult, ReviewContent, UrlKind};
use crate::fallback::FallbackFetcher;
use crate::locator::{DirectLocator, FeedLocator, Locate};
use crate::outcome::{self, Verdict};
use crate::session::{
    resolve_redirect, ChromeSessionProvider, PageSession, SessionOutcome, SessionProvider,
};

pub struct Extractor {
    provider: Arc<dyn SessionProvider>,
    fallback: FallbackFetcher,
    config: EngineConfig,
}

impl Extractor {
    /// Extractor backed by real Chrome sessions.
    pub fn new(config: EngineConfig) -> Self {
        let provider = Arc::new(ChromeSessionProvider::new(config.clone()));
        Self::with_provider(provider, config)
    }

    /// Extractor with a caller-supplied session provider.
    pub fn with_provider(provider: Arc<dyn SessionProvider>, config: EngineConfig) -> Self {
        Self {
            provider,
            fallback: FallbackFetcher::new(&config),
            config,
        }
    }

    /// Run one extraction attempt end to end.
    ///
    /// Never returns an error: every failure becomes a Failed result with
    /// its message in `error`. The result's `attempt_count` is 1; use
    /// [`extract_with_retry`] for a bounded multi-attempt run.
    pub async fn extract(
        &self,
        source_url: &str,
        expected_store_name: Option<&str>,
    ) -> ExtractionResult {
        self.extract_attempt(source_url, expected_store_name).await.0
    }

    /// One attempt plus whether a failure was deterministic (retrying
    /// cannot change it).
    pub(crate) async fn extract_attempt(
        &self,
        source_url: &str,
        expected_store_name: Option<&str>,
    ) -> (ExtractionResult, bool) {
        let mut job = ExtractionJob::new(source_url, expected_store_name);
        if let Err(e) = job.begin() {
            error!(error = %e, "fresh job rejected its start transition");
            return (ExtractionResult::from(job), true);
        }

        info!(
            url = %job.source_url(),
            kind = ?job.url_kind(),
            store = ?job.expected_store_name(),
            attempt = job.attempt_count(),
            "extraction attempt started"
        );

        // Shortcut matching needs a name to scan for; fail before spending
        // a session slot on it.
        if job.url_kind() == UrlKind::Shortcut && job.expected_store_name().is_none() {
            let message =
                "shortcut link requires an expected store name to match against".to_string();
            return (Self::settle_failed(job, message), true);
        }

        let content = match self.provider.acquire().await {
            SessionOutcome::Ready(session) => {
                match self.browser_attempt(session, &job).await {
                    Ok(content) => Ok(content),
                    Err(e) if e.is_deterministic() => {
                        return (Self::settle_failed(job, e.to_string()), true);
                    }
                    Err(e) => {
                        warn!(error = %e, "browser attempt failed, trying static fallback");
                        self.fallback.fetch(job.source_url()).await
                    }
                }
            }
            SessionOutcome::Unavailable { reason } => {
                info!(%reason, "browser unavailable, trying static fallback");
                self.fallback.fetch(job.source_url()).await
            }
        };

        let result = match content {
            Ok(content) => Self::settle_classified(job, content),
            Err(e) => Self::settle_failed(job, e.to_string()),
        };
        (result, false)
    }

    /// Drive one session through navigation and location, closing it on
    /// every path out.
    async fn browser_attempt(
        &self,
        mut session: Box<dyn PageSession>,
        job: &ExtractionJob,
    ) -> Result<ReviewContent> {
        let outcome = self.drive(session.as_mut(), job).await;
        session.close().await;
        outcome
    }

    async fn drive(
        &self,
        session: &mut dyn PageSession,
        job: &ExtractionJob,
    ) -> Result<ReviewContent> {
        match job.url_kind() {
            UrlKind::Direct => {
                session.navigate(job.source_url()).await?;
                tokio::time::sleep(self.config.settle_after_nav()).await;
                DirectLocator
                    .locate(session, job.expected_store_name())
                    .await
            }
            UrlKind::Shortcut => {
                let resolved = resolve_redirect(session, job.source_url(), &self.config).await?;
                debug!(resolved = %resolved, "scanning feed at resolved location");
                FeedLocator::new(&self.config)
                    .locate(session, job.expected_store_name())
                    .await
            }
        }
    }

    /// Accept or reject extracted content and settle the job.
    fn settle_classified(mut job: ExtractionJob, content: ReviewContent) -> ExtractionResult {
        match outcome::classify(&content.text, &content.date) {
            Verdict::Completed => {
                info!(url = %job.source_url(), "extraction completed");
                if let Err(e) = job.complete(content.text, content.date) {
                    error!(error = %e, "job rejected completion");
                }
            }
            Verdict::Failed => {
                // The rejected text is the most useful diagnostic we have.
                let message = if content.text.is_empty() {
                    "no usable text extracted".to_string()
                } else {
                    content.text
                };
                info!(url = %job.source_url(), error = %message, "extraction rejected");
                if let Err(e) = job.fail(message) {
                    error!(error = %e, "job rejected failure transition");
                }
            }
        }
        ExtractionResult::from(job)
    }

    fn settle_failed(mut job: ExtractionJob, message: String) -> ExtractionResult {
        info!(url = %job.source_url(), error = %message, "extraction failed");
        if let Err(e) = job.fail(message) {
            error!(error = %e, "job rejected failure transition");
        }
        ExtractionResult::from(job)
    }
}
