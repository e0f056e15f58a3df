//! Bounded retry around single-attempt extraction.
//!
//! The engine itself never self-schedules; callers that want more than one
//! attempt opt in through this wrapper.

use tracing::info;

use crate::domain::ExtractionResult;
use crate::engine::Extractor;

/// Bounds for a multi-attempt extraction run.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Re-run a failed extraction up to the policy bound.
///
/// Deterministic failures (store name not matched, shortcut without a
/// store name) are final on their first occurrence; re-scanning the same
/// feed cannot change them. The returned result's `attempt_count` is the
/// total number of attempts made.
pub async fn extract_with_retry(
    extractor: &Extractor,
    source_url: &str,
    expected_store_name: Option<&str>,
    policy: RetryPolicy,
) -> ExtractionResult {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempts = 0u32;

    loop {
        let (mut result, deterministic) = extractor
            .extract_attempt(source_url, expected_store_name)
            .await;
        attempts += 1;
        result.attempt_count = attempts;

        if result.is_completed() || deterministic || attempts >= max_attempts {
            return result;
        }

        info!(url = source_url, attempts, "extraction failed, retrying");
    }
}
