use crate::config::EngineConfig;
use crate::domain::{ExtractionResult, JobStatus, UrlKind};
use crate::engine::{extract_with_retry, Extractor, RetryPolicy};

pub async fn extract(config: EngineConfig, url: &str, store: Option<&str>, retries: u32) {
    let extractor = Extractor::new(config);

    let result = if retries > 1 {
        extract_with_retry(
            &extractor,
            url,
            store,
            RetryPolicy {
                max_attempts: retries,
            },
        )
        .await
    } else {
        extractor.extract(url, store).await
    };

    print_result(&result);
}

pub fn classify(url: &str) {
    match UrlKind::classify(url) {
        UrlKind::Direct => {
            println!("direct: review permalink, markers are read in place");
        }
        UrlKind::Shortcut => {
            println!("shortcut: redirect is resolved, then the feed is scanned (needs --store)");
        }
    }
}

fn print_result(result: &ExtractionResult) {
    match result.status {
        JobStatus::Completed => {
            println!("Status:   completed ({} attempt(s))", result.attempt_count);
            println!("Date:     {}", result.date.as_deref().unwrap_or("-"));
            println!("Text:     {}", result.text.as_deref().unwrap_or("-"));
        }
        _ => {
            println!("Status:   failed ({} attempt(s))", result.attempt_count);
            println!("Error:    {}", result.error.as_deref().unwrap_or("unknown"));
        }
    }
}
