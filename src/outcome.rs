//! Maps extracted text/date into a success/failure verdict.
//!
//! Missing page elements never raise; they produce the fixed sentinel
//! strings below, and the classifier turns those into a Failed verdict.

/// Sentinel recorded when the review-body element is absent.
pub const REVIEW_TEXT_MISSING: &str = "review text not found";

/// Sentinel recorded when the date element is absent.
pub const RECEIPT_DATE_MISSING: &str = "receipt date not found";

/// Sentinel recorded for the date by the static fallback fetch.
pub const DATE_UNAVAILABLE_STATIC: &str = "date unavailable via static fetch";

/// Strings shorter than this are treated as placeholder or boilerplate
/// rather than genuine review content.
pub const MIN_REVIEW_CHARS: usize = 10;

const SENTINELS: [&str; 3] = [
    REVIEW_TEXT_MISSING,
    RECEIPT_DATE_MISSING,
    DATE_UNAVAILABLE_STATIC,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Completed,
    Failed,
}

/// Decide whether extracted content counts as a successful extraction.
///
/// Completed iff the text is non-empty, equals no sentinel, and has
/// strictly more than `MIN_REVIEW_CHARS` characters. The date value never
/// influences the verdict; a missing date still completes with its
/// sentinel recorded. Sentinels are all longer than the threshold, so the
/// equality check runs before the length check matters.
pub fn classify(text: &str, _date: &str) -> Verdict {
    if text.is_empty() {
        return Verdict::Failed;
    }
    if SENTINELS.contains(&text) {
        return Verdict::Failed;
    }
    if text.chars().count() <= MIN_REVIEW_CHARS {
        return Verdict::Failed;
    }
    Verdict::Completed
}
