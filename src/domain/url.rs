use url::Url;

/// Path fragment that marks an individual-review permalink.
const DIRECT_REVIEW_FRAGMENT: &str = "/my/review";

/// Shape of a submitted review URL, derived once per job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// Permalink pointing at one specific review item.
    Direct,
    /// Short-link or listing URL that must be resolved and scanned.
    Shortcut,
}

impl UrlKind {
    /// Classify a submitted review URL.
    ///
    /// Total and deterministic: no network access, no side effects, never
    /// fails. A URL is Direct iff its path contains the individual-review
    /// permalink fragment; everything else, including malformed input,
    /// classifies as Shortcut.
    pub fn classify(url: &str) -> UrlKind {
        match Url::parse(url) {
            Ok(parsed) => {
                if parsed.path().contains(DIRECT_REVIEW_FRAGMENT) {
                    UrlKind::Direct
                } else {
                    UrlKind::Shortcut
                }
            }
            // Relative or otherwise unparseable input: check the raw
            // string so path-only submissions still classify.
            Err(_) => {
                if url.contains(DIRECT_REVIEW_FRAGMENT) {
                    UrlKind::Direct
                } else {
                    UrlKind::Shortcut
                }
            }
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, UrlKind::Direct)
    }
}
