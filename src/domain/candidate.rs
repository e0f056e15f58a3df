use serde::Deserialize;

/// One parsed review block encountered while scanning a feed.
///
/// Transient: candidates exist only inside the feed-scan loop and are
/// discarded once a match is found or the scan ends. They arrive as JSON
/// harvested from the page by an in-page script.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchCandidate {
    /// Store-name label of the block.
    #[serde(rename = "label")]
    pub store_label: String,

    /// Body text of the block, if its marker was present.
    #[serde(rename = "text")]
    pub review_text: Option<String>,

    /// Visit/receipt date of the block, if its marker was present.
    #[serde(rename = "date")]
    pub receipt_date: Option<String>,
}
