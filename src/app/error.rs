use thiserror::Error;

#[derive(Error, Debug)]
pub enum RevexError {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Script evaluation error: {0}")]
    Evaluation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store name {expected:?} not matched after {scrolls} scroll iterations")]
    StoreNotMatched { expected: String, scrolls: u32 },

    #[error("Expected store name is required for shortcut URLs")]
    MissingStoreName,

    #[error("Invalid job transition: {0}")]
    InvalidTransition(String),
}

impl RevexError {
    /// True for failures that re-running the same extraction cannot fix.
    pub fn is_deterministic(&self) -> bool {
        matches!(
            self,
            RevexError::StoreNotMatched { .. } | RevexError::MissingStoreName
        )
    }
}

pub type Result<T> = std::result::Result<T, RevexError>;
