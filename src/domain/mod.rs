pub mod candidate;
pub mod job;
pub mod review;
pub mod url;

pub use candidate::MatchCandidate;
pub use job::{ExtractionJob, ExtractionResult, JobStatus};
pub use review::ReviewContent;
pub use url::UrlKind;
