use chrono::{DateTime, Utc};

use crate::app::{Result, RevexError};
use crate::domain::url::UrlKind;

/// Lifecycle of an extraction job. Transitions are forward-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// One unit of extraction work and its result.
///
/// Owned exclusively by the orchestrator for the duration of one extraction
/// call. Fields are private so the state invariants hold by construction:
/// extracted text/date are set iff Completed, the error message is set iff
/// Failed, and `processed_at` is written exactly once at the terminal
/// transition.
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    source_url: String,
    expected_store_name: Option<String>,
    url_kind: UrlKind,
    status: JobStatus,
    attempt_count: u32,
    extracted_text: Option<String>,
    extracted_date: Option<String>,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
}

impl ExtractionJob {
    pub fn new(source_url: &str, expected_store_name: Option<&str>) -> Self {
        Self {
            source_url: source_url.to_string(),
            expected_store_name: expected_store_name.map(|s| s.to_string()),
            url_kind: UrlKind::classify(source_url),
            status: JobStatus::Pending,
            attempt_count: 0,
            extracted_text: None,
            extracted_date: None,
            error_message: None,
            created_at: Utc::now(),
            processed_at: None,
        }
    }

    /// Pending -> Processing. Counts the attempt.
    pub fn begin(&mut self) -> Result<()> {
        if self.status != JobStatus::Pending {
            return Err(RevexError::InvalidTransition(format!(
                "begin called in {:?}",
                self.status
            )));
        }
        self.status = JobStatus::Processing;
        self.attempt_count += 1;
        Ok(())
    }

    /// Processing -> Completed with the accepted text and date.
    pub fn complete(&mut self, text: String, date: String) -> Result<()> {
        if self.status != JobStatus::Processing {
            return Err(RevexError::InvalidTransition(format!(
                "complete called in {:?}",
                self.status
            )));
        }
        self.status = JobStatus::Completed;
        self.extracted_text = Some(text);
        self.extracted_date = Some(date);
        self.processed_at = Some(Utc::now());
        Ok(())
    }

    /// Processing -> Failed with a human-readable message.
    pub fn fail(&mut self, message: String) -> Result<()> {
        if self.status != JobStatus::Processing {
            return Err(RevexError::InvalidTransition(format!(
                "fail called in {:?}",
                self.status
            )));
        }
        self.status = JobStatus::Failed;
        self.error_message = Some(message);
        self.processed_at = Some(Utc::now());
        Ok(())
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn expected_store_name(&self) -> Option<&str> {
        self.expected_store_name.as_deref()
    }

    pub fn url_kind(&self) -> UrlKind {
        self.url_kind
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    pub fn extracted_text(&self) -> Option<&str> {
        self.extracted_text.as_deref()
    }

    pub fn extracted_date(&self) -> Option<&str> {
        self.extracted_date.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.processed_at
    }
}

/// What the engine hands back to its caller for one attempt.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub status: JobStatus,
    pub text: Option<String>,
    pub date: Option<String>,
    pub error: Option<String>,
    pub attempt_count: u32,
}

impl ExtractionResult {
    pub fn is_completed(&self) -> bool {
        self.status == JobStatus::Completed
    }
}

impl From<ExtractionJob> for ExtractionResult {
    fn from(job: ExtractionJob) -> Self {
        Self {
            status: job.status,
            text: job.extracted_text,
            date: job.extracted_date,
            error: job.error_message,
            attempt_count: job.attempt_count,
        }
    }
}
