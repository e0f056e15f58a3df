//! # Revex
//!
//! An extraction engine for user-generated review content behind
//! script-rendered pages and shortened share links.
//!
//! ## Architecture
//!
//! Revex follows a single-pass pipeline architecture:
//!
//! ```text
//! URL → Classifier → Session / Fallback → Locator → Outcome → Result
//! ```
//!
//! - [`domain`]: URL classification and the job state machine
//! - [`session`]: scoped browser sessions and redirect resolution
//! - [`locator`]: direct-marker and feed-scan content location
//! - [`fallback`]: static HTTP fetch for degraded extraction
//! - [`engine`]: the orchestrator tying it all together
//!
//! ## Quick Start
//!
//! ```bash
//! # Extract from a direct review permalink
//! revex extract https://place.example.com/my/review/123
//!
//! # Extract via a shortcut link, matching a store in the feed
//! revex extract https://plc.me/abc123 --store "Haven Coffee"
//!
//! # See how a link would be handled
//! revex classify https://plc.me/abc123
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Error types shared across the crate
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Engine settings and structural markers
//! - [`domain`]: Core domain models (UrlKind, ExtractionJob)
//! - [`engine`]: Extraction orchestrator and retry wrapper
//! - [`fallback`]: Static-fetch degradation path
//! - [`locator`]: Content location strategies
//! - [`outcome`]: Acceptance rule for extracted content
//! - [`session`]: Browser session provider and page driver

/// Error types shared across the crate.
///
/// [`RevexError`](app::RevexError) is the one error enum; capability
/// degradation and structural misses are not errors and live elsewhere.
pub mod app;

/// Command-line interface using clap.
///
/// Defines the CLI structure and subcommands:
/// - `extract <url> [--store NAME] [--retries N]` - Run an extraction
/// - `classify <url>` - Show how a link would be handled
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/revex/config.toml`, covering session bounds,
/// waits, the scroll budget, and the structural content markers.
pub mod config;

/// Core domain models.
///
/// - [`UrlKind`](domain::UrlKind): Direct permalink vs. shortcut link
/// - [`ExtractionJob`](domain::ExtractionJob): job state machine
/// - [`ExtractionResult`](domain::ExtractionResult): what callers receive
/// - [`MatchCandidate`](domain::MatchCandidate): one parsed feed block
pub mod domain;

/// The extraction orchestrator.
///
/// - [`Extractor`](engine::Extractor): one-attempt extraction
/// - [`extract_with_retry`](engine::extract_with_retry): bounded retries
pub mod engine;

/// Static-fetch fallback for when no browser session is available.
///
/// A plain HTTP GET plus title/meta-description distillation; documented
/// best-effort.
pub mod fallback;

/// Content location strategies.
///
/// - [`Locate`](locator::Locate): strategy trait over a page session
/// - [`DirectLocator`](locator::DirectLocator): reads permalink markers
/// - [`FeedLocator`](locator::FeedLocator): bounded scroll-and-scan
pub mod locator;

/// Acceptance rule for extracted content.
///
/// Sentinel strings for missing elements and the minimum-length check
/// that separates Completed from Failed.
pub mod outcome;

/// Browser session management.
///
/// Uses headless Chrome via chromiumoxide with anti-automation-detection
/// launch flags and a bounded number of concurrent sessions.
///
/// - [`SessionProvider`](session::SessionProvider): hands out sessions
/// - [`PageSession`](session::PageSession): the narrow page driver trait
/// - [`ChromeSessionProvider`](session::ChromeSessionProvider): the real one
pub mod session;
