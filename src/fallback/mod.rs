//! Static-fetch fallback for when no browser session is available.
//!
//! A plain HTTP GET sees the page before any script runs, so the review
//! body is not in the markup. The best a static fetch can offer is the
//! page title and meta description, which rarely clear the acceptance
//! threshold. The outcome classifier decides whether the degraded text
//! counts.

use regex::Regex;
use reqwest::Client;

use crate::app::Result;
use crate::config::EngineConfig;
use crate::domain::ReviewContent;
use crate::outcome::DATE_UNAVAILABLE_STATIC;

pub struct FallbackFetcher {
    client: Client,
}

impl FallbackFetcher {
    pub fn new(config: &EngineConfig) -> Self {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| "revex/0.1.0".to_string());

        let client = Client::builder()
            .timeout(config.fallback_timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Fetch the page and distill its title and meta description.
    ///
    /// The date is never present in static markup, so it is reported as a
    /// fixed sentinel. Transport and HTTP-status failures are real errors.
    pub async fn fetch(&self, url: &str) -> Result<ReviewContent> {
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;
        let body = response.text().await?;

        Ok(ReviewContent {
            text: degraded_text(&body),
            date: DATE_UNAVAILABLE_STATIC.to_string(),
        })
    }
}

fn degraded_text(html: &str) -> String {
    let title = extract_title(html);
    let description = extract_meta_description(html);

    if !title.is_empty() && !description.is_empty() {
        format!("{title} {description}")
    } else if !title.is_empty() {
        title
    } else {
        description
    }
}

fn extract_title(html: &str) -> String {
    let re = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex");
    let Some(cap) = re.captures(html) else {
        return String::new();
    };
    clean_text(cap.get(1).map_or("", |m| m.as_str()))
}

fn extract_meta_description(html: &str) -> String {
    let re = Regex::new(
        r#"(?is)<meta[^>]+name\s*=\s*["']description["'][^>]+content\s*=\s*["'](.*?)["'][^>]*>"#,
    )
    .expect("valid meta description regex");

    if let Some(cap) = re.captures(html) {
        return clean_text(cap.get(1).map_or("", |m| m.as_str()));
    }

    // Some pages emit content= before name=.
    let re_swapped = Regex::new(
        r#"(?is)<meta[^>]+content\s*=\s*["'](.*?)["'][^>]+name\s*=\s*["']description["'][^>]*>"#,
    )
    .expect("valid meta description fallback regex");

    re_swapped
        .captures(html)
        .and_then(|cap| cap.get(1).map(|m| clean_text(m.as_str())))
        .unwrap_or_default()
}

fn clean_text(input: &str) -> String {
    let tags = Regex::new(r"(?is)<[^>]+>").expect("valid tags regex");
    let no_tags = tags.replace_all(input, " ");
    let decoded = html_escape::decode_html_entities(&no_tags);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
