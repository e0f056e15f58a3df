use std::time::Instant;

use tracing::debug;

use crate::app::Result;
use crate::config::EngineConfig;
use crate::session::PageSession;

/// Navigate to a shortcut URL and wait out its client-side redirect.
///
/// Polls the page's own URL until it differs from the requested one,
/// bounded by the configured redirect timeout. Timing out is not a
/// failure: some inputs legitimately never redirect, so resolution
/// proceeds with whatever URL is current. The post-navigation settle
/// delay elapses before returning because content keeps rendering after
/// the navigation commits.
pub async fn resolve_redirect(
    session: &mut dyn PageSession,
    shortcut_url: &str,
    config: &EngineConfig,
) -> Result<String> {
    session.navigate(shortcut_url).await?;

    let deadline = Instant::now() + config.redirect_timeout();
    let mut current = session.current_url().await?;

    while current == shortcut_url || current.is_empty() {
        if Instant::now() >= deadline {
            debug!(url = %shortcut_url, "redirect wait timed out, proceeding with current URL");
            break;
        }
        tokio::time::sleep(config.redirect_poll()).await;
        current = session.current_url().await?;
    }

    if current.is_empty() {
        current = shortcut_url.to_string();
    }

    if current != shortcut_url {
        debug!(from = %shortcut_url, to = %current, "client-side redirect resolved");
    }

    tokio::time::sleep(config.settle_after_nav()).await;

    Ok(current)
}
