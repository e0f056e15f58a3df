use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::app::{Result, RevexError};
use crate::config::EngineConfig;
use crate::domain::MatchCandidate;
use crate::session::scripts::PageScripts;
use crate::session::{PageSession, ReviewSnapshot, SessionOutcome, SessionProvider};

/// Launches one exclusive browser process per job, bounded by a fixed
/// number of session slots.
///
/// A slot is held for the whole life of the session it admitted; the
/// owned permit rides inside the session and frees the slot when the
/// session closes or is dropped, so the bound survives cancellation.
pub struct ChromeSessionProvider {
    config: EngineConfig,
    slots: Arc<Semaphore>,
}

impl ChromeSessionProvider {
    pub fn new(config: EngineConfig) -> Self {
        let slots = Arc::new(Semaphore::new(config.max_sessions.max(1)));
        Self { config, slots }
    }

    async fn launch(&self) -> Result<ChromeSession> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-infobars")
            .arg("--no-first-run")
            .arg("--window-size=1920,1080");

        if let Some(ref ua) = self.config.user_agent {
            builder = builder.arg(format!("--user-agent={}", ua));
        }

        if !self.config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| RevexError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            RevexError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        // Drive the CDP event stream for the life of the session.
        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(RevexError::Browser(format!("Failed to create page: {}", e)));
            }
        };

        // Mask the automation flag before any page script runs.
        if let Err(e) = page
            .execute(AddScriptToEvaluateOnNewDocumentParams::new(
                PageScripts::stealth(),
            ))
            .await
        {
            handler_task.abort();
            return Err(RevexError::Browser(format!(
                "Failed to install stealth script: {}",
                e
            )));
        }

        Ok(ChromeSession {
            browser,
            page,
            handler_task,
            scripts: PageScripts::new(self.config.clone()),
            permit: None,
        })
    }
}

#[async_trait]
impl SessionProvider for ChromeSessionProvider {
    async fn acquire(&self) -> SessionOutcome {
        let permit = match self.slots.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                return SessionOutcome::Unavailable {
                    reason: "session slots closed".to_string(),
                }
            }
        };

        match self.launch().await {
            Ok(mut session) => {
                session.permit = Some(permit);
                debug!("browser session ready");
                SessionOutcome::Ready(Box::new(session))
            }
            Err(e) => {
                // Permit drops here, freeing the slot for the next job.
                info!("browser session unavailable: {}", e);
                SessionOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// One live browser driving a single page on behalf of one job.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    scripts: PageScripts,
    permit: Option<OwnedSemaphorePermit>,
}

impl ChromeSession {
    async fn evaluate_value(&self, script: String) -> Result<serde_json::Value> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| RevexError::Browser(format!("Script execution failed: {}", e)))?
            .into_value()
            .map_err(|e| RevexError::Evaluation(format!("Failed to parse result: {:?}", e)))
    }
}

#[async_trait]
impl PageSession for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| RevexError::Browser(format!("Navigation failed: {}", e)))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| RevexError::Browser(format!("Navigation did not complete: {}", e)))?;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String> {
        let value = self
            .evaluate_value(PageScripts::current_url().to_string())
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn read_review(&mut self) -> Result<ReviewSnapshot> {
        let value = self.evaluate_value(self.scripts.direct_read()).await?;
        Ok(ReviewSnapshot {
            text: value["text"].as_str().map(|s| s.to_string()),
            date: value["date"].as_str().map(|s| s.to_string()),
        })
    }

    async fn feed_blocks(&mut self) -> Result<Vec<MatchCandidate>> {
        let value = self.evaluate_value(self.scripts.feed_snapshot()).await?;
        serde_json::from_value(value)
            .map_err(|e| RevexError::Evaluation(format!("Unexpected feed snapshot shape: {}", e)))
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        self.page
            .evaluate(PageScripts::scroll_to_bottom())
            .await
            .map_err(|e| RevexError::Browser(format!("Scroll failed: {}", e)))?;
        Ok(())
    }

    async fn close(mut self: Box<Self>) {
        // Closing the browser tears down its pages as well.
        if let Err(e) = self.browser.close().await {
            debug!("browser close failed: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        // Permit drops with self, freeing the slot.
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        // Cancellation path: the event task must not outlive the session.
        // The browser process and the slot permit are released by their
        // own drops.
        self.handler_task.abort();
    }
}
