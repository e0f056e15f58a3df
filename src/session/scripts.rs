use crate::config::EngineConfig;

/// Builds the JavaScript snippets evaluated inside review pages.
pub struct PageScripts {
    config: EngineConfig,
}

impl PageScripts {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    fn quote(selector: &str) -> String {
        format!("'{}'", selector.replace('\'', "\\'"))
    }

    /// JS reading the direct-page markers.
    ///
    /// Returns `{ text, date }` with `null` for any absent element.
    pub fn direct_read(&self) -> String {
        let text_sel = Self::quote(&self.config.review_text_selector);
        let date_sel = Self::quote(&self.config.visit_date_selector);

        format!(
            r#"
            (() => {{
                const body = document.querySelector({text_sel});
                const date = document.querySelector({date_sel});
                return {{
                    text: body ? body.innerText : null,
                    date: date ? date.innerText : null,
                }};
            }})()
            "#
        )
    }

    /// JS harvesting every review block rendered in the feed.
    ///
    /// Returns an array of `{ label, text, date }`. Blocks without a
    /// store-name label cannot be matched and are skipped here.
    pub fn feed_snapshot(&self) -> String {
        let block_sel = Self::quote(&self.config.feed_block_selector);
        let label_sel = Self::quote(&self.config.store_label_selector);
        let text_sel = Self::quote(&self.config.review_text_selector);
        let date_sel = Self::quote(&self.config.visit_date_selector);

        format!(
            r#"
            (() => {{
                const blocks = [];
                document.querySelectorAll({block_sel}).forEach(el => {{
                    const label = el.querySelector({label_sel});
                    if (!label) return;
                    const body = el.querySelector({text_sel});
                    const date = el.querySelector({date_sel});
                    blocks.push({{
                        label: label.innerText,
                        text: body ? body.innerText : null,
                        date: date ? date.innerText : null,
                    }});
                }});
                return blocks;
            }})()
            "#
        )
    }

    pub fn current_url() -> &'static str {
        "window.location.href"
    }

    pub fn scroll_to_bottom() -> &'static str {
        "window.scrollTo(0, document.body.scrollHeight)"
    }

    /// Injected before any page script runs to mask the automation flag.
    pub fn stealth() -> &'static str {
        r#"
        Object.defineProperty(navigator, 'webdriver', { get: () => undefined });
        Object.defineProperty(navigator, 'plugins', { get: () => [1, 2, 3, 4, 5] });
        Object.defineProperty(navigator, 'languages', { get: () => ['en-US', 'en'] });
        window.chrome = { runtime: {} };
        "#
    }
}
