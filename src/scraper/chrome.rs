use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::{ClipstatError, Result};
use crate::scraper::config::ScraperConfig;
use crate::scraper::driver::{DriverLauncher, PageDriver, WaitMode};

/// Resolves once no new resource entries have appeared for ~500ms.
const NETWORK_IDLE_SCRIPT: &str = r#"
    new Promise(resolve => {
        let last = performance.getEntriesByType('resource').length;
        let quiet = 0;
        const timer = setInterval(() => {
            const now = performance.getEntriesByType('resource').length;
            if (now === last) {
                quiet += 1;
                if (quiet >= 5) {
                    clearInterval(timer);
                    resolve(true);
                }
            } else {
                last = now;
                quiet = 0;
            }
        }, 100);
    })
"#;

fn driver_error(e: impl std::fmt::Display) -> ClipstatError {
    ClipstatError::Driver(e.to_string())
}

/// Launches Chromium via chromiumoxide, one browser per scrape
pub struct ChromeLauncher {
    config: ScraperConfig,
}

impl ChromeLauncher {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl DriverLauncher for ChromeLauncher {
    type Driver = ChromeDriver;

    async fn launch(&self) -> Result<ChromeDriver> {
        let mut builder = BrowserConfig::builder()
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .window_size(self.config.window_width, self.config.window_height)
            .request_timeout(self.config.navigation_timeout());

        if !self.config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| ClipstatError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (mut browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            ClipstatError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        // Spawn the browser handler
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        let page = match open_page(&browser, self.config.user_agent.as_deref()).await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler.abort();
                return Err(e);
            }
        };

        Ok(ChromeDriver {
            browser,
            page,
            handler,
        })
    }
}

async fn open_page(browser: &Browser, user_agent: Option<&str>) -> Result<Page> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| ClipstatError::Browser(format!("Failed to create page: {}", e)))?;

    // Set user agent if configured
    if let Some(ua) = user_agent {
        page.set_user_agent(ua)
            .await
            .map_err(|e| ClipstatError::Browser(format!("Failed to set user agent: {}", e)))?;
    }

    Ok(page)
}

/// A single Chromium page driven over CDP
pub struct ChromeDriver {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

#[async_trait]
impl PageDriver for ChromeDriver {
    type Element = Element;

    async fn navigate(&self, url: &str, wait: WaitMode, timeout: Duration) -> Result<()> {
        let navigation_error = |e: chromiumoxide::error::CdpError| ClipstatError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let load = async {
            self.page.goto(url).await.map_err(navigation_error)?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(navigation_error)?;
            if wait == WaitMode::NetworkIdle {
                self.page
                    .evaluate(NETWORK_IDLE_SCRIPT)
                    .await
                    .map_err(navigation_error)?;
            }
            Ok::<(), ClipstatError>(())
        };

        tokio::time::timeout(timeout, load)
            .await
            .map_err(|_| ClipstatError::NavigationTimeout {
                url: url.to_string(),
                timeout_secs: timeout.as_secs(),
            })?
    }

    async fn evaluate(&self, script: &str) -> Result<Value> {
        let result = self.page.evaluate(script).await.map_err(driver_error)?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn query(&self, selector: &str) -> Result<Vec<Element>> {
        self.page.find_elements(selector).await.map_err(driver_error)
    }

    async fn query_scoped(&self, scope: &Element, selector: &str) -> Result<Vec<Element>> {
        scope.find_elements(selector).await.map_err(driver_error)
    }

    async fn text_content(&self, element: &Element) -> Result<Option<String>> {
        element.inner_text().await.map_err(driver_error)
    }

    async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>> {
        element.attribute(name).await.map_err(driver_error)
    }

    async fn close(self) -> Result<()> {
        let Self {
            mut browser,
            page,
            handler,
        } = self;

        if let Err(e) = page.close().await {
            warn!("Failed to close page: {}", e);
        }

        let closed = browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| ClipstatError::Browser(format!("Failed to close browser: {}", e)));
        if let Err(e) = browser.wait().await {
            debug!("Failed to wait for browser exit: {}", e);
        }
        handler.abort();

        closed
    }
}
