use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::Result;

/// How long `navigate` waits before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// The `load` event fired
    Load,
    /// `load` fired and resource requests have stopped arriving
    NetworkIdle,
}

/// The browser operations the scraping pipeline needs.
///
/// Every lookup returns an explicit `Result`/`Option`; callers decide which
/// failures are recoverable.
#[async_trait]
pub trait PageDriver: Send + Sync + Sized {
    /// Opaque handle to a DOM element
    type Element: Send + Sync;

    async fn navigate(&self, url: &str, wait: WaitMode, timeout: Duration) -> Result<()>;

    /// Evaluate a script in the page. `undefined` comes back as `Value::Null`.
    async fn evaluate(&self, script: &str) -> Result<Value>;

    async fn query(&self, selector: &str) -> Result<Vec<Self::Element>>;

    async fn query_scoped(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Vec<Self::Element>>;

    async fn text_content(&self, element: &Self::Element) -> Result<Option<String>>;

    async fn attribute(&self, element: &Self::Element, name: &str) -> Result<Option<String>>;

    /// Release the page and the browser behind it.
    async fn close(self) -> Result<()>;
}

/// Starts a fresh, exclusively owned driver for one scrape.
#[async_trait]
pub trait DriverLauncher: Send + Sync {
    type Driver: PageDriver;

    async fn launch(&self) -> Result<Self::Driver>;
}
