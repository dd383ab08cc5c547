//! Scripted in-memory page driver for pipeline tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use clipstat::app::{ClipstatError, Result};
use clipstat::scraper::scroll::{SCROLL_HEIGHT_SCRIPT, SCROLL_TO_BOTTOM_SCRIPT};
use clipstat::scraper::{DriverLauncher, PageDriver, ScraperConfig, WaitMode};

pub const VIEWS_BADGE: &str = r#"strong[data-e2e="video-views"]"#;
pub const VIEWS_LABEL: &str = r#"[data-e2e="video-views"]"#;
pub const POST_ITEM: &str = r#"[data-e2e="user-post-item"]"#;

#[derive(Debug, Default, Clone)]
pub struct Node {
    text: Option<String>,
    attrs: HashMap<String, String>,
    children: HashMap<String, Vec<usize>>,
    failing_selectors: HashSet<String>,
    broken: bool,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn child(mut self, selector: &str, ids: &[usize]) -> Self {
        self.children.insert(selector.to_string(), ids.to_vec());
        self
    }

    /// Scoped queries for `selector` fail
    pub fn failing(mut self, selector: &str) -> Self {
        self.failing_selectors.insert(selector.to_string());
        self
    }

    /// Every operation on this node fails, as for a detached element
    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }
}

#[derive(Default)]
pub struct FakePage {
    nodes: Vec<Node>,
    document: HashMap<String, Vec<usize>>,
    document_errors: HashSet<String>,
    heights: Mutex<VecDeque<Option<u64>>>,
    last_height: Mutex<u64>,
    navigate_error: Option<String>,
    pub navigations: AtomicUsize,
    pub scrolls: AtomicUsize,
    pub height_reads: AtomicUsize,
    pub closes: AtomicUsize,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn on_document(&mut self, selector: &str, ids: &[usize]) {
        self.document.insert(selector.to_string(), ids.to_vec());
    }

    pub fn fail_document(&mut self, selector: &str) {
        self.document_errors.insert(selector.to_string());
    }

    /// Scripted height reads; `None` is a failed read. Once exhausted the
    /// last successful height repeats.
    pub fn heights(&mut self, reads: &[Option<u64>]) {
        *self.heights.lock().unwrap() = reads.iter().copied().collect();
    }

    pub fn fail_navigation(&mut self, reason: &str) {
        self.navigate_error = Some(reason.to_string());
    }

    /// A content tile with a link, a views badge and a caption.
    pub fn tile(&mut self, views: &str, href: &str, caption: &str) -> usize {
        let anchor = self.add(Node::new().attr("href", href));
        let badge = self.add(Node::new().text(views));
        let desc = self.add(Node::new().text(caption));
        self.add(
            Node::new()
                .child("a", &[anchor])
                .child(VIEWS_BADGE, &[badge])
                .child(VIEWS_LABEL, &[badge])
                .child("strong", &[badge])
                .child(r#"[data-e2e="user-post-item-desc"]"#, &[desc]),
        )
    }

    /// Profile header with the given follower counter text.
    pub fn profile(&mut self, name: &str, handle: &str, followers: &str) {
        let title = self.add(Node::new().text(name));
        let subtitle = self.add(Node::new().text(handle));
        let counter = self.add(Node::new().attr("title", "Followers").text(followers));
        self.on_document(r#"h1[data-e2e="user-title"]"#, &[title]);
        self.on_document(r#"h2[data-e2e="user-subtitle"]"#, &[subtitle]);
        self.on_document(r#"[data-e2e="followers-count"]"#, &[counter]);
    }

    fn node(&self, id: usize) -> Result<&Node> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| ClipstatError::Driver(format!("no node {id}")))?;
        if node.broken {
            return Err(ClipstatError::Driver(format!("node {id} is detached")));
        }
        Ok(node)
    }

    fn next_height(&self) -> Option<u64> {
        let scripted = self.heights.lock().unwrap().pop_front();
        let mut last = self.last_height.lock().unwrap();
        match scripted {
            Some(Some(h)) => {
                *last = h;
                Some(h)
            }
            Some(None) => None,
            None => Some(*last),
        }
    }
}

pub struct FakeDriver {
    page: Arc<FakePage>,
}

impl FakeDriver {
    pub fn new(page: Arc<FakePage>) -> Self {
        Self { page }
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    type Element = usize;

    async fn navigate(&self, url: &str, _wait: WaitMode, _timeout: Duration) -> Result<()> {
        self.page.navigations.fetch_add(1, Ordering::SeqCst);
        match &self.page.navigate_error {
            Some(reason) => Err(ClipstatError::Navigation {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn evaluate(&self, script: &str) -> Result<Value> {
        if script == SCROLL_TO_BOTTOM_SCRIPT {
            self.page.scrolls.fetch_add(1, Ordering::SeqCst);
            return Ok(Value::Null);
        }
        if script == SCROLL_HEIGHT_SCRIPT {
            self.page.height_reads.fetch_add(1, Ordering::SeqCst);
            return self
                .page
                .next_height()
                .map(|h| json!(h))
                .ok_or_else(|| ClipstatError::Driver("height read failed".into()));
        }
        Ok(Value::Null)
    }

    async fn query(&self, selector: &str) -> Result<Vec<usize>> {
        if self.page.document_errors.contains(selector) {
            return Err(ClipstatError::Driver(format!("query {selector} failed")));
        }
        Ok(self.page.document.get(selector).cloned().unwrap_or_default())
    }

    async fn query_scoped(&self, scope: &usize, selector: &str) -> Result<Vec<usize>> {
        let node = self.page.node(*scope)?;
        if node.failing_selectors.contains(selector) {
            return Err(ClipstatError::Driver(format!("scoped query {selector} failed")));
        }
        Ok(node.children.get(selector).cloned().unwrap_or_default())
    }

    async fn text_content(&self, element: &usize) -> Result<Option<String>> {
        Ok(self.page.node(*element)?.text.clone())
    }

    async fn attribute(&self, element: &usize, name: &str) -> Result<Option<String>> {
        Ok(self.page.node(*element)?.attrs.get(name).cloned())
    }

    async fn close(self) -> Result<()> {
        self.page.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FakeLauncher {
    page: Arc<FakePage>,
    fail: bool,
    pub launches: AtomicUsize,
}

impl FakeLauncher {
    pub fn new(page: Arc<FakePage>) -> Self {
        Self {
            page,
            fail: false,
            launches: AtomicUsize::new(0),
        }
    }

    pub fn failing(page: Arc<FakePage>) -> Self {
        Self {
            fail: true,
            ..Self::new(page)
        }
    }
}

#[async_trait]
impl DriverLauncher for FakeLauncher {
    type Driver = FakeDriver;

    async fn launch(&self) -> Result<FakeDriver> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ClipstatError::Browser("no browser binary".into()));
        }
        Ok(FakeDriver::new(self.page.clone()))
    }
}

/// Scraper config with no waits.
pub fn instant_config() -> ScraperConfig {
    ScraperConfig {
        max_scroll_attempts: 5,
        scroll_delay_ms: 0,
        settle_delay_ms: 0,
        ..Default::default()
    }
}
