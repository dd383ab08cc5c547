use tracing::{debug, error, info, warn};
use url::Url;

use crate::app::Result;
use crate::domain::item::truncate_chars;
use crate::domain::{ChannelInfo, ChannelReport, ContentItem, ScrapeResult};
use crate::scraper::config::ScraperConfig;
use crate::scraper::driver::{DriverLauncher, PageDriver};
use crate::scraper::extractor::{extract_count, extract_field, Scope};
use crate::scraper::scroll::scroll_until_converged;
use crate::scraper::strategies;

/// Scrapes one channel profile per call, each with its own browser.
pub struct ChannelScraper<L: DriverLauncher> {
    launcher: L,
    config: ScraperConfig,
}

impl<L: DriverLauncher> ChannelScraper<L> {
    pub fn new(launcher: L, config: ScraperConfig) -> Self {
        Self { launcher, config }
    }

    /// Scrape `url` into a success or failure result.
    ///
    /// Never returns an error: launch and navigation failures become
    /// [`ScrapeResult::Failure`]. The driver is closed on every path after
    /// a successful launch.
    pub async fn scrape_channel(&self, url: &str) -> ScrapeResult {
        info!(url, "Scraping channel");

        let driver = match self.launcher.launch().await {
            Ok(driver) => driver,
            Err(e) => {
                error!(url, "Failed to start browser: {}", e);
                return ScrapeResult::failure(url, e);
            }
        };

        let outcome = self.collect(&driver, url).await;

        if let Err(e) = driver.close().await {
            warn!("Failed to close browser: {}", e);
        }

        match outcome {
            Ok(report) => {
                info!(
                    url,
                    items = report.items.len(),
                    views = report.totals.views,
                    "Channel scrape complete"
                );
                ScrapeResult::Success(report)
            }
            Err(e) => {
                error!(url, "Channel scrape failed: {}", e);
                ScrapeResult::failure(url, e)
            }
        }
    }

    async fn collect(&self, driver: &L::Driver, url: &str) -> Result<ChannelReport> {
        let origin = site_origin(url)?;

        driver
            .navigate(url, self.config.wait_mode(), self.config.navigation_timeout())
            .await?;
        tokio::time::sleep(self.config.settle_delay()).await;

        info!("Loading content");
        let scroll = scroll_until_converged(driver, &self.config.scroll_policy()).await;
        debug!(?scroll, "Scroll finished");

        info!("Reading channel info");
        let channel_info = extract_channel_info(driver).await;

        let elements = find_content_items(driver, &self.config.container_selectors).await;
        info!(count = elements.len(), "Found content items");

        let mut items = Vec::with_capacity(elements.len());
        for (position, element) in elements.iter().enumerate() {
            let index = position + 1;
            match extract_item(driver, element, index, &origin, self.config.caption_max_chars).await
            {
                Ok(item) => {
                    if index % 10 == 0 || item.views > 0 {
                        debug!(index, views = %item.view_text, "Item processed");
                    }
                    items.push(item);
                }
                Err(e) => warn!(index, "Skipping item {}: {}", index, e),
            }
        }

        Ok(ChannelReport::new(url, channel_info, items))
    }
}

/// Scrape each URL in turn, each with its own scraper and browser.
///
/// `on_result` sees every result as soon as its scrape finishes.
pub async fn scrape_channels<L, F, R>(
    urls: &[Url],
    config: &ScraperConfig,
    mut launcher_for: F,
    mut on_result: R,
) -> Vec<ScrapeResult>
where
    L: DriverLauncher,
    F: FnMut(&ScraperConfig) -> L,
    R: FnMut(&ScrapeResult),
{
    let mut results = Vec::with_capacity(urls.len());
    for (position, url) in urls.iter().enumerate() {
        info!(channel = position + 1, total = urls.len(), url = %url, "Starting channel");
        let scraper = ChannelScraper::new(launcher_for(config), config.clone());
        let result = scraper.scrape_channel(url.as_str()).await;
        on_result(&result);
        results.push(result);
    }
    results
}

/// Scheme + host of the channel URL, used to absolutize item links.
fn site_origin(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)?;
    Ok(Url::parse(&parsed.origin().ascii_serialization())?)
}

pub async fn extract_channel_info<D: PageDriver>(driver: &D) -> ChannelInfo {
    let page = Scope::Document;

    let name = extract_field(driver, page, strategies::CHANNEL_NAME).await;
    let handle = extract_field(driver, page, strategies::CHANNEL_HANDLE).await;
    let bio = extract_field(driver, page, strategies::CHANNEL_BIO).await;
    // Counters skip digit-less values such as `title="Followers"`.
    let followers = extract_count(driver, page, strategies::FOLLOWERS).await;
    let following = extract_count(driver, page, strategies::FOLLOWING).await;
    let likes = extract_count(driver, page, strategies::CHANNEL_LIKES).await;

    if followers.is_none() {
        warn!("Follower count not found");
    }

    ChannelInfo {
        name: name.map_or_else(|| "Unknown".to_string(), |e| e.value),
        handle: handle.map(|e| e.value).unwrap_or_default(),
        bio: bio.map(|e| e.value).unwrap_or_default(),
        followers: followers.map_or(0, |e| e.count()),
        following: following.map_or(0, |e| e.count()),
        channel_likes: likes.map_or(0, |e| e.count()),
    }
}

/// Query each container selector in turn; the first with matches wins.
pub async fn find_content_items<D: PageDriver>(
    driver: &D,
    selectors: &[String],
) -> Vec<D::Element> {
    for selector in selectors {
        match driver.query(selector).await {
            Ok(elements) if !elements.is_empty() => {
                info!(selector = %selector, "Using container selector");
                return elements;
            }
            Ok(_) => debug!(selector = %selector, "Container selector matched nothing"),
            Err(e) => debug!(selector = %selector, "Container selector failed: {}", e),
        }
    }

    warn!("No content items found; the selectors may be stale or the page did not load");
    Vec::new()
}

/// Read one tile. The anchor query goes straight to the driver, so a tile
/// whose handle is no longer usable fails here as a whole.
pub async fn extract_item<D: PageDriver>(
    driver: &D,
    element: &D::Element,
    index: usize,
    origin: &Url,
    caption_max_chars: usize,
) -> Result<ContentItem> {
    let scope = Scope::Within(element);
    let mut item = ContentItem::new(index);

    let anchors = driver.query_scoped(element, strategies::ITEM_ANCHOR).await?;
    if let Some(anchor) = anchors.first() {
        if let Some(href) = driver.attribute(anchor, "href").await? {
            item.link = absolute_link(origin, &href);
        }
    }

    // extract_count only accepts values with a digit, so a label-only
    // match moves on to the next strategy instead of recording 0.
    if let Some(views) = extract_count(driver, scope, strategies::ITEM_VIEWS).await {
        item.views = views.count();
        item.view_text = views.value;
        item.view_source = views.tag;
    }

    if let Some(likes) = extract_count(driver, scope, strategies::ITEM_LIKES).await {
        item.likes = likes.count();
    }
    if let Some(comments) = extract_count(driver, scope, strategies::ITEM_COMMENTS).await {
        item.comments = comments.count();
    }
    if let Some(shares) = extract_count(driver, scope, strategies::ITEM_SHARES).await {
        item.shares = shares.count();
    }

    if let Some(caption) = extract_field(driver, scope, strategies::ITEM_CAPTION).await {
        item.caption = truncate_chars(&caption.value, caption_max_chars);
    }

    Ok(item)
}

fn absolute_link(origin: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    origin.join(href).ok().map(String::from)
}
