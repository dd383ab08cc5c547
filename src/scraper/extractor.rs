use std::fmt::Debug;

use tracing::debug;

use crate::app::Result;
use crate::normalizer::parse_magnitude;
use crate::scraper::driver::PageDriver;

/// How a strategy reads its value from the first matching element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Text,
    Attribute(&'static str),
    /// The attribute when it holds an acceptable value, otherwise the text
    AttributeOrText(&'static str),
}

/// One way of locating a field, tagged with where the value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy<T> {
    pub tag: T,
    pub selector: &'static str,
    pub lookup: Lookup,
}

impl<T> Strategy<T> {
    pub const fn text(tag: T, selector: &'static str) -> Self {
        Self {
            tag,
            selector,
            lookup: Lookup::Text,
        }
    }

    pub const fn attribute(tag: T, selector: &'static str, name: &'static str) -> Self {
        Self {
            tag,
            selector,
            lookup: Lookup::Attribute(name),
        }
    }

    pub const fn attribute_or_text(tag: T, selector: &'static str, name: &'static str) -> Self {
        Self {
            tag,
            selector,
            lookup: Lookup::AttributeOrText(name),
        }
    }
}

/// Where selectors are evaluated.
pub enum Scope<'a, E> {
    Document,
    Within(&'a E),
}

impl<E> Clone for Scope<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Scope<'_, E> {}

/// A field value and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<T> {
    pub value: String,
    pub tag: T,
}

impl<T> Extracted<T> {
    pub fn count(&self) -> u64 {
        parse_magnitude(&self.value)
    }
}

/// Try `strategies` in order and return the first non-empty value.
///
/// Driver errors inside a strategy count as a miss; `None` means every
/// strategy missed.
pub async fn extract_field<D, T>(
    driver: &D,
    scope: Scope<'_, D::Element>,
    strategies: &[Strategy<T>],
) -> Option<Extracted<T>>
where
    D: PageDriver,
    T: Copy + Debug,
{
    extract_with(driver, scope, strategies, |value| !value.is_empty()).await
}

/// Like [`extract_field`], but only accepts values containing a digit, so
/// a label such as `title="Followers"` falls through to the next strategy.
pub async fn extract_count<D, T>(
    driver: &D,
    scope: Scope<'_, D::Element>,
    strategies: &[Strategy<T>],
) -> Option<Extracted<T>>
where
    D: PageDriver,
    T: Copy + Debug,
{
    extract_with(driver, scope, strategies, |value| {
        value.chars().any(|c| c.is_ascii_digit())
    })
    .await
}

async fn extract_with<D, T, F>(
    driver: &D,
    scope: Scope<'_, D::Element>,
    strategies: &[Strategy<T>],
    accept: F,
) -> Option<Extracted<T>>
where
    D: PageDriver,
    T: Copy + Debug,
    F: Fn(&str) -> bool,
{
    for strategy in strategies {
        match try_strategy(driver, scope, strategy, &accept).await {
            Ok(Some(value)) => {
                return Some(Extracted {
                    value,
                    tag: strategy.tag,
                })
            }
            Ok(None) => {}
            Err(e) => {
                debug!(
                    tag = ?strategy.tag,
                    selector = strategy.selector,
                    "Strategy failed: {}",
                    e
                );
            }
        }
    }
    None
}

async fn try_strategy<D, T, F>(
    driver: &D,
    scope: Scope<'_, D::Element>,
    strategy: &Strategy<T>,
    accept: &F,
) -> Result<Option<String>>
where
    D: PageDriver,
    F: Fn(&str) -> bool,
{
    let elements = match scope {
        Scope::Document => driver.query(strategy.selector).await?,
        Scope::Within(element) => driver.query_scoped(element, strategy.selector).await?,
    };

    let Some(first) = elements.first() else {
        return Ok(None);
    };

    let raw = match strategy.lookup {
        Lookup::Text => driver.text_content(first).await?,
        Lookup::Attribute(name) => driver.attribute(first, name).await?,
        Lookup::AttributeOrText(name) => {
            let attr = driver.attribute(first, name).await?;
            match attr.map(|v| v.trim().to_string()) {
                Some(v) if accept(&v) => Some(v),
                _ => driver.text_content(first).await?,
            }
        }
    };

    Ok(raw
        .map(|v| v.trim().to_string())
        .filter(|v| accept(v)))
}
