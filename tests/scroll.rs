mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use clipstat::scraper::{scroll_until_converged, ScrollPolicy, Termination};
use common::{FakeDriver, FakePage};

fn policy(max_attempts: u32) -> ScrollPolicy {
    ScrollPolicy {
        max_attempts,
        stability_threshold: 3,
        delay: Duration::ZERO,
    }
}

fn page_with(reads: &[Option<u64>]) -> Arc<FakePage> {
    let mut page = FakePage::new();
    page.heights(reads);
    Arc::new(page)
}

#[tokio::test]
async fn test_converges_after_stable_reads() {
    let page = page_with(&[Some(100), Some(200), Some(200), Some(200), Some(200)]);
    let driver = FakeDriver::new(page.clone());

    let outcome = scroll_until_converged(&driver, &policy(20)).await;

    assert_eq!(outcome.termination, Termination::Converged);
    assert_eq!(outcome.attempts_used, 5);
    assert_eq!(outcome.final_height, 200);
    assert_eq!(page.scrolls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_growth_resets_the_streak() {
    let page = page_with(&[
        Some(100),
        Some(100),
        Some(100),
        Some(300),
        Some(300),
        Some(300),
        Some(300),
    ]);
    let driver = FakeDriver::new(page);

    let outcome = scroll_until_converged(&driver, &policy(20)).await;

    assert_eq!(outcome.termination, Termination::Converged);
    assert_eq!(outcome.attempts_used, 7);
    assert_eq!(outcome.final_height, 300);
}

#[tokio::test]
async fn test_exhausts_budget_while_content_keeps_loading() {
    let reads: Vec<Option<u64>> = (1..=10).map(|i| Some(i * 1000)).collect();
    let page = page_with(&reads);
    let driver = FakeDriver::new(page.clone());

    let outcome = scroll_until_converged(&driver, &policy(6)).await;

    assert_eq!(outcome.termination, Termination::Exhausted);
    assert_eq!(outcome.attempts_used, 6);
    assert_eq!(outcome.final_height, 6000);
    assert_eq!(page.scrolls.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_stable_run_must_finish_within_budget() {
    // Stable from the second read; a third stable read would need a fourth attempt
    let page = page_with(&[Some(500), Some(500), Some(500), Some(500)]);
    let driver = FakeDriver::new(page);

    let outcome = scroll_until_converged(&driver, &policy(3)).await;

    assert_eq!(outcome.termination, Termination::Exhausted);
    assert_eq!(outcome.attempts_used, 3);
}

#[tokio::test]
async fn test_empty_page_converges() {
    let page = page_with(&[Some(0), Some(0), Some(0)]);
    let driver = FakeDriver::new(page);

    let outcome = scroll_until_converged(&driver, &policy(20)).await;

    assert_eq!(outcome.termination, Termination::Converged);
    assert_eq!(outcome.attempts_used, 3);
    assert_eq!(outcome.final_height, 0);
}

#[tokio::test]
async fn test_failed_height_reads_still_terminate() {
    let page = page_with(&[None; 8]);
    let driver = FakeDriver::new(page.clone());

    let outcome = scroll_until_converged(&driver, &policy(8)).await;

    assert_eq!(outcome.termination, Termination::Exhausted);
    assert_eq!(outcome.attempts_used, 8);
    assert_eq!(page.height_reads.load(Ordering::SeqCst), 8);
}

#[tokio::test]
async fn test_failed_read_does_not_break_streak() {
    let page = page_with(&[Some(100), Some(100), None, Some(100), Some(100)]);
    let driver = FakeDriver::new(page);

    let outcome = scroll_until_converged(&driver, &policy(20)).await;

    assert_eq!(outcome.termination, Termination::Converged);
    assert_eq!(outcome.attempts_used, 5);
}

#[tokio::test]
async fn test_zero_budget_does_nothing() {
    let page = page_with(&[Some(100)]);
    let driver = FakeDriver::new(page.clone());

    let outcome = scroll_until_converged(&driver, &policy(0)).await;

    assert_eq!(outcome.termination, Termination::Exhausted);
    assert_eq!(outcome.attempts_used, 0);
    assert_eq!(page.scrolls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_never_exceeds_budget() {
    for budget in 0..12 {
        let reads: Vec<Option<u64>> = (0..budget as u64 + 5)
            .map(|i| if i % 4 == 3 { None } else { Some(i / 2) })
            .collect();
        let page = page_with(&reads);
        let driver = FakeDriver::new(page.clone());

        let outcome = scroll_until_converged(&driver, &policy(budget)).await;

        assert!(outcome.attempts_used <= budget);
        assert!(page.scrolls.load(Ordering::SeqCst) <= budget as usize);
    }
}
