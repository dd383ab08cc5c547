//! Human-readable console summary of a scrape.

use std::fmt::Write;

use crate::domain::item::truncate_chars;
use crate::domain::{ChannelReport, ScrapeResult};
use crate::normalizer::format_magnitude;

const RULE_WIDTH: usize = 70;
const BIO_CHARS: usize = 100;
const CAPTION_CHARS: usize = 70;
const NAME_CHARS: usize = 24;

pub fn print_report(result: &ScrapeResult, top_n: usize) {
    print!("{}", render(result, top_n));
}

pub fn render(result: &ScrapeResult, top_n: usize) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "CHANNEL STATISTICS REPORT");
    let _ = writeln!(out, "{rule}");

    match result {
        ScrapeResult::Failure(failure) => {
            let _ = writeln!(out, "Error: {}", failure.error_message);
            let _ = writeln!(out, "URL: {}", failure.source_url);
        }
        ScrapeResult::Success(report) => {
            write_channel(&mut out, report);
            write_statistics(&mut out, report);
            let _ = writeln!(out, "\nURL: {}", report.source_url);
            let _ = writeln!(out, "Scraped at: {}", report.timestamp_utc.to_rfc3339());
            write_ranking(&mut out, report, top_n);
        }
    }

    let _ = writeln!(out, "\n{rule}");
    out
}

fn write_channel(out: &mut String, report: &ChannelReport) {
    let info = &report.channel_info;
    let _ = writeln!(out, "\nCHANNEL");
    let _ = writeln!(out, "  Name:          {}", info.name);
    let _ = writeln!(out, "  Handle:        {}", info.handle);
    if !info.bio.is_empty() {
        let _ = writeln!(out, "  Bio:           {}", truncate_chars(&info.bio, BIO_CHARS));
    }
    let _ = writeln!(out, "  Followers:     {}", counter(info.followers));
    let _ = writeln!(out, "  Following:     {}", counter(info.following));
    let _ = writeln!(out, "  Channel likes: {}", counter(info.channel_likes));
}

fn write_statistics(out: &mut String, report: &ChannelReport) {
    let totals = &report.totals;
    let _ = writeln!(out, "\nCONTENT");
    let _ = writeln!(out, "  Items:         {}", report.items.len());
    let _ = writeln!(out, "  Total views:   {}", counter(totals.views));

    for (label, value) in [
        ("Total likes:   ", totals.likes),
        ("Total comments:", totals.comments),
        ("Total shares:  ", totals.shares),
    ] {
        if value > 0 {
            let _ = writeln!(out, "  {} {}", label, counter(value));
        }
    }

    if !report.items.is_empty() {
        let _ = writeln!(
            out,
            "  Average views: {}",
            format_magnitude(report.derived.average_views)
        );
    }
    if report.derived.engagement_rate_percent > 0.0 {
        let _ = writeln!(
            out,
            "  Engagement:    {:.2}%",
            report.derived.engagement_rate_percent
        );
    }
}

fn write_ranking(out: &mut String, report: &ChannelReport, top_n: usize) {
    if report.items.is_empty() {
        return;
    }

    let ranked: Vec<_> = report
        .ranking()
        .into_iter()
        .filter(|item| item.views > 0)
        .collect();

    let _ = writeln!(
        out,
        "\nTOP {} (of {} items with view data)",
        top_n,
        ranked.len()
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for (rank, item) in ranked.iter().take(top_n).enumerate() {
        let _ = writeln!(
            out,
            "\n{}. {} views ({})",
            rank + 1,
            format_magnitude(item.views),
            item.view_text
        );
        if item.likes > 0 {
            let _ = writeln!(out, "   {} likes", format_magnitude(item.likes));
        }
        if !item.caption.is_empty() {
            let _ = writeln!(out, "   {}", truncate_chars(&item.caption, CAPTION_CHARS));
        }
        if let Some(link) = &item.link {
            let _ = writeln!(out, "   {}", link);
        }
    }
}

pub fn print_comparison(results: &[ScrapeResult]) {
    print!("{}", render_comparison(results));
}

/// One row per scraped channel, in the order they were scraped.
pub fn render_comparison(results: &[ScrapeResult]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "CHANNEL COMPARISON");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "{:<3} {:<24} {:>10} {:>7} {:>12} {:>10}",
        "#", "Channel", "Followers", "Items", "Total views", "Avg views"
    );

    for (position, result) in results.iter().enumerate() {
        match result {
            ScrapeResult::Success(report) => {
                let _ = writeln!(
                    out,
                    "{:<3} {:<24} {:>10} {:>7} {:>12} {:>10}",
                    position + 1,
                    truncate_chars(&report.channel_info.name, NAME_CHARS),
                    format_magnitude(report.channel_info.followers),
                    report.items.len(),
                    format_magnitude(report.totals.views),
                    group_thousands(report.derived.average_views)
                );
            }
            ScrapeResult::Failure(failure) => {
                let _ = writeln!(
                    out,
                    "{:<3} {} failed: {}",
                    position + 1,
                    result.source_url(),
                    failure.error_message
                );
            }
        }
    }

    let _ = writeln!(out, "{rule}");
    out
}

/// `"1.20M (1,200,000)"`
fn counter(value: u64) -> String {
    format!("{} ({})", format_magnitude(value), group_thousands(value))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
