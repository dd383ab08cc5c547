use std::io::{self, BufRead, Write};

use url::Url;

use crate::app::{ClipstatError, Result};
use crate::cli::Cli;
use crate::config::Config;
use crate::domain::ScrapeResult;
use crate::report::{print_comparison, print_report};
use crate::scraper::{scrape_channels, ChromeLauncher};
use crate::store::{CsvStore, JsonStore, Store};

pub const SUPPORTED_HOST: &str = "tiktok.com";

/// Accept `tiktok.com` and its subdomains over http(s).
pub fn validate_channel_url(input: &str) -> Result<Url> {
    let url = Url::parse(input.trim())?;
    let host_ok = url
        .host_str()
        .is_some_and(|h| h == SUPPORTED_HOST || h.ends_with(&format!(".{SUPPORTED_HOST}")));

    if !matches!(url.scheme(), "http" | "https") || !host_ok {
        return Err(ClipstatError::UnsupportedSite {
            url: input.to_string(),
            expected: SUPPORTED_HOST.to_string(),
        });
    }
    Ok(url)
}

/// Ask for a channel URL on `output` and read one line from `input`.
pub fn prompt_url<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<String> {
    writeln!(
        output,
        "Enter a channel URL (e.g. https://www.tiktok.com/@username):"
    )?;
    write!(output, "URL: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let url = line.trim();
    if url.is_empty() {
        return Err(ClipstatError::MissingUrl);
    }
    Ok(url.to_string())
}

/// Resolve the channel URLs from the command line, prompting on stdin
/// when none were given. Every URL is validated before any browser starts.
pub fn channel_urls(cli: &Cli) -> Result<Vec<Url>> {
    if cli.urls.is_empty() {
        let url = prompt_url(io::stdin().lock(), io::stdout())?;
        return Ok(vec![validate_channel_url(&url)?]);
    }
    cli.urls.iter().map(|u| validate_channel_url(u)).collect()
}

/// Scrape every channel, printing each report and writing any requested
/// files as it finishes. Several channels end with a comparison table.
///
/// Only a missing or invalid URL is an error; scrape and save failures are
/// reported and the command still succeeds.
pub async fn scrape(cli: &Cli, config: Config) -> Result<Vec<ScrapeResult>> {
    let urls = channel_urls(cli)?;

    for url in &urls {
        println!("Analyzing channel: {}", url);
    }
    println!("Headless: {}", config.scraper.headless);
    println!("Max scrolls: {}", config.scraper.max_scroll_attempts);

    let dir = &config.output.directory;
    let prefix = config.output.file_prefix.as_str();
    let results = scrape_channels(
        &urls,
        &config.scraper,
        |scraper| ChromeLauncher::new(scraper.clone()),
        |result| {
            print_report(result, config.output.top_n);
            if cli.save_json {
                save(&JsonStore::new(dir, prefix), result, "JSON");
            }
            if cli.save_csv {
                save(&CsvStore::new(dir, prefix), result, "CSV");
            }
        },
    )
    .await;

    if results.len() > 1 {
        print_comparison(&results);
    }

    Ok(results)
}

fn save(store: &impl Store, result: &ScrapeResult, kind: &str) {
    match store.save(result) {
        Ok(Some(path)) => println!("Saved {} to {}", kind, path.display()),
        Ok(None) => println!("No item data to export as {}", kind),
        Err(e) => eprintln!("Failed to save {}: {}", kind, e),
    }
}
