pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "clipstat")]
#[command(about = "Total up views, likes and followers for a TikTok channel", long_about = None)]
pub struct Cli {
    /// Channel URLs, e.g. https://www.tiktok.com/@username; several are
    /// scraped one after another and compared. Prompted for when omitted.
    pub urls: Vec<String>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,

    /// Save the full result as JSON
    #[arg(long)]
    pub save_json: bool,

    /// Save the item list as CSV
    #[arg(long)]
    pub save_csv: bool,

    /// Maximum scroll cycles used to load content
    #[arg(long)]
    pub max_scrolls: Option<u32>,

    /// Directory for saved files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.config/clipstat/config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, mut config: Config) -> Config {
        if self.headed {
            config.scraper.headless = false;
        }
        if let Some(max) = self.max_scrolls {
            config.scraper.max_scroll_attempts = max;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        config
    }
}
