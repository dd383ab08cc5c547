pub mod csv;
pub mod json;

use std::path::{Path, PathBuf};

use crate::app::Result;
use crate::domain::ScrapeResult;

pub use self::csv::CsvStore;
pub use self::json::JsonStore;

pub trait Store {
    /// Persist `result`. Returns the written path, or `None` when the store
    /// has nothing to write for this result.
    fn save(&self, result: &ScrapeResult) -> Result<Option<PathBuf>>;
}

/// `<dir>/<prefix>_<kind>_<channel>_<YYYYmmdd_HHMMSS>.<ext>`
fn output_path(dir: &Path, prefix: &str, kind: &str, result: &ScrapeResult, ext: &str) -> PathBuf {
    let channel = result
        .report()
        .map(|r| r.channel_info.file_stem())
        .unwrap_or_else(|| "unknown".to_string());
    let stamp = result.timestamp_utc().format("%Y%m%d_%H%M%S");
    dir.join(format!("{prefix}_{kind}_{channel}_{stamp}.{ext}"))
}

fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
