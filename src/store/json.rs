use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::app::Result;
use crate::domain::ScrapeResult;
use crate::store::{ensure_directory, output_path, Store};

/// Writes the full result, success or failure, as pretty-printed JSON.
pub struct JsonStore {
    dir: PathBuf,
    prefix: String,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }
}

impl Store for JsonStore {
    fn save(&self, result: &ScrapeResult) -> Result<Option<PathBuf>> {
        ensure_directory(&self.dir)?;
        let path = output_path(&self.dir, &self.prefix, "stats", result, "json");

        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, result)?;
        writer.flush()?;

        Ok(Some(path))
    }
}
