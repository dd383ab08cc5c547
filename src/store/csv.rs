use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::app::Result;
use crate::domain::{ContentItem, ScrapeResult};
use crate::store::{ensure_directory, output_path, Store};

pub const HEADER: [&str; 7] = ["Index", "Views", "Likes", "Comments", "Shares", "Caption", "Link"];

/// UTF-8 byte order mark so spreadsheet apps pick the right encoding.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes one row per content item.
pub struct CsvStore {
    dir: PathBuf,
    prefix: String,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }
}

impl Store for CsvStore {
    fn save(&self, result: &ScrapeResult) -> Result<Option<PathBuf>> {
        let Some(report) = result.report().filter(|r| !r.items.is_empty()) else {
            return Ok(None);
        };

        ensure_directory(&self.dir)?;
        let path = output_path(&self.dir, &self.prefix, "videos", result, "csv");

        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(BOM)?;
        write_items(&mut writer, &report.items)?;
        writer.flush()?;

        Ok(Some(path))
    }
}

pub fn write_items<W: Write>(mut w: W, items: &[ContentItem]) -> io::Result<()> {
    write_row(&mut w, &HEADER.map(String::from))?;
    for item in items {
        let row = [
            item.index.to_string(),
            item.views.to_string(),
            item.likes.to_string(),
            item.comments.to_string(),
            item.shares.to_string(),
            item.caption.clone(),
            item.link.clone().unwrap_or_default(),
        ];
        write_row(&mut w, &row)?;
    }
    Ok(())
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row with RFC 4180 quoting.
fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    write!(w, "\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChannelInfo, ChannelReport};

    fn item(index: usize, views: u64, caption: &str) -> ContentItem {
        let mut item = ContentItem::new(index);
        item.views = views;
        item.caption = caption.to_string();
        item.link = Some(format!("https://www.tiktok.com/@someone/video/{index}"));
        item
    }

    #[test]
    fn test_write_items_quotes_special_fields() {
        let mut buf = Vec::new();
        write_items(&mut buf, &[item(1, 1200, "hello, \"world\"")]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.split("\r\n");
        assert_eq!(lines.next(), Some("Index,Views,Likes,Comments,Shares,Caption,Link"));
        assert_eq!(
            lines.next(),
            Some("1,1200,0,0,0,\"hello, \"\"world\"\"\",https://www.tiktok.com/@someone/video/1")
        );
    }

    #[test]
    fn test_missing_link_is_empty_cell() {
        let mut plain = item(2, 5, "x");
        plain.link = None;
        let mut buf = Vec::new();
        write_items(&mut buf, &[plain]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\r\n2,5,0,0,0,x,\r\n"));
    }

    #[test]
    fn test_save_writes_bom_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let report = ChannelReport::new(
            "https://www.tiktok.com/@someone",
            ChannelInfo::default(),
            vec![item(1, 10, "a"), item(2, 20, "b")],
        );

        let path = CsvStore::new(dir.path(), "tiktok")
            .save(&ScrapeResult::Success(report))
            .unwrap()
            .unwrap();
        let bytes = std::fs::read(path).unwrap();

        assert!(bytes.starts_with(BOM));
        let text = String::from_utf8(bytes[BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_save_skips_failures_and_empty_reports() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path(), "tiktok");

        let failure = ScrapeResult::failure("https://www.tiktok.com/@x", "boom");
        assert_eq!(store.save(&failure).unwrap(), None);

        let empty = ChannelReport::new(
            "https://www.tiktok.com/@x",
            ChannelInfo::default(),
            Vec::new(),
        );
        assert_eq!(store.save(&ScrapeResult::Success(empty)).unwrap(), None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
