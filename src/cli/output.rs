use chrono::DateTime;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::services::dramabox_service::VENDOR_UTC_OFFSET_HOURS;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Directory that receives one JSON file per view.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        OutputDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `records` as 4-space indented JSON to `<root>/<name>`,
    /// replacing any previous file of that name.
    pub fn save<T: Serialize + ?Sized>(&self, name: &str, records: &T) -> Result<PathBuf, SaveError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(name);

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut ser)?;
        fs::write(&path, buf)?;

        info!("Saved {}", path.display());
        Ok(path)
    }

    /// Like [`save`](Self::save), but reports on the console instead of
    /// failing; a lost file never ends the run.
    pub fn save_and_report<T: Serialize + ?Sized>(&self, name: &str, records: &T) {
        match self.save(name, records) {
            Ok(path) => println!("\n[Saved] {}", path.display()),
            Err(e) => {
                warn!("Saving {} failed: {}", name, e);
                println!("[Error] Save file failed");
            }
        }
    }
}

/// First `max_chars` characters of `text`, never splitting a character.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Epoch milliseconds rendered on the vendor's UTC+7 clock.
pub fn release_time(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(at) => {
            let local = at.naive_utc() + chrono::Duration::hours(VENDOR_UTC_OFFSET_HOURS);
            format!("{} WIB", local.format("%d/%m/%Y %H:%M:%S"))
        }
        None => "-".to_string(),
    }
}

pub fn divider() {
    println!("{}", "-".repeat(40));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_writes_four_space_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::new(dir.path().join("nested"));

        let path = out.save("result_search.json", &json!([{ "bookId": "1" }])).unwrap();
        let written = fs::read_to_string(path).unwrap();

        assert_eq!(written, "[\n    {\n        \"bookId\": \"1\"\n    }\n]");
    }

    #[test]
    fn save_fails_when_root_is_a_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let out = OutputDir::new(file.path());
        assert!(matches!(
            out.save("x.json", &json!([])),
            Err(SaveError::IoError(_))
        ));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("Cinta yang hilang", 5), "Cinta");
        assert_eq!(preview("短剧很好看", 2), "短剧");
        assert_eq!(preview("pendek", 60), "pendek");
    }

    #[test]
    fn release_time_uses_utc_plus_seven() {
        // 2024-03-09T20:05:07Z
        assert_eq!(release_time(1_710_014_707_000), "10/03/2024 03:05:07 WIB");
    }
}
