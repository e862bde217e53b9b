//! JSONL sink for the machine-readable conversation record.
//!
//! One JSON object per line, appended to the log file as turns happen. The
//! file survives across runs (append mode), so a long testing session against
//! the same agent accumulates a single chronological record.

use chatzia_application::{ConversationEvent, ConversationLogger};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Serialize)]
struct Record {
    #[serde(rename = "type")]
    event_type: &'static str,
    timestamp: String,
    #[serde(flatten)]
    payload: serde_json::Value,
}

/// Appends each conversation event as one JSON line.
///
/// Writes go through a `Mutex<BufWriter<File>>` and are flushed per event:
/// the log is meant to be tailed while the tester runs. Write failures are
/// swallowed; a broken log must never take down a conversation turn.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<std::fs::File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the log file at `path`, creating parent directories
    /// as needed.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        // Flatten only works over an object; anything else nests under "data".
        let payload = match event.payload {
            object @ serde_json::Value::Object(_) => object,
            other => serde_json::json!({ "data": other }),
        };
        let record = Record {
            event_type: event.event_type,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            payload,
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
