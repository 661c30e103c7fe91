//! JSONL file writer for relay events.
//!
//! Each [`RelayEvent`] is serialized as a single JSON line with a `type`
//! field and `timestamp`. Lines are handed to a dedicated writer thread over
//! a channel, so request handling never waits on file I/O.

use relay_application::ports::relay_logger::{RelayEvent, RelayLogger};
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use tracing::warn;

/// JSONL relay event logger that appends one JSON object per line.
///
/// Dropping the logger closes the channel and joins the writer thread,
/// which flushes every queued line first.
pub struct JsonlRelayLogger {
    sender: Option<Sender<String>>,
    worker: Option<JoinHandle<()>>,
    path: PathBuf,
}

impl JsonlRelayLogger {
    /// Create a new logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {}", path.display(), e);
                return None;
            }
        };

        let (sender, receiver) = mpsc::channel::<String>();
        let worker = std::thread::Builder::new()
            .name("relay-event-log".to_string())
            .spawn(move || write_lines(BufWriter::new(file), receiver));
        let worker = match worker {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Could not start event log writer: {}", e);
                return None;
            }
        };

        Some(Self {
            sender: Some(sender),
            worker: Some(worker),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_lines(mut writer: BufWriter<File>, receiver: mpsc::Receiver<String>) {
    for line in receiver {
        if writeln!(writer, "{}", line).is_err() {
            break;
        }
        // Append-only; flush per line so a crash loses at most one event
        let _ = writer.flush();
    }
    let _ = writer.flush();
}

fn to_record(event: RelayEvent) -> Value {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    if let Value::Object(mut map) = event.payload {
        map.insert("type".to_string(), Value::String(event.event_type.to_string()));
        map.insert("timestamp".to_string(), Value::String(timestamp));
        Value::Object(map)
    } else {
        json!({
            "type": event.event_type,
            "timestamp": timestamp,
            "data": event.payload,
        })
    }
}

impl RelayLogger for JsonlRelayLogger {
    fn log(&self, event: RelayEvent) {
        let Ok(line) = serde_json::to_string(&to_record(event)) else {
            return;
        };
        if let Some(sender) = &self.sender {
            // A closed channel means the writer gave up; drop the event.
            let _ = sender.send(line);
        }
    }
}

impl Drop for JsonlRelayLogger {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_application::ports::relay_logger::{BACKEND_RESPONSE, TOOL_SET_PREPARED};

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.events.jsonl");
        let logger = JsonlRelayLogger::new(&path).unwrap();

        logger.log(RelayEvent::new(
            TOOL_SET_PREPARED,
            json!({"request_id": "req_1", "tool_count": 2, "tools": ["Read", "Write"]}),
        ));
        logger.log(RelayEvent::new(
            BACKEND_RESPONSE,
            json!({"request_id": "req_1", "success": false, "status_code": 400}),
        ));

        // Joins the writer
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.get("timestamp").is_some());
        }
        assert_eq!(lines[0]["type"], TOOL_SET_PREPARED);
        assert_eq!(lines[0]["tools"], json!(["Read", "Write"]));
        assert_eq!(lines[1]["type"], BACKEND_RESPONSE);
        assert_eq!(lines[1]["status_code"], 400);
    }

    #[test]
    fn test_jsonl_logger_handles_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");
        let logger = JsonlRelayLogger::new(&path).unwrap();

        logger.log(RelayEvent::new(BACKEND_RESPONSE, json!("just a string")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], BACKEND_RESPONSE);
        assert_eq!(lines[0]["data"], "just a string");
    }

    #[test]
    fn test_jsonl_logger_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        for n in 0..2 {
            let logger = JsonlRelayLogger::new(&path).unwrap();
            logger.log(RelayEvent::new(BACKEND_RESPONSE, json!({"n": n})));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_jsonl_logger_logs_from_many_threads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let logger = std::sync::Arc::new(JsonlRelayLogger::new(&path).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let logger = logger.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        logger.log(RelayEvent::new(BACKEND_RESPONSE, json!({"t": t, "i": i})));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        drop(logger);

        assert_eq!(read_lines(&path).len(), 100);
    }
}
