//! REST call bookkeeping.
//!
//! Every dispatched operation is logged twice: a call-start record when
//! the request arrives and a call-end record carrying the stringified
//! outcome. The log is append-only; records for repository faults carry
//! the same correlation id reported to the caller.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::CatalogError;

use super::logger::Logger;

/// Call lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallEvent {
    CallStarted,
    CallCompleted,
}

/// How a completed call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallOutcome {
    Success,
    Failed,
}

/// A single call-log record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    /// Shared by the start and end records of one call
    pub call_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: CallEvent,
    pub method: &'static str,
    pub server_name: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CallOutcome>,
    /// Stringified response or error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,
}

/// Append-only sink for call records
pub trait CallLog: Send + Sync {
    fn append(&self, record: &CallRecord) -> io::Result<()>;
}

/// File-backed call log, one JSON record per line, flushed per write
pub struct FileCallLog {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileCallLog {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CallLog for FileCallLog {
    fn append(&self, record: &CallRecord) -> io::Result<()> {
        let json = serde_json::to_string(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "call log lock poisoned"))?;
        writeln!(writer, "{json}")?;
        writer.flush()
    }
}

/// In-memory call log for tests
#[derive(Default)]
pub struct MemoryCallLog {
    records: Mutex<Vec<CallRecord>>,
}

impl MemoryCallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<CallRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

impl CallLog for MemoryCallLog {
    fn append(&self, record: &CallRecord) -> io::Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Token returned by [`RestCallLog::start`], consumed on completion
#[derive(Debug, Clone)]
pub struct CallToken {
    call_id: Uuid,
    method: &'static str,
    server_name: String,
    user_id: String,
}

/// Front end the dispatchers use for call bookkeeping.
///
/// Appending is best effort: a failing sink never fails the request.
pub struct RestCallLog {
    log: Arc<dyn CallLog>,
}

impl RestCallLog {
    pub fn new(log: Arc<dyn CallLog>) -> Self {
        Self { log }
    }

    /// Record the start of a call and hand back its token
    pub fn start(&self, method: &'static str, server_name: &str, user_id: &str) -> CallToken {
        let token = CallToken {
            call_id: Uuid::new_v4(),
            method,
            server_name: server_name.to_string(),
            user_id: user_id.to_string(),
        };
        let record = CallRecord {
            call_id: token.call_id,
            timestamp: Utc::now(),
            event: CallEvent::CallStarted,
            method,
            server_name: token.server_name.clone(),
            user_id: token.user_id.clone(),
            outcome: None,
            detail: None,
            correlation_id: None,
        };
        Logger::trace("CALL_START", &[("method", method), ("user", user_id)]);
        let _ = self.log.append(&record);
        token
    }

    /// Record the completion of a call with its stringified outcome
    pub fn complete<T: Serialize>(&self, token: CallToken, result: &Result<T, CatalogError>) {
        let (outcome, detail, correlation_id) = match result {
            Ok(value) => (
                CallOutcome::Success,
                serde_json::to_string(value).ok(),
                None,
            ),
            Err(error) => (
                CallOutcome::Failed,
                Some(error.to_string()),
                error.correlation_id(),
            ),
        };
        if outcome == CallOutcome::Failed {
            Logger::warn(
                "CALL_FAILED",
                &[
                    ("method", token.method),
                    ("detail", detail.as_deref().unwrap_or("")),
                ],
            );
        }
        let record = CallRecord {
            call_id: token.call_id,
            timestamp: Utc::now(),
            event: CallEvent::CallCompleted,
            method: token.method,
            server_name: token.server_name,
            user_id: token.user_id,
            outcome: Some(outcome),
            detail,
            correlation_id,
        };
        let _ = self.log.append(&record);
    }
}
