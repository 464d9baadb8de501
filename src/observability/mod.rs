//! Logging and call bookkeeping for the access service.

pub mod calls;
pub mod logger;

pub use calls::{CallLog, CallRecord, CallToken, FileCallLog, MemoryCallLog, RestCallLog};
pub use logger::{Logger, Severity};
