//! Persistence layer — durable records of provisioning attempts.

pub mod libsql;
pub mod traits;

pub use libsql::LibSqlRecordStore;
pub use traits::{RecordPatch, RecordStore};
