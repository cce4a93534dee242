//! Core traits defined in `ouvidoria-core` and implemented by other crates.

pub mod source;

pub use source::{AuditLogSource, ChunkStream, ExportBody};
