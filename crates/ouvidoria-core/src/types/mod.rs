//! Core type definitions used across the Ouvidoria workspace.

pub mod action;
pub mod entry;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod summary;

pub use action::{ActionFilter, ActionOption, AuditAction, AuditStatus};
pub use entry::{Actor, AuditLogEntry, EntryId};
pub use filter::{DateRange, FilterCriteria, FilterState};
pub use pagination::{LogPage, PageResult, PageSize};
pub use query::CanonicalQuery;
pub use summary::DailySummary;
