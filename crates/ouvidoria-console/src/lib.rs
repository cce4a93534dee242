//! # ouvidoria-console
//!
//! Per-instance state of the audit log view. [`AuditLogView`] owns the filter
//! criteria, the pagination cursor, the request sequencers and the last
//! fetched results; everything it needs from the network goes through an
//! [`AuditLogSource`](ouvidoria_core::traits::AuditLogSource).

pub mod debounce;
pub mod export;
pub mod notification;
pub mod pagination;
pub mod presenter;
pub mod sequencer;
pub mod view;

pub use debounce::SearchDebouncer;
pub use export::{ExportOrchestrator, ExportedFile};
pub use notification::{Notification, NotificationCenter, Severity};
pub use pagination::{PageChange, Pagination};
pub use presenter::{ResultCache, SuccessRate, SummaryStats};
pub use sequencer::{RequestSeq, RequestSequencer};
pub use view::{AuditLogView, FetchOutcome, FetchTicket, SummaryTicket};
