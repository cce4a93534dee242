//! # ouvidoria-client
//!
//! HTTP transport for the audit log backend. [`AuditLogClient`] implements
//! [`AuditLogSource`](ouvidoria_core::traits::AuditLogSource) over the
//! `/logs` endpoints and normalizes every failure into a typed
//! [`AppError`](ouvidoria_core::AppError).

pub mod client;
pub mod disposition;

pub use client::AuditLogClient;
