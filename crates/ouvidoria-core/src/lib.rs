//! # ouvidoria-core
//!
//! Core crate for the Ouvidoria audit log browser. Contains the audit log
//! data model, the client-owned filter state and its canonical query
//! mapping, configuration schemas, the data source trait, and the unified
//! error system.
//!
//! This crate performs **no** I/O and has no internal dependencies on other
//! Ouvidoria crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
