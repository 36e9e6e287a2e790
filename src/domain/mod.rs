//! Domain layer for the report client
//!
//! This module contains the report and measurement models, the collaborator
//! ports, and the error taxonomy.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::ReportError;
