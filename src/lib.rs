//! probe-report - network measurement report client
//!
//! Drives the client side of a measurement report: discovering a collector,
//! opening a report, submitting measurement documents into it, and closing
//! it again. Previously serialized measurements can be replayed into a new
//! report.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Report and measurement models, collaborator ports
//! - **Service Layer** (`services`): Validation, document building, discovery, lifecycle
//! - **Infrastructure Layer** (`infrastructure`): HTTP collector, static discovery, config, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use probe_report::infrastructure::collector::HttpCollector;
//! use probe_report::{MeasurementRecord, ReportEnvelope, ReportLifecycle};
//!
//! let mut envelope = ReportEnvelope::new();
//! // fill in probe, software and test identity, and the collector URL
//! let mut report = ReportLifecycle::new(envelope, Arc::new(HttpCollector::new()?));
//! let mut logs = Vec::new();
//! report.open(&mut logs)?;
//! report.submit(MeasurementRecord::new("example.com"), &mut logs)?;
//! report.close(&mut logs)?;
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{ClockSource, Config, MeasurementRecord, ReportEnvelope};
pub use domain::ReportError;
pub use services::{
    CollectorDiscovery, EnvelopeBuilder, GeoDiscovery, ReportLifecycle, Resubmitter, Validator,
};
