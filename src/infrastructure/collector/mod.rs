//! Collector HTTP API adapter

pub mod client;
pub mod types;

pub use client::{HttpCollector, HttpCollectorConfig};
pub use types::{OpenReportBody, OpenReportResponse, UpdateReportBody};
