//! Infrastructure layer module
//!
//! This module contains the adapters and ambient plumbing:
//! - Collector HTTP client
//! - Static collector discovery
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod collector;
pub mod config;
pub mod discovery;
pub mod logging;
