//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces of the remote and local collaborators
//! the report lifecycle depends on:
//! - Collector: report open/update/close
//! - Discovery: collector lookup by test identity
//! - IpLookup: probe public address
//! - GeoDatabase: address to ASN and country code
//!
//! Services receive these as `Arc<dyn ...>` so tests can substitute fakes.

pub mod collector;
pub mod discovery;
pub mod geo_db;
pub mod ip_lookup;

pub use collector::{CloseRequest, Collector, CollectorError, OpenRequest, UpdateRequest};
pub use discovery::{Discovery, DiscoveryError};
pub use geo_db::{GeoDatabase, GeoError, GeoReader};
pub use ip_lookup::IpLookup;
