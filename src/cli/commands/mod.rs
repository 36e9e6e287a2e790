//! CLI command implementations.

pub mod discover;
pub mod resubmit;
pub mod submit;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::domain::models::Config;
use crate::domain::ports::{Collector, Discovery};
use crate::infrastructure::collector::HttpCollector;
use crate::infrastructure::discovery::StaticDiscovery;
use crate::services::EnvelopeBuilder;

/// Document builder honouring the configured placeholders.
pub(crate) fn envelope_builder(config: &Config) -> EnvelopeBuilder {
    let mut builder = EnvelopeBuilder::new();
    if let Some(ref resolver) = config.measurement.client_resolver {
        builder = builder.with_client_resolver(resolver.clone());
    }
    if let Some(ref id) = config.measurement.document_id {
        builder = builder.with_document_id(id.clone());
    }
    builder
}

pub(crate) fn http_collector() -> Result<Arc<dyn Collector>> {
    let collector = HttpCollector::new().context("Failed to create collector client")?;
    Ok(Arc::new(collector))
}

pub(crate) fn static_discovery(config: &Config) -> Arc<dyn Discovery> {
    Arc::new(StaticDiscovery::new(config.discovery.collectors.clone()))
}
