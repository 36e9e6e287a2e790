//! Collector HTTP API client implementation
use reqwest::blocking::{Client, Response};
use reqwest::Certificate;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::types::{OpenReportBody, OpenReportResponse, UpdateReportBody};
use crate::domain::ports::{CloseRequest, Collector, CollectorError, OpenRequest, UpdateRequest};

/// Configuration for the collector HTTP client
#[derive(Debug, Clone)]
pub struct HttpCollectorConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Connect timeout, applied in addition to the per-call timeout
    pub connect_timeout: Duration,
}

impl Default for HttpCollectorConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Blocking HTTP client for the collector API
///
/// Each call performs exactly one request bounded by the caller's timeout.
/// There is no retry: a failed call is reported immediately. When a trust
/// bundle is given, the collector certificate is validated against the
/// certificates in that bundle only.
pub struct HttpCollector {
    http_client: Client,
    config: HttpCollectorConfig,
}

impl HttpCollector {
    /// Create a client with the default configuration
    pub fn new() -> Result<Self, CollectorError> {
        Self::with_config(HttpCollectorConfig::default())
    }

    /// Create a client with a custom configuration
    pub fn with_config(config: HttpCollectorConfig) -> Result<Self, CollectorError> {
        let http_client = Self::builder(&config)
            .build()
            .map_err(|e| CollectorError::Http(e.to_string()))?;
        Ok(Self {
            http_client,
            config,
        })
    }

    fn builder(config: &HttpCollectorConfig) -> reqwest::blocking::ClientBuilder {
        Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .tcp_nodelay(true)
    }

    /// Client to use for a request: the shared one, or a dedicated one
    /// trusting only the certificates in `trust_bundle_path`.
    fn client_for(&self, trust_bundle_path: Option<&str>) -> Result<Client, CollectorError> {
        let Some(path) = trust_bundle_path else {
            return Ok(self.http_client.clone());
        };
        let bundle_error = |reason: String| CollectorError::TrustBundle {
            path: path.to_string(),
            reason,
        };
        let pem = std::fs::read(path).map_err(|e| bundle_error(e.to_string()))?;
        let certificates =
            Certificate::from_pem_bundle(&pem).map_err(|e| bundle_error(e.to_string()))?;
        if certificates.is_empty() {
            return Err(bundle_error("no certificates found".to_string()));
        }

        let builder = certificates
            .into_iter()
            .fold(Self::builder(&self.config).tls_built_in_root_certs(false), |b, cert| {
                b.add_root_certificate(cert)
            });
        builder.build().map_err(|e| bundle_error(e.to_string()))
    }

    /// POST `body` to `url` and return the response if its status is 2xx.
    fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: Option<&B>,
        trust_bundle_path: Option<&str>,
        timeout: Duration,
        logs: &mut Vec<String>,
    ) -> Result<Response, CollectorError> {
        let client = self.client_for(trust_bundle_path)?;
        let mut request = client.post(url).timeout(timeout);
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(url, timeout_secs = timeout.as_secs_f64(), "collector request");
        logs.push(format!("> POST {url}"));
        let response = request.send().map_err(|e| {
            warn!(url, error = %e, "collector unreachable");
            CollectorError::Http(e.to_string())
        })?;

        let status = response.status();
        logs.push(format!("< {status}"));
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            warn!(url, status = status.as_u16(), "collector returned an error status");
            return Err(CollectorError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

impl Collector for HttpCollector {
    fn open(&self, request: &OpenRequest, logs: &mut Vec<String>) -> Result<String, CollectorError> {
        let url = endpoint(&request.base_url, "/report");
        let body = OpenReportBody::from(request);
        let response = self.post(
            &url,
            Some(&body),
            request.trust_bundle_path.as_deref(),
            request.timeout,
            logs,
        )?;

        let parsed: OpenReportResponse = response
            .json()
            .map_err(|e| CollectorError::InvalidResponse(e.to_string()))?;
        if parsed.report_id.is_empty() {
            return Err(CollectorError::InvalidResponse(
                "missing report_id".to_string(),
            ));
        }
        info!(
            report_id = %parsed.report_id,
            backend_version = parsed.backend_version.as_deref().unwrap_or("unknown"),
            "collector opened report"
        );
        logs.push(format!("Report ID: {}", parsed.report_id));
        Ok(parsed.report_id)
    }

    fn update(
        &self,
        request: &UpdateRequest,
        logs: &mut Vec<String>,
    ) -> Result<(), CollectorError> {
        let url = endpoint(&request.base_url, &format!("/report/{}", request.report_id));
        let body = UpdateReportBody::json(&request.content)
            .map_err(|e| CollectorError::InvalidRequest(e.to_string()))?;
        self.post(
            &url,
            Some(&body),
            request.trust_bundle_path.as_deref(),
            request.timeout,
            logs,
        )?;
        Ok(())
    }

    fn close(&self, request: &CloseRequest, logs: &mut Vec<String>) -> Result<(), CollectorError> {
        let url = endpoint(
            &request.base_url,
            &format!("/report/{}/close", request.report_id),
        );
        self.post::<()>(
            &url,
            None,
            request.trust_bundle_path.as_deref(),
            request.timeout,
            logs,
        )?;
        Ok(())
    }
}
