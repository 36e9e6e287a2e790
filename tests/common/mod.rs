//! Common test utilities for integration tests
//!
//! Provides scripted collaborator fakes and envelope fixtures shared across
//! the integration test files.

#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use probe_report::domain::ports::{
    CloseRequest, Collector, CollectorError, Discovery, DiscoveryError, GeoDatabase, GeoError,
    GeoReader, IpLookup, OpenRequest, UpdateRequest,
};
use probe_report::ReportEnvelope;
use serde_json::json;

pub const ASN_DB: &str = "asn.mmdb";
pub const COUNTRY_DB: &str = "country.mmdb";
pub const PROBE_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 10));

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Envelope with every field `open` requires.
pub fn ready_envelope() -> ReportEnvelope {
    ReportEnvelope {
        probe_asn: "AS30722".to_string(),
        probe_cc: "IT".to_string(),
        software_name: "x".to_string(),
        software_version: "1".to_string(),
        test_name: "t".to_string(),
        test_version: "1".to_string(),
        test_start_time: "2020-01-01 00:00:00".to_string(),
        collector_base_url: "https://example".to_string(),
        timeout: Duration::from_secs(5),
        ..ReportEnvelope::default()
    }
}

/// A previously submitted measurement document.
pub fn stored_measurement(report_id: &str) -> serde_json::Value {
    json!({
        "annotations": {},
        "data_format_version": "0.2.0",
        "id": "bdd20d7a-bba5-40dd-a111-9863d7908572",
        "input": "https://example.com/",
        "input_hashes": [],
        "measurement_start_time": "2020-01-01 00:00:01",
        "options": [],
        "probe_asn": "AS30722",
        "probe_cc": "IT",
        "probe_city": null,
        "report_id": report_id,
        "software_name": "probe-report",
        "software_version": "0.1.0",
        "test_helpers": {},
        "test_keys": {"client_resolver": null, "failure": null},
        "test_name": "web_connectivity",
        "test_runtime": 1.5,
        "test_start_time": "2020-01-01 00:00:00",
        "test_version": "0.0.1"
    })
}

/// Which collector call should fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailAt {
    #[default]
    Nothing,
    Open,
    Update,
    Close,
}

/// Collector fake that counts calls and hands out fresh report ids.
#[derive(Default)]
pub struct FakeCollector {
    fail_at: FailAt,
    empty_id: bool,
    opens: AtomicUsize,
    updates: AtomicUsize,
    closes: AtomicUsize,
    open_requests: Mutex<Vec<OpenRequest>>,
    update_requests: Mutex<Vec<UpdateRequest>>,
    close_requests: Mutex<Vec<CloseRequest>>,
}

impl FakeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(fail_at: FailAt) -> Self {
        Self {
            fail_at,
            ..Self::default()
        }
    }

    /// Collector that accepts `open` but answers without a report id.
    pub fn returning_empty_id() -> Self {
        Self {
            empty_id: true,
            ..Self::default()
        }
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.opens() + self.updates() + self.closes()
    }

    pub fn last_open(&self) -> Option<OpenRequest> {
        self.open_requests.lock().unwrap().last().cloned()
    }

    pub fn last_update(&self) -> Option<UpdateRequest> {
        self.update_requests.lock().unwrap().last().cloned()
    }

    pub fn last_close(&self) -> Option<CloseRequest> {
        self.close_requests.lock().unwrap().last().cloned()
    }
}

impl Collector for FakeCollector {
    fn open(&self, request: &OpenRequest, logs: &mut Vec<String>) -> Result<String, CollectorError> {
        let n = self.opens.fetch_add(1, Ordering::SeqCst) + 1;
        self.open_requests.lock().unwrap().push(request.clone());
        logs.push(format!("> POST {}/report", request.base_url));
        if self.fail_at == FailAt::Open {
            return Err(CollectorError::Status {
                status: 406,
                body: "open refused".to_string(),
            });
        }
        if self.empty_id {
            return Ok(String::new());
        }
        Ok(format!("fake-report-{n}"))
    }

    fn update(&self, request: &UpdateRequest, logs: &mut Vec<String>) -> Result<(), CollectorError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.update_requests.lock().unwrap().push(request.clone());
        logs.push(format!("> POST {}/report/{}", request.base_url, request.report_id));
        if self.fail_at == FailAt::Update {
            return Err(CollectorError::Status {
                status: 500,
                body: "update refused".to_string(),
            });
        }
        Ok(())
    }

    fn close(&self, request: &CloseRequest, logs: &mut Vec<String>) -> Result<(), CollectorError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.close_requests.lock().unwrap().push(request.clone());
        logs.push(format!("> POST {}/report/{}/close", request.base_url, request.report_id));
        if self.fail_at == FailAt::Close {
            return Err(CollectorError::Http("connection reset".to_string()));
        }
        Ok(())
    }
}

/// Discovery fake returning a fixed candidate list.
pub struct FakeDiscovery {
    candidates: Vec<String>,
    fails: bool,
    calls: AtomicUsize,
    base_urls: Mutex<Vec<Option<String>>>,
}

impl FakeDiscovery {
    pub fn with_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            fails: false,
            calls: AtomicUsize::new(0),
            base_urls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fails: true,
            ..Self::with_candidates(Vec::<String>::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_base_url(&self) -> Option<String> {
        self.base_urls.lock().unwrap().last().cloned().flatten()
    }
}

impl Discovery for FakeDiscovery {
    fn list_collectors(
        &self,
        _test_name: &str,
        _test_version: &str,
        base_url: Option<&str>,
        logs: &mut Vec<String>,
    ) -> Result<Vec<String>, DiscoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.base_urls
            .lock()
            .unwrap()
            .push(base_url.map(ToString::to_string));
        if self.fails {
            return Err(DiscoveryError::Unavailable("bouncer down".to_string()));
        }
        logs.push(format!("discovered {} collector(s)", self.candidates.len()));
        Ok(self.candidates.clone())
    }
}

/// IP lookup fake.
pub struct FakeIpLookup {
    ip: Option<IpAddr>,
}

impl FakeIpLookup {
    pub fn returning(ip: IpAddr) -> Self {
        Self { ip: Some(ip) }
    }

    pub fn failing() -> Self {
        Self { ip: None }
    }
}

impl IpLookup for FakeIpLookup {
    fn lookup(&self, _logs: &mut Vec<String>) -> Result<IpAddr, GeoError> {
        self.ip
            .ok_or_else(|| GeoError::IpLookup("no route to lookup service".to_string()))
    }
}

/// Geo database fake with an independent failure switch per step.
#[derive(Clone)]
pub struct FakeGeoDatabase {
    pub asn: u32,
    pub cc: String,
    pub fail_asn_open: bool,
    pub fail_asn_lookup: bool,
    pub fail_cc_open: bool,
    pub fail_cc_lookup: bool,
}

impl Default for FakeGeoDatabase {
    fn default() -> Self {
        Self {
            asn: 30722,
            cc: "it".to_string(),
            fail_asn_open: false,
            fail_asn_lookup: false,
            fail_cc_open: false,
            fail_cc_lookup: false,
        }
    }
}

impl GeoDatabase for FakeGeoDatabase {
    fn open(&self, path: &str) -> Result<Box<dyn GeoReader>, GeoError> {
        let refused = match path {
            ASN_DB => self.fail_asn_open,
            COUNTRY_DB => self.fail_cc_open,
            _ => true,
        };
        if refused {
            return Err(GeoError::OpenDatabase {
                path: path.to_string(),
                reason: "not found".to_string(),
            });
        }
        Ok(Box::new(self.clone()))
    }
}

impl GeoReader for FakeGeoDatabase {
    fn lookup_asn(&self, ip: IpAddr) -> Result<u32, GeoError> {
        if self.fail_asn_lookup {
            return Err(GeoError::Lookup {
                ip,
                reason: "no ASN record".to_string(),
            });
        }
        Ok(self.asn)
    }

    fn lookup_cc(&self, ip: IpAddr) -> Result<String, GeoError> {
        if self.fail_cc_lookup {
            return Err(GeoError::Lookup {
                ip,
                reason: "no country record".to_string(),
            });
        }
        Ok(self.cc.clone())
    }
}
