use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::error::record;
use crate::domain::models::ReportEnvelope;
use crate::domain::ports::{GeoDatabase, GeoError, IpLookup};
use crate::domain::ReportError;

/// Largest ASN accepted when formatting `AS<digits>` (seven digits).
const MAX_ASN: u32 = 9_999_999;

/// Probe network location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeLocation {
    /// ASN formatted as `AS<digits>`.
    pub asn: String,
    /// Uppercase two-letter country code.
    pub cc: String,
}

/// Resolves the probe ASN and country code from its public address.
pub struct GeoDiscovery {
    ip_lookup: Arc<dyn IpLookup>,
    geo_db: Arc<dyn GeoDatabase>,
}

impl GeoDiscovery {
    pub fn new(ip_lookup: Arc<dyn IpLookup>, geo_db: Arc<dyn GeoDatabase>) -> Self {
        Self { ip_lookup, geo_db }
    }

    /// Look up the probe address, then resolve it in the ASN database and in
    /// the country database. Each step fails independently.
    pub fn discover(
        &self,
        asn_db_path: &str,
        country_db_path: &str,
        logs: &mut Vec<String>,
    ) -> Result<ProbeLocation, ReportError> {
        let ip = self.ip_lookup.lookup(logs).map_err(|e| fail(logs, e))?;
        debug!(%ip, "probe address discovered");

        let asn_db = self.geo_db.open(asn_db_path).map_err(|e| fail(logs, e))?;
        let asn = asn_db
            .lookup_asn(ip)
            .and_then(|asn| format_asn(ip, asn))
            .map_err(|e| fail(logs, e))?;

        let country_db = self
            .geo_db
            .open(country_db_path)
            .map_err(|e| fail(logs, e))?;
        let cc = country_db
            .lookup_cc(ip)
            .and_then(|cc| normalize_cc(ip, &cc))
            .map_err(|e| fail(logs, e))?;

        info!(%asn, %cc, "probe location discovered");
        Ok(ProbeLocation { asn, cc })
    }

    /// Discover the location using the envelope's database paths and store
    /// it in the envelope's `probe_asn`/`probe_cc`.
    pub fn discover_into(
        &self,
        envelope: &mut ReportEnvelope,
        logs: &mut Vec<String>,
    ) -> Result<(), ReportError> {
        let location = self.discover(&envelope.asn_db_path, &envelope.country_db_path, logs)?;
        envelope.probe_asn = location.asn;
        envelope.probe_cc = location.cc;
        Ok(())
    }
}

fn fail(logs: &mut Vec<String>, err: GeoError) -> ReportError {
    warn!(error = %err, "probe location discovery failed");
    record(logs, err.into())
}

fn format_asn(ip: IpAddr, asn: u32) -> Result<String, GeoError> {
    if asn == 0 || asn > MAX_ASN {
        return Err(GeoError::Lookup {
            ip,
            reason: format!("unexpected ASN {asn}"),
        });
    }
    Ok(format!("AS{asn}"))
}

fn normalize_cc(ip: IpAddr, cc: &str) -> Result<String, GeoError> {
    if cc.len() != 2 || !cc.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GeoError::Lookup {
            ip,
            reason: format!("unexpected country code {cc:?}"),
        });
    }
    Ok(cc.to_ascii_uppercase())
}
