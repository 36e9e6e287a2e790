use std::net::IpAddr;

use super::geo_db::GeoError;

/// Service reporting the probe's public address.
pub trait IpLookup: Send + Sync {
    /// Return the address the probe is seen from on the internet.
    fn lookup(&self, logs: &mut Vec<String>) -> Result<IpAddr, GeoError>;
}
