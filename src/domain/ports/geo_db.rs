use std::net::IpAddr;
use thiserror::Error;

/// Errors returned by the IP lookup and geo database ports.
#[derive(Error, Debug)]
pub enum GeoError {
    /// The probe public address could not be determined.
    #[error("IP lookup failed: {0}")]
    IpLookup(String),

    /// A database file could not be opened.
    #[error("Cannot open database {path}: {reason}")]
    OpenDatabase { path: String, reason: String },

    /// The address is not present in the database, or the record is unusable.
    #[error("Lookup of {ip} failed: {reason}")]
    Lookup { ip: IpAddr, reason: String },
}

/// Offline database mapping addresses to network location.
pub trait GeoDatabase: Send + Sync {
    /// Open the database file at `path`.
    fn open(&self, path: &str) -> Result<Box<dyn GeoReader>, GeoError>;
}

/// An opened geo database.
pub trait GeoReader {
    /// Autonomous system number announcing `ip`.
    fn lookup_asn(&self, ip: IpAddr) -> Result<u32, GeoError>;

    /// ISO country code where `ip` is located.
    fn lookup_cc(&self, ip: IpAddr) -> Result<String, GeoError>;
}
