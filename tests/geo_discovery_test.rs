//! Probe location discovery against fake IP lookup and geo databases.

mod common;

use std::sync::Arc;

use common::{FakeGeoDatabase, FakeIpLookup, ASN_DB, COUNTRY_DB, PROBE_IP};
use probe_report::{GeoDiscovery, ReportEnvelope, ReportError};

fn discovery(ip: FakeIpLookup, db: FakeGeoDatabase) -> GeoDiscovery {
    GeoDiscovery::new(Arc::new(ip), Arc::new(db))
}

fn is_asn(value: &str) -> bool {
    value
        .strip_prefix("AS")
        .is_some_and(|digits| (1..=7).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn is_cc(value: &str) -> bool {
    value.len() == 2 && value.bytes().all(|b| b.is_ascii_uppercase())
}

#[test]
fn test_discover_location() {
    let geo = discovery(FakeIpLookup::returning(PROBE_IP), FakeGeoDatabase::default());
    let mut logs = Vec::new();

    let location = geo.discover(ASN_DB, COUNTRY_DB, &mut logs).unwrap();
    assert_eq!(location.asn, "AS30722");
    assert_eq!(location.cc, "IT");
    assert!(is_asn(&location.asn));
    assert!(is_cc(&location.cc));
}

#[test]
fn test_discover_into_fills_envelope() {
    let geo = discovery(
        FakeIpLookup::returning(PROBE_IP),
        FakeGeoDatabase {
            asn: 3269,
            cc: "de".to_string(),
            ..FakeGeoDatabase::default()
        },
    );
    let mut envelope = ReportEnvelope {
        asn_db_path: ASN_DB.to_string(),
        country_db_path: COUNTRY_DB.to_string(),
        ..ReportEnvelope::default()
    };
    let mut logs = Vec::new();

    geo.discover_into(&mut envelope, &mut logs).unwrap();
    assert_eq!(envelope.probe_asn, "AS3269");
    assert_eq!(envelope.probe_cc, "DE");
}

#[test]
fn test_ip_lookup_failure() {
    let geo = discovery(FakeIpLookup::failing(), FakeGeoDatabase::default());
    let mut logs = Vec::new();

    let err = geo.discover(ASN_DB, COUNTRY_DB, &mut logs).unwrap_err();
    assert!(matches!(err, ReportError::Discovery(_)));
    assert_eq!(logs.last().unwrap(), &err.to_string());
}

#[test]
fn test_each_geo_step_fails_independently() {
    let cases: [(&str, FakeGeoDatabase); 4] = [
        (
            "asn open",
            FakeGeoDatabase {
                fail_asn_open: true,
                ..FakeGeoDatabase::default()
            },
        ),
        (
            "asn lookup",
            FakeGeoDatabase {
                fail_asn_lookup: true,
                ..FakeGeoDatabase::default()
            },
        ),
        (
            "country open",
            FakeGeoDatabase {
                fail_cc_open: true,
                ..FakeGeoDatabase::default()
            },
        ),
        (
            "country lookup",
            FakeGeoDatabase {
                fail_cc_lookup: true,
                ..FakeGeoDatabase::default()
            },
        ),
    ];

    for (step, db) in cases {
        let geo = discovery(FakeIpLookup::returning(PROBE_IP), db);
        let mut logs = Vec::new();

        let err = geo.discover(ASN_DB, COUNTRY_DB, &mut logs).unwrap_err();
        assert!(matches!(err, ReportError::Discovery(_)), "{step}: {err}");
        assert_eq!(logs.len(), 1, "{step}: {logs:?}");
    }
}

#[test]
fn test_unknown_database_path() {
    let geo = discovery(FakeIpLookup::returning(PROBE_IP), FakeGeoDatabase::default());
    let mut logs = Vec::new();

    let err = geo.discover("missing.mmdb", COUNTRY_DB, &mut logs).unwrap_err();
    assert!(err.to_string().contains("missing.mmdb"));
}

#[test]
fn test_implausible_lookup_results_are_rejected() {
    let zero_asn = FakeGeoDatabase {
        asn: 0,
        ..FakeGeoDatabase::default()
    };
    let long_asn = FakeGeoDatabase {
        asn: 12_345_678,
        ..FakeGeoDatabase::default()
    };
    let bad_cc = FakeGeoDatabase {
        cc: "ITA".to_string(),
        ..FakeGeoDatabase::default()
    };

    for db in [zero_asn, long_asn, bad_cc] {
        let geo = discovery(FakeIpLookup::returning(PROBE_IP), db);
        let mut logs = Vec::new();
        assert!(geo.discover(ASN_DB, COUNTRY_DB, &mut logs).is_err());
    }
}

#[test]
fn test_failure_leaves_envelope_untouched() {
    let geo = discovery(
        FakeIpLookup::returning(PROBE_IP),
        FakeGeoDatabase {
            fail_cc_lookup: true,
            ..FakeGeoDatabase::default()
        },
    );
    let mut envelope = ReportEnvelope {
        asn_db_path: ASN_DB.to_string(),
        country_db_path: COUNTRY_DB.to_string(),
        ..ReportEnvelope::default()
    };
    let mut logs = Vec::new();

    assert!(geo.discover_into(&mut envelope, &mut logs).is_err());
    assert!(envelope.probe_asn.is_empty());
    assert!(envelope.probe_cc.is_empty());
}
