// src/types.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::ct_search::types::CertResponse;

/// A discovered subdomain with the certificate that introduced it, for output
#[derive(Debug, Clone, Serialize)]
pub struct SubdomainRecord {
    /// The lower-cased subdomain
    pub subdomain: String,

    /// Certificate subject
    pub subject: String,

    /// Certificate issuer
    pub issuer: String,

    /// Certificate serial number
    pub cert_serial: String,

    /// Certificate validity start
    pub valid_from: Option<DateTime<Utc>>,

    /// Certificate validity end
    pub valid_to: Option<DateTime<Utc>>,

    /// All names in the certificate, as issued
    pub cert_domains: Vec<String>,

    /// CT logs containing the certificate (log name -> index)
    pub logs: BTreeMap<String, u64>,
}

impl SubdomainRecord {
    pub fn from_cert(subdomain: &str, cert: &CertResponse) -> Self {
        let result = &cert.result;

        Self {
            subdomain: subdomain.to_string(),
            subject: result.subject.clone(),
            issuer: result.issuer.clone(),
            cert_serial: result.cert_serial.clone(),
            valid_from: result.valid_from,
            valid_to: result.valid_to,
            cert_domains: result.domains.clone(),
            logs: cert.logs.clone(),
        }
    }
}

impl fmt::Display for SubdomainRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[+] Found subdomain: {}", self.subdomain)
    }
}
