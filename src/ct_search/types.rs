// src/ct_search/types.rs
//! Records returned by the transparency report search API.
//!
//! The API encodes every record as a positional JSON array. serde derives
//! deserialize named-field structs from sequences in declaration order, so the
//! field order below is the wire order and must not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Positional length of a usable search result entry
pub const SEARCH_RESULT_FIELDS: usize = 9;

/// One certificate match on a search page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub cert_serial: String,
    pub subject: String,
    pub issuer: String,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub valid_to: Option<DateTime<Utc>>,
    /// Opaque identifier used to fetch the certificate detail
    pub cert_hash: String,
    pub ct_log_count: u64,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub first_entry: Option<DateTime<Utc>>,
    pub dns_count: u64,
}

/// Pagination block of a search page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPaging {
    pub prev_hash: Option<String>,
    /// `None` on the last page
    pub next_hash: Option<String>,
    pub unknown: serde_json::Value,
    pub page_num: u32,
    pub page_count: u32,
}

impl SearchPaging {
    pub fn is_last_page(&self) -> bool {
        self.next_hash.is_none()
    }
}

/// Issuer facet metadata (informational only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub issuer_uid: String,
    pub issuer_hash: String,
    pub issuer_name: String,
    pub issuer_count: u64,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub response_type: String,
    pub results: Vec<SearchResult>,
    pub filters: Vec<SearchFilters>,
    pub paging: SearchPaging,
}

/// Certificate detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertResult {
    pub cert_serial: String,
    pub subject: String,
    pub issuer: String,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub valid_to: Option<DateTime<Utc>>,
    pub cert_type: serde_json::Value,
    pub hash_type: serde_json::Value,
    /// DNS names covered by the certificate, as issued
    pub domains: Vec<String>,
}

/// A CT log that contains the certificate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertLog {
    pub name: String,
    pub hash: Option<String>,
    pub index: u64,
}

/// Response of the certificate-by-hash endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertResponse {
    #[serde(rename = "type")]
    pub response_type: String,
    pub result: CertResult,
    /// Log name -> entry index
    pub logs: BTreeMap<String, u64>,
}

impl CertResponse {
    /// Build the response, collapsing the log list into a name -> index map.
    /// A later log with the same name overwrites an earlier one.
    pub fn new(response_type: String, result: CertResult, logs: Vec<CertLog>) -> Self {
        let logs = logs.into_iter().map(|l| (l.name, l.index)).collect();

        Self {
            response_type,
            result,
            logs,
        }
    }
}
