// src/ct_search/decoder.rs
//! Decoding of transparency report API bodies.
//!
//! Every body starts with one anti-hijacking line (usually `)]}'`) followed by
//! a JSON array whose first element is the positional payload.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::types::{
    CertLog, CertResponse, CertResult, SEARCH_RESULT_FIELDS, SearchFilters, SearchPaging,
    SearchResponse, SearchResult,
};
use crate::error::SearchError;

/// `[type, results, filters, paging]`
#[derive(Deserialize)]
struct RawSearchPayload(String, Vec<Value>, Vec<Value>, SearchPaging);

/// `[type, result, logs]`
#[derive(Deserialize)]
struct RawCertPayload(String, CertResult, Vec<CertLog>);

/// Strip the junk line and unwrap the payload array
pub fn decode_payload(body: &str) -> Result<Value, SearchError> {
    let (_junk, content) = body
        .split_once('\n')
        .ok_or_else(|| SearchError::malformed("response body has no newline"))?;

    let parsed: Value = serde_json::from_str(content)
        .map_err(|e| SearchError::malformed(format!("invalid JSON: {}", e)))?;

    match parsed {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::malformed("top-level array is empty")),
        other => Err(SearchError::malformed(format!(
            "expected top-level array, got {}",
            json_kind(&other)
        ))),
    }
}

/// Decode a search page (first page or page-by-hash)
pub fn decode_search(body: &str) -> Result<SearchResponse, SearchError> {
    let RawSearchPayload(response_type, raw_results, raw_filters, paging) =
        from_payload(decode_payload(body)?, "search payload")?;

    let raw_count = raw_results.len();
    let mut results = Vec::with_capacity(raw_count);

    for raw in raw_results {
        // Entries without a ct_log_count or dns_count come back short and are unusable
        let len = raw.as_array().map(Vec::len);
        if len != Some(SEARCH_RESULT_FIELDS) {
            debug!("Dropping search result with {:?} fields", len);
            continue;
        }

        results.push(from_payload::<SearchResult>(raw, "search result")?);
    }

    let filters = raw_filters
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<SearchFilters>(raw) {
            Ok(filter) => Some(filter),
            Err(e) => {
                debug!("Dropping undecodable search filter: {}", e);
                None
            }
        })
        .collect();

    debug!(
        "Decoded search page {}/{}: {} of {} results usable",
        paging.page_num,
        paging.page_count,
        results.len(),
        raw_count
    );

    Ok(SearchResponse {
        response_type,
        results,
        filters,
        paging,
    })
}

/// Decode a certificate-by-hash response
pub fn decode_cert(body: &str) -> Result<CertResponse, SearchError> {
    let RawCertPayload(response_type, result, logs) =
        from_payload(decode_payload(body)?, "certificate payload")?;

    Ok(CertResponse::new(response_type, result, logs))
}

fn from_payload<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, SearchError> {
    serde_json::from_value(value)
        .map_err(|e| SearchError::malformed(format!("invalid {}: {}", what, e)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
