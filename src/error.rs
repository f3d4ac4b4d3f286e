// src/error.rs
use std::fmt;
use thiserror::Error;

use crate::subdomains::Subdomains;

/// Errors raised by a single search API call.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The HTTP call failed or returned a non-success status
    #[error("Transport error: {0}")]
    Transport(String),

    /// The body did not follow the junk-line + positional JSON contract
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Cancelled")]
    Cancelled,
}

impl SearchError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        SearchError::MalformedResponse(msg.into())
    }
}

/// Which operation of a discovery run failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    FirstPage,
    Page { hash: String },
    Certificate { hash: String },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::FirstPage => write!(f, "initial search"),
            Stage::Page { hash } => write!(f, "page fetch ({})", hash),
            Stage::Certificate { hash } => write!(f, "certificate fetch ({})", hash),
        }
    }
}

/// A discovery run that stopped on a fatal error.
///
/// Subdomains collected on the pages before the failure are kept in `partial`.
#[derive(Error, Debug)]
#[error("Discovery aborted on page {page} during {stage}: {source}")]
pub struct DiscoveryError {
    pub page: u32,
    pub stage: Stage,
    #[source]
    pub source: SearchError,
    pub partial: Subdomains,
}

impl DiscoveryError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self.source, SearchError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::FirstPage.to_string(), "initial search");
        assert_eq!(
            Stage::Page { hash: "abc".to_string() }.to_string(),
            "page fetch (abc)"
        );
        assert_eq!(
            Stage::Certificate { hash: "xyz".to_string() }.to_string(),
            "certificate fetch (xyz)"
        );
    }

    #[test]
    fn test_discovery_error_message_names_page_and_stage() {
        let err = DiscoveryError {
            page: 3,
            stage: Stage::Page { hash: "tok".to_string() },
            source: SearchError::malformed("no newline in body"),
            partial: Subdomains::new(),
        };

        let msg = err.to_string();
        assert!(msg.contains("page 3"));
        assert!(msg.contains("page fetch (tok)"));
        assert!(msg.contains("no newline in body"));
        assert!(!err.is_cancelled());
    }
}
