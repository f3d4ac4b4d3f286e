// src/ct_search/mod.rs
pub mod cancel;
pub mod client;
pub mod decoder;
pub mod engine;
pub mod resolver;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cancel::Cancellation;
pub use client::{HttpTransport, SearchClient, Transport};
pub use engine::{Discovery, DiscoveryEngine, DiscoveryOptions, StopReason};
pub use resolver::{CertificateResolver, ResolvedCert};
pub use types::{CertLog, CertResponse, CertResult, SearchFilters, SearchPaging, SearchResponse, SearchResult};
