// src/ct_search/resolver.rs
use std::sync::Arc;
use tracing::debug;

use super::client::SearchClient;
use super::types::CertResponse;
use crate::error::SearchError;
use crate::filter::{SearchDomainFilter, normalize_name};

/// Names of one certificate that belong to the search domain
#[derive(Debug, Clone)]
pub struct ResolvedCert {
    pub cert_hash: String,
    pub cert: Arc<CertResponse>,
    /// Lower-cased matching names, in certificate order
    pub domains: Vec<String>,
    /// Names that could not be parsed as hostnames
    pub skipped: usize,
}

/// Resolves certificate hashes to the subdomains they cover
#[derive(Clone)]
pub struct CertificateResolver {
    client: SearchClient,
    filter: SearchDomainFilter,
}

impl CertificateResolver {
    pub fn new(client: SearchClient, filter: SearchDomainFilter) -> Self {
        Self { client, filter }
    }

    pub fn filter(&self) -> &SearchDomainFilter {
        &self.filter
    }

    /// Fetch a certificate and keep the names under the search domain
    pub async fn resolve(&self, cert_hash: &str) -> Result<ResolvedCert, SearchError> {
        let cert = Arc::new(self.client.fetch_certificate(cert_hash).await?);

        let mut domains = Vec::new();
        let mut skipped = 0;

        for name in &cert.result.domains {
            match self.filter.matches(name) {
                Some(domain) => {
                    if !domains.contains(&domain) {
                        domains.push(domain);
                    }
                }
                None if normalize_name(name).is_none() => {
                    debug!("Skipping unparseable name {:?} in {}", name, cert_hash);
                    skipped += 1;
                }
                None => {}
            }
        }

        debug!(
            "Certificate {} covers {} of {} names under {}",
            cert_hash,
            domains.len(),
            cert.result.domains.len(),
            self.filter.search_domain()
        );

        Ok(ResolvedCert {
            cert_hash: cert_hash.to_string(),
            cert,
            domains,
            skipped,
        })
    }
}
