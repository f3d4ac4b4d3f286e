// src/subdomains.rs
use crate::ct_search::types::CertResponse;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

/// Discovered subdomains, keyed by lower-cased name.
///
/// The first certificate that introduces a name is kept; later ones never overwrite it.
#[derive(Debug, Clone, Default)]
pub struct Subdomains {
    inner: BTreeMap<String, Arc<CertResponse>>,
}

impl Subdomains {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `domain` unless it is already present. Returns true if it was new.
    pub fn insert(&mut self, domain: &str, cert: Arc<CertResponse>) -> bool {
        match self.inner.entry(domain.to_lowercase()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(cert);
                true
            }
        }
    }

    pub fn get(&self, domain: &str) -> Option<&Arc<CertResponse>> {
        self.inner.get(&domain.to_lowercase())
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.inner.contains_key(&domain.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate in lexical order of domain
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<CertResponse>)> {
        self.inner.iter().map(|(domain, cert)| (domain.as_str(), cert))
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }
}
