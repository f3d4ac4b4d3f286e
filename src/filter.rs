// src/filter.rs
//! Registrable-domain filtering of certificate names

/// Keeps certificate names whose registrable domain (eTLD+1) is the search domain
#[derive(Debug, Clone)]
pub struct SearchDomainFilter {
    search_domain: String,
}

impl SearchDomainFilter {
    /// Create a filter for a search domain (case-insensitive)
    pub fn new(search_domain: &str) -> Self {
        Self {
            search_domain: search_domain.trim().to_lowercase(),
        }
    }

    /// The lower-cased search domain
    pub fn search_domain(&self) -> &str {
        &self.search_domain
    }

    /// Whether the search domain is itself a registrable domain.
    ///
    /// Searching `www.example.com` can never match anything, since every name
    /// under it has `example.com` as its registrable domain.
    pub fn is_registrable(&self) -> bool {
        registrable_domain(&self.search_domain).as_deref() == Some(self.search_domain.as_str())
    }

    /// Returns the normalized name if it belongs to the search domain.
    ///
    /// Matching is by equality of registrable domain, never by suffix, so
    /// `notexample.com` does not match `example.com`. Unparseable names yield `None`.
    pub fn matches(&self, name: &str) -> Option<String> {
        let normalized = normalize_name(name)?;

        match registrable_domain(&normalized) {
            Some(registrable) if registrable == self.search_domain => Some(normalized),
            _ => None,
        }
    }
}

/// Lower-case a certificate name and drop a trailing root dot.
/// Returns `None` for names that are not hostnames.
pub fn normalize_name(name: &str) -> Option<String> {
    let lower = name.trim().to_lowercase();
    let lower = lower.strip_suffix('.').unwrap_or(&lower);

    if lower.is_empty() || lower.split('.').any(str::is_empty) {
        return None;
    }

    let valid_chars = lower
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '*'));

    valid_chars.then(|| lower.to_string())
}

/// The registrable domain (eTLD+1) of a lower-cased hostname, per the public suffix list
pub fn registrable_domain(name: &str) -> Option<String> {
    // A bare public suffix (e.g. `co.uk`) has no registrable domain
    psl::domain_str(name).map(str::to_string)
}
