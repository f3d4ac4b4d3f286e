// src/ct_search/engine.rs
use futures_util::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::cancel::Cancellation;
use super::client::SearchClient;
use super::resolver::{CertificateResolver, ResolvedCert};
use super::types::{SearchResponse, SearchResult};
use crate::error::{DiscoveryError, SearchError, Stage};
use crate::filter::SearchDomainFilter;
use crate::progress::ProgressIndicator;
use crate::stats::DiscoveryStats;
use crate::subdomains::Subdomains;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Options for a discovery run
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Highest page number that may be fetched. Page 1 is always fetched.
    pub page_limit: u32,
    pub include_expired: bool,
    /// Abort the run when a certificate detail cannot be fetched
    pub strict_certificates: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
            include_expired: false,
            strict_certificates: false,
        }
    }
}

/// Why a successful run stopped paginating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last page had no next-page token
    Exhausted,
    /// The next page was beyond the page limit
    PageLimit,
}

/// Result of a completed discovery run
#[derive(Debug)]
pub struct Discovery {
    pub subdomains: Subdomains,
    pub pages_fetched: u32,
    pub stop: StopReason,
}

/// Walks the search pages for a domain and resolves every certificate found.
///
/// Pages are fetched one after another; the certificates of a page are
/// resolved concurrently and all of them finish before the next page is requested.
pub struct DiscoveryEngine {
    client: SearchClient,
    options: DiscoveryOptions,
    stats: DiscoveryStats,
    progress: ProgressIndicator,
}

impl DiscoveryEngine {
    pub fn new(client: SearchClient, options: DiscoveryOptions) -> Self {
        Self {
            client,
            options,
            stats: DiscoveryStats::new(),
            progress: ProgressIndicator::disabled(),
        }
    }

    pub fn with_stats(mut self, stats: DiscoveryStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_progress(mut self, progress: ProgressIndicator) -> Self {
        self.progress = progress;
        self
    }

    pub fn stats(&self) -> &DiscoveryStats {
        &self.stats
    }

    /// Discover the subdomains of `domain`.
    ///
    /// A failed page fetch aborts the run; the subdomains found on earlier
    /// pages are returned inside the error.
    pub async fn discover(
        &self,
        domain: &str,
        mut cancel: Cancellation,
    ) -> Result<Discovery, DiscoveryError> {
        let filter = SearchDomainFilter::new(domain);
        if !filter.is_registrable() {
            warn!(
                "{} is not a registrable domain; certificate names are matched on their registrable domain and will not match it",
                filter.search_domain()
            );
        }

        let resolver = CertificateResolver::new(self.client.clone(), filter);
        let mut subdomains = Subdomains::new();
        let mut next_hash: Option<String> = None;
        let mut page_num: u32 = 0;

        loop {
            page_num += 1;

            let stage = if page_num == 1 {
                Stage::FirstPage
            } else {
                match next_hash.take() {
                    None => {
                        info!("Reached the last result page");
                        return Ok(self.finish(subdomains, page_num - 1, StopReason::Exhausted));
                    }
                    Some(_) if page_num > self.options.page_limit => {
                        info!("Search page limit reached ({})", self.options.page_limit);
                        return Ok(self.finish(subdomains, page_num - 1, StopReason::PageLimit));
                    }
                    Some(hash) => Stage::Page { hash },
                }
            };

            let fetched = match &stage {
                Stage::Page { hash } => with_cancel(&mut cancel, self.client.fetch_page(hash)).await,
                _ => {
                    let first_page = self.client.fetch_first_page(
                        resolver.filter().search_domain(),
                        self.options.include_expired,
                    );
                    with_cancel(&mut cancel, first_page).await
                }
            };

            let page: SearchResponse = match fetched {
                Ok(page) => page,
                Err(source) => {
                    return Err(DiscoveryError {
                        page: page_num,
                        stage,
                        source,
                        partial: subdomains,
                    });
                }
            };

            self.stats.increment_pages();
            info!(
                "Fetching certificates for page {} of {}",
                page_num, page.paging.page_count
            );
            self.progress
                .set_page(page_num, page.paging.page_count, subdomains.len());

            if let Err((stage, source)) = self
                .resolve_page(&resolver, page.results, &mut subdomains, &stage, &mut cancel)
                .await
            {
                return Err(DiscoveryError {
                    page: page_num,
                    stage,
                    source,
                    partial: subdomains,
                });
            }

            next_hash = page.paging.next_hash;
        }
    }

    /// Resolve every certificate of one page concurrently and fold the
    /// matches into `subdomains`. Returns once all tasks of the page are done.
    async fn resolve_page(
        &self,
        resolver: &CertificateResolver,
        results: Vec<SearchResult>,
        subdomains: &mut Subdomains,
        page_stage: &Stage,
        cancel: &mut Cancellation,
    ) -> Result<(), (Stage, SearchError)> {
        if results.is_empty() {
            debug!("Page has no certificate matches");
            return Ok(());
        }

        let (result_tx, mut result_rx) = mpsc::channel(results.len());
        let mut tasks = Vec::with_capacity(results.len());

        for result in results {
            let resolver = resolver.clone();
            let result_tx = result_tx.clone();

            tasks.push(tokio::spawn(async move {
                let outcome = resolver.resolve(&result.cert_hash).await;
                // Only fails once the page was abandoned
                let _ = result_tx.send((result.cert_hash, outcome)).await;
            }));
        }

        // Channel closes when every task has reported
        drop(result_tx);

        let mut failure = None;

        loop {
            let received = tokio::select! {
                received = result_rx.recv() => received,
                _ = cancel.cancelled() => {
                    for task in &tasks {
                        task.abort();
                    }
                    return Err((page_stage.clone(), SearchError::Cancelled));
                }
            };

            let Some((cert_hash, outcome)) = received else {
                break;
            };

            match outcome {
                Ok(resolved) => self.record(resolved, subdomains),
                Err(e) => {
                    self.stats.increment_failed();
                    if self.options.strict_certificates {
                        if failure.is_none() {
                            failure = Some((Stage::Certificate { hash: cert_hash }, e));
                        }
                    } else {
                        warn!("Skipping certificate {}: {}", cert_hash, e);
                    }
                }
            }
        }

        for joined in join_all(tasks).await {
            if let Err(e) = joined {
                self.stats.increment_failed();
                warn!("Certificate task failed: {}", e);
            }
        }

        match failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Single insertion path into the result map
    fn record(&self, resolved: ResolvedCert, subdomains: &mut Subdomains) {
        self.stats.increment_resolved();
        self.stats.add_skipped(resolved.skipped as u64);

        for domain in &resolved.domains {
            if subdomains.insert(domain, Arc::clone(&resolved.cert)) {
                debug!("Adding new subdomain: {}", domain);
                self.stats.increment_subdomains();
            }
        }
    }

    fn finish(&self, subdomains: Subdomains, pages_fetched: u32, stop: StopReason) -> Discovery {
        info!(
            "Discovery finished after {} pages: {} subdomains",
            pages_fetched,
            subdomains.len()
        );

        Discovery {
            subdomains,
            pages_fetched,
            stop,
        }
    }
}

async fn with_cancel<T>(
    cancel: &mut Cancellation,
    request: impl Future<Output = Result<T, SearchError>>,
) -> Result<T, SearchError> {
    if cancel.is_cancelled() {
        return Err(SearchError::Cancelled);
    }

    tokio::select! {
        result = request => result,
        _ = cancel.cancelled() => Err(SearchError::Cancelled),
    }
}
