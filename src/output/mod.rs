// src/output/mod.rs
//! Output handling for discovered subdomains
//!
//! Handlers write to stdout or a file; `OutputManager` fans a record out to
//! every registered handler.

use crate::subdomains::Subdomains;
use crate::types::SubdomainRecord;
use async_trait::async_trait;
use std::sync::Arc;

pub mod csv;
pub mod human;
pub mod json;

/// Trait for output handlers that process discovered subdomains
#[async_trait]
pub trait OutputHandler: Send + Sync {
    /// Emit one discovered subdomain
    async fn emit_subdomain(&self, record: &SubdomainRecord) -> anyhow::Result<()>;

    /// Flush any buffered output
    async fn flush(&self) -> anyhow::Result<()>;
}

/// Manager that dispatches output to multiple handlers
pub struct OutputManager {
    handlers: Vec<Arc<dyn OutputHandler>>,
}

impl OutputManager {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn OutputHandler>) {
        self.handlers.push(handler);
    }

    /// Emit a record to all handlers
    ///
    /// Errors from individual handlers are logged; an error is returned only
    /// when the single registered handler fails.
    pub async fn emit(&self, record: &SubdomainRecord) -> anyhow::Result<()> {
        let mut last_error = None;

        for handler in &self.handlers {
            if let Err(e) = handler.emit_subdomain(record).await {
                tracing::warn!("Output handler error: {}", e);
                last_error = Some(e);
            }
        }

        if let Some(err) = last_error {
            if self.handlers.len() == 1 {
                return Err(err);
            }
        }

        Ok(())
    }

    /// Emit every subdomain in lexical order, then flush
    pub async fn emit_all(&self, subdomains: &Subdomains) -> anyhow::Result<()> {
        for (domain, cert) in subdomains.iter() {
            self.emit(&SubdomainRecord::from_cert(domain, cert)).await?;
        }
        self.flush().await
    }

    /// Flush all handlers
    pub async fn flush(&self) -> anyhow::Result<()> {
        for handler in &self.handlers {
            handler.flush().await?;
        }
        Ok(())
    }
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new()
    }
}
