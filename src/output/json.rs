// src/output/json.rs
//! JSON Lines (JSONL) output handler

use crate::output::OutputHandler;
use crate::types::SubdomainRecord;
use async_trait::async_trait;
use std::io::{self, Write};
use std::sync::Mutex;

/// JSON Lines output handler
///
/// Outputs one JSON object per subdomain (JSONL/NDJSON format)
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonOutput {
    /// Create a new JsonOutput that writes to stdout
    pub fn new() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a new JsonOutput that writes to a file
    pub fn to_file(file: std::fs::File) -> Self {
        Self {
            writer: Mutex::new(Box::new(file)),
        }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputHandler for JsonOutput {
    async fn emit_subdomain(&self, record: &SubdomainRecord) -> anyhow::Result<()> {
        let json = serde_json::to_string(record)?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow::anyhow!("output writer lock poisoned"))?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        Ok(())
    }

    async fn flush(&self) -> anyhow::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow::anyhow!("output writer lock poisoned"))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ct_search::fixtures::cert_response;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_json_lines() {
        let temp_file = NamedTempFile::new().unwrap();
        let handler = JsonOutput::to_file(temp_file.reopen().unwrap());

        let cert = cert_response(&["www.example.com", "api.example.com"]);
        for domain in ["api.example.com", "www.example.com"] {
            let record = SubdomainRecord::from_cert(domain, &cert);
            handler.emit_subdomain(&record).await.unwrap();
        }
        handler.flush().await.unwrap();

        let written = std::fs::read_to_string(temp_file.path()).unwrap();
        let lines: Vec<serde_json::Value> = written
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["subdomain"], "api.example.com");
        assert_eq!(lines[1]["subdomain"], "www.example.com");
        assert_eq!(lines[0]["logs"]["Google 'Argon2024' log"], 1234);
        assert_eq!(lines[0]["cert_domains"].as_array().unwrap().len(), 2);
    }
}
