// src/output/csv.rs
//! CSV output handler

use crate::output::OutputHandler;
use crate::types::SubdomainRecord;
use async_trait::async_trait;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Mutex;

/// Flat CSV row; nested fields are joined
#[derive(Serialize)]
struct CsvRow<'a> {
    subdomain: &'a str,
    subject: &'a str,
    issuer: &'a str,
    cert_serial: &'a str,
    valid_from: String,
    valid_to: String,
    cert_domains: String,
}

/// CSV output handler
pub struct CsvOutput {
    writer: Mutex<csv::Writer<Box<dyn Write + Send>>>,
}

impl CsvOutput {
    /// Create a new CsvOutput that writes to stdout
    pub fn new() -> Self {
        Self::from_writer(Box::new(io::stdout()))
    }

    /// Create a new CsvOutput that writes to a file
    pub fn to_file(file: std::fs::File) -> Self {
        Self::from_writer(Box::new(file))
    }

    fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        // Header is written with the first row
        Self {
            writer: Mutex::new(csv::Writer::from_writer(writer)),
        }
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputHandler for CsvOutput {
    async fn emit_subdomain(&self, record: &SubdomainRecord) -> anyhow::Result<()> {
        let row = CsvRow {
            subdomain: &record.subdomain,
            subject: &record.subject,
            issuer: &record.issuer,
            cert_serial: &record.cert_serial,
            valid_from: record.valid_from.map(|t| t.to_rfc3339()).unwrap_or_default(),
            valid_to: record.valid_to.map(|t| t.to_rfc3339()).unwrap_or_default(),
            // Semicolons keep the list inside one field
            cert_domains: record.cert_domains.join(";"),
        };

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow::anyhow!("output writer lock poisoned"))?;
        writer.serialize(row)?;
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
    async fn test_csv_header_and_rows() {
        let temp_file = NamedTempFile::new().unwrap();
        let handler = CsvOutput::to_file(temp_file.reopen().unwrap());

        let cert = cert_response(&["www.example.com", "api.example.com"]);
        handler
            .emit_subdomain(&SubdomainRecord::from_cert("api.example.com", &cert))
            .await
            .unwrap();
        handler
            .emit_subdomain(&SubdomainRecord::from_cert("www.example.com", &cert))
            .await
            .unwrap();
        handler.flush().await.unwrap();

        let written = std::fs::read_to_string(temp_file.path()).unwrap();
        let lines: Vec<&str> = written.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "subdomain,subject,issuer,cert_serial,valid_from,valid_to,cert_domains"
        );
        assert!(lines[1].starts_with("api.example.com,CN=www.example.com,"));
        assert!(lines[1].ends_with(",www.example.com;api.example.com"));
    }

    #[tokio::test]
    async fn test_csv_quotes_fields_with_commas() {
        let temp_file = NamedTempFile::new().unwrap();
        let handler = CsvOutput::to_file(temp_file.reopen().unwrap());

        let cert = cert_response(&["www.example.com"]);
        let record = SubdomainRecord::from_cert("www.example.com", &cert);
        handler.emit_subdomain(&record).await.unwrap();

        let written = std::fs::read_to_string(temp_file.path()).unwrap();
        // Issuer in the fixture contains commas
        assert!(written.contains("\"C=US, O=Let's Encrypt, CN=R3\""));
    }
}
