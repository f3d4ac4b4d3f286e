// src/output/human.rs
//! Human-readable colored terminal output

use crate::output::OutputHandler;
use crate::types::SubdomainRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::io::{self, Write};
use std::sync::Mutex;

/// Human-readable output handler with colored terminal output
pub struct HumanOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    use_colors: bool,
}

impl HumanOutput {
    /// Create a new HumanOutput that writes to stdout
    pub fn new() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
            use_colors: is_terminal::is_terminal(std::io::stdout()),
        }
    }

    /// Create a new HumanOutput that writes to a file
    pub fn to_file(file: std::fs::File) -> Self {
        Self {
            writer: Mutex::new(Box::new(file)),
            use_colors: false, // No colors when writing to file
        }
    }

    fn format_validity(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> String {
        let fmt = |ts: Option<DateTime<Utc>>| {
            ts.map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "?".to_string())
        };
        format!("{} - {}", fmt(from), fmt(to))
    }
}

impl Default for HumanOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputHandler for HumanOutput {
    async fn emit_subdomain(&self, record: &SubdomainRecord) -> anyhow::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow::anyhow!("output writer lock poisoned"))?;

        let validity = Self::format_validity(record.valid_from, record.valid_to);
        let domains = record.cert_domains.join(", ");

        if self.use_colors {
            writeln!(writer, "{} {}", "[+]".green().bold(), record.subdomain.cyan().bold())?;
            writeln!(writer, "    {} {}", "Cert Subject:".dimmed(), record.subject)?;
            writeln!(writer, "    {} {}", "Cert Domains:".dimmed(), domains)?;
            writeln!(writer, "    {} {}", "Valid:".dimmed(), validity.yellow())?;
        } else {
            writeln!(writer, "[+] {}", record.subdomain)?;
            writeln!(writer, "    Cert Subject: {}", record.subject)?;
            writeln!(writer, "    Cert Domains: {}", domains)?;
            writeln!(writer, "    Valid: {}", validity)?;
        }

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
    async fn test_human_output_to_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let handler = HumanOutput::to_file(temp_file.reopen().unwrap());

        let cert = cert_response(&["www.example.com", "example.com"]);
        let record = SubdomainRecord::from_cert("www.example.com", &cert);

        assert!(handler.emit_subdomain(&record).await.is_ok());
        assert!(handler.flush().await.is_ok());

        let written = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(written.starts_with("[+] www.example.com\n"));
        assert!(written.contains("Cert Subject: CN=www.example.com"));
        assert!(written.contains("Cert Domains: www.example.com, example.com"));
        assert!(written.contains("Valid: 2020-09-13 - 2023-11-14"));
    }

    #[test]
    fn test_format_validity_missing() {
        assert_eq!(HumanOutput::format_validity(None, None), "? - ?");
    }
}
