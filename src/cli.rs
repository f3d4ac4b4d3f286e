// src/cli.rs
use clap::Parser;

use crate::config::Config;

/// ct-subfinder: subdomain discovery from Certificate Transparency logs
///
/// Searches the Certificate Transparency search API for certificates issued
/// under a domain and reports every subdomain they cover.
#[derive(Parser, Debug, Clone)]
#[command(name = "ct-subfinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Domain that you want to search for subdomains
    pub domain: String,

    // ===== Search =====
    /// Maximum number of result pages to scan [default: 10]
    #[arg(short = 'l', long = "limit")]
    pub limit: Option<u32>,

    /// Include results from expired certificates
    #[arg(short = 'e', long = "expired")]
    pub expired: bool,

    /// Abort when a certificate detail cannot be fetched
    #[arg(long = "strict")]
    pub strict: bool,

    /// Give up after this many seconds, keeping what was found
    #[arg(long = "deadline")]
    pub deadline: Option<u64>,

    // ===== Input & Configuration =====
    /// Path to TOML config file
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override the search API root URL
    #[arg(long = "api-root")]
    pub api_root: Option<String>,

    // ===== Output =====
    /// Output subdomains in JSONL format
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Output subdomains in CSV format
    #[arg(long = "csv")]
    pub csv: bool,

    /// Write output to file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    /// Disable progress indicator
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    // ===== Logging =====
    /// Verbose logging (set log level to debug)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Quiet logging (set log level to warn)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    /// Validate flag combinations and return errors for invalid usage
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.json && self.csv {
            anyhow::bail!("Cannot specify multiple output formats. Choose one of: --json or --csv");
        }

        if self.limit == Some(0) {
            anyhow::bail!("--limit must be at least 1");
        }

        if self.deadline == Some(0) {
            anyhow::bail!("--deadline must be greater than 0");
        }

        if self.verbose && self.quiet {
            anyhow::bail!("Cannot specify both --verbose and --quiet");
        }

        if self.domain.trim().is_empty() {
            anyhow::bail!("Domain must not be empty");
        }

        Ok(())
    }

    /// Apply command line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(limit) = self.limit {
            config.search.page_limit = limit;
        }

        if self.expired {
            config.search.include_expired = true;
        }

        if self.strict {
            config.search.strict_certificates = true;
        }

        if let Some(ref api_root) = self.api_root {
            config.search.api_root = api_root.clone();
        }
    }

    /// Determine the output format based on flags
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Human
        }
    }

    /// Check if progress indicator should be enabled
    pub fn should_show_progress(&self) -> bool {
        !self.no_progress && !self.json && !self.csv && !self.quiet
    }

    /// Log level from flags, falling back to the configured level
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            configured
        }
    }
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable colored text output (default)
    Human,
    /// JSON Lines format (one JSON object per line)
    Json,
    /// CSV format
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_is_required() {
        assert!(Cli::try_parse_from(["ct-subfinder"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["ct-subfinder", "example.com"]);

        assert_eq!(cli.domain, "example.com");
        assert_eq!(cli.limit, None);
        assert!(!cli.expired);
        assert_eq!(cli.output_format(), OutputFormat::Human);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from(["ct-subfinder", "example.com", "-l", "3", "-e", "-j", "-c", "my.toml"]);

        assert_eq!(cli.limit, Some(3));
        assert!(cli.expired);
        assert_eq!(cli.output_format(), OutputFormat::Json);
        assert_eq!(cli.config.as_deref(), Some("my.toml"));
    }

    #[test]
    fn test_csv_output_format() {
        let cli = Cli::parse_from(["ct-subfinder", "example.com", "--csv"]);
        assert_eq!(cli.output_format(), OutputFormat::Csv);
    }

    #[test]
    fn test_multiple_formats_invalid() {
        let cli = Cli::parse_from(["ct-subfinder", "example.com", "--json", "--csv"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_zero_limit_invalid() {
        let cli = Cli::parse_from(["ct-subfinder", "example.com", "--limit", "0"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_zero_deadline_invalid() {
        let cli = Cli::parse_from(["ct-subfinder", "example.com", "--deadline", "0"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_verbose_and_quiet_invalid() {
        let cli = Cli::parse_from(["ct-subfinder", "example.com", "--verbose", "--quiet"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let cli = Cli::parse_from([
            "ct-subfinder", "example.com", "--limit", "25", "--expired", "--strict",
            "--api-root", "http://localhost:9000",
        ]);
        let mut config = Config::default();

        cli.apply_overrides(&mut config);

        assert_eq!(config.search.page_limit, 25);
        assert!(config.search.include_expired);
        assert!(config.search.strict_certificates);
        assert_eq!(config.search.api_root, "http://localhost:9000");
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let cli = Cli::parse_from(["ct-subfinder", "example.com"]);
        let mut config = Config::default();
        config.search.page_limit = 7;
        config.search.include_expired = true;

        cli.apply_overrides(&mut config);

        assert_eq!(config.search.page_limit, 7);
        assert!(config.search.include_expired);
    }

    #[test]
    fn test_progress_disabled_for_machine_output() {
        let cli = Cli::parse_from(["ct-subfinder", "example.com", "--json"]);
        assert!(!cli.should_show_progress());

        let cli = Cli::parse_from(["ct-subfinder", "example.com"]);
        assert!(cli.should_show_progress());
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::parse_from(["ct-subfinder", "example.com", "--verbose"]);
        assert_eq!(cli.log_level("info"), "debug");

        let cli = Cli::parse_from(["ct-subfinder", "example.com", "-q"]);
        assert_eq!(cli.log_level("info"), "warn");

        let cli = Cli::parse_from(["ct-subfinder", "example.com"]);
        assert_eq!(cli.log_level("trace"), "trace");
    }
}
