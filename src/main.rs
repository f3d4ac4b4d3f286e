// src/main.rs
use clap::Parser;
use ct_subfinder::cli::{Cli, OutputFormat};
use ct_subfinder::config::Config;
use ct_subfinder::ct_search::{
    Cancellation, DiscoveryEngine, DiscoveryOptions, HttpTransport, SearchClient, StopReason,
};
use ct_subfinder::output::{OutputManager, csv, human, json};
use ct_subfinder::progress::ProgressIndicator;
use ct_subfinder::stats::DiscoveryStats;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    cli.validate()?;

    // Load config file if given; every setting has a default
    let mut config = match cli.config {
        Some(ref path) => Config::from_file(Path::new(path))?,
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    // Initialize logging; the HTTP stack is noisy below warn
    let log_level = cli.log_level(&config.logging.level);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},hyper=warn,hyper_util=warn,reqwest=warn", log_level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting ct-subfinder...");

    let output_manager = build_output(&cli)?;

    let transport = HttpTransport::new(
        config.search.api_root.clone(),
        Duration::from_secs(config.search.timeout_secs),
        &config.search.user_agent,
    )?;
    let client = SearchClient::new(Arc::new(transport));

    let options = DiscoveryOptions {
        page_limit: config.search.page_limit,
        include_expired: config.search.include_expired,
        strict_certificates: config.search.strict_certificates,
    };
    tracing::info!(
        "Page limit: {}, include expired: {}",
        options.page_limit,
        options.include_expired
    );

    let stats = DiscoveryStats::new();
    let progress = ProgressIndicator::new(cli.should_show_progress());
    let engine = DiscoveryEngine::new(client, options)
        .with_stats(stats.clone())
        .with_progress(progress.clone());

    // Ctrl-C stops the run and keeps what was found so far
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping discovery...");
            shutdown_tx.send(true).ok();
        }
    });

    let mut cancel = Cancellation::none().with_shutdown(shutdown_rx);
    if let Some(secs) = cli.deadline {
        cancel = cancel.with_deadline(tokio::time::Instant::now() + Duration::from_secs(secs));
    }

    let outcome = engine.discover(&cli.domain, cancel).await;
    progress.finish();

    match outcome {
        Ok(discovery) => {
            if discovery.stop == StopReason::PageLimit {
                tracing::info!(
                    "Stopped at the page limit; raise --limit to scan more than {} pages",
                    discovery.pages_fetched
                );
            }

            tracing::info!("Found {} subdomains", discovery.subdomains.len());
            output_manager.emit_all(&discovery.subdomains).await?;
            tracing::info!("{}", stats.format_stats());
            Ok(())
        }
        Err(err) => {
            // Report what the earlier pages produced before failing
            if !err.partial.is_empty() {
                tracing::warn!(
                    "Emitting {} subdomains found before the failure",
                    err.partial.len()
                );
                output_manager.emit_all(&err.partial).await?;
            }

            tracing::info!("{}", stats.format_stats());
            tracing::error!("{}", err);
            Err(err.into())
        }
    }
}

fn build_output(cli: &Cli) -> anyhow::Result<OutputManager> {
    let mut output_manager = OutputManager::new();

    let file = match cli.output {
        Some(ref path) => {
            tracing::info!("Writing output to: {}", path);
            Some(std::fs::File::create(path)?)
        }
        None => None,
    };

    match cli.output_format() {
        OutputFormat::Human => {
            let handler = file.map_or_else(human::HumanOutput::new, human::HumanOutput::to_file);
            output_manager.add_handler(Arc::new(handler));
        }
        OutputFormat::Json => {
            let handler = file.map_or_else(json::JsonOutput::new, json::JsonOutput::to_file);
            output_manager.add_handler(Arc::new(handler));
        }
        OutputFormat::Csv => {
            let handler = file.map_or_else(csv::CsvOutput::new, csv::CsvOutput::to_file);
            output_manager.add_handler(Arc::new(handler));
        }
    }

    Ok(output_manager)
}
