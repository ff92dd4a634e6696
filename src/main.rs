//! Sumi-Notify main entry point
//!
//! This is the command-line interface for the Sumi-Notify IndexNow pipeline.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::PathBuf;
use sumi_notify::config::{ConfigProvider, EnvProvider};
use sumi_notify::http::{build_http_client, ClientOptions};
use sumi_notify::output::{render, render_json, OutputFormat};
use sumi_notify::Pipeline;
use tracing_subscriber::EnvFilter;

/// Sumi-Notify: announce site changes to IndexNow
///
/// Configuration comes from the environment (SITE_URL, INDEXNOW_KEY,
/// INDEXNOW_KEY_LOCATION, INDEXNOW_ENDPOINT, SITEMAP_URL), a `.env` file, or
/// an optional TOML settings file.
#[derive(Parser, Debug)]
#[command(name = "sumi-notify")]
#[command(version)]
#[command(about = "Submit site URLs to IndexNow", long_about = None)]
struct Cli {
    /// Optional TOML settings file; environment variables take precedence
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit explicit URLs
    Submit {
        /// URLs to submit
        urls: Vec<String>,

        /// Change type: created, updated or deleted
        #[arg(short, long)]
        mode: Option<String>,

        /// Also read URLs from stdin, one per line
        #[arg(long)]
        stdin: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Crawl the sitemap and submit every URL as updated
    Sitemap {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Crawl the sitemap and list the discovered URLs without submitting
    Crawl,

    /// Print the IndexNow key served at the key location
    Key,

    /// Check that the key location serves the configured key
    VerifyKey,

    /// Validate the configuration and print it with the key redacted
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let provider = match &cli.config {
        Some(path) => EnvProvider::with_settings_file(path),
        None => EnvProvider::new(),
    };
    let client =
        build_http_client(&ClientOptions::default()).context("Failed to build HTTP client")?;
    let pipeline = Pipeline::new(provider.clone(), client);

    match cli.command {
        Command::Submit {
            urls,
            mode,
            stdin,
            json,
        } => {
            let urls = if stdin { with_stdin_urls(urls)? } else { urls };
            if urls.is_empty() {
                bail!("No URLs given; pass them as arguments or use --stdin");
            }

            let result = pipeline.submit_explicit_urls(&urls, mode.as_deref()).await?;
            println!("{}", render(&result, output_format(json))?);
            if result.has_failures() {
                bail!("{} batches failed", result.failed_batches.len());
            }
        }

        Command::Sitemap { json } => {
            let result = pipeline.submit_entire_sitemap().await?;
            println!("{}", render(&result, output_format(json))?);
            if result.has_failures() {
                bail!("{} batches failed", result.failed_batches.len());
            }
        }

        Command::Crawl => {
            for url in pipeline.discover_sitemap_urls().await? {
                println!("{}", url);
            }
        }

        Command::Key => {
            println!("{}", pipeline.shared_key()?);
        }

        Command::VerifyKey => {
            let check = pipeline.verify_key_location().await?;
            println!("{}", render_json(&check)?);
            if !check.matches {
                bail!("Key location {} does not serve the configured key", check.location);
            }
        }

        Command::CheckConfig => {
            let config = provider.load()?;
            println!("Configuration:");
            println!("  Site origin: {}", config.site_origin);
            println!("  Site host: {}", config.site_host);
            println!("  Key: {}", redact(&config.shared_key));
            println!("  Key location: {}", config.key_verification_url);
            println!("  Notifier endpoint: {}", config.notifier_endpoint);
            println!("  Sitemap: {}", config.sitemap_entry_url);
            println!("\n✓ Configuration is valid");
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_notify=info,warn"),
            1 => EnvFilter::new("sumi_notify=debug,info"),
            2 => EnvFilter::new("sumi_notify=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

fn output_format(json: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    }
}

/// Appends non-blank stdin lines to the URLs given on the command line
fn with_stdin_urls(mut urls: Vec<String>) -> anyhow::Result<Vec<String>> {
    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read URLs from stdin")?;
        if !line.trim().is_empty() {
            urls.push(line);
        }
    }
    Ok(urls)
}

/// Shows only the first four characters of a secret
fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{}… ({} chars)", visible, secret.chars().count())
}
