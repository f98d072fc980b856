//! Schema Sync CLI
//!
//! Downloads schemas listed in a CSV manifest, or registers a single schema
//! file, against a schema registry.
//!
//! Usage:
//!   schema-sync download --host=http://localhost:8081 [--file=./schemas.csv] [--outdir=./api]
//!   schema-sync register --host=http://localhost:8081 --subject=orders-value --file=orders.avsc

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use schema_sync::{download, register, DownloadOptions, RegisterOptions, SyncConfig, SyncError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-sync")]
#[command(about = "Download and register schemas against a schema registry")]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Explicit configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download every schema listed in a CSV manifest
    Download {
        /// Schema registry host
        #[arg(long)]
        host: Option<String>,
        /// Path to .csv file [default: ./schemas.csv]
        #[arg(long)]
        file: Option<PathBuf>,
        /// Path to out dir [default: ./api]
        #[arg(long)]
        outdir: Option<PathBuf>,
    },

    /// Register a schema file as a new version of a subject
    Register {
        /// Schema registry host
        #[arg(long)]
        host: Option<String>,
        /// Schema subject
        #[arg(long)]
        subject: Option<String>,
        /// Path to schema file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Version label shown in diagnostics [default: 1]
        #[arg(long)]
        version: Option<String>,
        /// Send only the schema text, without schemaType
        #[arg(long)]
        no_schema_type: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(exit_code(&e));
        }
    };

    if let Err(e) = run(cli) {
        println!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `--help` exits 0; every other argument error exits 1 instead of clap's 2
fn exit_code(e: &clap::Error) -> i32 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Reject flags that are empty or that configuration cannot supply, before
/// any configuration source is read
fn check_flags(command: &Commands) -> Result<(), SyncError> {
    match command {
        Commands::Download { host, .. } => {
            if host.as_deref() == Some("") {
                return Err(SyncError::MissingFlag("host"));
            }
        }
        Commands::Register { host, subject, file, .. } => {
            if host.as_deref() == Some("") {
                return Err(SyncError::MissingFlag("host"));
            }
            if file.is_none() {
                return Err(SyncError::MissingFlag("file"));
            }
            if subject.as_deref().map_or(true, str::is_empty) {
                return Err(SyncError::MissingFlag("subject"));
            }
        }
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    check_flags(&cli.command)?;
    let config = SyncConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Download { host, file, outdir } => {
            let options = DownloadOptions::from_args(&config, host, file, outdir)?;
            let report = download(&options)?;
            println!(
                "Downloaded {} schemas to {}",
                report.len(),
                options.outdir.display()
            );
        }

        Commands::Register {
            host,
            subject,
            file,
            version,
            no_schema_type,
        } => {
            let options =
                RegisterOptions::from_args(&config, host, subject, file, version, no_schema_type)?;
            let response = register(&options)?;
            println!("API response: {}", response);
        }
    }

    Ok(())
}
