//! Binary entry point for `support-desk`.
//!
//! This module provides the command-line interface for support-desk with options
//! for configuration file paths and logging verbosity. It initializes logging,
//! loads configuration, and runs the requested command.

use clap::Parser;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use support_desk::{
    base::{config::Config, types::Void},
    cli::Command,
};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Support-desk – priority triage and knowledge-base administration.
///
/// Configuration can come from `config.toml` or `SUPPORT_DESK_*` environment
/// variables. Knowledge-base commands run as the configured operator, and
/// only an operator with the `admin` role may manage records.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the tool will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: WARN level
    /// - -v: INFO level
    /// - -vv: DEBUG level
    /// - -vvv or more: TRACE level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Export spans over OTLP/HTTP to the collector named by the standard `OTEL_*` variables.
    #[arg(long, global = true)]
    otlp: bool,
    #[command(subcommand)]
    command: Command,
}

/// Main entry point for the support-desk binary.
///
/// Sets up logging based on verbosity, loads configuration, and runs the command.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.

    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    // Prepare the otlp layer.

    let otel = if args.otlp {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        let tracer = opentelemetry_sdk::trace::SdkTracerProvider::builder().with_simple_exporter(exporter).build().tracer("support-desk");

        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry().with(otel).with(level_filter).with(stderr).init();

    let config = Config::load(args.config.as_deref())?;

    let output = support_desk::start(config, args.command).await?;
    println!("{output}");

    Ok(())
}
