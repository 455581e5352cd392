mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warehouse_contracts::{
    job_ads_links, job_ads_registry, standard_checks, NamespaceMap, ValidationReport,
};
use warehouse_introspect::DuckDbAdapter;
use warehouse_validator::{
    CancellationToken, ColumnPolicy, ValidationEngine, ValidationOptions,
};

/// Exit code for a run with validation findings.
const EXIT_FINDINGS: u8 = 1;
/// Exit code for an infrastructure failure (database unreachable).
const EXIT_FATAL: u8 = 2;

#[derive(Parser)]
#[command(name = "whv")]
#[command(version, about = "Validate a materialized warehouse against its contracts", long_about = None)]
struct Cli {
    /// Path to the warehouse database file
    database: PathBuf,

    /// Treat live columns not declared in the contract as errors
    #[arg(short, long)]
    strict: bool,

    /// Override relation-group namespaces, e.g. "warehouse=core,mart=marts"
    #[arg(long, value_parser = parse_namespace_map)]
    namespace_map: Option<NamespaceMap>,

    /// Abort validation after this many seconds, keeping partial findings
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per finding plus a PASS/FAIL summary line
    Text,
    /// Line-delimited JSON records
    Json,
}

fn parse_namespace_map(raw: &str) -> Result<NamespaceMap, String> {
    let mut map = NamespaceMap::default();
    for part in raw.split(',') {
        let (group, namespace) = part
            .split_once('=')
            .ok_or_else(|| format!("invalid mapping '{part}', expected group=namespace"))?;
        match group.trim() {
            "warehouse" => map.warehouse = namespace.trim().to_string(),
            "mart" => map.mart = namespace.trim().to_string(),
            other => {
                return Err(format!(
                    "unknown relation group '{other}', expected 'warehouse' or 'mart'"
                ))
            }
        }
    }
    Ok(map)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so the finding lines on stdout stay grep-able.
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match run(&cli) {
        Ok(report) => {
            output::print_report(&report, cli.format == OutputFormat::Json);
            if report.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_FINDINGS)
            }
        }
        Err(e) => {
            output::print_fatal(&format!("{e:#}"));
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(cli: &Cli) -> Result<ValidationReport> {
    let options = ValidationOptions {
        policy: if cli.strict {
            ColumnPolicy::ExactMatch
        } else {
            ColumnPolicy::ContractSubset
        },
        namespaces: cli.namespace_map.clone().unwrap_or_default(),
    };

    let adapter = DuckDbAdapter::connect(&cli.database)
        .with_context(|| format!("cannot validate warehouse at '{}'", cli.database.display()))?;

    let cancel = CancellationToken::new();
    if let Some(seconds) = cli.timeout {
        let token = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_secs(seconds));
            debug!("Timeout reached, cancelling remaining checks");
            token.cancel();
        });
    }

    let registry = job_ads_registry();
    let links = job_ads_links(&options.namespaces);
    let checks = standard_checks(&registry, &links, &options.namespaces);

    let engine = ValidationEngine::new(registry, checks, options);
    Ok(engine.run(&adapter, &cancel))
}
