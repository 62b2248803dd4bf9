//! Maskdb Command-Line Tool
//!
//! Scans the configured tables, masks the designated columns, and emits the
//! overwrite statements - to stdout, to a file, or straight to the target
//! database.

mod emitter;
mod pipeline;

use clap::Parser;
use emitter::{Emitter, OutputFormat};
use maskdb_core::Transformer;
use maskdb_source::{Config, Database};
use std::path::PathBuf;

/// Maskdb Command-Line Tool
#[derive(Parser, Debug)]
#[command(name = "maskdb")]
#[command(version, about = "Mask sensitive database columns and emit overwrite statements")]
pub struct Args {
    /// Path to the run configuration
    #[arg(short, long, default_value = "maskdb.toml")]
    pub config: PathBuf,

    /// Override the configured per-table row cap
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Output format
    #[arg(long, default_value = "sql", value_enum)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Execute statements against the target connection instead of printing
    #[arg(long, default_value_t = false, conflicts_with = "output")]
    pub execute: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing. Statements go to stdout, logs to stderr; RUST_LOG
    // overrides --log-level when set.
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        tracing_subscriber::EnvFilter::try_new(format!(
            "maskdb_cli={0},maskdb_core={0},maskdb_source={0}",
            args.log_level
        ))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("maskdb_cli=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.execute && args.format == OutputFormat::Json {
        return Err("--execute cannot replay JSON output; use --format sql".into());
    }

    let config = Config::from_path(&args.config)?;
    let specs = config.table_specs()?;
    let limit = args.limit.unwrap_or(config.masking.sample_rows);
    let transformer = Transformer::new(config.masking.policy);

    let source = Database::connect(&config.source).await?;

    let mut emitter = if args.execute {
        let target = config
            .target
            .as_ref()
            .ok_or("--execute requires a [target] section in the config")?;
        Emitter::execute(Database::connect(target).await?)
    } else if let Some(path) = &args.output {
        Emitter::file(args.format, path)?
    } else {
        Emitter::stdout(args.format)
    };

    let summary = pipeline::run(&source, &transformer, &specs, limit, &mut emitter).await?;

    tracing::info!(
        tables = summary.tables,
        rows = summary.rows,
        statements = summary.statements,
        "run complete"
    );

    Ok(())
}
