//! CLI entry point for canvas_grades.
//!
//! Fetches the authenticated student's current grades from Canvas for the
//! configured grading term, or resolves a single score against the scale.

use anyhow::{Context, Result};
use canvas_grades::{
    config::GradesConfig,
    fetch_grades,
    grading::letter_for,
    output::{append_records, print_pretty, to_json, write_json},
};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "canvas_grades")]
#[command(about = "Fetch current Canvas grades with letter grades", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pretty,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch grades for every active course
    Fetch {
        /// Grade scale and grading term config
        #[arg(short, long, default_value = "config.json")]
        config: String,

        /// Canvas host, defaults to $CANVAS_DOMAIN
        #[arg(short, long)]
        domain: Option<String>,

        /// Canvas access token, defaults to $CANVAS_TOKEN
        #[arg(short, long)]
        token: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,

        /// File to write to (json, csv). CSV defaults to grades.csv
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Resolve a single score against the configured scale
    Letter {
        /// Percentage score
        #[arg(allow_hyphen_values = true)]
        score: f64,

        /// Grade scale config
        #[arg(short, long, default_value = "config.json")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/canvas_grades.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("canvas_grades.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::from_env("RUST_LOG").add_directive("info".parse::<Directive>()?),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse::<Directive>()?),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            config,
            domain,
            token,
            format,
            output,
        } => {
            let config = GradesConfig::load(&config)?;
            let domain = resolve(domain, "CANVAS_DOMAIN")?;
            let token = resolve(token, "CANVAS_TOKEN")?;

            let records = fetch_grades(&token, &domain, &config).await?;

            match format {
                Format::Pretty => print_pretty(&records),
                Format::Json => match output {
                    Some(path) => write_json(&path, &records)?,
                    None => println!("{}", to_json(&records)?),
                },
                Format::Csv => {
                    let path = output.unwrap_or_else(|| "grades.csv".to_string());
                    append_records(&path, &records)?;
                    info!(path = %path, rows = records.len(), "Grades appended");
                }
            }
        }
        Commands::Letter { score, config } => {
            let config = GradesConfig::load(&config)?;
            println!("{}", letter_for(score, &config.scale));
        }
    }

    Ok(())
}

/// Uses the flag value if given, otherwise the environment variable.
fn resolve(flag: Option<String>, var: &str) -> Result<String> {
    match flag {
        Some(value) => Ok(value),
        None => std::env::var(var).with_context(|| format!("{var} must be set")),
    }
}
