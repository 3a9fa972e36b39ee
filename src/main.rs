use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod generator;
mod loader;
mod metrics;
mod models;
mod naming;
mod output;
mod runner;

use crate::config::MetricsConfig;
use crate::output::OutputFormat;
use crate::runner::Runner;

/// LongMemEval tooling - build sample datasets and summarize judged QA results
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output - log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute per-category accuracy from judged results
    Metrics {
        /// Newline-delimited JSON evaluation results
        results_file: PathBuf,

        /// JSON array of reference question records
        reference_file: PathBuf,

        /// Optional TOML file overriding markers and output prefix
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Console output format: plain or json
        #[arg(short, long, default_value = "plain")]
        format: OutputFormat,
    },
    /// Write a small two-question sample dataset
    Generate {
        /// Destination file, overwritten if present
        #[arg(short, long, default_value = generator::DEFAULT_SAMPLE_PATH)]
        output: PathBuf,

        /// Console output format: plain or json
        #[arg(short, long, default_value = "plain")]
        format: OutputFormat,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli.command) {
        tracing::error!(error = %err, "command failed");
        for line in output::error_lines(&err) {
            eprintln!("{}", line);
        }
        std::process::exit(1);
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Metrics {
            results_file,
            reference_file,
            config,
            format,
        } => {
            let config = MetricsConfig::load(config.as_deref())?;
            let outcome = Runner::new(config).run(&results_file, &reference_file)?;
            output::print_report(&outcome.report, &outcome.output_path, format);
        }
        Command::Generate {
            output: path,
            format,
        } => {
            let records = generator::generate_sample_data();
            println!("{}", output::generating_line(records.len()));
            generator::write_sample_data(&records, &path)?;
            output::print_samples(&records, &path, format);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
