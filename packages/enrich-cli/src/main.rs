//! `brand-enrich`: fill in brand and manufacturer columns for a product CSV.

mod config;

use anyhow::{bail, Context, Result};
use brand_enrichment::{
    table_io, BatchOrchestrator, BatchOutcome, EnrichmentSession, ExclusionList, ExclusionStore,
    GoogleSearcher, MemoryExclusionStore, PipelineConfig, ReconciliationStatus,
};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "brand-enrich")]
#[command(about = "Infer brand and manufacturer for product catalog rows")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a product CSV and write result, error and log files
    Run(RunArgs),

    /// Inspect or update the shared exclusion domain list
    Exclusions {
        #[command(subcommand)]
        command: ExclusionCommands,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Product CSV with ユニーク名, 型番 and JANコード columns
    #[arg(long)]
    input: PathBuf,

    /// Reference CSV with ブランド名 and メーカー名 columns
    #[arg(long, required_unless_present = "no_reference")]
    reference: Option<PathBuf>,

    /// Run without a reference table (no reconciliation)
    #[arg(long, conflicts_with = "reference")]
    no_reference: bool,

    /// Use a local exclusion CSV instead of the shared list
    #[arg(long)]
    exclusions_file: Option<PathBuf>,

    /// Result CSV (default: <input>_AI補完結果.csv)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Failed rows CSV (default: <input>_エラー.csv)
    #[arg(long)]
    errors: Option<PathBuf>,

    /// Batch log (default: <input>_log.txt)
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ExclusionCommands {
    /// Print the current list
    Show,

    /// Replace the shared list with a local CSV file
    Publish { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,brand_enrichment=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Run(args) => run(&config, args).await,
        Commands::Exclusions { command } => match command {
            ExclusionCommands::Show => show_exclusions(&config).await,
            ExclusionCommands::Publish { file } => publish_exclusions(&config, &file).await,
        },
    }
}

async fn run(config: &Config, args: RunArgs) -> Result<()> {
    let mut pipeline = PipelineConfig::default();
    if let Some(model) = &config.openai_model {
        pipeline = pipeline.with_model(model);
    }

    let searcher = GoogleSearcher::new(config.search_credentials()?)
        .context("Failed to build search client")?;
    let model = config.openai_client()?;
    let orchestrator = BatchOrchestrator::new(Arc::new(searcher), Arc::new(model), &pipeline);

    let store: Arc<dyn ExclusionStore> = match &args.exclusions_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Arc::new(MemoryExclusionStore::with_content(content))
        }
        None if config.has_exclusion_store() => Arc::new(config.exclusion_store()?),
        None => {
            tracing::warn!("no exclusion store configured, running without exclusions");
            Arc::new(MemoryExclusionStore::with_content(""))
        }
    };

    let mut session = EnrichmentSession::new(orchestrator, store);

    if let Some(path) = &args.reference {
        let reference = session
            .load_reference(open(path)?)
            .with_context(|| format!("Failed to load reference table {}", path.display()))?;
        println!("Reference table: {} brands", reference.len());
    }

    let table = table_io::read_table(open(&args.input)?)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    println!("Input: {} rows", table.len());

    let outcome = session
        .run(&table, |progress| {
            eprint!(
                "\r{}/{} ({:.0}%)",
                progress.completed,
                progress.total,
                progress.fraction() * 100.0
            );
        })
        .await
        .context("Batch rejected")?;
    eprintln!();

    let output = args
        .output
        .unwrap_or_else(|| sibling_path(&args.input, "_AI補完結果", "csv"));
    let errors = args
        .errors
        .unwrap_or_else(|| sibling_path(&args.input, "_エラー", "csv"));
    let log = args
        .log
        .unwrap_or_else(|| sibling_path(&args.input, "_log", "txt"));

    table_io::write_output(create(&output)?, outcome)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    table_io::write_errors(create(&errors)?, outcome)
        .with_context(|| format!("Failed to write {}", errors.display()))?;
    outcome
        .log
        .write_to(create(&log)?)
        .with_context(|| format!("Failed to write {}", log.display()))?;

    print_summary(outcome);
    if let Some(warning) = session.load_warning() {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }
    println!("Results: {}", output.display());
    println!("Errors:  {}", errors.display());
    println!("Log:     {}", log.display());
    Ok(())
}

async fn show_exclusions(config: &Config) -> Result<()> {
    let store = config.exclusion_store()?;
    let content = store.fetch().await.context("Failed to fetch exclusion list")?;
    let list = ExclusionList::from_csv(&content).context("Exclusion list is not valid CSV")?;

    for domain in list.domains() {
        println!("{domain}");
    }
    eprintln!("{} domains", list.len());
    Ok(())
}

async fn publish_exclusions(config: &Config, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let list = ExclusionList::from_csv(&content)
        .with_context(|| format!("{} is not valid CSV", file.display()))?;

    let store = config.exclusion_store()?;
    let outcome = store
        .publish(&content)
        .await
        .context("Failed to publish exclusion list")?;

    println!("status: {}", outcome.status);
    println!("{}", outcome.body);
    if !outcome.is_success() {
        bail!("exclusion list publish rejected with status {}", outcome.status);
    }
    println!("{} {} domains published", "ok".green().bold(), list.len());
    Ok(())
}

fn print_summary(outcome: &BatchOutcome) {
    println!(
        "{} rows: {} succeeded, {} failed",
        outcome.records.len(),
        outcome.succeeded().to_string().green(),
        outcome.failed().to_string().red()
    );
    for status in [
        ReconciliationStatus::Consistent,
        ReconciliationStatus::Inconsistent,
        ReconciliationStatus::NoReferenceEntry,
        ReconciliationStatus::NoBrandInferred,
    ] {
        println!("  {}: {}", status.label(), outcome.status_count(status));
    }
}

/// `<dir>/<stem><suffix>.<ext>` next to `input`.
fn sibling_path(input: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}{suffix}.{ext}"))
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open {}", path.display()))
}

fn create(path: &Path) -> Result<impl Write> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_paths() {
        let input = Path::new("/data/products.csv");
        assert_eq!(
            sibling_path(input, "_AI補完結果", "csv"),
            PathBuf::from("/data/products_AI補完結果.csv")
        );
        assert_eq!(
            sibling_path(input, "_log", "txt"),
            PathBuf::from("/data/products_log.txt")
        );
    }

    #[test]
    fn test_cli_requires_reference_or_opt_out() {
        assert!(Cli::try_parse_from(["brand-enrich", "run", "--input", "a.csv"]).is_err());
        assert!(Cli::try_parse_from([
            "brand-enrich",
            "run",
            "--input",
            "a.csv",
            "--no-reference"
        ])
        .is_ok());
        assert!(Cli::try_parse_from([
            "brand-enrich",
            "run",
            "--input",
            "a.csv",
            "--reference",
            "r.csv",
            "--no-reference"
        ])
        .is_err());
    }

    #[test]
    fn test_exclusions_publish_takes_a_file() {
        let cli = Cli::try_parse_from(["brand-enrich", "exclusions", "publish", "list.csv"]).unwrap();
        match cli.command {
            Commands::Exclusions {
                command: ExclusionCommands::Publish { file },
            } => assert_eq!(file, PathBuf::from("list.csv")),
            _ => panic!("expected exclusions publish"),
        }
    }

    #[test]
    fn test_log_file_written_through_buffered_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch_log.txt");
        let mut log = brand_enrichment::BatchLog::new();
        log.push("row 1 ok");

        log.write_to(create(&path).unwrap()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.trim_end().ends_with("row 1 ok"));
    }
}
