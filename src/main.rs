//! Shortlist CLI entrypoint.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use mimalloc::MiMalloc;

use shortlist::export::skills_cell;
use shortlist::{
    BatchReport, CandidateStore, Config, Document, FileStore, ModelSet, Pipeline, export_csv,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "shortlist")]
#[command(about = "Rank CVs against a job description", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a batch of CVs against a job description
    Run(RunArgs),
    /// List stored job descriptions with their indices
    ListJobs,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    job: JobSource,

    /// CV files (PDF or plain text); directories contribute their files in name order
    documents: Vec<PathBuf>,

    /// Override SHORTLIST_SELECTION_THRESHOLD
    #[arg(long)]
    threshold: Option<f32>,

    /// Override SHORTLIST_EXPORT_PATH
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the spreadsheet export
    #[arg(long)]
    no_export: bool,
}

#[derive(Args)]
#[group(multiple = false)]
struct JobSource {
    /// Job description text
    #[arg(long)]
    job: Option<String>,

    /// File containing the job description
    #[arg(long)]
    job_file: Option<PathBuf>,

    /// Index of a stored job description (see `list-jobs`)
    #[arg(long)]
    job_index: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    match cli.command {
        Commands::ListJobs => {
            config.validate()?;
            let store = FileStore::open(&config.storage_path)?;
            list_jobs(&store)
        }
        Commands::Run(args) => {
            if let Some(threshold) = args.threshold {
                config.selection_threshold = threshold;
            }
            if let Some(output) = &args.output {
                config.export_path = output.clone();
            }
            config.validate()?;
            run(config, args).await
        }
    }
}

fn list_jobs(store: &FileStore) -> anyhow::Result<()> {
    let jobs = store.list_job_descriptions()?;
    if jobs.is_empty() {
        println!("No stored job descriptions.");
        return Ok(());
    }

    for (index, job) in jobs.iter().enumerate() {
        let first_line = job.text.as_str().lines().next().unwrap_or_default();
        println!(
            "{index:>3}  {}  {}",
            job.created_at.format("%Y-%m-%d %H:%M"),
            truncate(first_line, 70)
        );
    }
    Ok(())
}

async fn run(config: Config, args: RunArgs) -> anyhow::Result<()> {
    let store = Arc::new(FileStore::open(&config.storage_path)?);
    let job_text = resolve_job(&args.job, store.as_ref())?;
    let documents = load_documents(&args.documents)?;

    tracing::info!(
        documents = documents.len(),
        threshold = config.selection_threshold,
        storage_path = %config.storage_path.display(),
        "Shortlist starting"
    );

    let export_path = config.export_path.clone();
    let report = tokio::task::spawn_blocking(move || -> anyhow::Result<BatchReport> {
        let models = ModelSet::load(&config)?;
        let pipeline = Pipeline::new(&models, &config, store);
        Ok(pipeline.run(&job_text, documents)?)
    })
    .await??;

    for failure in &report.failures {
        eprintln!("skipped {failure}");
    }
    for warning in &report.warnings {
        eprintln!("warning {warning}");
    }

    print_table(&report);

    if !args.no_export {
        export_csv(&export_path, &report.records)?;
        println!("\nResults written to {}", export_path.display());
    }

    Ok(())
}

fn resolve_job(source: &JobSource, store: &dyn CandidateStore) -> anyhow::Result<String> {
    if let Some(text) = &source.job {
        return Ok(text.clone());
    }
    if let Some(path) = &source.job_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read job description {}", path.display()));
    }
    if let Some(index) = source.job_index {
        let jobs = store.list_job_descriptions()?;
        let Some(job) = jobs.get(index) else {
            bail!(
                "no stored job description at index {index} ({} stored)",
                jobs.len()
            );
        };
        return Ok(job.text.to_string());
    }
    // The pipeline reports the missing job description.
    Ok(String::new())
}

fn load_documents(paths: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut files: Vec<PathBuf> = std::fs::read_dir(path)
                .with_context(|| format!("failed to list {}", path.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file())
                .collect();
            files.sort();
            for file in files {
                documents.push(read_document(&file)?);
            }
        } else {
            documents.push(read_document(path)?);
        }
    }
    Ok(documents)
}

fn read_document(path: &Path) -> anyhow::Result<Document> {
    Document::from_path(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_table(report: &BatchReport) {
    println!(
        "\n{:>4}  {:<24}  {:>7}  {:<8}  {:<28}  {:<28}  {}",
        "Rank", "Candidate", "Score", "Action", "Email", "CV Name", "Skills"
    );
    for (rank, record) in report.ranked().into_iter().enumerate() {
        println!(
            "{:>4}  {:<24}  {:>7.2}  {:<8}  {:<28}  {:<28}  {}",
            rank + 1,
            truncate(record.name(), 24),
            record.match_score(),
            record.decision().as_str(),
            truncate(record.email(), 28),
            truncate(record.source_file(), 28),
            skills_cell(record),
        );
    }
    println!(
        "\n{} processed, {} selected, {} skipped",
        report.records.len(),
        report.selected_count(),
        report.failures.len()
    );
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
