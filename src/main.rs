// medsum CLI: summarize medical reports from text, files or the bundled sample
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use medsum::clinical::{anonymize, summarize_structured, DiagnosisRules};
use medsum::config::DEFAULT_LOG_FILTER;
use medsum::input::{is_supported, read_document, SAMPLE_REPORT};
use medsum::nlp::ChunkSummarizer;
use medsum::ollama::OllamaSummarizer;
use medsum::{Strategy, Summarizer, Summary, SummaryConfig, Tone};

#[derive(Parser)]
#[command(name = "medsum", about = "Medical report summarizer (extractive, abstractive, structured)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize one report
    Summarize {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        options: SummaryArgs,
        /// Print the summary record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the structured fields found in a report
    Fields {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, value_enum, default_value_t = Tone::Patient)]
        tone: Tone,
    },
    /// Print a report with PHI redacted
    Anonymize {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Summarize every txt/md/pdf report under a directory into a JSON report
    Batch {
        #[arg(short, long)]
        dir: PathBuf,
        #[arg(short, long, default_value = "medsum_report.json")]
        out: PathBuf,
        #[command(flatten)]
        options: SummaryArgs,
    },
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Report file (.txt, .md or .pdf)
    #[arg(short, long, conflicts_with_all = ["text", "sample"])]
    file: Option<PathBuf>,
    /// Report text passed directly
    #[arg(short, long, conflicts_with = "sample")]
    text: Option<String>,
    /// Use the bundled sample report
    #[arg(long)]
    sample: bool,
}

#[derive(Args, Debug, Default)]
struct SummaryArgs {
    /// JSON file with default settings; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    tone: Option<Tone>,
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,
    /// Sentences to keep (extractive)
    #[arg(long)]
    sentences: Option<usize>,
    /// Words per chunk (abstractive)
    #[arg(long)]
    chunk_words: Option<usize>,
    /// Overlap between chunks in percent, 0 <= x < 100 (abstractive)
    #[arg(long)]
    overlap: Option<f64>,
    #[arg(long)]
    min_length: Option<usize>,
    #[arg(long)]
    max_length: Option<usize>,
    /// Keep personal details instead of masking them
    #[arg(long)]
    no_mask: bool,
    /// Optional Ollama model override (e.g. gemma3:4b). If omitted, OLLAMA_MODEL or the smallest installed model is used.
    #[arg(short = 'm', long = "model")]
    model: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
struct BatchEntry {
    path: String,
    summary: Option<String>,
    error: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
struct BatchReport {
    strategy: Strategy,
    tone: Tone,
    entries: Vec<BatchEntry>,
}

fn load_source(source: &SourceArgs) -> Result<String> {
    if let Some(path) = &source.file {
        return Ok(read_document(path)?);
    }
    if let Some(text) = &source.text {
        return Ok(text.clone());
    }
    if source.sample {
        return Ok(SAMPLE_REPORT.to_string());
    }
    bail!("no input: pass --file, --text or --sample")
}

fn resolve_config(options: &SummaryArgs) -> Result<SummaryConfig> {
    let mut config = match &options.config {
        Some(path) => SummaryConfig::from_json_file(path)
            .map_err(|e| anyhow!("failed to load config {}: {}", path.display(), e))?,
        None => SummaryConfig::default(),
    };
    if let Some(tone) = options.tone {
        config.tone = tone;
    }
    if let Some(strategy) = options.strategy {
        config.strategy = strategy;
    }
    if let Some(n) = options.sentences {
        config.sentence_count = n;
    }
    if let Some(n) = options.chunk_words {
        config.chunk_words = n;
    }
    if let Some(p) = options.overlap {
        config.overlap_percent = p;
    }
    if let Some(n) = options.min_length {
        config.min_length = n;
    }
    if let Some(n) = options.max_length {
        config.max_length = n;
    }
    if options.no_mask {
        config.mask_phi = false;
    }
    config.validate()?;
    Ok(config)
}

fn progress_style() -> Result<ProgressStyle> {
    Ok(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    )
}

fn run_summarize(text: &str, config: SummaryConfig, model: Option<String>) -> Result<Summary> {
    let ollama = match config.strategy {
        Strategy::Abstractive => Some(OllamaSummarizer::detect(model)),
        _ => None,
    };
    let mut summarizer = Summarizer::new(config)?;
    let mut pb = None;
    if let Some(ollama) = &ollama {
        summarizer = summarizer.with_capability(ollama);
        let bar = ProgressBar::new(0);
        bar.set_style(progress_style()?);
        bar.set_message(format!("summarizing chunks with {}", ollama.model));
        pb = Some(bar);
    }

    let result = summarizer.summarize_with_progress(text, |p| {
        if let Some(pb) = &pb {
            pb.set_length(p.total as u64);
            pb.set_position(p.completed as u64);
        }
    });
    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }
    Ok(result?)
}

fn print_summary(summary: &Summary) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    writeln!(
        stdout,
        "Summary ({:?}, {:?} tone{})",
        summary.strategy,
        summary.tone,
        if summary.masked { ", PHI masked" } else { "" }
    )?;
    stdout.reset()?;
    writeln!(stdout, "{}", summary.text)?;
    Ok(())
}

fn collect_reports(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_supported(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

fn summarize_dir(
    dir: &Path,
    out: &Path,
    config: SummaryConfig,
    capability: Option<&dyn ChunkSummarizer>,
) -> Result<BatchReport> {
    let files = collect_reports(dir);
    info!("found {} report(s) under {}", files.len(), dir.display());

    let strategy = config.strategy;
    let tone = config.tone;
    let mut summarizer = Summarizer::new(config)?;
    if let Some(capability) = capability {
        summarizer = summarizer.with_capability(capability);
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(progress_style()?);

    let entries: Vec<BatchEntry> = files
        .par_iter()
        .map(|p| {
            let outcome = read_document(p)
                .map_err(|e| e.to_string())
                .and_then(|text| summarizer.summarize(&text).map_err(|e| e.to_string()));
            pb.inc(1);
            match outcome {
                Ok(summary) => BatchEntry {
                    path: p.to_string_lossy().to_string(),
                    summary: Some(summary.text),
                    error: None,
                },
                Err(error) => {
                    warn!("{}: {}", p.display(), error);
                    BatchEntry {
                        path: p.to_string_lossy().to_string(),
                        summary: None,
                        error: Some(error),
                    }
                }
            }
        })
        .collect();

    pb.finish_with_message("summarizing reports");

    let report = BatchReport {
        strategy,
        tone,
        entries,
    };
    let fout = File::create(out)?;
    serde_json::to_writer_pretty(fout, &report)?;
    println!("Wrote report to {}", out.display());
    Ok(report)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Summarize {
            source,
            options,
            json,
        } => {
            let text = load_source(&source)?;
            let config = resolve_config(&options)?;
            let summary = run_summarize(&text, config, options.model.clone())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary)?;
            }
        }
        Commands::Fields { source, tone } => {
            let text = load_source(&source)?;
            let structured = summarize_structured(&text, tone, &DiagnosisRules::default(), false);
            println!("{}", serde_json::to_string_pretty(&structured)?);
        }
        Commands::Anonymize { source } => {
            let text = load_source(&source)?;
            println!("{}", anonymize(&text));
        }
        Commands::Batch { dir, out, options } => {
            let config = resolve_config(&options)?;
            if config.strategy == Strategy::Abstractive {
                let ollama = OllamaSummarizer::detect(options.model.clone());
                summarize_dir(&dir, &out, config, Some(&ollama))?;
            } else {
                summarize_dir(&dir, &out, config, None)?;
            }
        }
    }
    Ok(())
}
