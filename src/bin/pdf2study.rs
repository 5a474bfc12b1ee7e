//! CLI binary for pdf2study.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `StudyConfig` and prints results.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pdf2study::{
    extract_text, parse_quantity, GeneratedContent, GenerationRequest, Resolution, StudyConfig,
    StudyGenerator, TaskKind,
};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Structured Markdown summary
  pdf2study summary lecture.pdf

  # Ten flashcards as JSON
  pdf2study flashcards --count 10 --json lecture.pdf > cards.json

  # Quiz with a specific model and a longer timeout
  pdf2study --model llama3.2:1b --timeout 600 quiz lecture.pdf

  # Which models can serve a request right now?
  pdf2study models

LIMITS:
  flashcards   1–20 cards      (default 5)
  quiz         1–15 questions  (default 5)
  Counts outside the range are clamped; non-numeric counts use the default.

ENVIRONMENT VARIABLES:
  OLLAMA_BASE_URL     Ollama server URL (default http://localhost:11434)
  OLLAMA_MODEL        Preferred model (default llava-llama3:8b)
  PDF2STUDY_TIMEOUT   Generation timeout in seconds (default 300)
  PDFIUM_LIB_PATH     Path to libpdfium; otherwise the system library is used
  RUST_LOG            Override log filter (e.g. pdf2study=debug)

SETUP:
  1. Start the backend:  ollama serve
  2. Pull a model:       ollama pull llava-llama3:8b
  3. Generate:           pdf2study summary document.pdf
"#;

/// Generate summaries, flashcards and quizzes from PDFs with a local Ollama model.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2study",
    version,
    about = "Generate summaries, flashcards and quizzes from PDFs with a local Ollama model",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Ollama server URL.
    #[arg(long, global = true, env = "OLLAMA_BASE_URL")]
    base_url: Option<String>,

    /// Preferred model identifier.
    #[arg(long, global = true, env = "OLLAMA_MODEL")]
    model: Option<String>,

    /// Generation timeout in seconds.
    #[arg(long, global = true, env = "PDF2STUDY_TIMEOUT")]
    timeout: Option<u64>,

    /// Print results as JSON instead of formatted text.
    #[arg(long, global = true, env = "PDF2STUDY_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PDF2STUDY_VERBOSE")]
    verbose: bool,

    /// Suppress all output except results and errors.
    #[arg(short, long, global = true, env = "PDF2STUDY_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Structured Markdown summary of the document.
    Summary(TaskArgs),
    /// Question/answer flashcards.
    Flashcards(TaskArgs),
    /// Four-option multiple-choice quiz.
    Quiz(TaskArgs),
    /// List the models the backend can serve and the one that would be used.
    Models,
}

#[derive(Args, Debug)]
struct TaskArgs {
    /// Local PDF file.
    input: PathBuf,

    /// Number of flashcards or questions (ignored for summaries).
    #[arg(short, long, default_value = "5")]
    count: String,

    /// Sampling temperature (0.0–2.0). Defaults to the task's own value.
    #[arg(short, long)]
    temperature: Option<f32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner covers progress feedback, so library INFO logs are only
    // shown when it is off.
    let show_progress = !cli.quiet && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;
    let generator = StudyGenerator::new(config).context("Failed to create generator")?;

    let (task, args) = match &cli.command {
        Command::Models => return list_models(&generator, cli.json).await,
        Command::Summary(args) => (TaskKind::Summary, args),
        Command::Flashcards(args) => (TaskKind::Flashcards, args),
        Command::Quiz(args) => (TaskKind::Quiz, args),
    };

    let start = Instant::now();
    let progress = show_progress.then(|| spinner(&format!("Reading {}", args.input.display())));

    let text = extract_text(&args.input, generator.config().min_text_chars)
        .await
        .with_context(|| format!("Failed to extract text from {}", args.input.display()))?;

    let request = build_request(task, text, args);
    if let Some(bar) = &progress {
        bar.set_prefix("Generating");
        bar.set_message(describe(&request));
    }

    let result = generator.run(&request).await;
    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }
    let content = result.with_context(|| format!("{task} generation failed"))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&content).context("Failed to serialise output")?
        );
    } else {
        print_content(&content);
    }

    if !cli.quiet && !cli.json {
        eprintln!(
            "{} {} {}",
            green("✔"),
            bold(&describe_done(&content)),
            dim(&format!("{:.1}s", start.elapsed().as_secs_f64()))
        );
    }

    Ok(())
}

/// Map CLI args to `StudyConfig`.
fn build_config(cli: &Cli) -> Result<StudyConfig> {
    let mut builder = StudyConfig::builder();
    if let Some(ref url) = cli.base_url {
        builder = builder.base_url(url);
    }
    if let Some(ref model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.generation_timeout_secs(secs);
    }
    builder.build().context("Invalid configuration")
}

fn build_request(task: TaskKind, text: String, args: &TaskArgs) -> GenerationRequest {
    let count = parse_quantity(&args.count, task).unwrap_or_default();
    let request = match task {
        TaskKind::Summary => GenerationRequest::summary(text),
        TaskKind::Flashcards => GenerationRequest::flashcards(text, count),
        TaskKind::Quiz => GenerationRequest::quiz(text, count),
    };
    match args.temperature {
        Some(t) => request.with_temperature(t),
        None => request,
    }
}

async fn list_models(generator: &StudyGenerator, json: bool) -> Result<()> {
    let catalog = generator.list_models().await;
    let resolved = catalog.resolve(&generator.config().model);

    if json {
        let value = serde_json::json!({
            "base_url": generator.config().base_url,
            "models": catalog.models(),
            "resolved": resolved,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&value).context("Failed to serialise models")?
        );
        return Ok(());
    }

    if !catalog.is_available() {
        anyhow::bail!(
            "No models available at {}. Start it with `ollama serve` and install a model with `ollama pull {}`.",
            generator.config().base_url,
            generator.config().model
        );
    }

    for name in catalog.models() {
        let marker = if *name == resolved.name {
            green("●")
        } else {
            dim("○")
        };
        println!("{marker} {name}");
    }
    let note = match resolved.resolution {
        Resolution::Exact => green("preferred model is loaded"),
        Resolution::Substring => yellow(&format!(
            "'{}' matched by name",
            generator.config().model
        )),
        Resolution::FirstAvailable | Resolution::Unresolved => yellow(&format!(
            "'{}' not loaded; falling back",
            generator.config().model
        )),
    };
    eprintln!("{} {} ({note})", cyan("→"), bold(&resolved.name));
    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Extracting");
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn describe(request: &GenerationRequest) -> String {
    match request.clamped_quantity() {
        Some(n) => format!("{n} {}…", request.task),
        None => format!("{}…", request.task),
    }
}

fn describe_done(content: &GeneratedContent) -> String {
    match content {
        GeneratedContent::Summary(_) => "Summary ready".to_string(),
        GeneratedContent::Flashcards(cards) => format!("{} flashcards", cards.len()),
        GeneratedContent::Quiz(questions) => format!("{} questions", questions.len()),
    }
}

fn print_content(content: &GeneratedContent) {
    match content {
        GeneratedContent::Summary(summary) => println!("{summary}"),
        GeneratedContent::Flashcards(cards) => {
            for (i, card) in cards.iter().enumerate() {
                println!("{} {}", bold(&format!("{:>2}.", i + 1)), card.question);
                println!("    {}\n", dim(&card.answer));
            }
        }
        GeneratedContent::Quiz(questions) => {
            for (i, q) in questions.iter().enumerate() {
                println!("{} {}", bold(&format!("{:>2}.", i + 1)), q.question);
                for (j, option) in q.options.iter().enumerate() {
                    let letter = (b'A' + j as u8) as char;
                    let line = format!("    {letter}) {option}");
                    if j == q.correct_answer {
                        println!("{}", green(&line));
                    } else {
                        println!("{line}");
                    }
                }
                if !q.explanation.is_empty() {
                    println!("    {}", dim(&q.explanation));
                }
                println!();
            }
        }
    }
}
