use anyhow::{Context, Result};
use bookradar::config::{find_config_file, get_config, load_config, Config};
use bookradar::models::{Candidate, IdentificationRequest};
use bookradar::sources::{parse_results, BookradarSource, Source};
use bookradar::utils::check_isbn;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bookradar - look up book metadata on bookradar.org
#[derive(Parser, Debug)]
#[command(name = "bookradar")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Look up book metadata (title, authors, ISBN, publisher, year) on bookradar.org", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search bookradar.org for a book
    #[command(alias = "i")]
    Identify {
        /// Book title
        #[arg(long, short)]
        title: Option<String>,

        /// Author name (repeatable; only the first is searched for)
        #[arg(long, short)]
        author: Vec<String>,

        /// ISBN-10 or ISBN-13
        #[arg(long)]
        isbn: Option<String>,

        /// Request timeout in seconds (defaults to the configured value)
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Extract candidates from a saved search results page
    #[command(alias = "p")]
    Parse {
        /// HTML file to parse
        file: PathBuf,

        /// ISBN to fall back on for results without one
        #[arg(long)]
        isbn: Option<String>,
    },

    /// Show what this source declares to its host
    Info,

    /// Write a configuration file with default values
    InitConfig {
        /// Where to write the file
        #[arg(default_value = "bookradar.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(find_config_file);
    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => get_config(),
    };

    let env_filter = log_level(cli.verbose, cli.quiet, &config.logging.level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("bookradar={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    match cli.command {
        Commands::Identify {
            title,
            author,
            isbn,
            timeout,
        } => {
            let mut request = IdentificationRequest::new().authors(author);
            if let Some(title) = title {
                request = request.title(title);
            }
            if let Some(isbn) = isbn {
                request = request.isbn(isbn);
            }

            let timeout = timeout
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.source.timeout());

            let candidates = identify(&config, &request, timeout).await?;
            output_candidates(&candidates, cli.output);
        }
        Commands::Parse { file, isbn } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let isbn = isbn.as_deref().and_then(check_isbn);

            let candidates: Vec<Candidate> = parse_results(&html, isbn.as_deref())
                .into_iter()
                .map(Candidate::cleaned)
                .collect();
            output_candidates(&candidates, cli.output);
        }
        Commands::Info => {
            let source = BookradarSource::with_config(config.source.clone())?;
            output_info(&source, cli.output);
        }
        Commands::InitConfig { path } => {
            Config::default().save(&path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

/// `-q` and `-v` override the configured level
fn log_level(verbose: u8, quiet: bool, configured: &str) -> &str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => configured,
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

async fn identify(
    config: &Config,
    request: &IdentificationRequest,
    timeout: Duration,
) -> Result<Vec<Candidate>> {
    let source = BookradarSource::with_config(config.source.clone())?;

    let abort = Arc::new(AtomicBool::new(false));
    let abort_on_signal = Arc::clone(&abort);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            abort_on_signal.store(true, Ordering::SeqCst);
        }
    });

    let mut candidates: Vec<Candidate> = Vec::new();
    source
        .identify(request, &mut candidates, &abort, timeout)
        .await?;

    if abort.load(Ordering::SeqCst) {
        tracing::warn!("Interrupted");
    }

    Ok(candidates)
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn output_candidates(candidates: &[Candidate], format: OutputFormat) {
    match resolve_format(format) {
        OutputFormat::Json => match serde_json::to_string_pretty(candidates) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize results: {}", e),
        },
        OutputFormat::Plain => {
            for candidate in candidates {
                println!("{} - {}", candidate.title, candidate.authors_display());
                if let Some(ref isbn) = candidate.isbn {
                    println!("  ISBN: {}", isbn);
                }
                if let Some(ref publisher) = candidate.publisher {
                    println!("  Publisher: {}", publisher);
                }
                if let Some(year) = candidate.year() {
                    println!("  Year: {}", year);
                }
                println!();
            }
        }
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["#", "Title", "Authors", "ISBN", "Publisher", "Year"]);

            for (idx, candidate) in candidates.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(idx + 1),
                    Cell::new(truncate(&candidate.title, 50)).add_attribute(Attribute::Bold),
                    Cell::new(truncate(&candidate.authors_display(), 30)),
                    Cell::new(candidate.isbn.clone().unwrap_or_default()),
                    Cell::new(candidate.publisher.clone().unwrap_or_default()),
                    Cell::new(candidate.year().map(|y| y.to_string()).unwrap_or_default()),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Auto => unreachable!(),
    }
}

fn output_info(source: &BookradarSource, format: OutputFormat) {
    let info = source.info();
    let fields = source.touched_fields().field_names();

    match resolve_format(format) {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "id": source.id(),
                "info": info,
                "capabilities": ["identify"],
                "touched_fields": fields,
                "customizable": source.is_customizable(),
                "cached_cover_url_is_reliable": source.cached_cover_url_is_reliable(),
                "url_pattern": source.config().url_pattern,
            });
            println!("{}", value);
        }
        _ => {
            let (major, minor, patch) = info.version;
            println!("{} {}.{}.{} by {}", info.name, major, minor, patch, info.author);
            println!("  {}", info.description);
            println!("  Platforms: {}", info.supported_platforms.join(", "));
            println!("  Touched fields: {}", fields.join(", "));
            println!("  Search URL: {}", source.config().url_pattern);
        }
    }
}
